// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — loads the configuration, opens the activity
// history and runs tools on behalf of the CLI.
//
// A tool run is: validate inputs, run the pipeline on a blocking thread,
// save every artifact, then record one history entry per saved artifact.
// Only one run may be in flight at a time.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fileforge_core::config::HistoryBackend;
use fileforge_core::error::{FileforgeError, Result};
use fileforge_core::{ActivityRecord, AppConfig};
use fileforge_document::tools::{self, ToolOutput, ToolRequest};
use fileforge_history::{ActivityLog, FileStore, MemoryStore, SqliteStore};
use tracing::{error, info, instrument, warn};

use super::export::{DirectoryExporter, Exporter};

/// Everything a successful tool run left behind.
#[derive(Debug)]
pub struct ToolRun {
    pub output: ToolOutput,
    /// Where each artifact was saved, in artifact order.
    pub saved: Vec<PathBuf>,
    /// History entries written for the saved artifacts.
    pub records: Vec<ActivityRecord>,
}

/// Shared application services.
///
/// All fields are Arc-wrapped so the struct can be cloned into async tasks.
#[derive(Clone)]
pub struct AppServices {
    activity_log: Arc<Mutex<ActivityLog>>,
    exporter: Arc<dyn Exporter>,
    processing: Arc<AtomicBool>,
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Initialise all services from the data directory.
    ///
    /// A missing or unreadable `config.json` yields the defaults; a history
    /// backend that cannot be opened leaves the history detached.
    /// `output_dir` overrides the configured output directory.
    pub fn init(data_dir: &Path, output_dir: Option<PathBuf>) -> Self {
        info!(path = %data_dir.display(), "initialising app services");

        let config = load_config(data_dir).unwrap_or_default();
        let output_dir = output_dir
            .or_else(|| config.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));
        let activity_log = open_history(data_dir, config.history_backend);

        info!(
            output = %output_dir.display(),
            backend = ?config.history_backend,
            persistent = activity_log.is_persistent(),
            "app services initialised"
        );

        Self::with_parts(
            data_dir.to_path_buf(),
            config,
            activity_log,
            DirectoryExporter::new(output_dir),
        )
    }

    /// Assemble services from already-built parts.
    pub fn with_parts(
        data_dir: PathBuf,
        config: AppConfig,
        activity_log: ActivityLog,
        exporter: impl Exporter + 'static,
    ) -> Self {
        Self {
            activity_log: Arc::new(Mutex::new(activity_log)),
            exporter: Arc::new(exporter),
            processing: Arc::new(AtomicBool::new(false)),
            data_dir,
            config: Arc::new(Mutex::new(config)),
        }
    }

    // -- Tools ---------------------------------------------------------------

    /// Reject inputs the tools should never see.
    pub fn validate_inputs(&self, request: &ToolRequest) -> Result<()> {
        let config = self.config();
        let limit = config.max_file_bytes();
        for file in request.inputs() {
            if file.size() > limit {
                return Err(FileforgeError::FileTooLarge {
                    name: file.name.clone(),
                    limit_mb: config.max_file_mb,
                });
            }
        }
        Ok(())
    }

    /// Run a tool end to end.
    ///
    /// Fails with [`FileforgeError::Busy`] while another run is in flight.
    /// The processing flag is released whether the run succeeds or fails.
    #[instrument(skip_all, fields(tool = %request.kind()))]
    pub async fn run_tool(&self, request: ToolRequest) -> Result<ToolRun> {
        let _processing = ProcessingGuard::acquire(&self.processing)?;
        self.validate_inputs(&request)?;

        let kind = request.kind();
        let output = tokio::task::spawn_blocking(move || tools::run(&request))
            .await
            .map_err(|err| FileforgeError::Task(err.to_string()))??;

        let mut saved = Vec::with_capacity(output.artifacts.len());
        let mut records = Vec::with_capacity(output.artifacts.len());
        for artifact in &output.artifacts {
            let path = self.exporter.export(artifact)?;
            let record = self
                .log()
                .append(&artifact.file_name, kind.display_name(), artifact.size());
            saved.push(path);
            records.push(record);
        }

        info!(artifacts = saved.len(), "tool run complete");
        Ok(ToolRun {
            output,
            saved,
            records,
        })
    }

    // -- Activity history ----------------------------------------------------

    /// History entries, most recent first.
    pub fn history(&self) -> Vec<ActivityRecord> {
        self.log().list()
    }

    /// Delete every history entry.
    pub fn clear_history(&self) {
        self.log().clear();
        info!("activity history cleared");
    }

    /// Whether history entries survive this process.
    pub fn history_is_persistent(&self) -> bool {
        self.log().is_persistent()
    }

    fn log(&self) -> MutexGuard<'_, ActivityLog> {
        self.activity_log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -- Config Persistence --------------------------------------------------

    /// Get a clone of the current config.
    pub fn config(&self) -> AppConfig {
        self.config.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config.clone();
        persist_config(&self.data_dir, config)
    }

    /// Path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Holds the processing flag for the duration of a tool run.
struct ProcessingGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> ProcessingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| FileforgeError::Busy)?;
        Ok(Self { flag })
    }
}

impl Drop for ProcessingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// -- History backend ---------------------------------------------------------

const HISTORY_DB: &str = "history.db";

fn open_history(data_dir: &Path, backend: HistoryBackend) -> ActivityLog {
    match backend {
        HistoryBackend::File => ActivityLog::new(FileStore::new(data_dir)),
        HistoryBackend::Memory => ActivityLog::new(MemoryStore::new()),
        HistoryBackend::Sqlite => match SqliteStore::open(data_dir.join(HISTORY_DB)) {
            Ok(store) => ActivityLog::new(store),
            Err(err) => {
                error!(error = %err, "history database unavailable, history will not be kept");
                ActivityLog::detached()
            }
        },
    }
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring malformed config");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
