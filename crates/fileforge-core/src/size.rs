// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable byte counts for file listings and the activity history.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
const STEP: u64 = 1024;

/// Format a byte count with one decimal, e.g. `1536` → `"1.5 KB"` and
/// `1048576` → `"1.0 MB"`.
///
/// The unit is `floor(log_1024(bytes))` clamped to GB; anything larger keeps
/// the GB exponent and grows the numeric prefix instead.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut exponent = 0usize;
    let mut divisor = 1u64;
    while exponent + 1 < UNITS.len() && bytes / divisor >= STEP {
        divisor *= STEP;
        exponent += 1;
    }

    format!("{:.1} {}", bytes as f64 / divisor as f64, UNITS[exponent])
}
