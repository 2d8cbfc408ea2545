// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the FileForge document toolkit.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FileforgeError;
use crate::size::format_size;

// ---------------------------------------------------------------------------
// Activity history
// ---------------------------------------------------------------------------

/// One entry of the activity history: an artifact a tool produced and saved.
///
/// Field names on the wire (`fileName`, `tool`, `size`) are kept stable so
/// that histories written by older builds keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "tool")]
    pub tool_name: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

impl ActivityRecord {
    /// Create a record with a fresh id and the current time.
    pub fn new(
        file_name: impl Into<String>,
        tool_name: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.into(),
            tool_name: tool_name.into(),
            timestamp: Utc::now().timestamp_millis(),
            size_bytes,
        }
    }

    /// One-line summary used by the history listing.
    pub fn display_line(&self) -> String {
        let when = chrono::DateTime::from_timestamp_millis(self.timestamp)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown time".to_string());
        format!(
            "{}  {} · {}  ({})",
            self.file_name,
            self.tool_name,
            format_size(self.size_bytes),
            when
        )
    }
}

// ---------------------------------------------------------------------------
// Tools
// ---------------------------------------------------------------------------

/// The tools offered by the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    TxtToPdf,
    PdfToText,
    ImageToPdf,
    PdfToImage,
    Merge,
    Split,
    Compress,
    Watermark,
    Rotate,
    PageNumbers,
}

/// Whether a tool converts between formats or edits a PDF in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolCategory {
    Conversion,
    Utility,
}

impl ToolKind {
    pub const ALL: [ToolKind; 10] = [
        Self::TxtToPdf,
        Self::PdfToText,
        Self::ImageToPdf,
        Self::PdfToImage,
        Self::Merge,
        Self::Split,
        Self::Compress,
        Self::Watermark,
        Self::Rotate,
        Self::PageNumbers,
    ];

    /// Name recorded in the activity history.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TxtToPdf => "TXT to PDF",
            Self::PdfToText => "PDF to Text",
            Self::ImageToPdf => "Image to PDF",
            Self::PdfToImage => "PDF to Image",
            Self::Merge => "Merge PDFs",
            Self::Split => "Split PDF",
            Self::Compress => "Compress PDF",
            Self::Watermark => "Watermark PDF",
            Self::Rotate => "Rotate PDF",
            Self::PageNumbers => "Page Numbers",
        }
    }

    /// Stable identifier, also the CLI subcommand name.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::TxtToPdf => "txt-to-pdf",
            Self::PdfToText => "pdf-to-text",
            Self::ImageToPdf => "image-to-pdf",
            Self::PdfToImage => "pdf-pages",
            Self::Merge => "merge",
            Self::Split => "split",
            Self::Compress => "compress",
            Self::Watermark => "watermark",
            Self::Rotate => "rotate",
            Self::PageNumbers => "page-numbers",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::TxtToPdf => "Convert plain text files to PDF documents with pagination",
            Self::PdfToText => "Extract text content from PDF files",
            Self::ImageToPdf => "Convert JPG, PNG, or WebP images to PDF",
            Self::PdfToImage => "Extract individual pages from a PDF",
            Self::Merge => "Combine multiple PDF files into one document",
            Self::Split => "Split a PDF into individual pages or ranges",
            Self::Compress => "Reduce PDF file size while preserving quality",
            Self::Watermark => "Add custom text watermarks to every page",
            Self::Rotate => "Rotate individual pages or entire PDF documents",
            Self::PageNumbers => "Add page numbers to your PDF documents",
        }
    }

    pub fn category(&self) -> ToolCategory {
        match self {
            Self::TxtToPdf | Self::PdfToText | Self::ImageToPdf | Self::PdfToImage => {
                ToolCategory::Conversion
            }
            _ => ToolCategory::Utility,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Supported input document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Pdf,
    Jpeg,
    Png,
    Webp,
    PlainText,
}

impl DocumentType {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::PlainText => "text/plain",
        }
    }

    /// Infer document type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            "txt" | "text" | "md" => Some(Self::PlainText),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Jpeg | Self::Png | Self::Webp)
    }
}

/// A user-selected file, fully read into memory.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Name with a trailing `.pdf` (any case) removed.
    pub fn pdf_base_name(&self) -> &str {
        let name = self.name.as_str();
        let cut = name.len().saturating_sub(4);
        match name.get(cut..) {
            Some(ext) if name.len() > 4 && ext.eq_ignore_ascii_case(".pdf") => &name[..cut],
            _ => name,
        }
    }

    /// Name with whatever extension it carries removed.
    pub fn stem(&self) -> &str {
        match self.name.rfind('.') {
            Some(dot) if dot > 0 => &self.name[..dot],
            _ => &self.name,
        }
    }

    pub fn document_type(&self) -> Option<DocumentType> {
        let (_, ext) = self.name.rsplit_once('.')?;
        DocumentType::from_extension(ext)
    }
}

/// A produced output file, offered for saving once its pipeline succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// ---------------------------------------------------------------------------
// Page geometry
// ---------------------------------------------------------------------------

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height), portrait.
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::A3 => (297.0, 420.0),
            Self::A5 => (148.0, 210.0),
            Self::Letter => (215.9, 279.4),
            Self::Legal => (215.9, 355.6),
        }
    }
}

impl FromStr for PaperSize {
    type Err = FileforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "a3" => Ok(Self::A3),
            "a5" => Ok(Self::A5),
            "letter" => Ok(Self::Letter),
            "legal" => Ok(Self::Legal),
            other => Err(FileforgeError::InvalidOption(format!(
                "unknown paper size '{other}'"
            ))),
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Orient a portrait (width, height) pair.
    pub fn apply(&self, (w, h): (f32, f32)) -> (f32, f32) {
        match self {
            Self::Portrait => (w.min(h), w.max(h)),
            Self::Landscape => (w.max(h), w.min(h)),
        }
    }
}

impl FromStr for Orientation {
    type Err = FileforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            other => Err(FileforgeError::InvalidOption(format!(
                "unknown orientation '{other}'"
            ))),
        }
    }
}

/// Vertical zone of an [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalZone {
    Top,
    Middle,
    Bottom,
}

/// Horizontal zone of an [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalZone {
    Left,
    Center,
    Right,
}

/// Named placement position on a page, e.g. `bottom-center`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub vertical: VerticalZone,
    pub horizontal: HorizontalZone,
}

impl Anchor {
    pub const TOP_LEFT: Anchor = Anchor::new(VerticalZone::Top, HorizontalZone::Left);
    pub const TOP_CENTER: Anchor = Anchor::new(VerticalZone::Top, HorizontalZone::Center);
    pub const TOP_RIGHT: Anchor = Anchor::new(VerticalZone::Top, HorizontalZone::Right);
    pub const CENTER: Anchor = Anchor::new(VerticalZone::Middle, HorizontalZone::Center);
    pub const BOTTOM_LEFT: Anchor = Anchor::new(VerticalZone::Bottom, HorizontalZone::Left);
    pub const BOTTOM_CENTER: Anchor = Anchor::new(VerticalZone::Bottom, HorizontalZone::Center);
    pub const BOTTOM_RIGHT: Anchor = Anchor::new(VerticalZone::Bottom, HorizontalZone::Right);

    /// The anchors offered for page numbers.
    pub const PAGE_NUMBER_POSITIONS: [Anchor; 6] = [
        Self::BOTTOM_CENTER,
        Self::BOTTOM_LEFT,
        Self::BOTTOM_RIGHT,
        Self::TOP_CENTER,
        Self::TOP_LEFT,
        Self::TOP_RIGHT,
    ];

    pub const fn new(vertical: VerticalZone, horizontal: HorizontalZone) -> Self {
        Self {
            vertical,
            horizontal,
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::BOTTOM_CENTER
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vertical = match self.vertical {
            VerticalZone::Top => "top",
            VerticalZone::Middle => "middle",
            VerticalZone::Bottom => "bottom",
        };
        let horizontal = match self.horizontal {
            HorizontalZone::Left => "left",
            HorizontalZone::Center => "center",
            HorizontalZone::Right => "right",
        };
        write!(f, "{vertical}-{horizontal}")
    }
}

impl FromStr for Anchor {
    type Err = FileforgeError;

    /// Parses `top-left`, `bottom-center`, `middle-right`, ... and the
    /// shorthand `center`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized == "center" {
            return Ok(Self::CENTER);
        }

        let invalid = || FileforgeError::InvalidOption(format!("unknown position '{s}'"));
        let (v, h) = normalized.split_once('-').ok_or_else(invalid)?;
        let vertical = match v {
            "top" => VerticalZone::Top,
            "middle" => VerticalZone::Middle,
            "bottom" => VerticalZone::Bottom,
            _ => return Err(invalid()),
        };
        let horizontal = match h {
            "left" => HorizontalZone::Left,
            "center" => HorizontalZone::Center,
            "right" => HorizontalZone::Right,
            _ => return Err(invalid()),
        };
        Ok(Self::new(vertical, horizontal))
    }
}

/// An RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

// ---------------------------------------------------------------------------
// Per-tool options
// ---------------------------------------------------------------------------

/// Watermark colour presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WatermarkColor {
    #[default]
    Gray,
    Red,
    Blue,
}

impl WatermarkColor {
    pub fn rgb(&self) -> Rgb {
        match self {
            Self::Gray => Rgb::new(0.5, 0.5, 0.5),
            Self::Red => Rgb::new(0.8, 0.1, 0.1),
            Self::Blue => Rgb::new(0.1, 0.1, 0.8),
        }
    }
}

impl FromStr for WatermarkColor {
    type Err = FileforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gray" | "grey" => Ok(Self::Gray),
            "red" => Ok(Self::Red),
            "blue" => Ok(Self::Blue),
            other => Err(FileforgeError::InvalidOption(format!(
                "unknown watermark colour '{other}'"
            ))),
        }
    }
}

/// Options for the watermark tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkOptions {
    pub text: String,
    pub font_size: f32,
    /// Fill opacity in `0.0..=1.0`.
    pub opacity: f32,
    pub color: WatermarkColor,
    /// Counter-clockwise rotation in degrees.
    pub rotation_deg: f32,
}

impl Default for WatermarkOptions {
    fn default() -> Self {
        Self {
            text: "CONFIDENTIAL".to_string(),
            font_size: 48.0,
            opacity: 0.15,
            color: WatermarkColor::Gray,
            rotation_deg: 45.0,
        }
    }
}

/// How page numbers are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageNumberFormat {
    /// `7`
    #[default]
    Plain,
    /// `- 7 -`
    Dash,
    /// `7 of 12`
    OfTotal,
}

impl PageNumberFormat {
    /// Render `number`; `last` is the number printed on the final page.
    pub fn render(&self, number: i64, last: i64) -> String {
        match self {
            Self::Plain => number.to_string(),
            Self::Dash => format!("- {number} -"),
            Self::OfTotal => format!("{number} of {last}"),
        }
    }
}

impl FromStr for PageNumberFormat {
    type Err = FileforgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "dash" => Ok(Self::Dash),
            "of" | "of-total" => Ok(Self::OfTotal),
            other => Err(FileforgeError::InvalidOption(format!(
                "unknown page number format '{other}'"
            ))),
        }
    }
}

/// Options for the page-number tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageNumberOptions {
    pub position: Anchor,
    pub start_number: i64,
    pub font_size: f32,
    pub format: PageNumberFormat,
    /// Distance from the page edge in points.
    pub margin: f32,
}

impl Default for PageNumberOptions {
    fn default() -> Self {
        Self {
            position: Anchor::BOTTOM_CENTER,
            start_number: 1,
            font_size: 12.0,
            format: PageNumberFormat::Plain,
            margin: 36.0,
        }
    }
}

/// Which pages the rotate tool turns, and by how much (degrees, additive).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationPlan {
    /// Every page by the same angle.
    All(i32),
    /// One angle per page, by zero-based index; missing entries mean 0.
    PerPage(Vec<i32>),
}

impl RotationPlan {
    /// Additional rotation for the page at `index`.
    pub fn angle_for(&self, index: usize) -> i32 {
        match self {
            Self::All(angle) => *angle,
            Self::PerPage(angles) => angles.get(index).copied().unwrap_or(0),
        }
    }
}

impl Default for RotationPlan {
    fn default() -> Self {
        Self::All(90)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_stable_field_names() {
        let record = ActivityRecord {
            id: "abc".into(),
            file_name: "merged.pdf".into(),
            tool_name: "Merge PDFs".into(),
            timestamp: 1_700_000_000_000,
            size_bytes: 2048,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fileName"], "merged.pdf");
        assert_eq!(json["tool"], "Merge PDFs");
        assert_eq!(json["size"], 2048);
        assert_eq!(json["timestamp"], 1_700_000_000_000i64);
    }

    #[test]
    fn new_records_get_distinct_ids() {
        let a = ActivityRecord::new("a.pdf", "Split PDF", 1);
        let b = ActivityRecord::new("a.pdf", "Split PDF", 1);
        assert_ne!(a.id, b.id);
        assert!(a.timestamp > 0);
    }

    #[test]
    fn display_line_contains_size() {
        let record = ActivityRecord::new("out.pdf", "Compress PDF", 1536);
        let line = record.display_line();
        assert!(line.contains("out.pdf"));
        assert!(line.contains("1.5 KB"));
    }

    #[test]
    fn pdf_base_name_strips_extension_case_insensitively() {
        assert_eq!(InputFile::new("Report.PDF", vec![]).pdf_base_name(), "Report");
        assert_eq!(InputFile::new("a.pdf", vec![]).pdf_base_name(), "a");
        assert_eq!(InputFile::new("notes.txt", vec![]).pdf_base_name(), "notes.txt");
        assert_eq!(InputFile::new(".pdf", vec![]).pdf_base_name(), ".pdf");
    }

    #[test]
    fn stem_strips_any_extension() {
        assert_eq!(InputFile::new("notes.final.txt", vec![]).stem(), "notes.final");
        assert_eq!(InputFile::new("README", vec![]).stem(), "README");
    }

    #[test]
    fn anchor_round_trips_through_strings() {
        for anchor in Anchor::PAGE_NUMBER_POSITIONS {
            let parsed: Anchor = anchor.to_string().parse().unwrap();
            assert_eq!(parsed, anchor);
        }
        assert_eq!("center".parse::<Anchor>().unwrap(), Anchor::CENTER);
        assert!("left-bottom".parse::<Anchor>().is_err());
    }

    #[test]
    fn page_number_formats() {
        assert_eq!(PageNumberFormat::Plain.render(3, 10), "3");
        assert_eq!(PageNumberFormat::Dash.render(3, 10), "- 3 -");
        assert_eq!(PageNumberFormat::OfTotal.render(3, 10), "3 of 10");
    }

    #[test]
    fn rotation_plan_defaults_missing_pages_to_zero() {
        let plan = RotationPlan::PerPage(vec![90, 0, 180]);
        assert_eq!(plan.angle_for(2), 180);
        assert_eq!(plan.angle_for(7), 0);
        assert_eq!(RotationPlan::All(270).angle_for(42), 270);
    }

    #[test]
    fn orientation_swaps_dimensions() {
        assert_eq!(Orientation::Landscape.apply((210.0, 297.0)), (297.0, 210.0));
        assert_eq!(Orientation::Portrait.apply((210.0, 297.0)), (210.0, 297.0));
    }

    #[test]
    fn tool_slugs_are_unique() {
        let mut slugs: Vec<_> = ToolKind::ALL.iter().map(|t| t.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), ToolKind::ALL.len());
    }
}
