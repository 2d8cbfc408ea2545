// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text stamps — single runs of text drawn on top of an existing page, used
// for watermarks and page numbers.
//
// The stamp is written as an extra content stream. The page's original
// content is wrapped in q/Q so that graphics state it leaves behind cannot
// move or recolour the stamp.

use fileforge_core::error::{FileforgeError, Result};
use fileforge_core::types::Rgb;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use tracing::{debug, warn};

use super::reader::resolve_dict;
use crate::layout::StandardFont;

/// Text to draw at a fixed position on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStamp {
    pub text: String,
    /// Baseline origin in points from the bottom-left corner.
    pub x: f32,
    pub y: f32,
    pub font: StandardFont,
    pub size: f32,
    pub color: Rgb,
    /// Fill opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Counter-clockwise rotation around the origin, in degrees.
    pub rotation_deg: f32,
}

impl TextStamp {
    /// Opaque black, unrotated text.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font: StandardFont, size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font,
            size,
            color: Rgb::new(0.0, 0.0, 0.0),
            opacity: 1.0,
            rotation_deg: 0.0,
        }
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation_deg = degrees;
        self
    }
}

fn font_resource_name(font: StandardFont) -> &'static str {
    match font {
        StandardFont::Helvetica => "FfHelv",
        StandardFont::HelveticaBold => "FfHelvBold",
    }
}

/// Encode for a WinAnsi font; characters outside Latin-1 become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => b'?',
        })
        .collect()
}

/// Write `text_stamp` onto the page `page_id`.
///
/// `resources` is the page's effective resource dictionary; it is extended
/// with the stamp's font (and opacity state) and stored on the page itself.
pub(crate) fn apply(
    document: &mut Document,
    page_id: ObjectId,
    mut resources: Dictionary,
    text_stamp: &TextStamp,
) -> Result<()> {
    let font_name = font_resource_name(text_stamp.font);
    let mut fonts = sub_dictionary(document, &resources, b"Font");
    if !fonts.has(font_name.as_bytes()) {
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => text_stamp.font.base_font_name(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font_name, Object::Reference(font_id));
    }
    resources.set("Font", fonts);

    let state_name = (text_stamp.opacity < 1.0)
        .then(|| format!("FfGs{}", (text_stamp.opacity * 1000.0).round() as u32));
    if let Some(state_name) = &state_name {
        let mut states = sub_dictionary(document, &resources, b"ExtGState");
        states.set(
            state_name.as_str(),
            dictionary! {
                "Type" => "ExtGState",
                "ca" => text_stamp.opacity,
                "CA" => text_stamp.opacity,
            },
        );
        resources.set("ExtGState", states);
    }

    let content = stamp_operations(text_stamp, font_name, state_name.as_deref())
        .encode()
        .map_err(|err| FileforgeError::Pdf(format!("failed to encode stamp: {}", err)))?;

    document
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|err| FileforgeError::Pdf(format!("cannot read page object {:?}: {}", page_id, err)))?
        .set("Resources", resources);
    append_content(document, page_id, content)?;

    debug!(x = text_stamp.x, y = text_stamp.y, size = text_stamp.size, "Text stamped");
    Ok(())
}

fn sub_dictionary(document: &Document, resources: &Dictionary, key: &[u8]) -> Dictionary {
    resources
        .get(key)
        .ok()
        .and_then(|obj| resolve_dict(document, obj))
        .unwrap_or_else(Dictionary::new)
}

fn stamp_operations(text_stamp: &TextStamp, font_name: &str, state_name: Option<&str>) -> Content {
    let (sin, cos) = text_stamp.rotation_deg.to_radians().sin_cos();
    let Rgb { r, g, b } = text_stamp.color;

    let mut operations = vec![Operation::new("q", vec![])];
    if let Some(state_name) = state_name {
        operations.push(Operation::new("gs", vec![Object::Name(state_name.as_bytes().to_vec())]));
    }
    operations.extend([
        Operation::new("rg", vec![r.into(), g.into(), b.into()]),
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![Object::Name(font_name.as_bytes().to_vec()), text_stamp.size.into()],
        ),
        Operation::new(
            "Tm",
            vec![
                cos.into(),
                sin.into(),
                (-sin).into(),
                cos.into(),
                text_stamp.x.into(),
                text_stamp.y.into(),
            ],
        ),
        Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(&text_stamp.text), StringFormat::Literal)],
        ),
        Operation::new("ET", vec![]),
        Operation::new("Q", vec![]),
    ]);

    Content { operations }
}

/// Wrap the existing content in `q`/`Q` and append `content` after it.
fn append_content(document: &mut Document, page_id: ObjectId, content: Vec<u8>) -> Result<()> {
    let save_id = document.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));
    let mut stamp = b"Q\n".to_vec();
    stamp.extend(content);
    let stamp_id = document.add_object(Stream::new(Dictionary::new(), stamp));

    let existing = document
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|err| FileforgeError::Pdf(format!("cannot read page object {:?}: {}", page_id, err)))?
        .get(b"Contents")
        .ok()
        .map(|contents| content_streams(document, contents))
        .unwrap_or_default();

    let mut contents = vec![Object::Reference(save_id)];
    contents.extend(existing);
    contents.push(Object::Reference(stamp_id));

    document
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|err| FileforgeError::Pdf(format!("cannot read page object {:?}: {}", page_id, err)))?
        .set("Contents", contents);
    Ok(())
}

/// References to the content streams `/Contents` names, flattening an array
/// that is itself stored behind a reference.
fn content_streams(document: &Document, contents: &Object) -> Vec<Object> {
    match contents {
        Object::Array(items) => items.clone(),
        Object::Reference(id) => match document.get_object(*id) {
            Ok(Object::Array(items)) => items.clone(),
            Ok(_) => vec![contents.clone()],
            Err(err) => {
                warn!(?id, %err, "page content reference is dangling");
                Vec::new()
            }
        },
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_ansi_replaces_unsupported_characters() {
        assert_eq!(encode_win_ansi("Page 1"), b"Page 1");
        assert_eq!(encode_win_ansi("café"), b"caf\xe9");
        assert_eq!(encode_win_ansi("a→b"), b"a?b");
    }

    #[test]
    fn opacity_is_clamped() {
        let stamp = TextStamp::new("x", 0.0, 0.0, StandardFont::Helvetica, 10.0).opacity(1.5);
        assert_eq!(stamp.opacity, 1.0);
    }

    #[test]
    fn operations_include_state_only_when_translucent() {
        let opaque = TextStamp::new("x", 1.0, 2.0, StandardFont::Helvetica, 10.0);
        let ops = stamp_operations(&opaque, "FfHelv", None);
        assert!(ops.operations.iter().all(|op| op.operator != "gs"));

        let faint = opaque.opacity(0.15).rotated(45.0);
        let ops = stamp_operations(&faint, "FfHelv", Some("FfGs150"));
        let operators: Vec<_> = ops.operations.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(operators, ["q", "gs", "rg", "BT", "Tf", "Tm", "Tj", "ET", "Q"]);
    }
}
