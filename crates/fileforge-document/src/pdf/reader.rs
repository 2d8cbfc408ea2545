// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF document — open, inspect, combine, rotate, stamp and serialise existing
// PDF documents using the `lopdf` crate.
//
// Page indices in this API are zero-based; lopdf page numbers are one-based.

use fileforge_core::error::{FileforgeError, Result};
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, instrument, warn};

use super::stamp::{self, TextStamp};

/// A4 in points, used when a page carries no usable MediaBox.
const FALLBACK_PAGE_SIZE: (f32, f32) = (595.28, 841.89);

/// Page attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"MediaBox", b"CropBox", b"Resources", b"Rotate"];

/// An existing PDF loaded into memory.
///
/// Wraps `lopdf::Document` and provides the operations the tools are built
/// from: page extraction, appending, rotation, text stamping, text
/// extraction and compression.
pub struct PdfDocument {
    /// The underlying lopdf document.
    document: Document,
}

impl PdfDocument {
    // -- Construction ---------------------------------------------------------

    /// Load a PDF from raw bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data)
            .map_err(|err| FileforgeError::Pdf(format!("failed to load PDF from memory: {}", err)))?;

        if document.is_encrypted() {
            return Err(FileforgeError::Pdf("document is encrypted".into()));
        }

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Width and height in points of the page at `index`.
    ///
    /// The MediaBox is looked up through the page tree; pages without one
    /// are reported as A4.
    pub fn page_size(&self, index: usize) -> Result<(f32, f32)> {
        let page_id = self.page_id(index)?;
        let size = self
            .inherited(page_id, b"MediaBox")
            .and_then(|obj| media_box_size(&self.document, obj))
            .unwrap_or(FALLBACK_PAGE_SIZE);
        Ok(size)
    }

    /// Current `/Rotate` of the page at `index`, normalised to `0..360`.
    pub fn rotation(&self, index: usize) -> Result<i32> {
        let page_id = self.page_id(index)?;
        let rotation = self
            .inherited(page_id, b"Rotate")
            .and_then(|obj| obj.as_i64().ok())
            .unwrap_or(0);
        Ok((rotation as i32).rem_euclid(360))
    }

    // -- Page operations ------------------------------------------------------

    /// Turn the page at `index` by `degrees` (a multiple of 90) on top of its
    /// current rotation. Returns the resulting rotation.
    #[instrument(skip(self))]
    pub fn rotate(&mut self, index: usize, degrees: i32) -> Result<i32> {
        if degrees % 90 != 0 {
            return Err(FileforgeError::InvalidOption(format!(
                "rotation must be a multiple of 90, got {}",
                degrees
            )));
        }

        let existing_rotation = self.rotation(index)?;
        let new_rotation = (existing_rotation + degrees).rem_euclid(360);

        let page_id = self.page_id(index)?;
        self.page_dict_mut(page_id)?
            .set("Rotate", Object::Integer(new_rotation as i64));

        debug!(index, existing_rotation, new_rotation, "Page rotated");
        Ok(new_rotation)
    }

    /// A new document holding only the pages at `indices`, in page order.
    #[instrument(skip_all, fields(selected = indices.len(), total = self.page_count()))]
    pub fn extract_pages(&self, indices: &[usize]) -> Result<PdfDocument> {
        if indices.is_empty() {
            return Err(FileforgeError::EmptySelection);
        }
        let total = self.page_count();
        if let Some(bad) = indices.iter().find(|&&i| i >= total) {
            return Err(FileforgeError::InvalidInput(format!(
                "page {} out of range (document has {} pages)",
                bad + 1,
                total
            )));
        }

        let mut document = self.document.clone();
        let to_drop: Vec<u32> = (0..total)
            .filter(|i| !indices.contains(i))
            .map(|i| i as u32 + 1)
            .collect();
        document.delete_pages(&to_drop);
        document.prune_objects();

        debug!(kept = total - to_drop.len(), "Pages extracted");
        Ok(Self { document })
    }

    /// Copy every page of `other` to the end of this document.
    #[instrument(skip_all, fields(base_pages = self.page_count(), added_pages = other.page_count()))]
    pub fn append(&mut self, other: PdfDocument) -> Result<()> {
        let mut secondary = other.document;

        // Reparented pages must not lose what they inherited from their old tree.
        let secondary_page_ids: Vec<ObjectId> = secondary.get_pages().into_values().collect();
        for &page_id in &secondary_page_ids {
            materialise_inherited(&mut secondary, page_id);
        }

        let pages_root_id = self
            .document
            .catalog()
            .and_then(|catalog| catalog.get(b"Pages"))
            .and_then(Object::as_reference)
            .map_err(|err| FileforgeError::Pdf(format!("no page tree root: {}", err)))?;

        // Attributes on our root would otherwise leak onto the appended pages.
        let base_page_ids: Vec<ObjectId> = self.document.get_pages().into_values().collect();
        for &page_id in &base_page_ids {
            materialise_inherited(&mut self.document, page_id);
        }

        secondary.renumber_objects_with(self.document.max_id + 1);
        let secondary_page_ids: Vec<ObjectId> = secondary.get_pages().into_values().collect();

        for (id, object) in std::mem::take(&mut secondary.objects) {
            self.document.objects.insert(id, object);
        }
        self.document.max_id = self.document.max_id.max(secondary.max_id);

        {
            let pages_dict = self
                .document
                .get_object_mut(pages_root_id)
                .and_then(Object::as_dict_mut)
                .map_err(|err| FileforgeError::Pdf(format!("page tree root unreadable: {}", err)))?;
            for key in INHERITABLE {
                pages_dict.remove(key);
            }
            let kids = pages_dict
                .get_mut(b"Kids")
                .and_then(Object::as_array_mut)
                .map_err(|err| FileforgeError::Pdf(format!("page tree has no kids: {}", err)))?;
            kids.extend(secondary_page_ids.iter().map(|&id| Object::Reference(id)));
            let count = pages_dict
                .get(b"Count")
                .and_then(Object::as_i64)
                .unwrap_or(0);
            pages_dict.set("Count", count + secondary_page_ids.len() as i64);
        }

        for page_id in secondary_page_ids {
            self.page_dict_mut(page_id)?
                .set("Parent", Object::Reference(pages_root_id));
        }

        // The secondary catalog and page root are now unreachable.
        self.document.prune_objects();

        debug!(pages = self.page_count(), "Append complete");
        Ok(())
    }

    /// Draw `text_stamp` over the existing content of the page at `index`.
    #[instrument(skip(self, text_stamp), fields(text = %text_stamp.text))]
    pub fn stamp_text(&mut self, index: usize, text_stamp: &TextStamp) -> Result<()> {
        let page_id = self.page_id(index)?;
        let resources = self
            .inherited(page_id, b"Resources")
            .and_then(|obj| resolve_dict(&self.document, obj))
            .unwrap_or_else(lopdf::Dictionary::new);
        stamp::apply(&mut self.document, page_id, resources, text_stamp)
    }

    // -- Content --------------------------------------------------------------

    /// Text of every page, one block per page separated by a blank line.
    ///
    /// Pages whose text cannot be decoded are skipped with a warning.
    #[instrument(skip(self), fields(pages = self.page_count()))]
    pub fn extract_text(&self) -> String {
        let page_numbers: Vec<u32> = self.document.get_pages().into_keys().collect();
        let mut blocks = Vec::with_capacity(page_numbers.len());

        for page_number in page_numbers {
            match self.document.extract_text(&[page_number]) {
                Ok(text) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        blocks.push(text.to_string());
                    }
                }
                Err(err) => warn!(page_number, %err, "could not extract text from page"),
            }
        }

        blocks.join("\n\n")
    }

    /// Drop unreferenced objects and empty streams, then compress every
    /// stream.
    #[instrument(skip(self))]
    pub fn compress(&mut self) {
        let pruned = self.document.prune_objects();
        let emptied = self.document.delete_zero_length_streams();
        self.document.renumber_objects();
        self.document.compress();
        debug!(pruned = pruned.len(), emptied = emptied.len(), "Document compressed");
    }

    /// Serialise the document.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.document
            .save_to(&mut output)
            .map_err(|err| FileforgeError::Pdf(format!("failed to serialise PDF: {}", err)))?;
        debug!(output_bytes = output.len(), "PDF serialised");
        Ok(output)
    }

    // -- Helpers --------------------------------------------------------------

    fn page_id(&self, index: usize) -> Result<ObjectId> {
        let pages = self.document.get_pages();
        pages.get(&(index as u32 + 1)).copied().ok_or_else(|| {
            FileforgeError::InvalidInput(format!(
                "page {} out of range (document has {} pages)",
                index + 1,
                pages.len()
            ))
        })
    }

    fn page_dict_mut(&mut self, page_id: ObjectId) -> Result<&mut lopdf::Dictionary> {
        self.document
            .get_object_mut(page_id)
            .and_then(Object::as_dict_mut)
            .map_err(|err| FileforgeError::Pdf(format!("cannot read page object {:?}: {}", page_id, err)))
    }

    /// Look `key` up on the page, then on each ancestor in the page tree.
    fn inherited(&self, page_id: ObjectId, key: &[u8]) -> Option<&Object> {
        inherited_attribute(&self.document, page_id, key)
    }
}

/// Walk from `page_id` up the `/Parent` chain until `key` is found.
fn inherited_attribute<'a>(document: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = Some(page_id);
    // Bounded so that a cyclic page tree cannot hang us.
    for _ in 0..32 {
        let dict = document.get_object(current?).and_then(Object::as_dict).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    None
}

/// Copy inherited attributes onto the page itself.
fn materialise_inherited(document: &mut Document, page_id: ObjectId) {
    let missing: Vec<(&[u8], Object)> = INHERITABLE
        .iter()
        .filter_map(|&key| {
            let own = document
                .get_object(page_id)
                .and_then(Object::as_dict)
                .is_ok_and(|dict| dict.has(key));
            if own {
                return None;
            }
            inherited_attribute(document, page_id, key).map(|value| (key, value.clone()))
        })
        .collect();

    if let Ok(dict) = document.get_object_mut(page_id).and_then(Object::as_dict_mut) {
        for (key, value) in missing {
            dict.set(key, value);
        }
    }
}

/// A dictionary given inline or by reference.
pub(crate) fn resolve_dict(document: &Document, object: &Object) -> Option<lopdf::Dictionary> {
    match object {
        Object::Dictionary(dict) => Some(dict.clone()),
        Object::Reference(id) => document.get_object(*id).and_then(Object::as_dict).ok().cloned(),
        _ => None,
    }
}

fn media_box_size(document: &Document, object: &Object) -> Option<(f32, f32)> {
    let resolved = match object {
        Object::Reference(id) => document.get_object(*id).ok()?,
        other => other,
    };
    let values: Vec<f32> = resolved
        .as_array()
        .ok()?
        .iter()
        .filter_map(|obj| match obj {
            Object::Integer(i) => Some(*i as f32),
            Object::Real(r) => Some(*r),
            _ => None,
        })
        .collect();
    match values.as_slice() {
        [llx, lly, urx, ury] => Some(((urx - llx).abs(), (ury - lly).abs())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StandardFont;
    use crate::pdf::testing::{sample_pdf, sample_pdf_with_inherited_box};

    fn load(bytes: &[u8]) -> PdfDocument {
        PdfDocument::from_bytes(bytes).unwrap()
    }

    #[test]
    fn rejects_garbage() {
        let err = PdfDocument::from_bytes(b"definitely not a pdf").err().unwrap();
        assert!(matches!(err, FileforgeError::Pdf(_)));
    }

    #[test]
    fn page_count_and_size() {
        let doc = load(&sample_pdf(&[(612.0, 792.0, "one"), (595.0, 842.0, "two")]));
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page_size(0).unwrap(), (612.0, 792.0));
        assert_eq!(doc.page_size(1).unwrap(), (595.0, 842.0));
        assert!(doc.page_size(2).is_err());
    }

    #[test]
    fn media_box_is_inherited() {
        let doc = load(&sample_pdf_with_inherited_box(300.0, 400.0));
        assert_eq!(doc.page_size(0).unwrap(), (300.0, 400.0));
    }

    #[test]
    fn rotation_is_additive_and_normalised() {
        let mut doc = load(&sample_pdf(&[(612.0, 792.0, "a")]));
        assert_eq!(doc.rotation(0).unwrap(), 0);
        assert_eq!(doc.rotate(0, 90).unwrap(), 90);
        assert_eq!(doc.rotate(0, 270).unwrap(), 0);
        assert_eq!(doc.rotate(0, -90).unwrap(), 270);

        let reloaded = load(&doc.to_bytes().unwrap());
        assert_eq!(reloaded.rotation(0).unwrap(), 270);
    }

    #[test]
    fn rotation_must_be_right_angle() {
        let mut doc = load(&sample_pdf(&[(612.0, 792.0, "a")]));
        assert!(matches!(doc.rotate(0, 45), Err(FileforgeError::InvalidOption(_))));
    }

    #[test]
    fn extract_keeps_selected_pages_in_order() {
        let doc = load(&sample_pdf(&[
            (100.0, 100.0, "p1"),
            (200.0, 200.0, "p2"),
            (300.0, 300.0, "p3"),
        ]));
        let mut extracted = doc.extract_pages(&[2, 0]).unwrap();
        assert_eq!(extracted.page_count(), 2);
        assert_eq!(extracted.page_size(0).unwrap(), (100.0, 100.0));
        assert_eq!(extracted.page_size(1).unwrap(), (300.0, 300.0));

        let reloaded = load(&extracted.to_bytes().unwrap());
        assert_eq!(reloaded.page_count(), 2);
        // The source is untouched.
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn extract_rejects_empty_and_out_of_range() {
        let doc = load(&sample_pdf(&[(100.0, 100.0, "p1")]));
        assert!(matches!(doc.extract_pages(&[]), Err(FileforgeError::EmptySelection)));
        assert!(doc.extract_pages(&[1]).is_err());
    }

    #[test]
    fn append_concatenates_pages() {
        let mut first = load(&sample_pdf(&[(100.0, 100.0, "a1"), (110.0, 110.0, "a2")]));
        let second = load(&sample_pdf_with_inherited_box(300.0, 400.0));
        first.append(second).unwrap();

        let merged = load(&first.to_bytes().unwrap());
        assert_eq!(merged.page_count(), 3);
        assert_eq!(merged.page_size(1).unwrap(), (110.0, 110.0));
        assert_eq!(merged.page_size(2).unwrap(), (300.0, 400.0));
    }

    #[test]
    fn appended_pages_ignore_base_root_attributes() {
        let mut first = load(&sample_pdf(&[(100.0, 100.0, "a1")]));
        let root_id = first
            .document
            .catalog()
            .unwrap()
            .get(b"Pages")
            .unwrap()
            .as_reference()
            .unwrap();
        let root = first.document.get_object_mut(root_id).unwrap().as_dict_mut().unwrap();
        root.set("Rotate", Object::Integer(90));
        root.set(
            "CropBox",
            vec![Object::Integer(0), Object::Integer(0), Object::Integer(50), Object::Integer(50)],
        );

        first.append(load(&sample_pdf(&[(300.0, 400.0, "b1")]))).unwrap();
        let merged = load(&first.to_bytes().unwrap());

        // The base page keeps what it inherited.
        assert_eq!(merged.rotation(0).unwrap(), 90);
        let base_page = merged.page_id(0).unwrap();
        assert!(merged.inherited(base_page, b"CropBox").is_some());

        assert_eq!(merged.rotation(1).unwrap(), 0);
        let appended_page = merged.page_id(1).unwrap();
        assert!(merged.inherited(appended_page, b"CropBox").is_none());
        assert_eq!(merged.page_size(1).unwrap(), (300.0, 400.0));
    }

    #[test]
    fn extracts_text_per_page() {
        let doc = load(&sample_pdf(&[(612.0, 792.0, "Hello"), (612.0, 792.0, "World")]));
        let text = doc.extract_text();
        assert!(text.contains("Hello"));
        assert!(text.contains("World"));
    }

    #[test]
    fn stamped_text_is_extractable() {
        let mut doc = load(&sample_pdf(&[(612.0, 792.0, "Body")]));
        let stamp = TextStamp::new("Stamped", 36.0, 36.0, StandardFont::Helvetica, 12.0);
        doc.stamp_text(0, &stamp).unwrap();

        let reloaded = load(&doc.to_bytes().unwrap());
        let text = reloaded.extract_text();
        assert!(text.contains("Body"));
        assert!(text.contains("Stamped"));
    }

    #[test]
    fn stamping_keeps_content_held_in_an_indirect_array() {
        let mut doc = load(&sample_pdf(&[(612.0, 792.0, "Body")]));
        let page_id = doc.page_id(0).unwrap();
        let body = doc.page_dict_mut(page_id).unwrap().get(b"Contents").unwrap().clone();
        let array_id = doc.document.add_object(Object::Array(vec![body]));
        doc.page_dict_mut(page_id)
            .unwrap()
            .set("Contents", Object::Reference(array_id));

        let stamp = TextStamp::new("Stamp", 36.0, 36.0, StandardFont::Helvetica, 12.0);
        doc.stamp_text(0, &stamp).unwrap();

        let contents = doc.page_dict_mut(page_id).unwrap().get(b"Contents").unwrap().clone();
        let entries = contents.as_array().unwrap();
        assert_eq!(entries.len(), 3);
        for entry in entries {
            let id = entry.as_reference().unwrap();
            assert!(doc.document.get_object(id).unwrap().as_stream().is_ok());
        }

        let reloaded = load(&doc.to_bytes().unwrap());
        let text = reloaded.extract_text();
        assert!(text.contains("Body"));
        assert!(text.contains("Stamp"));
    }

    #[test]
    fn compress_keeps_pages() {
        let mut doc = load(&sample_pdf(&[(612.0, 792.0, "a"), (612.0, 792.0, "b")]));
        doc.compress();
        let reloaded = load(&doc.to_bytes().unwrap());
        assert_eq!(reloaded.page_count(), 2);
    }
}
