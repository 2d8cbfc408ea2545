// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page selections — resolve expressions like "1-3, 5, 7-10" into zero-based
// page indices.

use std::collections::BTreeSet;

/// A set of zero-based page indices, all below the page count it was
/// resolved against. Iteration is ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    indices: BTreeSet<usize>,
    total: usize,
}

impl SelectionSet {
    /// Nothing selected out of `total` pages.
    pub fn empty(total: usize) -> Self {
        Self {
            indices: BTreeSet::new(),
            total,
        }
    }

    /// Every page selected.
    pub fn all(total: usize) -> Self {
        Self {
            indices: (0..total).collect(),
            total,
        }
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    /// Flip the selection state of one page. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.total {
            return;
        }
        if !self.indices.remove(&index) {
            self.indices.insert(index);
        }
    }

    /// Selected indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter().copied()
    }
}

/// Resolve a comma-separated selection of one-based pages and inclusive
/// ranges against a document of `total` pages.
///
/// Terms that do not parse are skipped, range ends are clamped to
/// `1..=total`, and single pages outside that span are dropped. Never fails.
pub fn resolve_selection(expression: &str, total: usize) -> SelectionSet {
    let mut selection = SelectionSet::empty(total);
    let total = total as i64;

    for term in expression.split(',').map(str::trim) {
        if term.is_empty() {
            continue;
        }

        if let Some((start, end)) = term.split_once('-') {
            let (Ok(start), Ok(end)) = (start.trim().parse::<i64>(), end.trim().parse::<i64>())
            else {
                continue;
            };
            for page in start.max(1)..=end.min(total) {
                selection.indices.insert((page - 1) as usize);
            }
        } else if let Ok(page) = term.parse::<i64>()
            && (1..=total).contains(&page)
        {
            selection.indices.insert((page - 1) as usize);
        }
    }

    selection
}
