// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text paginator — greedy word wrapping and grouping of lines into pages.
//
// Width measurement is supplied by the caller, so the same routines work for
// any font, unit or test stub.

/// Lines that share one output page, in reading order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
}

/// Greedy word wrap.
///
/// Words are split on whitespace and joined with single spaces. A word is
/// appended to the current line while `measure(line + " " + word)` stays
/// within `max_width`; a word that is wider than `max_width` on its own
/// still forms one line and is never broken.
pub fn wrap<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap each newline-separated paragraph on its own.
///
/// A blank paragraph becomes one empty line so that intentional vertical
/// spacing in the source survives. Empty or all-whitespace input produces no
/// lines at all.
pub fn wrap_paragraphs<F>(text: &str, max_width: f32, measure: F) -> Vec<String>
where
    F: Fn(&str) -> f32,
{
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let wrapped = wrap(paragraph, max_width, &measure);
        if wrapped.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrapped);
        }
    }
    lines
}

/// Group lines into pages.
///
/// A page holds as many lines as fit in `max_page_height - top_margin` at
/// `line_height` each. Every page has at least one line, even when a single
/// line does not fit; no lines means no pages.
pub fn group(lines: &[String], line_height: f32, max_page_height: f32, top_margin: f32) -> Vec<Page> {
    let available = max_page_height - top_margin;
    let mut pages = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in lines {
        let needed = (current.len() + 1) as f32 * line_height;
        if !current.is_empty() && needed > available {
            pages.push(Page {
                lines: std::mem::take(&mut current),
            });
        }
        current.push(line.clone());
    }

    if !current.is_empty() {
        pages.push(Page { lines: current });
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One unit per character, which keeps expectations easy to read.
    fn chars(s: &str) -> f32 {
        s.chars().count() as f32
    }

    fn lines(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn wraps_greedily() {
        let wrapped = wrap("the quick brown fox jumps over", 10.0, chars);
        assert_eq!(wrapped, ["the quick", "brown fox", "jumps over"]);
    }

    #[test]
    fn line_at_exact_width_is_kept() {
        let wrapped = wrap("abcd efghi", 10.0, chars);
        assert_eq!(wrapped, ["abcd efghi"]);
    }

    #[test]
    fn long_word_is_one_line_and_not_split() {
        let wrapped = wrap("a supercalifragilistic b", 5.0, chars);
        assert_eq!(wrapped, ["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn word_sequence_round_trips() {
        let text = "  Lorem ipsum\tdolor sit\namet,   consectetur adipiscing elit  ";
        let wrapped = wrap(text, 12.0, chars);
        let rejoined = wrapped.join(" ");
        let original: Vec<_> = text.split_whitespace().collect();
        assert_eq!(rejoined.split_whitespace().collect::<Vec<_>>(), original);
    }

    #[test]
    fn empty_text_has_no_lines_or_pages() {
        assert!(wrap("", 10.0, chars).is_empty());
        assert!(wrap(" \n\t ", 10.0, chars).is_empty());
        assert!(wrap_paragraphs("\n\n", 10.0, chars).is_empty());
        assert!(group(&[], 7.0, 297.0, 20.0).is_empty());
    }

    #[test]
    fn paragraphs_keep_blank_lines() {
        let wrapped = wrap_paragraphs("first para\n\nsecond one here", 10.0, chars);
        assert_eq!(wrapped, ["first para", "", "second one", "here"]);
    }

    #[test]
    fn paragraphs_preserve_word_sequence() {
        let text = "alpha beta\n\ngamma delta epsilon\nzeta";
        let rejoined = wrap_paragraphs(text, 11.0, chars).join(" ");
        assert_eq!(
            rejoined.split_whitespace().collect::<Vec<_>>(),
            text.split_whitespace().collect::<Vec<_>>()
        );
    }

    #[test]
    fn groups_by_available_height() {
        // 100 - 20 = 80 available, 10 per line: 8 lines per page.
        let pages = group(&lines(20), 10.0, 100.0, 20.0);
        let sizes: Vec<_> = pages.iter().map(|p| p.lines.len()).collect();
        assert_eq!(sizes, [8, 8, 4]);
        assert_eq!(pages[1].lines[0], "line 8");
    }

    #[test]
    fn page_exactly_full() {
        let pages = group(&lines(8), 10.0, 100.0, 20.0);
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn oversized_lines_still_get_a_page_each() {
        let pages = group(&lines(3), 50.0, 40.0, 10.0);
        assert_eq!(pages.len(), 3);
        assert!(pages.iter().all(|p| p.lines.len() == 1));
    }

    #[test]
    fn deterministic() {
        let text = "one two three four five six seven eight nine ten";
        assert_eq!(wrap(text, 9.0, chars), wrap(text, 9.0, chars));
    }
}
