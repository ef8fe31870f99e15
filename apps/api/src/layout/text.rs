//! Greedy word-wrap and line clamping for card text.

use super::font_metrics::FontMetricTable;

pub const ELLIPSIS: &str = "...";

/// Wraps `text` into lines no wider than `max_width_pt` at `size_pt`.
///
/// Greedy: each word goes on the current line if it fits, otherwise starts a
/// new one. A single word wider than the line is broken between characters.
/// Whitespace runs collapse to one space. Empty or blank text returns no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let space_w = metrics.space_width * size_pt;
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_pt(word, size_pt);

        if word_w > max_width_pt {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let mut pieces = break_word(word, metrics, size_pt, max_width_pt);
            // The tail of a broken word may share its line with what follows.
            if let Some(tail) = pieces.pop() {
                lines.extend(pieces);
                current_width = metrics.measure_pt(&tail, size_pt);
                current = tail;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width_pt {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn break_word(
    word: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;
    for c in word.chars() {
        let w = metrics.char_width(c) * size_pt;
        if !piece.is_empty() && width + w > max_width_pt {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Keeps at most `max_lines` lines. When lines are dropped, the last kept line
/// is shortened as needed and ends with `...`.
pub fn clamp_lines(
    mut lines: Vec<String>,
    max_lines: usize,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let ellipsis_w = metrics.measure_pt(ELLIPSIS, size_pt);
        while !last.is_empty() && metrics.measure_pt(last, size_pt) + ellipsis_w > max_width_pt {
            last.pop();
        }
        let kept = last.trim_end().len();
        last.truncate(kept);
        last.push_str(ELLIPSIS);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, FontFace};

    fn regular() -> &'static FontMetricTable {
        get_metrics(FontFace::Helvetica)
    }

    #[test]
    fn test_wrap_empty_returns_no_lines() {
        assert!(wrap_text("", regular(), 10.0, 100.0).is_empty());
        assert!(wrap_text("   \t ", regular(), 10.0, 100.0).is_empty());
    }

    #[test]
    fn test_short_text_single_line() {
        let lines = wrap_text("Hey Jude", regular(), 10.0, 129.0);
        assert_eq!(lines, vec!["Hey Jude"]);
    }

    #[test]
    fn test_collapses_whitespace() {
        let lines = wrap_text("  Hey \n  Jude ", regular(), 10.0, 129.0);
        assert_eq!(lines, vec!["Hey Jude"]);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let text = "Somewhere Over The Rainbow And What A Wonderful World Medley";
        let max = 129.0;
        let lines = wrap_text(text, regular(), 10.0, max);
        assert!(lines.len() > 1, "should wrap, got {lines:?}");
        for line in &lines {
            assert!(regular().measure_pt(line, 10.0) <= max + 1e-3, "{line} too wide");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_overlong_word_broken_by_characters() {
        let word = "Supercalifragilisticexpialidocious".repeat(2);
        let max = 60.0;
        let lines = wrap_text(&word, regular(), 10.0, max);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(regular().measure_pt(line, 10.0) <= max + 1e-3);
        }
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_clamp_keeps_short_lists() {
        let lines = vec!["a".to_string(), "b".to_string()];
        assert_eq!(clamp_lines(lines.clone(), 3, regular(), 10.0, 100.0), lines);
    }

    #[test]
    fn test_clamp_adds_ellipsis_and_fits() {
        let lines: Vec<String> = (0..6).map(|i| format!("line number {i} is here")).collect();
        let max = 90.0;
        let clamped = clamp_lines(lines, 2, regular(), 10.0, max);
        assert_eq!(clamped.len(), 2);
        assert_eq!(clamped[0], "line number 0 is here");
        assert!(clamped[1].ends_with(ELLIPSIS));
        assert!(regular().measure_pt(&clamped[1], 10.0) <= max + 1e-3);
    }

    #[test]
    fn test_clamp_shortens_full_last_line() {
        let full = "WWWWWWWWWW".to_string();
        let size = 10.0;
        let max = regular().measure_pt(&full, size);
        let clamped = clamp_lines(vec![full.clone(), "more".to_string()], 1, regular(), size, max);
        assert!(clamped[0].ends_with(ELLIPSIS));
        assert!(clamped[0].len() < full.len() + ELLIPSIS.len());
        assert!(regular().measure_pt(&clamped[0], size) <= max + 1e-3);
    }
}
