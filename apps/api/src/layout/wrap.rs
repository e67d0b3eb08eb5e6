//! Greedy paragraph wrapping against the static font tables.
//!
//! Explicit newlines always start a new line. Inside a paragraph words are
//! packed left to right; a word that cannot fit on a line of its own is broken
//! between characters. An empty paragraph still yields one (empty) line so
//! blank fields keep their vertical slot.

use crate::layout::font_metrics::{FontMetricTable, PT_PER_MM};

/// Wraps `text` set at `size_pt` so that no line is wider than `max_width_mm`.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_mm: f32,
) -> Vec<String> {
    let max_width_em = max_width_mm * PT_PER_MM / size_pt;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        wrap_paragraph(
            paragraph.trim_end_matches('\r'),
            metrics,
            max_width_em,
            &mut lines,
        );
    }
    lines
}

fn wrap_paragraph(
    paragraph: &str,
    metrics: &FontMetricTable,
    max_width: f32,
    lines: &mut Vec<String>,
) {
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    let mut any_word = false;

    for word in paragraph.split_whitespace() {
        any_word = true;
        let word_w = metrics.measure_str(word);

        if word_w > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let (tail, tail_width) = break_word(word, metrics, max_width, lines);
            current = tail;
            current_width = tail_width;
            continue;
        }

        let space_w = if current.is_empty() {
            0.0
        } else {
            metrics.space_width
        };

        if !current.is_empty() && current_width + space_w + word_w > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !any_word || !current.is_empty() {
        lines.push(current);
    }
}

/// Splits an overlong word into full-width chunks, pushing all but the last.
/// Returns the last chunk and its width so following words can join it.
fn break_word(
    word: &str,
    metrics: &FontMetricTable,
    max_width: f32,
    lines: &mut Vec<String>,
) -> (String, f32) {
    let mut chunk = String::new();
    let mut chunk_width = 0.0_f32;

    for c in word.chars() {
        let w = metrics.char_width(c);
        if !chunk.is_empty() && chunk_width + w > max_width {
            lines.push(std::mem::take(&mut chunk));
            chunk_width = 0.0;
        }
        chunk.push(c);
        chunk_width += w;
    }
    (chunk, chunk_width)
}
