//! Textarea auto-resize.
//!
//! Browsers answer "how tall is this content" with `scrollHeight`; headless we
//! estimate it from a fixed-width character grid with greedy word-wrap. The
//! height never drops below the widget's `rows`, matching a textarea whose
//! height was reset to `auto` before measuring.

use serde::{Deserialize, Serialize};

/// Character-grid metrics for a textarea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextareaMetrics {
    pub line_height_px: u32,
    /// Top plus bottom padding.
    pub vertical_padding_px: u32,
    /// Characters that fit on one visual line.
    pub chars_per_line: u16,
}

impl Default for TextareaMetrics {
    fn default() -> Self {
        Self {
            line_height_px: 20,
            vertical_padding_px: 16,
            chars_per_line: 60,
        }
    }
}

impl TextareaMetrics {
    /// Visual lines occupied by `text` when wrapped at `chars_per_line`.
    ///
    /// Every hard line break counts, including a trailing one, and a word
    /// longer than a line is broken across as many lines as it needs.
    pub fn visual_lines(&self, text: &str) -> u32 {
        let width = usize::from(self.chars_per_line.max(1));

        text.split('\n')
            .map(|line| {
                let mut lines = 1u32;
                let mut current = 0usize;

                for word in line.split_whitespace() {
                    let len = word.chars().count();
                    let needed = if current == 0 { len } else { current + 1 + len };

                    if needed <= width {
                        current = needed;
                        continue;
                    }
                    if current > 0 {
                        lines = lines.saturating_add(1);
                    }
                    // A long word spills over full lines; the remainder starts the next.
                    let spill = (len.saturating_sub(1) / width) as u32;
                    lines = lines.saturating_add(spill);
                    current = len - (spill as usize) * width;
                }
                lines
            })
            .sum::<u32>()
            .max(1)
    }

    /// Height in pixels that fits `text` without scrolling, never less than `rows`.
    pub fn fit_height(&self, text: &str, rows: u16) -> u32 {
        let lines = self.visual_lines(text).max(u32::from(rows));
        lines
            .saturating_mul(self.line_height_px)
            .saturating_add(self.vertical_padding_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrow() -> TextareaMetrics {
        TextareaMetrics {
            line_height_px: 10,
            vertical_padding_px: 4,
            chars_per_line: 10,
        }
    }

    #[test]
    fn test_empty_text_is_one_line() {
        assert_eq!(narrow().visual_lines(""), 1);
    }

    #[test]
    fn test_hard_breaks_count() {
        assert_eq!(narrow().visual_lines("a\nb\nc"), 3);
        assert_eq!(narrow().visual_lines("a\n"), 2);
    }

    #[test]
    fn test_greedy_wrap() {
        // "aaaa bbbb" fits in 10, "cccc" wraps.
        assert_eq!(narrow().visual_lines("aaaa bbbb cccc"), 2);
    }

    #[test]
    fn test_long_word_spills() {
        // 25 chars at width 10 → 3 lines.
        assert_eq!(narrow().visual_lines(&"x".repeat(25)), 3);
        // exact multiple does not add a phantom line
        assert_eq!(narrow().visual_lines(&"x".repeat(20)), 2);
    }

    #[test]
    fn test_fit_height_respects_min_rows() {
        let m = narrow();
        assert_eq!(m.fit_height("short", 3), 3 * 10 + 4);
        assert_eq!(m.fit_height("1\n2\n3\n4\n5", 3), 5 * 10 + 4);
    }

    #[test]
    fn test_fit_height_is_idempotent() {
        let m = TextareaMetrics::default();
        let text = "Led a team of 5 engineers; migrated billing to Rust; cut p99 latency by 40%";
        assert_eq!(m.fit_height(text, 3), m.fit_height(text, 3));
    }
}
