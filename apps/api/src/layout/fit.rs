//! Cell text fitting: picks a font size and line breaks so a phrase fits its cell.
//!
//! # Search
//! Starting at the maximum size and stepping down one point at a time to the
//! minimum, the text is greedily word-wrapped at that size. The first size whose
//! block height `lines × (size + line_spacing)` fits the usable height, and whose
//! lines all fit the usable width, wins.
//!
//! # Fallback
//! If no size qualifies, the text is set at the minimum size with a width-only
//! wrap that also splits words too long for a line. The block may then overflow
//! vertically; the result is marked `degraded` and is still rendered.

/// Outcome of fitting one cell's text.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub font_size: u8,
    pub lines: Vec<String>,
    /// True when no size in the search range satisfied the height constraint.
    pub degraded: bool,
}

/// Usable box and typography for a single fit.
#[derive(Debug, Clone, Copy)]
pub struct FitBox {
    pub max_width: f32,
    pub max_height: f32,
    pub max_font_size: u8,
    pub min_font_size: u8,
    pub line_spacing: f32,
}

/// Height of a block of `line_count` lines set at `font_size`.
pub fn block_height(line_count: usize, font_size: f32, line_spacing: f32) -> f32 {
    line_count as f32 * (font_size + line_spacing)
}

/// Greedy word wrap.
///
/// Words accumulate on a line while the measured width of the joined line stays
/// within `max_width`; the word that would exceed it starts the next line. A
/// single word wider than `max_width` still gets a line of its own.
pub fn wrap_greedy(
    text: &str,
    max_width: f32,
    measure: impl Fn(&str) -> f32,
) -> Vec<String> {
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

/// Width-only wrap that never exceeds `max_width` unless a single character does.
///
/// Same as `wrap_greedy`, except a word wider than the line is broken at
/// character boundaries; its last fragment may be followed by further words.
pub fn wrap_hard(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if measure(word) > max_width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            for ch in word.chars() {
                current.push(ch);
                if current.chars().count() > 1 && measure(&current) > max_width {
                    current.pop();
                    lines.push(std::mem::replace(&mut current, ch.to_string()));
                }
            }
            continue;
        }

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

/// Finds the largest font size in the search range at which `text` fits `bounds`.
///
/// `measure(s, size)` returns the width of `s` in points at `size` points.
pub fn fit_text(text: &str, bounds: &FitBox, measure: impl Fn(&str, f32) -> f32) -> FittedText {
    for size in (bounds.min_font_size..=bounds.max_font_size).rev() {
        let size_pt = f32::from(size);
        let lines = wrap_greedy(text, bounds.max_width, |s| measure(s, size_pt));

        let height = block_height(lines.len(), size_pt, bounds.line_spacing);
        let width_ok = lines
            .iter()
            .all(|line| measure(line, size_pt) <= bounds.max_width);

        if height <= bounds.max_height && width_ok {
            return FittedText {
                font_size: size,
                lines,
                degraded: false,
            };
        }
    }

    let size_pt = f32::from(bounds.min_font_size);
    FittedText {
        font_size: bounds.min_font_size,
        lines: wrap_hard(text, bounds.max_width, |s| measure(s, size_pt)),
        degraded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::helvetica_bold;

    /// Usable box of a letter-page cell: 93.6pt cell minus 5pt padding per side.
    fn letter_cell() -> FitBox {
        FitBox {
            max_width: 83.6,
            max_height: 83.6,
            max_font_size: 14,
            min_font_size: 6,
            line_spacing: 2.0,
        }
    }

    fn measure(s: &str, size: f32) -> f32 {
        helvetica_bold().text_width(s, size)
    }

    /// Monospace measure: every character is `size / 2` wide.
    fn mono(s: &str, size: f32) -> f32 {
        s.chars().count() as f32 * size / 2.0
    }

    #[test]
    fn test_wrap_greedy_keeps_short_text_on_one_line() {
        let lines = wrap_greedy("a b c", 1000.0, |s| s.len() as f32);
        assert_eq!(lines, vec!["a b c"]);
    }

    #[test]
    fn test_wrap_greedy_breaks_on_width() {
        // Width = character count; 7 fits "one two" but not "one two three".
        let lines = wrap_greedy("one two three four", 7.0, |s| s.len() as f32);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn test_wrap_greedy_collapses_whitespace() {
        let lines = wrap_greedy("  spaced \t  out\n", 1000.0, |s| s.len() as f32);
        assert_eq!(lines, vec!["spaced out"]);
    }

    #[test]
    fn test_wrap_greedy_overlong_word_gets_own_line() {
        let lines = wrap_greedy("hi extraordinary yo", 5.0, |s| s.len() as f32);
        assert_eq!(lines, vec!["hi", "extraordinary", "yo"]);
    }

    #[test]
    fn test_wrap_hard_splits_overlong_word() {
        let lines = wrap_hard("hi extraordinary yo", 5.0, |s| s.len() as f32);
        assert_eq!(lines, vec!["hi", "extra", "ordin", "ary", "yo"]);
        assert!(lines.iter().all(|l| l.len() <= 5));
    }

    #[test]
    fn test_wrap_hard_joins_words_after_fragment() {
        let lines = wrap_hard("abcdefg hi", 5.0, |s| s.len() as f32);
        assert_eq!(lines, vec!["abcde", "fg hi"]);
    }

    #[test]
    fn test_empty_text_fits_at_max_with_no_lines() {
        let fitted = fit_text("", &letter_cell(), measure);
        assert_eq!(fitted.font_size, 14);
        assert!(fitted.lines.is_empty());
        assert!(!fitted.degraded);
    }

    #[test]
    fn test_short_phrase_stays_at_max_size() {
        let fitted = fit_text("FREE", &letter_cell(), measure);
        assert_eq!(fitted.font_size, 14);
        assert_eq!(fitted.lines, vec!["FREE"]);
        assert!(!fitted.degraded);
    }

    #[test]
    fn test_long_phrase_shrinks_until_it_fits() {
        let bounds = letter_cell();
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let fitted = fit_text(text, &bounds, measure);

        assert!(!fitted.degraded);
        assert!(fitted.font_size < 14, "expected a smaller size, got {}", fitted.font_size);
        assert!(fitted.lines.len() > 1);
        let size = f32::from(fitted.font_size);
        assert!(block_height(fitted.lines.len(), size, bounds.line_spacing) <= bounds.max_height);
        assert!(fitted
            .lines
            .iter()
            .all(|l| measure(l, size) <= bounds.max_width));
        assert_eq!(fitted.lines.join(" "), text);
    }

    #[test]
    fn test_result_is_the_largest_fitting_size() {
        let bounds = letter_cell();
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let fitted = fit_text(text, &bounds, measure);
        let bigger = f32::from(fitted.font_size + 1);
        let lines = wrap_greedy(text, bounds.max_width, |s| measure(s, bigger));
        assert!(block_height(lines.len(), bigger, bounds.line_spacing) > bounds.max_height);
    }

    #[test]
    fn test_overlong_word_wraps_and_shrinks_instead_of_overflowing_width() {
        // 10 characters per line at the maximum size.
        let bounds = FitBox {
            max_width: 70.0,
            max_height: 60.0,
            max_font_size: 14,
            min_font_size: 6,
            line_spacing: 2.0,
        };
        let text = "Supercalifragilisticexpialidocious Word";
        let fitted = fit_text(text, &bounds, mono);

        assert!(fitted.lines.len() > 1);
        assert!(fitted.font_size < 14);
        let size = f32::from(fitted.font_size);
        for line in &fitted.lines {
            assert!(mono(line, size) <= bounds.max_width, "line '{line}' overflows");
        }
        assert_eq!(fitted.lines.concat().replace(' ', ""), text.replace(' ', ""));
    }

    #[test]
    fn test_overlong_word_in_real_cell_falls_back_to_min_size() {
        let bounds = letter_cell();
        let fitted = fit_text("Supercalifragilisticexpialidocious Word", &bounds, measure);
        assert!(fitted.degraded);
        assert_eq!(fitted.font_size, 6);
        assert!(fitted.lines.len() >= 2);
        assert!(fitted.lines.iter().all(|l| measure(l, 6.0) <= bounds.max_width));
    }

    #[test]
    fn test_fallback_may_overflow_height() {
        let bounds = FitBox {
            max_width: 40.0,
            max_height: 10.0,
            max_font_size: 12,
            min_font_size: 8,
            line_spacing: 2.0,
        };
        let fitted = fit_text("many words that cannot possibly fit", &bounds, mono);
        assert!(fitted.degraded);
        assert_eq!(fitted.font_size, 8);
        assert!(block_height(fitted.lines.len(), 8.0, 2.0) > bounds.max_height);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let text = "Someone mentions synergy during the quarterly all-hands";
        let a = fit_text(text, &letter_cell(), measure);
        let b = fit_text(text, &letter_cell(), measure);
        assert_eq!(a, b);
    }
}
