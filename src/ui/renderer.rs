//! Plain-text rendering of view models.
//!
//! Renderers turn view models into strings; they never read favorite state
//! themselves. With `ansi` enabled, search matches are drawn in bold reverse video.
//!
//! # Example
//!
//! ```rust
//! use event_explorer::ui::renderer::highlighted;
//!
//! assert_eq!(highlighted("Jazz Night", &[(0, 4)], false), "Jazz Night");
//! assert_eq!(highlighted("Jazz", &[(0, 4)], true), "\u{1b}[1;7mJazz\u{1b}[0m");
//! ```

use crate::ui::viewmodel::{EventDetail, ListView, ToggleNotice};
use std::fmt::Write;

const HIGHLIGHT: &str = "\u{1b}[1;7m";
const RESET: &str = "\u{1b}[0m";
const FAVORITE_MARK: &str = "★";
const NOT_FAVORITE_MARK: &str = "☆";

/// Renders `text` with the given character ranges highlighted.
///
/// Ranges use character indices, not byte indices. Out-of-range ends are clamped.
#[must_use]
pub fn highlighted(text: &str, ranges: &[(usize, usize)], ansi: bool) -> String {
    if ranges.is_empty() || !ansi {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 8);
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len()).max(current_pos);
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        out.extend(&chars[current_pos..start]);
        out.push_str(HIGHLIGHT);
        out.extend(&chars[start..end]);
        out.push_str(RESET);
        current_pos = end;
    }

    out.extend(&chars[current_pos..]);
    out
}

/// Renders a list screen: a title line, then one block per card or the empty state.
#[must_use]
pub fn render_list(view: &ListView, ansi: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out);

    if let Some(empty) = &view.empty_state {
        let _ = writeln!(out, "  {}", empty.message);
        let _ = writeln!(out, "  {}", empty.subtitle);
        return out;
    }

    for card in &view.cards {
        let mark = if card.is_favorite { FAVORITE_MARK } else { NOT_FAVORITE_MARK };
        let _ = writeln!(
            out,
            "{mark} [{}] {}",
            card.id,
            highlighted(&card.title, &card.title_highlights, ansi)
        );
        let _ = writeln!(out, "    {} | {}", card.when, card.category);
        let _ = writeln!(out, "    {}", card.location);
    }
    out
}

/// Renders the details screen of one event.
#[must_use]
pub fn render_detail(detail: &EventDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.title);
    let _ = writeln!(out, "{}", detail.category);
    let _ = writeln!(out);
    let _ = writeln!(out, "Date:     {}", detail.date);
    let _ = writeln!(out, "Time:     {}", detail.time);
    let _ = writeln!(out, "Location: {}", detail.location);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", detail.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "[{}]", detail.favorite_label);
    out
}

#[must_use]
pub fn render_notice(notice: &ToggleNotice) -> String {
    format!("{}: {}\n", notice.title, notice.message)
}
