//! Terminal styling for portal output, named by what each role marks.

use console::Style;
use std::fmt::Display;

fn paint(style: Style, text: impl Display) -> String {
    style.apply_to(text).to_string()
}

/// Completed generation or action.
pub fn done(text: impl Display) -> String {
    paint(Style::new().green().bold(), text)
}

/// Page and section titles.
pub fn title(text: impl Display) -> String {
    paint(Style::new().white().bold(), text)
}

/// Metadata, hints and the user's speaker label.
pub fn muted(text: impl Display) -> String {
    paint(Style::new().dim(), text)
}

/// Not-found states and degraded results.
pub fn notice(text: impl Display) -> String {
    paint(Style::new().yellow(), text)
}

/// Bullets, ids and the assistant's speaker label.
pub fn marker(text: impl Display) -> String {
    paint(Style::new().cyan().bold(), text)
}

pub fn link(text: impl Display) -> String {
    paint(Style::new().cyan().underlined(), text)
}

/// University green, for department names and view names.
pub fn brand(text: impl Display) -> String {
    paint(Style::new().green(), text)
}
