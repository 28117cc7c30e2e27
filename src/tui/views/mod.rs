use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Cell;

mod calendar;
mod help;

pub use calendar::draw_calendar_view;
pub use help::draw_help_overlay;

/// Convenience helper to build a styled table header cell.
pub(crate) fn header_cell(text: &str, color: Color) -> Cell<'static> {
    Cell::from(text.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}
