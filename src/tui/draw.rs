use crate::calendar::YearMonth;
use crate::color::Rgb;
use crate::grass::output::week_rows;
use crate::model::MemberCalendar;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const CELL: &str = "██";
const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn rgb_style(rgb: Rgb) -> Style {
    Style::default().fg(Color::Rgb(rgb.r, rgb.g, rgb.b))
}

/// Month grid for one member: a weekday header plus one line per week.
pub fn grid_lines(calendar: &MemberCalendar, month: YearMonth) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        WEEKDAYS.join(" "),
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    ))];

    for week in week_rows(month.weekday_offset(), calendar.days.len()) {
        let mut spans = Vec::with_capacity(14);
        for (col, slot) in week.iter().enumerate() {
            if col > 0 {
                spans.push(Span::raw(" "));
            }
            match slot {
                Some(i) => spans.push(Span::styled(CELL, rgb_style(calendar.days[*i].color))),
                None => spans.push(Span::raw("  ")),
            }
        }
        lines.push(Line::from(spans));
    }
    lines
}

/// A `percent_x` by `percent_y` rectangle centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(rows[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::bucket_by_day;
    use crate::color::{BaseColor, ColorMapper, Normalization};
    use crate::grass::build_calendar;

    #[test]
    fn grid_has_header_and_week_lines() {
        let month = YearMonth::new(2025, 9).unwrap();
        let series = bucket_by_day(month, Vec::new());
        let cal = build_calendar("k", "K", &BaseColor::Hue(90.0), &series, &ColorMapper::default(), Normalization::Relative)
            .unwrap();

        let lines = grid_lines(&cal, month);
        assert_eq!(lines.len(), 1 + 5);
        let cells: usize = lines[1..]
            .iter()
            .map(|l| l.spans.iter().filter(|s| s.content == CELL).count())
            .sum();
        assert_eq!(cells, 30);
    }
}
