use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use super::super::{
    draw::{grid_lines, rgb_style},
    state::TuiState,
};
use super::header_cell;

/// Member list on the left, the selected member's month grid on the right.
pub fn draw_calendar_view(f: &mut Frame, area: Rect, state: &TuiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let rows: Vec<Row> = state
        .calendars
        .iter()
        .enumerate()
        .map(|(i, cal)| {
            let is_selected = i == state.selected;
            let name_style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let swatch = cal
                .days
                .iter()
                .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
                .map(|d| Span::styled("██", rgb_style(d.color)))
                .unwrap_or_else(|| Span::raw("  "));

            Row::new(vec![
                Cell::from(Line::from(vec![
                    swatch,
                    Span::raw(" "),
                    Span::raw(cal.display_name.clone()),
                ]))
                .style(name_style),
                Cell::from(format!("{:>4}", cal.stats.total_commits))
                    .style(Style::default().fg(Color::Green)),
                Cell::from(format!("{:>3}", cal.stats.active_days))
                    .style(Style::default().fg(Color::Cyan)),
                Cell::from(format!("{:>3}", cal.stats.best_day))
                    .style(Style::default().fg(Color::Magenta)),
            ])
        })
        .collect();

    let title = match state.current_status(3) {
        Some(msg) => format!("Team {} | {msg}", state.month),
        None => format!("Team {} | ←/→ month, j/k member, h help", state.month),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(100),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(5),
        ],
    )
    .header(Row::new([
        header_cell("Member", Color::Yellow),
        header_cell("Commits", Color::Green),
        header_cell("Days", Color::Cyan),
        header_cell("Best", Color::Magenta),
    ]))
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(table, chunks[0]);

    draw_member_panel(f, chunks[1], state);
}

fn draw_member_panel(f: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .title("Grass")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let Some(cal) = state.selected_calendar() else {
        let empty = Paragraph::new(vec![
            Line::from(Span::styled(
                "No team members",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Add one with `teamgrass member add <name>`."),
        ])
        .block(block);
        f.render_widget(empty, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(cal.display_name.clone(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::styled(format!(" ({})", cal.key), Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::styled("Base color: ", Style::default().fg(Color::White)),
            Span::styled(cal.base_color.clone(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
    ];
    lines.extend(grid_lines(cal, state.month));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Commits: ", Style::default().fg(Color::White)),
        Span::styled(cal.stats.total_commits.to_string(), Style::default().fg(Color::Green)),
        Span::styled("  Active days: ", Style::default().fg(Color::White)),
        Span::styled(cal.stats.active_days.to_string(), Style::default().fg(Color::Cyan)),
    ]));

    f.render_widget(Paragraph::new(lines).block(block), area);
}
