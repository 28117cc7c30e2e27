use std::io;

use crossterm::event::{poll, read, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use super::state::TuiState;
use super::views::{draw_calendar_view, draw_help_overlay};
use crate::calendar::YearMonth;
use crate::model::MemberCalendar;

/// Load the displayed month. On failure the view is cleared and the error
/// becomes the status line.
fn reload<F>(state: &mut TuiState, load: &mut F) -> bool
where
    F: FnMut(YearMonth) -> anyhow::Result<Vec<MemberCalendar>>,
{
    match load(state.month) {
        Ok(calendars) => {
            state.set_calendars(calendars);
            true
        }
        Err(e) => {
            tracing::error!("failed to load {}: {e:#}", state.month);
            state.set_calendars(Vec::new());
            state.set_status(format!("load failed: {e}"));
            false
        }
    }
}

fn refresh<F>(state: &mut TuiState, load: &mut F)
where
    F: FnMut(YearMonth) -> anyhow::Result<Vec<MemberCalendar>>,
{
    if reload(state, load) {
        state.set_status("refreshed");
    }
}

/// Interactive month browser. `load` is called whenever the displayed month changes
/// or a refresh is requested.
pub fn run<F>(title: &str, repo_path: &str, month: YearMonth, mut load: F) -> io::Result<()>
where
    F: FnMut(YearMonth) -> anyhow::Result<Vec<MemberCalendar>>,
{
    let mut state = TuiState::new(month);
    reload(&mut state, &mut load);

    enable_raw_mode()?;
    let result = event_loop(title, repo_path, &mut state, &mut load);
    disable_raw_mode()?;
    result
}

fn event_loop<F>(title: &str, repo_path: &str, state: &mut TuiState, load: &mut F) -> io::Result<()>
where
    F: FnMut(YearMonth) -> anyhow::Result<Vec<MemberCalendar>>,
{
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    loop {
        let draw_result = terminal.draw(|f| {
            let size = f.size();

            if state.show_help {
                draw_help_overlay(f, size);
                return;
            }

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(size);

            let header = Paragraph::new(Line::from(vec![
                Span::styled(title.to_string(), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {repo_path}"), Style::default().fg(Color::Gray)),
            ]))
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(header, chunks[0]);

            draw_calendar_view(f, chunks[1], state);
        });

        if let Err(e) = draw_result {
            tracing::warn!("TUI draw error: {e}");
        }

        if poll(std::time::Duration::from_millis(200))? {
            if let Event::Key(key_event) = read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if state.show_help {
                    match key_event.code {
                        KeyCode::Char('h') | KeyCode::F(1) | KeyCode::Esc => state.show_help = false,
                        KeyCode::Char('q') => break,
                        _ => {}
                    }
                    continue;
                }
                match key_event.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('h') | KeyCode::F(1) => state.show_help = true,
                    KeyCode::Left | KeyCode::Char('p') => {
                        state.month = state.month.prev();
                        reload(state, load);
                    }
                    KeyCode::Right | KeyCode::Char('n') => {
                        state.month = state.month.next();
                        reload(state, load);
                    }
                    KeyCode::Char('t') => {
                        state.month = YearMonth::current();
                        reload(state, load);
                    }
                    KeyCode::Char('r') => refresh(state, load),
                    KeyCode::Down | KeyCode::Char('j') => state.select_next(),
                    KeyCode::Up | KeyCode::Char('k') => state.select_prev(),
                    _ => {}
                }
            }
        }
    }

    terminal.clear()?;
    Ok(())
}
