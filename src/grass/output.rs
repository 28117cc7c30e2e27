use crate::calendar::YearMonth;
use crate::color::Rgb;
use crate::model::{CalendarOutput, MemberCalendar, SCHEMA_VERSION};
use anyhow::Result;
use chrono::Utc;
use console::style;
use crossterm::style::{Color, Stylize};

const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
const CELL: &str = "██";

pub fn output_json(calendars: &[MemberCalendar], title: &str, repository_path: &str, month: YearMonth) -> Result<()> {
    let output = CalendarOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        title: title.to_string(),
        repository_path: repository_path.to_string(),
        month: month.to_string(),
        members: calendars.to_vec(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(calendars: &[MemberCalendar]) -> Result<()> {
    for calendar in calendars {
        println!("{}", serde_json::to_string(calendar)?);
    }
    Ok(())
}

/// Sunday-first week rows of day indices; `None` pads before the 1st and after the last day.
pub fn week_rows(offset: u32, days: usize) -> Vec<[Option<usize>; 7]> {
    let offset = offset as usize % 7;
    let cells = offset + days;
    (0..cells.div_ceil(7))
        .map(|row| {
            let mut week = [None; 7];
            for (col, slot) in week.iter_mut().enumerate() {
                let idx = row * 7 + col;
                if idx >= offset && idx < cells {
                    *slot = Some(idx - offset);
                }
            }
            week
        })
        .collect()
}

fn paint(rgb: Rgb) -> String {
    CELL.with(Color::Rgb { r: rgb.r, g: rgb.g, b: rgb.b }).to_string()
}

pub fn output_calendar(calendars: &[MemberCalendar], title: &str, repository_path: &str, month: YearMonth) -> Result<()> {
    println!("{}", style(title).bold());
    println!("{} {}", style("Repository:").dim(), repository_path);
    println!("{} {}", style("Month:").dim(), month);
    println!("{}", "─".repeat(40));

    if calendars.is_empty() {
        println!("No team members configured. Add one with `teamgrass member add <name>`.");
        return Ok(());
    }

    for calendar in calendars {
        println!();
        println!(
            "{} {}",
            style(&calendar.display_name).bold(),
            style(format!("({})", calendar.key)).dim()
        );
        println!(
            "  commits: {}  active days: {}  best day: {}",
            style(calendar.stats.total_commits).green(),
            style(calendar.stats.active_days).cyan(),
            style(calendar.stats.best_day).yellow()
        );
        println!("  {}", WEEKDAYS.join(" "));

        for week in week_rows(month.weekday_offset(), calendar.days.len()) {
            let line: Vec<String> = week
                .iter()
                .map(|slot| match slot {
                    Some(i) => paint(calendar.days[*i].color),
                    None => "  ".to_string(),
                })
                .collect();
            println!("  {}", line.join(" "));
        }

        let legend: Vec<String> = legend_colors(calendar).into_iter().map(paint).collect();
        println!("  less {} more", legend.join(""));
    }

    Ok(())
}

/// Representative cell colors from idle to busiest, deduplicated in order.
fn legend_colors(calendar: &MemberCalendar) -> Vec<Rgb> {
    let mut days: Vec<_> = calendar.days.iter().collect();
    days.sort_by(|a, b| a.intensity.total_cmp(&b.intensity));
    let mut colors: Vec<Rgb> = Vec::new();
    for day in days {
        if colors.last() != Some(&day.color) {
            colors.push(day.color);
        }
    }
    colors.truncate(5);
    colors
}
