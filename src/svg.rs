//! Standalone SVG rendering of one member's month.

use crate::calendar::YearMonth;
use crate::grass::output::week_rows;
use crate::model::MemberCalendar;
use std::fmt::Write;

pub const CELL_SIZE: u32 = 12;
pub const GAP: u32 = 2;
pub const TITLE_HEIGHT: u32 = 30;
const COLUMNS: u32 = 7;

pub fn generate_svg(calendar: &MemberCalendar, month: YearMonth) -> String {
    let rows = week_rows(month.weekday_offset(), calendar.days.len());
    let width = COLUMNS * (CELL_SIZE + GAP) - GAP;
    let height = (rows.len() as u32 * (CELL_SIZE + GAP)).saturating_sub(GAP) + TITLE_HEIGHT;

    let mut svg = String::new();
    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        r#"<svg width="{width}" height="{height}" xmlns="http://www.w3.org/2000/svg">"#
    );
    let _ = write!(
        svg,
        r##"<text x="0" y="20" font-family="Arial, sans-serif" font-size="14" fill="#333">{} · {}</text>"##,
        escape(&calendar.display_name),
        month
    );

    for (row, week) in rows.iter().enumerate() {
        for (col, slot) in week.iter().enumerate() {
            let Some(idx) = slot else { continue };
            let day = &calendar.days[*idx];
            let x = col as u32 * (CELL_SIZE + GAP);
            let y = row as u32 * (CELL_SIZE + GAP) + TITLE_HEIGHT;
            let noun = if day.count == 1 { "commit" } else { "commits" };
            let _ = write!(
                svg,
                r##"<rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" fill="{}" stroke="#ddd" stroke-width="1" rx="2"><title>{}: {} {noun}</title></rect>"##,
                day.color.to_hex(),
                day.date,
                day.count
            );
        }
    }

    svg.push_str("</svg>");
    svg
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::bucket_by_day;
    use crate::color::{BaseColor, ColorMapper, Normalization, Rgb};
    use crate::grass::build_calendar;
    use chrono::NaiveDate;

    fn september() -> (YearMonth, MemberCalendar) {
        let month = YearMonth::new(2025, 9).unwrap();
        let series = bucket_by_day(month, vec![NaiveDate::from_ymd_opt(2025, 9, 2).unwrap()]);
        let cal = build_calendar(
            "kim",
            "Kim <Coder> & co",
            &BaseColor::Rgb(Rgb::new(0, 0xaa, 0)),
            &series,
            &ColorMapper::default(),
            Normalization::Relative,
        )
        .unwrap();
        (month, cal)
    }

    #[test]
    fn one_rect_per_day() {
        let (month, cal) = september();
        let svg = generate_svg(&cal, month);
        assert!(svg.starts_with("<svg "));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect ").count(), 30);
        assert!(svg.contains("<title>2025-09-02: 1 commit</title>"));
        assert!(svg.contains("<title>2025-09-03: 0 commits</title>"));
    }

    #[test]
    fn dimensions_follow_grid() {
        let (month, cal) = september();
        let svg = generate_svg(&cal, month);
        // 7 columns of 12px with 2px gaps; 5 week rows plus the title band.
        assert!(svg.contains(r#"width="96""#));
        assert!(svg.contains(r#"height="98""#));
        // The 1st is a Monday: second column of the first row.
        assert!(svg.contains(r#"<rect x="14" y="30""#));
    }

    #[test]
    fn title_is_escaped() {
        let (month, cal) = september();
        let svg = generate_svg(&cal, month);
        assert!(svg.contains("Kim &lt;Coder&gt; &amp; co · 2025-09"));
        assert!(!svg.contains("<Coder>"));
    }
}
