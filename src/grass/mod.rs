pub mod exec;
pub mod fetch;
pub mod output;

pub use exec::*;
pub use fetch::{load_month, open_repo, MonthData};
pub use output::{output_calendar, output_json, output_ndjson};

use crate::calendar::{bucket_by_day, YearMonth};
use crate::color::{BaseColor, ColorMapper, Normalization};
use crate::config::Member;
use crate::error::Result;
use crate::model::{CommitInfo, DayActivity, DayCell, MemberCalendar, MonthStats};

/// Per-day commit counts of one member for `month`.
pub fn member_series(commits: &[CommitInfo], member_key: &str, month: YearMonth) -> Vec<DayActivity> {
    bucket_by_day(
        month,
        commits
            .iter()
            .filter(|c| c.matches_author(member_key))
            .map(CommitInfo::local_date),
    )
}

/// Attach colors and stats to a series.
pub fn build_calendar(
    key: &str,
    display_name: &str,
    base: &BaseColor,
    series: &[DayActivity],
    mapper: &ColorMapper,
    normalization: Normalization,
) -> Result<MemberCalendar> {
    let stats = MonthStats::from_series(series);
    let days = series
        .iter()
        .map(|day| {
            let intensity = normalization.intensity(day.count, stats.best_day);
            Ok(DayCell {
                date: day.date,
                count: day.count,
                intensity,
                color: mapper.map(base, intensity)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(MemberCalendar {
        key: key.to_string(),
        display_name: display_name.to_string(),
        base_color: base.to_string(),
        stats,
        days,
    })
}

pub fn member_calendar(
    member: &Member,
    series: &[DayActivity],
    mapper: &ColorMapper,
    normalization: Normalization,
) -> Result<MemberCalendar> {
    build_calendar(&member.key, &member.display_name, &member.color, series, mapper, normalization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{oklab_to_rgb, Rgb, DEFAULT_BACKGROUND};
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn commit(name: &str, day: u32, hour: u32) -> CommitInfo {
        CommitInfo {
            id: format!("{name}-{day}-{hour}"),
            author_name: name.to_string(),
            author_email: format!("{name}@example.com"),
            timestamp: Utc.with_ymd_and_hms(2025, 9, day, hour, 0, 0).unwrap(),
            utc_offset: 0,
        }
    }

    #[test]
    fn series_only_counts_matching_author() {
        let commits = vec![commit("kim", 1, 9), commit("kim", 1, 10), commit("park", 1, 11), commit("kim", 3, 8)];
        let month = YearMonth::new(2025, 9).unwrap();

        let kim = member_series(&commits, "KIM", month);
        assert_eq!(kim.len(), 30);
        assert_eq!(kim[0].count, 2);
        assert_eq!(kim[2].count, 1);
        assert_eq!(kim.iter().map(|d| d.count).sum::<u32>(), 3);

        let park = member_series(&commits, "park@", month);
        assert_eq!(park.iter().map(|d| d.count).sum::<u32>(), 1);
    }

    #[test]
    fn busiest_day_gets_full_base_color() {
        let month = YearMonth::new(2025, 9).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
        let series = bucket_by_day(month, vec![day(1), day(2), day(2)]);
        let base = BaseColor::Rgb(Rgb::new(0x21, 0x6e, 0x39));

        let cal = build_calendar("k", "K", &base, &series, &ColorMapper::default(), Normalization::Relative).unwrap();
        assert_eq!(cal.stats.best_day, 2);
        assert_eq!(cal.days[1].intensity, 1.0);
        let lab = base.to_oklab().unwrap();
        assert_eq!(cal.days[1].color, oklab_to_rgb(lab.l, lab.a, lab.b).unwrap());
        assert_eq!(cal.days[0].intensity, 0.5);
        assert_eq!(cal.base_color, "#216e39");
    }

    #[test]
    fn empty_days_use_background_policy() {
        let month = YearMonth::new(2025, 9).unwrap();
        let series = bucket_by_day(month, vec![NaiveDate::from_ymd_opt(2025, 9, 5).unwrap()]);
        let mapper = ColorMapper::with_background(DEFAULT_BACKGROUND);
        let cal = build_calendar("k", "K", &BaseColor::Hue(120.0), &series, &mapper, Normalization::Cap(4)).unwrap();

        assert_eq!(cal.days[0].color, DEFAULT_BACKGROUND);
        assert_eq!(cal.days[4].intensity, 0.25);
        assert_ne!(cal.days[4].color, DEFAULT_BACKGROUND);
    }
}
