use super::fetch::open_cache;
use super::{build_calendar, load_month, member_calendar, open_repo, output_calendar, output_json, output_ndjson};
use crate::calendar::{bucket_by_day, count_on, parse_log_dates, YearMonth};
use crate::cli::{CommonArgs, MemberAction};
use crate::color::{BaseColor, ColorMapper, ZeroPolicy};
use crate::config::TeamConfig;
use crate::model::{AttendanceEntry, AttendanceOutput, DateRange, MemberCalendar, SCHEMA_VERSION};
use anyhow::{bail, Context};
use chrono::{NaiveDate, Utc};
use console::style;
use std::collections::BTreeSet;
use std::io::Read;
use std::path::{Path, PathBuf};

fn load_config(common: &CommonArgs) -> anyhow::Result<TeamConfig> {
    TeamConfig::load(&common.config).with_context(|| format!("Failed to load config {}", common.config.display()))
}

fn calendars_for(common: &CommonArgs, config: &TeamConfig, month: YearMonth, progress: bool) -> anyhow::Result<(String, Vec<MemberCalendar>)> {
    let repo = open_repo(common, config)?;
    let mut cache = open_cache(common, &repo)?;
    let data = load_month(&repo, &mut cache, config, month, progress);

    let mapper = config.mapper();
    let calendars = config
        .members
        .iter()
        .zip(&data.series)
        .map(|(member, series)| member_calendar(member, series, &mapper, config.normalization))
        .collect::<crate::error::Result<Vec<_>>>()
        .context("Failed to color calendars")?;

    Ok((data.repository_path, calendars))
}

pub fn exec_calendar(common: &CommonArgs, month: YearMonth, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let config = load_config(common)?;
    // Keep progress indicators off for machine-readable output.
    let (repo_path, calendars) = calendars_for(common, &config, month, !(json || ndjson))?;

    if json {
        output_json(&calendars, &config.title, &repo_path, month)
    } else if ndjson {
        output_ndjson(&calendars)
    } else {
        output_calendar(&calendars, &config.title, &repo_path, month)
    }
}

pub fn exec_log(common: &CommonArgs, month: YearMonth, log: &Path, color: BaseColor, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let config = load_config(common)?;
    let text = if log.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(log).with_context(|| format!("Failed to read {}", log.display()))?
    };

    let dates = parse_log_dates(&text)?;
    let series = bucket_by_day(month, dates);
    let calendar = build_calendar("log", "git log", &color, &series, &config.mapper(), config.normalization)?;
    let source = log.display().to_string();

    if json {
        output_json(&[calendar], &config.title, &source, month)
    } else if ndjson {
        output_ndjson(&[calendar])
    } else {
        output_calendar(&[calendar], &config.title, &source, month)
    }
}

pub fn exec_interactive(common: &CommonArgs, month: YearMonth) -> anyhow::Result<()> {
    let config = load_config(common)?;
    let repo = open_repo(common, &config)?;
    let mut cache = open_cache(common, &repo)?;
    let mapper = config.mapper();
    let repo_path = repo.path().to_string_lossy().to_string();

    let load = |month: YearMonth| -> anyhow::Result<Vec<MemberCalendar>> {
        let data = load_month(&repo, &mut cache, &config, month, false);
        config
            .members
            .iter()
            .zip(&data.series)
            .map(|(member, series)| member_calendar(member, series, &mapper, config.normalization))
            .collect::<crate::error::Result<Vec<_>>>()
            .map_err(Into::into)
    };

    crate::tui::run(&config.title, &repo_path, month, load).map_err(|e| anyhow::anyhow!(e))
}

pub fn exec_svg(common: &CommonArgs, month: YearMonth, member: Option<&str>, out: Option<&Path>) -> anyhow::Result<()> {
    let config = load_config(common)?;
    let (_, calendars) = calendars_for(common, &config, month, false)?;
    let selected: Vec<&MemberCalendar> = calendars
        .iter()
        .filter(|c| member.map_or(true, |key| c.key == key))
        .collect();

    if selected.is_empty() {
        match member {
            Some(key) => bail!("No member '{key}' in {}", common.config.display()),
            None => bail!("No team members configured"),
        }
    }

    match out {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
            for calendar in selected {
                let path = dir.join(format!("{}-{}.svg", sanitize(&calendar.key), month));
                std::fs::write(&path, crate::svg::generate_svg(calendar, month))
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("{} {}", style("wrote").green(), path.display());
            }
        }
        None if selected.len() == 1 => println!("{}", crate::svg::generate_svg(selected[0], month)),
        None => bail!("Several members selected; pass --out DIR or --member KEY"),
    }
    Ok(())
}

pub fn exec_readme(common: &CommonArgs, month: YearMonth, path: &Path) -> anyhow::Result<()> {
    let config = load_config(common)?;
    let (_, calendars) = calendars_for(common, &config, month, false)?;
    if calendars.is_empty() {
        bail!("No team members configured");
    }

    let sections: Vec<(String, String)> = calendars
        .iter()
        .map(|c| {
            let body = format!("### {}\n\n{}", c.display_name, crate::svg::generate_svg(c, month));
            (sanitize(&c.key), body)
        })
        .collect();

    crate::readme::update_readme(path, &config.title, &sections)
        .with_context(|| format!("Failed to update {}", path.display()))?;
    println!("{} {} ({} members)", style("updated").green(), path.display(), sections.len());
    Ok(())
}

pub fn exec_attendance(common: &CommonArgs, date: NaiveDate, json: bool) -> anyhow::Result<()> {
    let config = load_config(common)?;
    if config.members.is_empty() {
        bail!("Configure a repository and team members first");
    }
    let repo = open_repo(common, &config)?;
    let mut cache = open_cache(common, &repo)?;
    let data = load_month(&repo, &mut cache, &config, YearMonth::of(date), !json);

    let entries: Vec<AttendanceEntry> = config
        .members
        .iter()
        .zip(&data.series)
        .map(|(member, series)| {
            let commits = count_on(series, date);
            AttendanceEntry {
                key: member.key.clone(),
                display_name: member.display_name.clone(),
                commits,
                present: commits > 0,
            }
        })
        .collect();

    if json {
        let output = AttendanceOutput {
            version: SCHEMA_VERSION,
            generated_at: Utc::now(),
            date,
            entries,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", style(format!("Attendance {date}")).bold());
    for entry in &entries {
        let mark = if entry.present { style("✅").green() } else { style("❌").red() };
        println!("{mark} {}: {} commits", entry.display_name, entry.commits);
    }
    Ok(())
}

pub fn exec_authors(common: &CommonArgs, within: std::time::Duration) -> anyhow::Result<()> {
    let config = load_config(common)?;
    let repo = open_repo(common, &config)?;
    let mut cache = open_cache(common, &repo)?;

    let within = chrono::Duration::from_std(within).context("Duration out of range")?;
    let range = DateRange::new().with_since(Utc::now() - within);
    let commits = crate::cache::fetch_commits(&repo, &mut cache, &range, true)?;

    let authors: BTreeSet<&str> = commits.iter().map(|c| c.author_name.as_str()).collect();
    for author in authors {
        println!("{author}");
    }
    Ok(())
}

pub fn exec_color(base: BaseColor, intensity: f64, background: Option<BaseColor>) -> anyhow::Result<()> {
    let mapper = match background {
        Some(bg) => ColorMapper::new(ZeroPolicy::Background(bg.to_rgb()?)),
        None => ColorMapper::default(),
    };
    let rgb = mapper.map(&base, intensity)?;
    println!("{} {}", rgb.to_hex(), rgb.to_css());
    Ok(())
}

pub fn exec_member(common: &CommonArgs, action: MemberAction) -> anyhow::Result<()> {
    let mut config = load_config(common)?;
    match action {
        MemberAction::Add { key, name, color } => {
            let member = config.add_member(&key, name.as_deref(), color)?;
            println!("{} {} ({}) {}", style("added").green(), member.display_name, member.key, member.color);
        }
        MemberAction::Remove { key } => {
            let member = config.remove_member(&key)?;
            println!("{} {}", style("removed").yellow(), member.display_name);
        }
        MemberAction::Color { key, color } => {
            config.update_color(&key, color)?;
            println!("{} {key} -> {color}", style("color").cyan());
        }
        MemberAction::List => {
            if config.members.is_empty() {
                println!("No team members configured.");
            }
            for member in &config.members {
                println!("{}\t{}\t{}", member.key, member.display_name, member.color);
            }
            return Ok(());
        }
    }
    config
        .save(&common.config)
        .with_context(|| format!("Failed to save {}", common.config.display()))
}

pub fn exec_repo(common: &CommonArgs, path: PathBuf) -> anyhow::Result<()> {
    let mut config = load_config(common)?;
    let repo = crate::git::GitRepo::open(Some(&path)).context("Not a git repository")?;
    config.set_repository(repo.path().to_path_buf());
    config
        .save(&common.config)
        .with_context(|| format!("Failed to save {}", common.config.display()))?;
    println!("{} {}", style("repository").green(), repo.path().display());
    Ok(())
}

/// Keep marker and file names to a safe character set.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
