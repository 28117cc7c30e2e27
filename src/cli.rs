use crate::calendar::YearMonth;
use crate::color::BaseColor;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "teamgrass")]
#[command(about = "Team commit-grass calendars with perceptual OKLAB colors")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to git repository (overrides the config)")]
    pub repo: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory for the commit cache database")]
    pub cache: Option<PathBuf>,

    #[arg(long, global = true, help = "Path to team config file", default_value = crate::config::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show each member's commit calendar for one month
    Calendar {
        #[arg(long, help = "Month to show (YYYY-MM), defaults to the current month")]
        month: Option<YearMonth>,

        #[arg(long, help = "Output as JSON")]
        json: bool,

        #[arg(long, help = "Output as NDJSON")]
        ndjson: bool,

        #[arg(long = "interactive", alias = "tui", help = "Browse months in a terminal UI")]
        interactive: bool,

        #[arg(long, help = "Read `git log --date=short --pretty=%ad` output from a file ('-' for stdin) instead of the repository")]
        log: Option<PathBuf>,

        #[arg(long, help = "Base color used with --log", default_value = "#216e39")]
        color: BaseColor,
    },
    /// Write one SVG calendar per member
    Svg {
        #[arg(long, help = "Month to render (YYYY-MM)")]
        month: Option<YearMonth>,

        #[arg(long, help = "Only render this member")]
        member: Option<String>,

        #[arg(long, help = "Output directory (stdout when omitted and a single member is rendered)")]
        out: Option<PathBuf>,
    },
    /// Embed member calendars into a README between marker comments
    Readme {
        #[arg(long, help = "Month to render (YYYY-MM)")]
        month: Option<YearMonth>,

        #[arg(long, default_value = "README.md", help = "README file to update")]
        path: PathBuf,
    },
    /// Who committed today
    Attendance {
        #[arg(long, help = "Day to check (YYYY-MM-DD), defaults to today")]
        date: Option<chrono::NaiveDate>,

        #[arg(long, help = "Output as JSON")]
        json: bool,
    },
    /// List recent commit authors
    Authors {
        #[arg(long, default_value = "90days", value_parser = humantime::parse_duration, help = "How far back to look, e.g. 90days, 2weeks")]
        within: std::time::Duration,
    },
    /// Print the grass color for a base color and intensity
    Color {
        #[arg(help = "Base color: #rrggbb, rgb(r,g,b), oklab(L a b) or hue(h)")]
        base: BaseColor,

        #[arg(help = "Activity intensity in [0, 1]", allow_negative_numbers = true)]
        intensity: f64,

        #[arg(long, help = "Substitute this color at zero intensity")]
        background: Option<BaseColor>,
    },
    /// Manage team members
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },
    /// Set the repository tracked by the team config
    Repo {
        path: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum MemberAction {
    /// Add a member
    Add {
        #[arg(help = "Author name or email fragment matched against commits")]
        key: String,

        #[arg(long, help = "Display name")]
        name: Option<String>,

        #[arg(long, help = "Base color, defaults to a hue derived from the key")]
        color: Option<BaseColor>,
    },
    /// Remove a member
    Remove { key: String },
    /// Change a member's color
    Color { key: String, color: BaseColor },
    /// List members
    List,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        let common = self.common;
        match self.command {
            Commands::Calendar { month, json, ndjson, interactive, log, color } => {
                let month = month.unwrap_or_else(YearMonth::current);
                if let Some(log) = log {
                    crate::grass::exec_log(&common, month, &log, color, json, ndjson)
                } else if interactive {
                    crate::grass::exec_interactive(&common, month)
                } else {
                    crate::grass::exec_calendar(&common, month, json, ndjson)
                }
            }
            Commands::Svg { month, member, out } => {
                let month = month.unwrap_or_else(YearMonth::current);
                crate::grass::exec_svg(&common, month, member.as_deref(), out.as_deref())
            }
            Commands::Readme { month, path } => {
                let month = month.unwrap_or_else(YearMonth::current);
                crate::grass::exec_readme(&common, month, &path)
            }
            Commands::Attendance { date, json } => {
                let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
                crate::grass::exec_attendance(&common, date, json)
            }
            Commands::Authors { within } => crate::grass::exec_authors(&common, within),
            Commands::Color { base, intensity, background } => {
                crate::grass::exec_color(base, intensity, background)
            }
            Commands::Member { action } => crate::grass::exec_member(&common, action),
            Commands::Repo { path } => crate::grass::exec_repo(&common, path),
        }
    }
}
