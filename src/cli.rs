use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use league_metrics::metrics::HeatmapSort;
use league_metrics::standings::StandingsSort;

#[derive(Parser, Debug)]
#[command(
    name = "league-metrics",
    version,
    about = "Standings and season analytics for a racing league results file"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Check(CheckArgs),
    Standings(StandingsArgs),
    Teams(TeamsArgs),
    Sessions(SessionsArgs),
    Season(SeasonArgs),
    HeadToHead(HeadToHeadArgs),
    Trend(TrendArgs),
    Heatmap(HeatmapArgs),
    Podiums(PodiumsArgs),
    FastestLaps(FastestLapsArgs),
    Form(FormArgs),
    Insights(InsightsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(long, default_value = "data/league-data.csv")]
    pub data: PathBuf,

    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RoundsArgs {
    #[arg(long)]
    pub rounds: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum StandingsSortArg {
    Points,
    Wins,
    Podiums,
    FastestLaps,
}

impl From<StandingsSortArg> for StandingsSort {
    fn from(value: StandingsSortArg) -> Self {
        match value {
            StandingsSortArg::Points => Self::Points,
            StandingsSortArg::Wins => Self::Wins,
            StandingsSortArg::Podiums => Self::Podiums,
            StandingsSortArg::FastestLaps => Self::FastestLaps,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct StandingsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, value_enum, default_value_t = StandingsSortArg::Points)]
    pub sort: StandingsSortArg,

    #[arg(long, default_value_t = false)]
    pub hide_ai: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TeamsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SessionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, default_value_t = false)]
    pub recent: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SeasonArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub window: RoundsArgs,

    #[arg(long, default_value_t = false)]
    pub summary: bool,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct HeadToHeadArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub window: RoundsArgs,

    #[arg(long)]
    pub driver_a: String,

    #[arg(long)]
    pub driver_b: String,
}

#[derive(Args, Debug, Clone)]
pub struct TrendArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub window: RoundsArgs,

    #[arg(long)]
    pub smoothing: Option<usize>,

    #[arg(long, default_value_t = 8)]
    pub top: usize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum HeatmapSortArg {
    Points,
    Name,
    Avg,
}

impl From<HeatmapSortArg> for HeatmapSort {
    fn from(value: HeatmapSortArg) -> Self {
        match value {
            HeatmapSortArg::Points => Self::Points,
            HeatmapSortArg::Name => Self::Name,
            HeatmapSortArg::Avg => Self::Average,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct HeatmapArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub window: RoundsArgs,

    #[arg(long, value_enum, default_value_t = HeatmapSortArg::Points)]
    pub sort: HeatmapSortArg,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum PodiumFilter {
    #[value(name = "5")]
    Top5,
    #[value(name = "10")]
    Top10,
    All,
}

impl PodiumFilter {
    pub fn limit(self) -> Option<usize> {
        match self {
            Self::Top5 => Some(5),
            Self::Top10 => Some(10),
            Self::All => None,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PodiumsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub window: RoundsArgs,

    #[arg(long, value_enum, default_value_t = PodiumFilter::Top10)]
    pub top: PodiumFilter,
}

#[derive(Args, Debug, Clone)]
pub struct FastestLapsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub window: RoundsArgs,
}

#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub window: RoundsArgs,

    #[arg(long)]
    pub last: Option<usize>,

    #[arg(long, default_value_t = 6)]
    pub top: usize,
}

#[derive(Args, Debug, Clone)]
pub struct InsightsArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}
