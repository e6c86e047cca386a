use anyhow::{Result, bail};
use league_metrics::config::{AiRoster, LeagueConfig};
use league_metrics::metrics::{SeasonMetrics, build_season_metrics};
use league_metrics::model::LeagueData;
use league_metrics::source::load_league_or_empty;
use tracing::{info, warn};

use crate::cli::{RoundsArgs, SourceArgs};

pub struct LeagueContext {
    pub config: LeagueConfig,
    pub data: LeagueData,
    pub json: bool,
}

impl LeagueContext {
    pub fn load(source: &SourceArgs) -> Result<Self> {
        let config = LeagueConfig::load(source.config.as_deref())?;
        let data = load_league_or_empty(&source.data);
        if data.is_empty() {
            warn!(path = %source.data.display(), "no league data available");
        }

        Ok(Self {
            config,
            data,
            json: source.json,
        })
    }

    pub fn ai_roster(&self) -> AiRoster {
        self.config.ai_roster()
    }

    pub fn season_metrics(&self, window: &RoundsArgs) -> Result<SeasonMetrics> {
        if window.rounds == Some(0) {
            bail!("--rounds must be at least 1");
        }

        let metrics = build_season_metrics(&self.data.drivers, &self.data.sessions, window.rounds);
        info!(
            rounds = metrics.round_count(),
            drivers = metrics.drivers.len(),
            "season metrics ready"
        );
        Ok(metrics)
    }
}
