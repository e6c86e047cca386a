use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::model::{
    Driver, DriverIndex, DriverKey, Session, SessionResult, compare_session_dates,
};

mod breakdown;
mod form;
mod head_to_head;
mod rolling;
#[cfg(test)]
mod tests;

pub use breakdown::{
    FastestLapForm, FastestLapHighlights, HeatmapSort, PodiumBreakdown, fastest_lap_form,
    fastest_lap_highlights, heatmap_order, podium_breakdown,
};
pub use form::{DriverForm, FormEntry, driver_form};
pub use head_to_head::{
    BestFinish, Finish, HeadToHeadSummary, NamedHeadToHead, Side, head_to_head,
    head_to_head_in_field,
};
pub use rolling::rolling_average;

pub const DEFAULT_MAX_POSITION: u32 = 20;
pub const INDEPENDENT_TEAM: &str = "Independent";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub index: usize,
    pub name: String,
    pub date: String,
    pub highlights: Vec<String>,
    pub results: Vec<SessionResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSeasonStats {
    pub name: String,
    pub team: String,
    pub positions: Vec<Option<u32>>,
    pub points_earned: Vec<f64>,
    pub cumulative_points: Vec<f64>,
    pub gap_to_leader: Vec<f64>,
    pub total_points: f64,
    pub wins: u32,
    pub podiums: u32,
    pub fastest_lap_count: u32,
    pub fastest_lap_positions: Vec<Option<u32>>,
    pub race_count: u32,
    pub avg_finish: Option<f64>,
    pub best_finish: Option<u32>,
    pub points_per_race: Option<f64>,
}

impl DriverSeasonStats {
    fn new(name: &str, team: &str, round_count: usize) -> Self {
        Self {
            name: name.to_string(),
            team: team.to_string(),
            positions: vec![None; round_count],
            points_earned: vec![0.0; round_count],
            cumulative_points: vec![0.0; round_count],
            gap_to_leader: vec![0.0; round_count],
            total_points: 0.0,
            wins: 0,
            podiums: 0,
            fastest_lap_count: 0,
            fastest_lap_positions: Vec::new(),
            race_count: 0,
            avg_finish: None,
            best_finish: None,
            points_per_race: None,
        }
    }

    fn record(&mut self, round: usize, result: &SessionResult) {
        self.positions[round] = result.position;
        self.points_earned[round] = result.points;

        if let Some(position) = result.position {
            self.race_count += 1;
            if position <= 3 {
                self.podiums += 1;
                if position == 1 {
                    self.wins += 1;
                }
            }
        }

        if result.fastest_lap {
            self.fastest_lap_count += 1;
            self.fastest_lap_positions.push(result.position);
        }
    }

    fn finalize(&mut self) {
        let mut running = 0.0;
        for (earned, cumulative) in self
            .points_earned
            .iter()
            .zip(self.cumulative_points.iter_mut())
        {
            running += earned;
            *cumulative = running;
        }
        self.total_points = running;

        let classified: Vec<u32> = self.positions.iter().flatten().copied().collect();
        self.best_finish = classified.iter().min().copied();
        self.avg_finish = if classified.is_empty() {
            None
        } else {
            let sum: u64 = classified.iter().map(|position| u64::from(*position)).sum();
            Some(sum as f64 / classified.len() as f64)
        };

        let classified_points: f64 = self
            .positions
            .iter()
            .zip(&self.points_earned)
            .filter(|(position, _)| position.is_some())
            .map(|(_, points)| points)
            .sum();
        self.points_per_race =
            (self.race_count > 0).then(|| classified_points / f64::from(self.race_count));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSeasonStats {
    pub name: String,
    pub points_earned: Vec<f64>,
    pub cumulative_points: Vec<f64>,
    pub total_points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonMetrics {
    pub rounds: Vec<Round>,
    pub drivers: Vec<DriverSeasonStats>,
    pub teams: Vec<TeamSeasonStats>,
    pub max_position: u32,
    #[serde(skip)]
    driver_slots: HashMap<DriverKey, usize>,
}

impl SeasonMetrics {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn driver(&self, name: &str) -> Option<&DriverSeasonStats> {
        self.driver_slots
            .get(&DriverKey::new(name))
            .and_then(|slot| self.drivers.get(*slot))
    }

    pub fn drivers_by_points(&self) -> Vec<&DriverSeasonStats> {
        let mut ordered: Vec<&DriverSeasonStats> = self.drivers.iter().collect();
        ordered.sort_by(|a, b| b.total_points.total_cmp(&a.total_points));
        ordered
    }
}

/// Rebuilds every series over the chronologically first `active_rounds` sessions.
/// Only the first result per driver and round counts.
pub fn build_season_metrics(
    drivers: &[Driver],
    sessions: &[Session],
    active_rounds: Option<usize>,
) -> SeasonMetrics {
    let rounds = order_rounds(sessions, active_rounds);
    let round_count = rounds.len();
    let index = DriverIndex::new(drivers);

    let mut roster: Vec<DriverSeasonStats> = Vec::new();
    let mut driver_slots: HashMap<DriverKey, usize> = HashMap::new();

    for round in &rounds {
        for result in &round.results {
            let key = DriverKey::new(&result.driver);
            if key.is_empty() || driver_slots.contains_key(&key) {
                continue;
            }
            let team = index
                .get(&result.driver)
                .map(|driver| driver.team.trim())
                .filter(|team| !team.is_empty())
                .unwrap_or(INDEPENDENT_TEAM);
            driver_slots.insert(key, roster.len());
            roster.push(DriverSeasonStats::new(&result.driver, team, round_count));
        }
    }

    for round in &rounds {
        let mut seen = vec![false; roster.len()];
        for result in &round.results {
            let Some(slot) = driver_slots.get(&DriverKey::new(&result.driver)).copied() else {
                continue;
            };
            if seen[slot] {
                debug!(
                    round = round.index,
                    driver = %result.driver,
                    "ignoring repeated result in round"
                );
                continue;
            }
            seen[slot] = true;
            roster[slot].record(round.index, result);
        }
    }

    for stats in &mut roster {
        stats.finalize();
    }

    apply_gap_to_leader(&mut roster, round_count);
    let teams = build_team_stats(&roster, round_count);

    let max_position = roster
        .iter()
        .flat_map(|stats| stats.positions.iter().flatten().copied())
        .max()
        .unwrap_or(DEFAULT_MAX_POSITION);

    debug!(
        rounds = round_count,
        drivers = roster.len(),
        teams = teams.len(),
        "built season metrics"
    );

    SeasonMetrics {
        rounds,
        drivers: roster,
        teams,
        max_position,
        driver_slots,
    }
}

fn order_rounds(sessions: &[Session], active_rounds: Option<usize>) -> Vec<Round> {
    let mut ordered: Vec<(usize, &Session)> = sessions.iter().enumerate().collect();
    ordered.sort_by(|(left_order, left), (right_order, right)| {
        compare_session_dates(left.parsed_date(), right.parsed_date())
            .then(left_order.cmp(right_order))
    });

    let limit = active_rounds.unwrap_or(ordered.len()).min(ordered.len());
    ordered.truncate(limit);

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, (_, session))| Round {
            index,
            name: if session.name.trim().is_empty() {
                format!("Round {}", index + 1)
            } else {
                session.name.clone()
            },
            date: session.date.clone(),
            highlights: session.highlights.clone(),
            results: session.results.clone(),
        })
        .collect()
}

fn apply_gap_to_leader(roster: &mut [DriverSeasonStats], round_count: usize) {
    for round in 0..round_count {
        let leader = roster
            .iter()
            .map(|stats| stats.cumulative_points[round])
            .fold(f64::NEG_INFINITY, f64::max);
        for stats in roster.iter_mut() {
            stats.gap_to_leader[round] = leader - stats.cumulative_points[round];
        }
    }
}

fn build_team_stats(roster: &[DriverSeasonStats], round_count: usize) -> Vec<TeamSeasonStats> {
    let mut teams: Vec<TeamSeasonStats> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for stats in roster {
        let slot = *slots.entry(stats.team.as_str()).or_insert_with(|| {
            teams.push(TeamSeasonStats {
                name: stats.team.clone(),
                points_earned: vec![0.0; round_count],
                cumulative_points: vec![0.0; round_count],
                total_points: 0.0,
            });
            teams.len() - 1
        });
        for (team_points, earned) in teams[slot].points_earned.iter_mut().zip(&stats.points_earned) {
            *team_points += earned;
        }
    }

    for team in &mut teams {
        let mut running = 0.0;
        for (earned, cumulative) in team.points_earned.iter().zip(team.cumulative_points.iter_mut()) {
            running += earned;
            *cumulative = running;
        }
        team.total_points = running;
    }

    teams
}
