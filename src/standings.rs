use std::collections::HashMap;

use serde::Serialize;

use crate::config::AiRoster;
use crate::metrics::INDEPENDENT_TEAM;
use crate::model::{Driver, DriverIndex, LeagueData, Session};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum StandingsSort {
    #[default]
    Points,
    Wins,
    Podiums,
    FastestLaps,
}

impl StandingsSort {
    fn value(self, driver: &Driver) -> f64 {
        match self {
            Self::Points => driver.points,
            Self::Wins => f64::from(driver.wins),
            Self::Podiums => f64::from(driver.podiums),
            Self::FastestLaps => f64::from(driver.fastest_laps),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingEntry {
    pub rank: usize,
    pub rank_change: Option<i64>,
    #[serde(flatten)]
    pub driver: Driver,
}

pub fn driver_standings(drivers: &[Driver], sort: StandingsSort) -> Vec<StandingEntry> {
    let mut ordered: Vec<&Driver> = drivers.iter().collect();
    ordered.sort_by(|a, b| {
        sort.value(b)
            .total_cmp(&sort.value(a))
            .then_with(|| b.points.total_cmp(&a.points))
    });

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, driver)| {
            let rank = index + 1;
            StandingEntry {
                rank,
                rank_change: driver
                    .previous_rank
                    .map(|previous| i64::from(previous) - rank as i64),
                driver: driver.clone(),
            }
        })
        .collect()
}

pub fn without_ai(entries: Vec<StandingEntry>, roster: &AiRoster) -> Vec<StandingEntry> {
    entries
        .into_iter()
        .filter(|entry| !roster.contains(&entry.driver.name))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStanding {
    pub name: String,
    pub drivers: Vec<String>,
    pub points: f64,
    pub wins: u32,
    pub podiums: u32,
    pub fastest_laps: u32,
    pub avg_finish: Option<f64>,
    pub points_share: f64,
}

impl TeamStanding {
    pub fn top_driver(&self) -> Option<&str> {
        self.drivers.first().map(String::as_str)
    }
}

#[derive(Default)]
struct TeamTally<'a> {
    drivers: Vec<&'a Driver>,
    points: f64,
    wins: u32,
    podiums: u32,
    fastest_laps: u32,
    finish_sum: u64,
    finish_count: u32,
}

pub fn team_standings(drivers: &[Driver], sessions: &[Session]) -> Vec<TeamStanding> {
    let league_points: f64 = drivers.iter().map(|driver| driver.points).sum();
    let mut order: Vec<String> = Vec::new();
    let mut tallies: HashMap<String, TeamTally<'_>> = HashMap::new();

    for driver in drivers {
        let tally = tallies.entry(team_key(&driver.team)).or_insert_with_key(|key| {
            order.push(key.clone());
            TeamTally::default()
        });
        tally.drivers.push(driver);
        tally.points += driver.points;
        tally.wins += driver.wins;
        tally.podiums += driver.podiums;
        tally.fastest_laps += driver.fastest_laps;
    }

    let index = DriverIndex::new(drivers);
    for result in sessions.iter().flat_map(|session| &session.results) {
        let Some(driver) = index.get(&result.driver) else {
            continue;
        };
        let (Some(position), Some(tally)) = (result.position, tallies.get_mut(&team_key(&driver.team)))
        else {
            continue;
        };
        tally.finish_sum += u64::from(position);
        tally.finish_count += 1;
    }

    let mut teams: Vec<TeamStanding> = order
        .into_iter()
        .filter_map(|name| {
            let mut tally = tallies.remove(&name)?;
            tally.drivers.sort_by(|a, b| b.points.total_cmp(&a.points));
            Some(TeamStanding {
                drivers: tally.drivers.iter().map(|driver| driver.name.clone()).collect(),
                points: tally.points,
                wins: tally.wins,
                podiums: tally.podiums,
                fastest_laps: tally.fastest_laps,
                avg_finish: (tally.finish_count > 0)
                    .then(|| tally.finish_sum as f64 / f64::from(tally.finish_count)),
                points_share: if league_points > 0.0 {
                    tally.points / league_points * 100.0
                } else {
                    0.0
                },
                name,
            })
        })
        .collect();

    teams.sort_by(|a, b| b.points.total_cmp(&a.points));
    teams
}

fn team_key(team: &str) -> String {
    let trimmed = team.trim();
    if trimmed.is_empty() {
        INDEPENDENT_TEAM.to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchCandidate {
    pub name: String,
    pub current_rank: usize,
    pub previous_rank: usize,
    pub improvement: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueInsights {
    pub leader: Option<Driver>,
    pub most_wins: Option<Driver>,
    pub driver_to_watch: Option<WatchCandidate>,
}

pub fn league_insights(drivers: &[Driver]) -> LeagueInsights {
    let standings = driver_standings(drivers, StandingsSort::Points);
    let most_wins = driver_standings(drivers, StandingsSort::Wins)
        .into_iter()
        .next()
        .map(|entry| entry.driver);

    let watch_pool: Vec<WatchCandidate> = standings
        .iter()
        .filter(|entry| entry.rank != 1)
        .map(|entry| {
            let previous_rank = entry
                .driver
                .previous_rank
                .map_or(entry.rank, |previous| previous as usize);
            WatchCandidate {
                name: entry.driver.name.clone(),
                current_rank: entry.rank,
                previous_rank,
                improvement: previous_rank as i64 - entry.rank as i64,
            }
        })
        .collect();

    let mut climbers: Vec<&WatchCandidate> = watch_pool
        .iter()
        .filter(|candidate| candidate.improvement > 0)
        .collect();
    climbers.sort_by(|a, b| {
        b.improvement
            .cmp(&a.improvement)
            .then(a.current_rank.cmp(&b.current_rank))
    });

    let driver_to_watch = climbers
        .first()
        .copied()
        .or_else(|| watch_pool.first())
        .cloned();

    LeagueInsights {
        leader: standings.into_iter().next().map(|entry| entry.driver),
        most_wins,
        driver_to_watch,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodiumRate {
    pub name: String,
    pub podiums: u32,
    // Percentage of sessions held; None before any session.
    pub rate: Option<f64>,
}

pub fn podium_rates(drivers: &[Driver], sessions_held: usize) -> Vec<PodiumRate> {
    let mut rates: Vec<PodiumRate> = drivers
        .iter()
        .filter(|driver| driver.podiums > 0)
        .map(|driver| PodiumRate {
            name: driver.name.clone(),
            podiums: driver.podiums,
            rate: (sessions_held > 0)
                .then(|| f64::from(driver.podiums) / sessions_held as f64 * 100.0),
        })
        .collect();
    rates.sort_by(|a, b| b.podiums.cmp(&a.podiums));
    rates
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonProgress {
    pub races_completed: usize,
    pub season_races: usize,
    pub progress_percent: f64,
    pub active_drivers: usize,
}

pub fn season_progress(data: &LeagueData, roster: &AiRoster, season_races: usize) -> SeasonProgress {
    let races_completed = data.sessions.len();
    let progress_percent = if season_races == 0 {
        0.0
    } else {
        (races_completed as f64 / season_races as f64 * 100.0).min(100.0)
    };

    SeasonProgress {
        races_completed,
        season_races,
        progress_percent,
        active_drivers: data
            .drivers
            .iter()
            .filter(|driver| !roster.contains(&driver.name) || driver.points > 0.0)
            .count(),
    }
}
