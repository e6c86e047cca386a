use std::cmp::Ordering;

use serde::Serialize;

use super::{DriverSeasonStats, SeasonMetrics};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodiumBreakdown {
    pub driver: String,
    pub wins: u32,
    pub second: u32,
    pub third: u32,
    pub top_ten: u32,
    pub rest: u32,
}

pub fn podium_breakdown(metrics: &SeasonMetrics, rounds: usize) -> Vec<PodiumBreakdown> {
    metrics
        .drivers_by_points()
        .into_iter()
        .map(|stats| {
            let mut entry = PodiumBreakdown {
                driver: stats.name.clone(),
                ..PodiumBreakdown::default()
            };
            for position in stats.positions.iter().take(rounds).flatten() {
                match *position {
                    1 => entry.wins += 1,
                    2 => entry.second += 1,
                    3 => entry.third += 1,
                    4..=10 => entry.top_ten += 1,
                    _ => entry.rest += 1,
                }
            }
            entry
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FastestLapForm {
    pub driver: String,
    pub team: String,
    pub count: u32,
    pub avg_finish: Option<f64>,
}

pub fn fastest_lap_form(metrics: &SeasonMetrics) -> Vec<FastestLapForm> {
    let mut form: Vec<FastestLapForm> = metrics
        .drivers
        .iter()
        .filter(|stats| stats.fastest_lap_count > 0)
        .map(|stats| {
            let classified: Vec<u32> = stats.fastest_lap_positions.iter().flatten().copied().collect();
            let avg_finish = if classified.is_empty() {
                None
            } else {
                let sum: u64 = classified.iter().map(|position| u64::from(*position)).sum();
                Some(sum as f64 / classified.len() as f64)
            };
            FastestLapForm {
                driver: stats.name.clone(),
                team: stats.team.clone(),
                count: stats.fastest_lap_count,
                avg_finish,
            }
        })
        .collect();

    form.sort_by(|a, b| compare_optional_ascending(a.avg_finish, b.avg_finish));
    form
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FastestLapHighlights {
    pub standout: Option<FastestLapForm>,
    pub most_fastest_laps: Option<FastestLapForm>,
    pub best_average: Option<FastestLapForm>,
}

pub fn fastest_lap_highlights(form: &[FastestLapForm]) -> FastestLapHighlights {
    let standout = form.first().cloned();

    let mut most = form.first();
    for entry in form {
        if most.is_some_and(|current| entry.count > current.count) {
            most = Some(entry);
        }
    }

    let best_average = form
        .iter()
        .filter(|entry| entry.avg_finish.is_some())
        .min_by(|a, b| compare_optional_ascending(a.avg_finish, b.avg_finish))
        .filter(|entry| standout.as_ref().is_none_or(|leader| leader.driver != entry.driver))
        .cloned();

    FastestLapHighlights {
        standout,
        most_fastest_laps: most.cloned(),
        best_average,
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum HeatmapSort {
    #[default]
    Points,
    Name,
    Average,
}

pub fn heatmap_order(metrics: &SeasonMetrics, sort: HeatmapSort) -> Vec<&DriverSeasonStats> {
    match sort {
        HeatmapSort::Points => metrics.drivers_by_points(),
        HeatmapSort::Name => {
            let mut ordered: Vec<&DriverSeasonStats> = metrics.drivers.iter().collect();
            ordered.sort_by(|a, b| {
                a.name
                    .to_lowercase()
                    .cmp(&b.name.to_lowercase())
                    .then_with(|| a.name.cmp(&b.name))
            });
            ordered
        }
        HeatmapSort::Average => {
            let mut ordered: Vec<&DriverSeasonStats> = metrics.drivers.iter().collect();
            ordered.sort_by(|a, b| compare_optional_ascending(a.avg_finish, b.avg_finish));
            ordered
        }
    }
}

fn compare_optional_ascending(left: Option<f64>, right: Option<f64>) -> Ordering {
    match (left, right) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
