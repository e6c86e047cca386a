use serde::Serialize;

use super::{Round, SeasonMetrics};
use crate::model::{DriverKey, SessionResult};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormEntry {
    pub round: String,
    // None when the driver did not start the round.
    pub result: Option<SessionResult>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverForm {
    pub driver: String,
    pub team: String,
    pub recent: Vec<FormEntry>,
    pub recent_average: Option<f64>,
    pub season_average: Option<f64>,
    pub best_finish: Option<u32>,
}

pub fn driver_form(metrics: &SeasonMetrics, last: usize) -> Vec<DriverForm> {
    let recent_rounds: Vec<&Round> = metrics.rounds.iter().rev().take(last).collect();

    metrics
        .drivers_by_points()
        .into_iter()
        .map(|stats| {
            let key = DriverKey::new(&stats.name);
            let recent: Vec<FormEntry> = recent_rounds
                .iter()
                .map(|round| FormEntry {
                    round: round.name.clone(),
                    result: round
                        .results
                        .iter()
                        .find(|result| DriverKey::new(&result.driver) == key)
                        .cloned(),
                })
                .collect();
            let classified_points: Vec<f64> = recent
                .iter()
                .filter_map(|entry| entry.result.as_ref())
                .filter(|result| result.position.is_some())
                .map(|result| result.points)
                .collect();

            DriverForm {
                driver: stats.name.clone(),
                team: stats.team.clone(),
                recent_average: mean(&classified_points),
                season_average: stats.points_per_race,
                best_finish: stats.best_finish,
                recent,
            }
        })
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
