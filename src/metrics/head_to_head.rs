use std::cmp::Ordering;

use serde::Serialize;

use super::SeasonMetrics;
use crate::model::DriverKey;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Finish {
    Classified(u32),
    Unclassified,
}

impl From<Option<u32>> for Finish {
    fn from(position: Option<u32>) -> Self {
        position.map_or(Self::Unclassified, Self::Classified)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    A,
    B,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestFinish {
    pub side: Side,
    pub position: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadSummary {
    pub wins_a: u32,
    pub wins_b: u32,
    pub ties: u32,
    pub rounds_compared: u32,
    pub best_finish: Option<BestFinish>,
    // Mean of B - A over every compared round; positive favours A.
    pub average_gap: Option<f64>,
}

/// Compares two position series over the first `rounds` entries.
///
/// For the finishing gap an unclassified round counts one place behind the worst
/// classified position in either series.
pub fn head_to_head(
    positions_a: &[Option<u32>],
    positions_b: &[Option<u32>],
    rounds: usize,
) -> HeadToHeadSummary {
    let max_position = positions_a
        .iter()
        .chain(positions_b)
        .flatten()
        .copied()
        .max()
        .unwrap_or(0);
    head_to_head_in_field(positions_a, positions_b, rounds, max_position)
}

pub fn head_to_head_in_field(
    positions_a: &[Option<u32>],
    positions_b: &[Option<u32>],
    rounds: usize,
    max_position: u32,
) -> HeadToHeadSummary {
    let limit = rounds.min(positions_a.len().max(positions_b.len()));
    let unclassified = i64::from(max_position) + 1;
    let mut summary = HeadToHeadSummary::default();
    let mut gap_total: i64 = 0;

    for round in 0..limit {
        let a = positions_a.get(round).copied().flatten();
        let b = positions_b.get(round).copied().flatten();
        if a.is_none() && b.is_none() {
            continue;
        }
        summary.rounds_compared += 1;

        match Finish::from(a).cmp(&Finish::from(b)) {
            Ordering::Less => summary.wins_a += 1,
            Ordering::Greater => summary.wins_b += 1,
            Ordering::Equal => summary.ties += 1,
        }

        for (side, position) in [(Side::A, a), (Side::B, b)] {
            let Some(position) = position else {
                continue;
            };
            let improves = summary
                .best_finish
                .is_none_or(|best| position < best.position);
            if improves {
                summary.best_finish = Some(BestFinish { side, position });
            }
        }

        let effective = |position: Option<u32>| position.map_or(unclassified, i64::from);
        gap_total += effective(b) - effective(a);
    }

    if summary.rounds_compared > 0 {
        summary.average_gap = Some(gap_total as f64 / f64::from(summary.rounds_compared));
    }

    summary
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedHeadToHead {
    pub driver_a: String,
    pub driver_b: String,
    pub rounds: usize,
    pub summary: HeadToHeadSummary,
}

impl NamedHeadToHead {
    pub fn best_finish_driver(&self) -> Option<&str> {
        self.summary.best_finish.map(|best| match best.side {
            Side::A => self.driver_a.as_str(),
            Side::B => self.driver_b.as_str(),
        })
    }
}

impl SeasonMetrics {
    pub fn head_to_head(&self, driver_a: &str, driver_b: &str, rounds: usize) -> Option<NamedHeadToHead> {
        if DriverKey::new(driver_a) == DriverKey::new(driver_b) {
            return None;
        }
        let a = self.driver(driver_a)?;
        let b = self.driver(driver_b)?;
        let rounds = rounds.min(self.round_count());

        Some(NamedHeadToHead {
            driver_a: a.name.clone(),
            driver_b: b.name.clone(),
            rounds,
            summary: head_to_head_in_field(&a.positions, &b.positions, rounds, self.max_position),
        })
    }
}
