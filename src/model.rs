use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const SESSION_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub name: String,
    pub code: String,
    pub team: String,
    pub points: f64,
    pub wins: u32,
    pub podiums: u32,
    pub fastest_laps: u32,
    pub previous_rank: Option<u32>,
    pub consistency_index: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResult {
    pub driver: String,
    pub position: Option<u32>,
    pub points: f64,
    pub fastest_lap: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub name: String,
    pub date: String,
    pub highlights: Vec<String>,
    pub results: Vec<SessionResult>,
}

impl Session {
    pub fn new(name: &str, date: &str) -> Self {
        Self {
            name: name.to_string(),
            date: date.to_string(),
            highlights: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), SESSION_DATE_FORMAT).ok()
    }

    pub fn winner<F>(&self, include: F) -> Option<&SessionResult>
    where
        F: Fn(&str) -> bool,
    {
        self.results.iter().find(|result| include(&result.driver))
    }

    pub fn sort_results(&mut self) {
        self.results.sort_by(compare_results);
    }
}

fn compare_results(left: &SessionResult, right: &SessionResult) -> Ordering {
    match (left.position, right.position) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => left.driver.cmp(&right.driver),
    }
}

pub fn compare_session_dates(left: Option<NaiveDate>, right: Option<NaiveDate>) -> Ordering {
    match (left, right) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DriverKey(String);

impl DriverKey {
    pub fn new(name: &str) -> Self {
        Self(
            name.split_whitespace()
                .collect::<Vec<&str>>()
                .join(" ")
                .to_lowercase(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueData {
    pub drivers: Vec<Driver>,
    pub sessions: Vec<Session>,
}

impl LeagueData {
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty() && self.sessions.is_empty()
    }

    pub fn result_count(&self) -> usize {
        self.sessions
            .iter()
            .map(|session| session.results.len())
            .sum()
    }

    pub fn sessions_recent_first(&self) -> Vec<&Session> {
        let mut ordered: Vec<&Session> = self.sessions.iter().collect();
        ordered.sort_by(|left, right| match (left.parsed_date(), right.parsed_date()) {
            (Some(a), Some(b)) => b.cmp(&a),
            (left, right) => compare_session_dates(left, right),
        });
        ordered
    }
}

#[derive(Debug, Clone, Default)]
pub struct DriverIndex<'a> {
    by_key: HashMap<DriverKey, &'a Driver>,
}

impl<'a> DriverIndex<'a> {
    pub fn new(drivers: &'a [Driver]) -> Self {
        let mut by_key = HashMap::with_capacity(drivers.len());
        for driver in drivers {
            by_key.entry(DriverKey::new(&driver.name)).or_insert(driver);
        }
        Self { by_key }
    }

    pub fn get(&self, name: &str) -> Option<&'a Driver> {
        self.by_key.get(&DriverKey::new(name)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::{DriverKey, LeagueData, Session, SessionResult};

    fn result(driver: &str, position: Option<u32>) -> SessionResult {
        SessionResult {
            driver: driver.to_string(),
            position,
            points: 0.0,
            fastest_lap: false,
        }
    }

    #[test]
    fn sort_results_places_unpositioned_last_by_name() {
        let mut session = Session::new("Opener", "2024-01-01");
        session.results = vec![
            result("Zed", None),
            result("Bea", Some(2)),
            result("Amy", None),
            result("Cal", Some(1)),
        ];

        session.sort_results();

        let order: Vec<&str> = session.results.iter().map(|r| r.driver.as_str()).collect();
        assert_eq!(order, vec!["Cal", "Bea", "Amy", "Zed"]);
    }

    #[test]
    fn driver_key_ignores_case_and_spacing() {
        assert_eq!(DriverKey::new("  Max   Power "), DriverKey::new("max power"));
        assert!(DriverKey::new("   ").is_empty());
    }

    #[test]
    fn sessions_recent_first_puts_undated_last() {
        let data = LeagueData {
            drivers: Vec::new(),
            sessions: vec![
                Session::new("Undated", ""),
                Session::new("Early", "2024-01-01"),
                Session::new("Late", "2024-03-01"),
            ],
        };

        let names: Vec<&str> = data
            .sessions_recent_first()
            .into_iter()
            .map(|session| session.name.as_str())
            .collect();
        assert_eq!(names, vec!["Late", "Early", "Undated"]);
    }
}
