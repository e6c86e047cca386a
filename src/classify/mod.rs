use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::decode::RawRecord;
use crate::model::{Driver, DriverKey, LeagueData, Session, SessionResult};

mod coerce;

pub use coerce::{split_highlights, to_count, to_flag, to_number, to_points, to_position};

pub mod columns {
    pub const RECORD_TYPE: &str = "recordType";
    pub const DRIVER_NAME: &str = "driverName";
    pub const DRIVER_CODE: &str = "driverCode";
    pub const TEAM: &str = "team";
    pub const POINTS: &str = "points";
    pub const WINS: &str = "wins";
    pub const PODIUMS: &str = "podiums";
    pub const FASTEST_LAPS: &str = "fastestLaps";
    pub const PREVIOUS_RANK: &str = "previousRank";
    pub const CONSISTENCY_INDEX: &str = "consistencyIndex";
    pub const SESSION_NAME: &str = "sessionName";
    pub const SESSION_DATE: &str = "sessionDate";
    pub const HIGHLIGHTS: &str = "highlights";
    pub const POSITION: &str = "position";
    pub const FASTEST_LAP: &str = "fastestLap";
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RecordType {
    Driver,
    Session,
    SessionResult,
}

impl RecordType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "driver" => Some(Self::Driver),
            "session" => Some(Self::Session),
            "session-result" => Some(Self::SessionResult),
            _ => None,
        }
    }
}

type SessionKey = (String, String);

pub fn classify_records(records: &[RawRecord]) -> LeagueData {
    let mut drivers = Vec::new();
    let mut driver_keys = HashSet::new();
    let mut sessions: Vec<Session> = Vec::new();
    let mut session_slots: HashMap<SessionKey, usize> = HashMap::new();

    for (row, record) in records.iter().enumerate() {
        let Some(record_type) = RecordType::parse(record.get(columns::RECORD_TYPE)) else {
            debug!(
                row,
                record_type = record.get(columns::RECORD_TYPE),
                "skipping unrecognised record"
            );
            continue;
        };

        match record_type {
            RecordType::Driver => {
                let driver = parse_driver(record);
                let key = DriverKey::new(&driver.name);
                if key.is_empty() {
                    debug!(row, "skipping driver record without a name");
                    continue;
                }
                if !driver_keys.insert(key) {
                    debug!(row, driver = %driver.name, "skipping repeated driver record");
                    continue;
                }
                drivers.push(driver);
            }
            RecordType::Session => {
                let session = session_slot(&mut sessions, &mut session_slots, record);
                session.highlights = split_highlights(record.get(columns::HIGHLIGHTS));
            }
            RecordType::SessionResult => {
                let session = session_slot(&mut sessions, &mut session_slots, record);
                let result = parse_result(record);
                if result.driver.is_empty() {
                    debug!(row, session = %session.name, "skipping result without a driver");
                    continue;
                }
                session.results.push(result);
            }
        }
    }

    for session in &mut sessions {
        session.sort_results();
    }

    debug!(
        records = records.len(),
        drivers = drivers.len(),
        sessions = sessions.len(),
        "classified league records"
    );

    LeagueData { drivers, sessions }
}

fn session_slot<'a>(
    sessions: &'a mut Vec<Session>,
    slots: &mut HashMap<SessionKey, usize>,
    record: &RawRecord,
) -> &'a mut Session {
    let date = record.get(columns::SESSION_DATE);
    let name = record.get(columns::SESSION_NAME);
    let slot = *slots
        .entry((date.to_string(), name.to_string()))
        .or_insert_with(|| {
            sessions.push(Session::new(name, date));
            sessions.len() - 1
        });
    &mut sessions[slot]
}

fn parse_driver(record: &RawRecord) -> Driver {
    Driver {
        name: record.get(columns::DRIVER_NAME).to_string(),
        code: record.get(columns::DRIVER_CODE).to_string(),
        team: record.get(columns::TEAM).to_string(),
        points: to_points(record.get(columns::POINTS)),
        wins: to_count(record.get(columns::WINS)),
        podiums: to_count(record.get(columns::PODIUMS)),
        fastest_laps: to_count(record.get(columns::FASTEST_LAPS)),
        previous_rank: to_position(record.get(columns::PREVIOUS_RANK)),
        consistency_index: to_number(record.get(columns::CONSISTENCY_INDEX)),
    }
}

fn parse_result(record: &RawRecord) -> SessionResult {
    SessionResult {
        driver: record.get(columns::DRIVER_NAME).to_string(),
        position: to_position(record.get(columns::POSITION)),
        points: to_points(record.get(columns::POINTS)),
        fastest_lap: to_flag(record.get(columns::FASTEST_LAP)),
    }
}
