pub mod classify;
pub mod config;
pub mod decode;
pub mod metrics;
pub mod model;
pub mod source;
pub mod standings;
pub mod util;

pub use classify::classify_records;
pub use decode::{RawRecord, decode_records};
pub use metrics::{SeasonMetrics, build_season_metrics};
pub use model::{Driver, LeagueData, Session, SessionResult};
