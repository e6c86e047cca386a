use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::DriverKey;

const DEFAULT_AI_DRIVERS: &[&str] = &[
    "Max Verstappen",
    "Sergio Perez",
    "Lewis Hamilton",
    "George Russell",
    "Charles Leclerc",
    "Carlos Sainz",
    "Lando Norris",
    "Oscar Piastri",
    "Fernando Alonso",
    "Lance Stroll",
    "Esteban Ocon",
    "Pierre Gasly",
    "Yuki Tsunoda",
    "Daniel Ricciardo",
    "Nico Hulkenberg",
    "Kevin Magnussen",
    "Alexander Albon",
    "Logan Sargeant",
    "Valtteri Bottas",
    "Zhou Guanyu",
    "Oliver Bearman",
    "Liam Lawson",
    "Isack Hadjar",
    "Jack Doohan",
    "Andrea Kimi Antonelli",
    "Kimi Antonelli",
    "Gabriel Bortoleto",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub ai_drivers: Vec<String>,
    pub trend_window: usize,
    pub recent_sessions: usize,
    pub form_rounds: usize,
    pub season_races: usize,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            ai_drivers: DEFAULT_AI_DRIVERS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            trend_window: 3,
            recent_sessions: 3,
            form_rounds: 5,
            season_races: 12,
        }
    }
}

impl LeagueConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_slice(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn ai_roster(&self) -> AiRoster {
        AiRoster {
            keys: self.ai_drivers.iter().map(|name| DriverKey::new(name)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AiRoster {
    keys: HashSet<DriverKey>,
}

impl AiRoster {
    pub fn contains(&self, name: &str) -> bool {
        self.keys.contains(&DriverKey::new(name))
    }
}
