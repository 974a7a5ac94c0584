//! Server configuration from environment variables
//!
//! - `MAZE_API_BIND`: listen address (default `0.0.0.0:8080`)
//! - `MAZE_DIFFICULTY`: difficulty of the first session (default `easy`)
//! - `MAZE_SEED`: seed of the first maze (default: derived from the clock)
//! - `MAZE_JSON_LIMIT`: maximum JSON body size in bytes (default 1 MiB)

use maze_session::{seed_from_time, Difficulty};

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_JSON_LIMIT: usize = 1_048_576;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_address: String,
    pub difficulty: Difficulty,
    pub seed: u32,
    pub json_limit: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let bind_address = lookup("MAZE_API_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());

        let difficulty = match lookup("MAZE_DIFFICULTY") {
            Some(value) => value.parse()?,
            None => Difficulty::default(),
        };

        let seed = match lookup("MAZE_SEED") {
            Some(value) => value
                .parse()
                .map_err(|_| format!("Invalid MAZE_SEED '{}'. Must be a non-negative integer", value))?,
            None => seed_from_time(),
        };

        let json_limit = match lookup("MAZE_JSON_LIMIT") {
            Some(value) => value
                .parse()
                .map_err(|_| format!("Invalid MAZE_JSON_LIMIT '{}'. Must be a byte count", value))?,
            None => DEFAULT_JSON_LIMIT,
        };

        Ok(Self {
            bind_address,
            difficulty,
            seed,
            json_limit,
        })
    }
}
