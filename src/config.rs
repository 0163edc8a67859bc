//! Runtime configuration, loaded from environment variables.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Knobs for the fixture engine.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EngineConfig {
    /// Seed for match pairing. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Whether a CANCELLED match counts as finished when checking round completion.
    pub cancelled_counts_as_complete: bool,
}

impl EngineConfig {
    /// Environment variables:
    /// - `FIXTURE_SEED` - u64 seed for deterministic pairings (default: random)
    /// - `FIXTURE_CANCELLED_IS_TERMINAL` - `true`/`1` to let cancelled matches complete a round
    pub fn from_env() -> Self {
        let seed = std::env::var("FIXTURE_SEED")
            .ok()
            .and_then(|v| v.trim().parse().ok());
        let cancelled_counts_as_complete = std::env::var("FIXTURE_CANCELLED_IS_TERMINAL")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);
        Self {
            seed,
            cancelled_counts_as_complete,
        }
    }

    /// Config with a fixed pairing seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Where the web server listens.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `HOST` (default `0.0.0.0`) and `PORT` (default `8080`).
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("HOST").unwrap_or(defaults.host);
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        Self { host, port }
    }
}
