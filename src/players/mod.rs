pub mod base;
pub mod config;
pub mod random;
pub mod value;

use rand::SeedableRng;
use rand::rngs::StdRng;

pub use base::BasePlayer;
pub use config::{AgentConfig, ConfigError, DEFAULT_HEURISTICS};
pub use random::{RandomPlayer, RandomTraderPlayer, WeightedTraderPlayer};
pub use value::{HandValueFunction, ValueFnKind, ValueFunctionParams, ValueTraderPlayer};

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy)
}
