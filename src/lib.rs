#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod cli;
pub mod game;
pub mod players;
pub mod trading;
pub mod types;

pub use game::{Game, GameConfig, GameState, TradeProposal, TradingGame};
pub use players::{AgentConfig, ValueTraderPlayer};
pub use trading::{ProposalHeuristic, TurnState, ValueFunction, decide};
pub use types::{Color, Resource};
