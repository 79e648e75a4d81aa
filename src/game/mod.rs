pub mod action;
pub mod bank;
pub mod game;
pub mod players;
pub mod resources;
pub mod state;
pub mod view;

pub use action::{ActionPayload, GameAction, PROPOSAL_VECTOR_LEN, ProposalError, TradeProposal};
pub use bank::Bank;
pub use game::Game;
pub use players::{Holding, PlayerState};
pub use resources::{
    COST_CITY, COST_DEVELOPMENT, COST_ROAD, COST_SETTLEMENT, ResourceBundle, ResourceError,
};
pub use state::{GameConfig, GameError, GamePhase, GameState};
pub use view::{PortSet, TradingGame};
