use serde::{Deserialize, Serialize};

use crate::game::action::GameAction;
use crate::game::view::TradingGame;
use crate::types::{ActionPrompt, ActionType};

/// Per-agent, per-turn memory: whether this agent already picked a trade
/// offer since its last roll. Limits proposal synthesis to one decision point
/// per turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    trade_attempted: bool,
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trade_attempted(&self) -> bool {
        self.trade_attempted
    }

    /// Proposals are synthesized only in the main phase of a turn the
    /// player has already rolled in, and only until an offer is chosen.
    pub fn should_propose<G: TradingGame>(&self, game: &G, player: usize) -> bool {
        !self.trade_attempted
            && game.has_rolled(player)
            && game.prompt() == ActionPrompt::PlayTurn
    }

    pub fn record(&mut self, chosen: &GameAction) {
        match chosen.action_type {
            ActionType::Roll => self.trade_attempted = false,
            ActionType::OfferTrade => self.trade_attempted = true,
            _ => {}
        }
    }
}
