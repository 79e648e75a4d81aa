use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::game::action::GameAction;
use crate::game::view::TradingGame;
use crate::players::{BasePlayer, seeded_rng};
use crate::trading::{ProposalHeuristic, TurnState, candidate_actions};
use crate::types::{ActionType, Color};

pub const RANDOM_TRADER_HEURISTICS: [ProposalHeuristic; 2] = [
    ProposalHeuristic::MostForLeast,
    ProposalHeuristic::PortResource,
];

#[derive(Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: seeded_rng(seed),
        }
    }
}

impl<G: TradingGame> BasePlayer<G> for RandomPlayer {
    fn decide(&mut self, _game: &G, actions: &[GameAction]) -> Option<GameAction> {
        actions.choose(&mut self.rng).cloned()
    }
}

/// Random choice over the legal actions plus synthesized offers.
#[derive(Clone)]
pub struct RandomTraderPlayer {
    pub color: Color,
    pub heuristics: Vec<ProposalHeuristic>,
    turn: TurnState,
    rng: StdRng,
}

impl RandomTraderPlayer {
    pub fn new(color: Color, seed: Option<u64>) -> Self {
        Self {
            color,
            heuristics: RANDOM_TRADER_HEURISTICS.to_vec(),
            turn: TurnState::new(),
            rng: seeded_rng(seed),
        }
    }
}

impl<G: TradingGame> BasePlayer<G> for RandomTraderPlayer {
    fn decide(&mut self, game: &G, actions: &[GameAction]) -> Option<GameAction> {
        let player = game.player_index(self.color)?;
        let candidates = candidate_actions(&self.heuristics, &self.turn, game, player, actions);
        let choice = candidates.choose(&mut self.rng).cloned()?;
        self.turn.record(&choice);
        Some(choice)
    }
}

pub fn action_weight(action_type: ActionType) -> u32 {
    match action_type {
        ActionType::BuildCity => 10000,
        ActionType::BuildSettlement => 1000,
        ActionType::OfferTrade => 500,
        ActionType::BuyDevelopmentCard => 100,
        _ => 1,
    }
}

/// Random choice skewed toward cities, settlements, offers and dev cards.
#[derive(Clone)]
pub struct WeightedTraderPlayer {
    pub color: Color,
    pub heuristics: Vec<ProposalHeuristic>,
    turn: TurnState,
    rng: StdRng,
}

impl WeightedTraderPlayer {
    pub fn new(color: Color, seed: Option<u64>) -> Self {
        Self {
            color,
            heuristics: RANDOM_TRADER_HEURISTICS.to_vec(),
            turn: TurnState::new(),
            rng: seeded_rng(seed),
        }
    }
}

impl<G: TradingGame> BasePlayer<G> for WeightedTraderPlayer {
    fn decide(&mut self, game: &G, actions: &[GameAction]) -> Option<GameAction> {
        let player = game.player_index(self.color)?;
        let candidates = candidate_actions(&self.heuristics, &self.turn, game, player, actions);
        let weights = WeightedIndex::new(candidates.iter().map(|a| action_weight(a.action_type)))
            .ok()?;
        let choice = candidates.get(weights.sample(&mut self.rng)).cloned()?;
        self.turn.record(&choice);
        Some(choice)
    }
}
