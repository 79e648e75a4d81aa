use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::game::action::GameAction;
use crate::game::resources::ResourceBundle;
use crate::game::view::TradingGame;
use crate::players::{AgentConfig, BasePlayer, seeded_rng};
use crate::trading::{self, TurnState, ValueFunction};
use crate::types::{Color, Resource};

/// Named weight presets for [`HandValueFunction`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
pub enum ValueFnKind {
    #[default]
    Base,
    Contender,
}

impl ValueFnKind {
    /// `"C"` picks the contender weights; any other code the base ones.
    pub fn from_code(code: &str) -> Self {
        if code == "C" {
            ValueFnKind::Contender
        } else {
            ValueFnKind::Base
        }
    }

    pub fn default_params(self) -> ValueFunctionParams {
        match self {
            ValueFnKind::Base => ValueFunctionParams::default(),
            ValueFnKind::Contender => ValueFunctionParams {
                public_vps: 300000000000001.94,
                hand_synergy: 102.40606877,
                hand_resources: 2.43644327,
                discard_penalty: -3.00141993,
                enemy_hand_resources: -0.5,
                num_ports: 2.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueFunctionParams {
    pub public_vps: f64,
    pub hand_synergy: f64,
    pub hand_resources: f64,
    pub discard_penalty: f64,
    pub enemy_hand_resources: f64,
    pub num_ports: f64,
}

impl Default for ValueFunctionParams {
    fn default() -> Self {
        Self {
            public_vps: 3e14,
            hand_synergy: 1e2,
            hand_resources: 1.0,
            discard_penalty: -5.0,
            enemy_hand_resources: 0.0,
            num_ports: 1.0,
        }
    }
}

/// Weighted sum over what the [`TradingGame`] seam exposes: points, how
/// close the hand is to a settlement and a city, hand sizes, ports.
#[derive(Debug, Clone, Default)]
pub struct HandValueFunction {
    pub params: ValueFunctionParams,
}

impl HandValueFunction {
    pub fn new(params: ValueFunctionParams) -> Self {
        Self { params }
    }
}

impl<G: TradingGame> ValueFunction<G> for HandValueFunction {
    fn score(&self, game: &G, player: usize) -> f64 {
        let params = &self.params;
        let hand = game.ledger(player);
        let total_vps = game.victory_points(player) as f64;
        let hand_resources = hand.total() as f64;

        let discard_penalty = if hand_resources > 7.0 {
            params.discard_penalty
        } else {
            0.0
        };

        let enemy_hand: f64 = game
            .opponents(player)
            .map(|idx| game.ledger(idx).total() as f64)
            .sum();
        let ports = game.port_resources(player).len() as f64;

        total_vps * params.public_vps
            + hand_synergy(&hand) * params.hand_synergy
            + hand_resources * params.hand_resources
            + discard_penalty
            + enemy_hand * params.enemy_hand_resources
            + ports * params.num_ports
    }
}

/// 1.0 when both a city and a settlement are affordable, 0.0 when the hand
/// holds none of either.
pub fn hand_synergy(hand: &ResourceBundle) -> f64 {
    let missing = |resource: Resource, need: f64| (need - hand.get(resource) as f64).max(0.0);

    let distance_to_city = (missing(Resource::Wheat, 2.0) + missing(Resource::Ore, 3.0)) / 5.0;
    let distance_to_settlement = (missing(Resource::Wheat, 1.0)
        + missing(Resource::Sheep, 1.0)
        + missing(Resource::Brick, 1.0)
        + missing(Resource::Wood, 1.0))
        / 4.0;

    (2.0 - distance_to_city - distance_to_settlement) / 2.0
}

/// Values every candidate, synthesized offers included, one ply ahead and
/// plays the best.
#[derive(Clone)]
pub struct ValueTraderPlayer<V = HandValueFunction> {
    pub color: Color,
    pub config: AgentConfig,
    turn: TurnState,
    rng: StdRng,
    value_fn: V,
}

impl ValueTraderPlayer<HandValueFunction> {
    pub fn new(color: Color, config: AgentConfig) -> Self {
        let value_fn = HandValueFunction::new(config.value_params());
        Self::with_value_fn(color, config, value_fn)
    }
}

impl<V> ValueTraderPlayer<V> {
    pub fn with_value_fn(color: Color, config: AgentConfig, value_fn: V) -> Self {
        Self {
            color,
            rng: seeded_rng(config.seed),
            config,
            turn: TurnState::new(),
            value_fn,
        }
    }

    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }
}

impl<G, V> BasePlayer<G> for ValueTraderPlayer<V>
where
    G: TradingGame,
    V: ValueFunction<G>,
{
    fn decide(&mut self, game: &G, actions: &[GameAction]) -> Option<GameAction> {
        let player = game.player_index(self.color)?;
        trading::decide(
            &self.config,
            &mut self.turn,
            &self.value_fn,
            &mut self.rng,
            game,
            player,
            actions,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, GameConfig};

    #[test]
    fn synergy_spans_zero_to_one() {
        assert_eq!(hand_synergy(&ResourceBundle::zero()), 0.0);
        assert_eq!(hand_synergy(&ResourceBundle::from_counts([1, 1, 1, 2, 3])), 1.0);
    }

    #[test]
    fn synergy_rewards_filling_a_gap() {
        let before = ResourceBundle::from_counts([3, 0, 1, 1, 0]);
        let after = ResourceBundle::from_counts([2, 1, 1, 1, 0]);
        assert!(hand_synergy(&after) > hand_synergy(&before));
    }

    #[test]
    fn discard_penalty_applies_above_seven_cards() {
        let mut game = Game::new(GameConfig {
            num_players: 2,
            ..GameConfig::default()
        });
        let value_fn = HandValueFunction::new(ValueFunctionParams {
            public_vps: 0.0,
            hand_synergy: 0.0,
            hand_resources: 0.0,
            discard_penalty: -5.0,
            enemy_hand_resources: 0.0,
            num_ports: 0.0,
        });

        game.state.players[0].resources = ResourceBundle::from_counts([7, 0, 0, 0, 0]);
        assert_eq!(value_fn.score(&game, 0), 0.0);
        game.state.players[0].resources = ResourceBundle::from_counts([8, 0, 0, 0, 0]);
        assert_eq!(value_fn.score(&game, 0), -5.0);
    }

    #[test]
    fn codes_select_weight_presets() {
        assert_eq!(ValueFnKind::from_code("C"), ValueFnKind::Contender);
        assert_eq!(ValueFnKind::from_code("B"), ValueFnKind::Base);
        assert_ne!(
            ValueFnKind::Contender.default_params(),
            ValueFnKind::Base.default_params()
        );
    }
}
