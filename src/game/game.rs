use log::{info, warn};
use uuid::Uuid;

use crate::game::action::GameAction;
use crate::game::resources::ResourceBundle;
use crate::game::view::{PortSet, TradingGame};
use crate::game::{GameConfig, GameError, GamePhase, GameState};
use crate::players::BasePlayer;
use crate::types::{ActionPrompt, Color};

const TURNS_LIMIT: u32 = 1000;

#[derive(Debug, Clone)]
pub struct Game {
    pub seed: u64,
    pub id: Uuid,
    pub vps_to_win: u8,
    pub state: GameState,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            seed: config.seed,
            id: Uuid::new_v4(),
            vps_to_win: config.vps_to_win,
            state: GameState::new(config),
        }
    }

    /// Plays until someone wins or the turn limit is hit. `players[i]` acts
    /// for seat `i`.
    pub fn play<P: BasePlayer<Game>>(&mut self, players: &mut [P]) -> Option<Color> {
        while self.winning_color().is_none() && self.state.turn < TURNS_LIMIT {
            if self.play_tick(players).is_none() {
                warn!("game {} stalled on turn {}", self.id, self.state.turn);
                break;
            }
        }
        let winner = self.winning_color();
        info!(
            "game {} finished after {} turns, winner: {:?}",
            self.id, self.state.turn, winner
        );
        winner
    }

    pub fn play_tick<P: BasePlayer<Game>>(&mut self, players: &mut [P]) -> Option<GameAction> {
        let current_idx = self.state.current_player;
        if current_idx >= players.len() {
            return None;
        }

        let legal_actions = self.state.legal_actions().to_vec();
        if legal_actions.is_empty() {
            return None;
        }

        let action = players[current_idx].decide(self, &legal_actions)?;
        if let Err(err) = self.state.step(action.clone()) {
            warn!("rejected {action} in game {}: {err}", self.id);
            // Fall back to the first legal action.
            self.state.step(legal_actions[0].clone()).ok()?;
            return Some(legal_actions[0].clone());
        }
        Some(action)
    }

    pub fn winning_color(&self) -> Option<Color> {
        match &self.state.phase {
            GamePhase::Completed { winner } => {
                winner.and_then(|idx| self.state.players.get(idx).map(|p| p.color))
            }
            GamePhase::Playing => None,
        }
    }
}

impl TradingGame for Game {
    type Error = GameError;

    fn num_players(&self) -> usize {
        self.state.players.len()
    }

    fn player_index(&self, color: Color) -> Option<usize> {
        self.state.players.iter().position(|p| p.color == color)
    }

    fn prompt(&self) -> ActionPrompt {
        self.state.pending_prompt
    }

    fn has_rolled(&self, player: usize) -> bool {
        self.state
            .players
            .get(player)
            .is_some_and(|p| p.has_rolled)
    }

    fn ledger(&self, player: usize) -> ResourceBundle {
        self.state
            .players
            .get(player)
            .map(|p| p.resources)
            .unwrap_or_default()
    }

    fn port_resources(&self, player: usize) -> PortSet {
        self.state
            .players
            .get(player)
            .map(|p| p.port_resources())
            .unwrap_or_default()
    }

    fn victory_points(&self, player: usize) -> u8 {
        self.state
            .players
            .get(player)
            .map(|p| p.total_points())
            .unwrap_or(0)
    }

    fn legal_actions(&self) -> &[GameAction] {
        self.state.legal_actions()
    }

    fn execute(&mut self, action: &GameAction) -> Result<(), GameError> {
        self.state.step(action.clone())
    }

    fn transfer(
        &mut self,
        from: usize,
        to: usize,
        bundle: &ResourceBundle,
    ) -> Result<(), GameError> {
        self.state.transfer(from, to, bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Resource;

    #[test]
    fn clones_are_isolated_from_the_original() {
        let game = Game::new(GameConfig {
            num_players: 2,
            ..GameConfig::default()
        });
        let before = game.ledger(0);

        let mut copy = game.clone();
        copy.state.players[0].resources.add(Resource::Ore, 3);
        copy.execute(&GameAction::new(0, crate::types::ActionType::Roll))
            .unwrap();

        assert_eq!(game.ledger(0), before);
        assert!(!game.has_rolled(0));
        assert!(copy.has_rolled(0));
    }

    #[test]
    fn opponents_skip_the_asking_player() {
        let game = Game::new(GameConfig {
            num_players: 4,
            ..GameConfig::default()
        });
        assert_eq!(game.opponents(2).collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(game.player_index(Color::Orange), Some(2));
    }
}
