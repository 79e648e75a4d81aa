use crate::game::action::GameAction;
use crate::game::view::TradingGame;

pub trait BasePlayer<G: TradingGame> {
    fn decide(&mut self, game: &G, actions: &[GameAction]) -> Option<GameAction>;
}
