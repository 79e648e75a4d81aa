use std::collections::BTreeSet;

use crate::game::action::GameAction;
use crate::game::resources::ResourceBundle;
use crate::types::{ActionPrompt, Color, Resource};

/// Resource types a player holds a 2:1 harbor for. Generic 3:1 harbors are
/// not part of the set.
pub type PortSet = BTreeSet<Resource>;

/// What the trading agents need from the engine that runs the game.
///
/// `Clone` must produce a fully independent copy: the valuation engine
/// mutates clones freely and never expects the changes to reach `self`.
pub trait TradingGame: Clone {
    type Error: std::error::Error;

    fn num_players(&self) -> usize;

    fn player_index(&self, color: Color) -> Option<usize>;

    fn prompt(&self) -> ActionPrompt;

    fn has_rolled(&self, player: usize) -> bool;

    fn ledger(&self, player: usize) -> ResourceBundle;

    fn port_resources(&self, player: usize) -> PortSet;

    fn victory_points(&self, player: usize) -> u8;

    fn legal_actions(&self) -> &[GameAction];

    fn execute(&mut self, action: &GameAction) -> Result<(), Self::Error>;

    /// Moves `bundle` from one player's hand to another's, all or nothing.
    fn transfer(
        &mut self,
        from: usize,
        to: usize,
        bundle: &ResourceBundle,
    ) -> Result<(), Self::Error>;

    fn ledger_contains(&self, player: usize, bundle: &ResourceBundle) -> bool {
        self.ledger(player).can_afford(bundle)
    }

    /// Every other seat, in ascending index order.
    fn opponents(&self, player: usize) -> impl Iterator<Item = usize> {
        (0..self.num_players()).filter(move |idx| *idx != player)
    }
}
