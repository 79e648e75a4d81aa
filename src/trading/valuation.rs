use log::debug;

use crate::game::action::{GameAction, TradeProposal};
use crate::game::view::TradingGame;

/// Scores a (hypothetical) game state from one player's point of view.
pub trait ValueFunction<G> {
    fn score(&self, game: &G, player: usize) -> f64;
}

impl<G, F> ValueFunction<G> for F
where
    F: Fn(&G, usize) -> f64,
{
    fn score(&self, game: &G, player: usize) -> f64 {
        self(game, player)
    }
}

/// First opponent, by seat index, whose hand covers what the proposer wants.
pub fn find_counterparty<G: TradingGame>(
    game: &G,
    player: usize,
    proposal: &TradeProposal,
) -> Option<usize> {
    game.opponents(player)
        .find(|opponent| game.ledger_contains(*opponent, proposal.received()))
}

/// Clone of `game` with the proposal carried out between the two players.
pub fn simulate_trade<G: TradingGame>(
    game: &G,
    player: usize,
    partner: usize,
    proposal: &TradeProposal,
) -> Result<G, G::Error> {
    let mut next = game.clone();
    next.transfer(player, partner, proposal.offered())?;
    next.transfer(partner, player, proposal.received())?;
    Ok(next)
}

/// Clone of `game` with `action` applied by the engine.
pub fn simulate_action<G: TradingGame>(game: &G, action: &GameAction) -> Result<G, G::Error> {
    let mut next = game.clone();
    next.execute(action)?;
    Ok(next)
}

/// Desirability of `action` for `player`. Offers nobody can answer, and
/// actions the engine refuses, score negative infinity.
pub fn value_action<G, V>(game: &G, player: usize, action: &GameAction, value_fn: &V) -> f64
where
    G: TradingGame,
    V: ValueFunction<G> + ?Sized,
{
    let outcome = match action.proposal() {
        Some(proposal) => {
            let Some(partner) = find_counterparty(game, player, proposal) else {
                return f64::NEG_INFINITY;
            };
            simulate_trade(game, player, partner, proposal)
        }
        None => simulate_action(game, action),
    };

    match outcome {
        Ok(next) => {
            let score = value_fn.score(&next, player);
            if score.is_nan() { f64::NEG_INFINITY } else { score }
        }
        Err(err) => {
            debug!("could not simulate {action}: {err}");
            f64::NEG_INFINITY
        }
    }
}

pub fn value_candidates<G, V>(
    game: &G,
    player: usize,
    candidates: &[GameAction],
    value_fn: &V,
) -> Vec<f64>
where
    G: TradingGame,
    V: ValueFunction<G> + ?Sized,
{
    candidates
        .iter()
        .map(|action| value_action(game, player, action, value_fn))
        .collect()
}

/// Index of the highest score; the earliest index wins ties.
pub fn select_best(scores: &[f64]) -> Option<usize> {
    let (first, rest) = scores.split_first()?;
    let mut best_idx = 0;
    let mut best_value = *first;
    for (offset, value) in rest.iter().enumerate() {
        if *value > best_value {
            best_value = *value;
            best_idx = offset + 1;
        }
    }
    Some(best_idx)
}
