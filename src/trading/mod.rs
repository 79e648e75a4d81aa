//! Trade synthesis and one-ply action valuation for trading agents.
//!
//! A decision runs in a fixed order: short-circuit a single legal action,
//! gate on [`TurnState`], append the proposals of every enabled
//! [`ProposalHeuristic`], optionally explore, then value every candidate on
//! its own clone of the game and take the first maximum. The turn state is
//! updated from whichever action comes back.

pub mod heuristics;
pub mod turn;
pub mod valuation;

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::game::action::GameAction;
use crate::game::view::TradingGame;
use crate::players::AgentConfig;

pub use heuristics::{ProposalContext, ProposalHeuristic};
pub use turn::TurnState;
pub use valuation::{ValueFunction, select_best, value_candidates};

/// Appends every enabled heuristic's proposals, as offers by `player`, in
/// heuristic order. No deduplication: call at most once per decision.
pub fn extend_with_proposals(
    heuristics: &[ProposalHeuristic],
    ctx: &ProposalContext,
    player: usize,
    actions: &mut Vec<GameAction>,
) -> usize {
    let before = actions.len();
    for heuristic in heuristics {
        let proposals = heuristic.generate(ctx);
        debug!("{heuristic} proposed {} trades", proposals.len());
        actions.extend(
            proposals
                .into_iter()
                .map(|proposal| GameAction::offer(player, proposal)),
        );
    }
    actions.len() - before
}

/// Legal actions plus synthesized offers when the turn state allows them.
pub fn candidate_actions<G: TradingGame>(
    heuristics: &[ProposalHeuristic],
    turn: &TurnState,
    game: &G,
    player: usize,
    legal_actions: &[GameAction],
) -> Vec<GameAction> {
    let mut candidates = legal_actions.to_vec();
    if turn.should_propose(game, player) {
        let ctx = ProposalContext::for_player(game, player);
        let added = extend_with_proposals(heuristics, &ctx, player, &mut candidates);
        debug!("player {player} considers {added} synthesized offers");
    }
    candidates
}

/// Picks an action for `player` and records it in `turn`.
///
/// A lone legal action is returned as is, before any offers are synthesized
/// or scored. Returns `None` only when `legal_actions` is empty, which means
/// the caller computed legal actions wrongly.
pub fn decide<G, V, R>(
    config: &AgentConfig,
    turn: &mut TurnState,
    value_fn: &V,
    rng: &mut R,
    game: &G,
    player: usize,
    legal_actions: &[GameAction],
) -> Option<GameAction>
where
    G: TradingGame,
    V: ValueFunction<G> + ?Sized,
    R: Rng,
{
    if legal_actions.is_empty() {
        warn!("player {player} asked to decide with no legal actions");
        return None;
    }

    let chosen = match legal_actions {
        [only] => only.clone(),
        _ => {
            let candidates =
                candidate_actions(&config.heuristics, turn, game, player, legal_actions);
            choose(config, value_fn, rng, game, player, &candidates)?
        }
    };
    turn.record(&chosen);
    Some(chosen)
}

fn choose<G, V, R>(
    config: &AgentConfig,
    value_fn: &V,
    rng: &mut R,
    game: &G,
    player: usize,
    candidates: &[GameAction],
) -> Option<GameAction>
where
    G: TradingGame,
    V: ValueFunction<G> + ?Sized,
    R: Rng,
{
    if let Some(epsilon) = config.epsilon.filter(|e| e.is_finite()) {
        if rng.gen_bool(epsilon.clamp(0.0, 1.0)) {
            return candidates.choose(rng).cloned();
        }
    }

    let scores = value_candidates(game, player, candidates, value_fn);
    let best = select_best(&scores)?;
    debug!(
        "player {player} picks {} (score {}) out of {}",
        candidates[best],
        scores[best],
        candidates.len()
    );
    candidates.get(best).cloned()
}
