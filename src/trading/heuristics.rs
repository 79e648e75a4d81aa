//! Trade proposal generators.
//!
//! Every generator is a pure function of the proposer's ledger (plus port
//! ownership for [`ProposalHeuristic::PortResource`]). Output order is fixed:
//! resource types in canonical order, then quantity ascending, so the argmax
//! tie-break downstream is reproducible.

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::game::action::TradeProposal;
use crate::game::resources::{COST_CITY, COST_ROAD, COST_SETTLEMENT, ResourceBundle};
use crate::game::view::{PortSet, TradingGame};
use crate::types::Resource;

/// Inputs shared by the generators for one decision point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalContext {
    pub ledger: ResourceBundle,
    pub ports: PortSet,
}

impl ProposalContext {
    pub fn new(ledger: ResourceBundle, ports: PortSet) -> Self {
        Self { ledger, ports }
    }

    pub fn for_player<G: TradingGame>(game: &G, player: usize) -> Self {
        Self {
            ledger: game.ledger(player),
            ports: game.port_resources(player),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
pub enum ProposalHeuristic {
    /// Swap the most-held type for the least-held one, every quantity up to the maximum.
    MostForLeast,
    /// Trade everything else away for resources the player has a 2:1 port for.
    PortResource,
    /// Top up wood and brick.
    RoadPriority,
    /// Top up wood, brick, sheep and wheat.
    SettlementPriority,
    /// Top up wheat and ore.
    CityPriority,
}

impl ProposalHeuristic {
    pub fn generate(&self, ctx: &ProposalContext) -> Vec<TradeProposal> {
        match self {
            ProposalHeuristic::MostForLeast => most_for_least(&ctx.ledger),
            ProposalHeuristic::PortResource => port_resource(&ctx.ledger, &ctx.ports),
            ProposalHeuristic::RoadPriority => top_up_for(&ctx.ledger, &COST_ROAD),
            ProposalHeuristic::SettlementPriority => top_up_for(&ctx.ledger, &COST_SETTLEMENT),
            ProposalHeuristic::CityPriority => top_up_for(&ctx.ledger, &COST_CITY),
        }
    }
}

pub fn most_for_least(ledger: &ResourceBundle) -> Vec<TradeProposal> {
    let most = ledger.max_count();
    let least = ledger.min_count();
    if most == 0 || most == least {
        return Vec::new();
    }

    let most_held = ledger.tied_at(most);
    let least_held = ledger.tied_at(least);
    iproduct!(most_held.iter().copied(), least_held.iter().copied(), 1..=most)
        .map(|(give, get, amount)| TradeProposal::swap(give, get, amount))
        .collect()
}

pub fn port_resource(ledger: &ResourceBundle, ports: &PortSet) -> Vec<TradeProposal> {
    let mut proposals = Vec::new();
    for (owned, non_owned) in iproduct!(ports.iter().copied(), Resource::ALL) {
        if ports.contains(&non_owned) {
            continue;
        }
        for amount in 1..=ledger.get(non_owned) {
            proposals.push(TradeProposal::swap(non_owned, owned, amount));
        }
    }
    proposals
}

/// One-for-one swaps toward `cost`.
///
/// A type is wanted while the ledger holds less of it than `cost` asks for.
/// A type may be offered only while the ledger holds more than `cost` asks
/// for, so the building's own inputs are never traded below requirement and
/// types it does not use need a single card.
pub fn top_up_for(ledger: &ResourceBundle, cost: &ResourceBundle) -> Vec<TradeProposal> {
    let mut proposals = Vec::new();
    for wanted in Resource::ALL {
        if ledger.get(wanted) >= cost.get(wanted) {
            continue;
        }
        for offered in Resource::ALL {
            if offered != wanted && ledger.get(offered) > cost.get(offered) {
                proposals.push(TradeProposal::swap(offered, wanted, 1));
            }
        }
    }
    proposals
}
