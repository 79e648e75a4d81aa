use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::resources::ResourceBundle;
use crate::types::{ActionType, Resource};

/// Length of the flattened proposal vector: offered counts then received counts.
pub const PROPOSAL_VECTOR_LEN: usize = 2 * Resource::COUNT;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GameAction {
    pub player_index: usize,
    pub action_type: ActionType,
    pub payload: ActionPayload,
}

impl GameAction {
    pub fn new(player_index: usize, action_type: ActionType) -> Self {
        Self {
            player_index,
            action_type,
            payload: ActionPayload::None,
        }
    }

    pub fn with_payload(mut self, payload: ActionPayload) -> Self {
        self.payload = payload;
        self
    }

    pub fn offer(player_index: usize, proposal: TradeProposal) -> Self {
        Self::new(player_index, ActionType::OfferTrade).with_payload(ActionPayload::Offer {
            proposal,
            partner: None,
        })
    }

    pub fn proposal(&self) -> Option<&TradeProposal> {
        match &self.payload {
            ActionPayload::Offer { proposal, .. } => Some(proposal),
            _ => None,
        }
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            ActionPayload::Offer { proposal, .. } => {
                write!(f, "{}#{} {}", self.action_type, self.player_index, proposal)
            }
            ActionPayload::MaritimeTrade { give, receive } => write!(
                f,
                "{}#{} {} -> 1x{}",
                self.action_type, self.player_index, give, receive
            ),
            _ => write!(f, "{}#{}", self.action_type, self.player_index),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ActionPayload {
    #[default]
    None,
    Dice(u8, u8),
    Resources(ResourceBundle),
    Offer {
        proposal: TradeProposal,
        partner: Option<usize>,
    },
    MaritimeTrade {
        give: ResourceBundle,
        receive: Resource,
    },
}

/// A synthesized offer: `offered` leaves the proposer, `received` comes back.
///
/// Never empty on both sides and never lists the same resource type on both
/// sides; [`TradeProposal::new`] enforces this for externally built values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TradeProposal {
    offered: ResourceBundle,
    received: ResourceBundle,
}

impl TradeProposal {
    pub fn new(offered: ResourceBundle, received: ResourceBundle) -> Result<Self, ProposalError> {
        if offered.is_empty() && received.is_empty() {
            return Err(ProposalError::Empty);
        }
        if offered.overlaps(&received) {
            return Err(ProposalError::SelfTrade);
        }
        Ok(Self { offered, received })
    }

    /// `amount` of `give` for the same amount of `get`.
    pub(crate) fn swap(give: Resource, get: Resource, amount: u8) -> Self {
        debug_assert!(give != get && amount > 0);
        Self {
            offered: ResourceBundle::single(give, amount),
            received: ResourceBundle::single(get, amount),
        }
    }

    pub fn offered(&self) -> &ResourceBundle {
        &self.offered
    }

    pub fn received(&self) -> &ResourceBundle {
        &self.received
    }

    pub fn to_vector(&self) -> [u8; PROPOSAL_VECTOR_LEN] {
        let mut vector = [0; PROPOSAL_VECTOR_LEN];
        vector[..Resource::COUNT].copy_from_slice(&self.offered.counts());
        vector[Resource::COUNT..].copy_from_slice(&self.received.counts());
        vector
    }

    pub fn from_vector(vector: &[u8]) -> Result<Self, ProposalError> {
        if vector.len() != PROPOSAL_VECTOR_LEN {
            return Err(ProposalError::Length(vector.len()));
        }
        let mut offered = [0; Resource::COUNT];
        let mut received = [0; Resource::COUNT];
        offered.copy_from_slice(&vector[..Resource::COUNT]);
        received.copy_from_slice(&vector[Resource::COUNT..]);
        Self::new(
            ResourceBundle::from_counts(offered),
            ResourceBundle::from_counts(received),
        )
    }
}

impl fmt::Display for TradeProposal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "give [{}] for [{}]", self.offered, self.received)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProposalError {
    #[error("proposal vector must have 10 entries, got {0}")]
    Length(usize),
    #[error("proposal neither offers nor requests anything")]
    Empty,
    #[error("proposal offers and requests the same resource type")]
    SelfTrade,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_layout_puts_offer_first() {
        let proposal = TradeProposal::swap(Resource::Wood, Resource::Ore, 2);
        assert_eq!(proposal.to_vector(), [2, 0, 0, 0, 0, 0, 0, 0, 0, 2]);
    }

    #[test]
    fn from_vector_rejects_invalid_shapes() {
        assert_eq!(
            TradeProposal::from_vector(&[0; 4]),
            Err(ProposalError::Length(4))
        );
        assert_eq!(
            TradeProposal::from_vector(&[0; PROPOSAL_VECTOR_LEN]),
            Err(ProposalError::Empty)
        );
        assert_eq!(
            TradeProposal::from_vector(&[1, 0, 0, 0, 0, 1, 0, 0, 0, 0]),
            Err(ProposalError::SelfTrade)
        );
    }

    #[test]
    fn from_vector_accepts_one_sided_gifts() {
        let proposal = TradeProposal::from_vector(&[0, 1, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert!(proposal.received().is_empty());
        assert_eq!(proposal.offered().get(Resource::Brick), 1);
    }

    #[test]
    fn offer_actions_expose_their_proposal() {
        let proposal = TradeProposal::swap(Resource::Sheep, Resource::Brick, 1);
        let action = GameAction::offer(3, proposal);
        assert_eq!(action.action_type, ActionType::OfferTrade);
        assert_eq!(action.proposal(), Some(&proposal));
        assert_eq!(GameAction::new(3, ActionType::Roll).proposal(), None);
    }
}
