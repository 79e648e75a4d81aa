use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::types::Resource;

/// Resource types sharing a count, in canonical order.
pub type TiedResources = SmallVec<[Resource; Resource::COUNT]>;

/// Per-resource card counts. Doubles as the read-only ledger view handed to
/// the proposal generators and as the half-vectors of a trade proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceBundle {
    counts: [u8; Resource::COUNT],
}

impl Default for ResourceBundle {
    fn default() -> Self {
        Self::zero()
    }
}

impl ResourceBundle {
    pub const fn from_counts(counts: [u8; Resource::COUNT]) -> Self {
        Self { counts }
    }

    pub const fn zero() -> Self {
        Self {
            counts: [0; Resource::COUNT],
        }
    }

    pub fn single(resource: Resource, amount: u8) -> Self {
        let mut bundle = Self::zero();
        bundle.add(resource, amount);
        bundle
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&v| v as u32).sum()
    }

    pub fn add(&mut self, resource: Resource, amount: u8) {
        let idx = resource.index();
        self.counts[idx] = self.counts[idx].saturating_add(amount);
    }

    pub fn add_bundle(&mut self, other: &ResourceBundle) {
        for (idx, value) in other.counts.iter().enumerate() {
            self.counts[idx] = self.counts[idx].saturating_add(*value);
        }
    }

    pub fn subtract(&mut self, resource: Resource, amount: u8) -> Result<(), ResourceError> {
        let idx = resource.index();
        if self.counts[idx] < amount {
            return Err(ResourceError::InsufficientResource {
                resource,
                available: self.counts[idx],
                requested: amount,
            });
        }
        self.counts[idx] -= amount;
        Ok(())
    }

    /// All-or-nothing: on error the bundle is left untouched.
    pub fn subtract_bundle(&mut self, other: &ResourceBundle) -> Result<(), ResourceError> {
        if !self.can_afford(other) {
            return Err(ResourceError::InsufficientBundle {
                have: *self,
                need: *other,
            });
        }
        for (idx, value) in other.counts.iter().enumerate() {
            self.counts[idx] -= *value;
        }
        Ok(())
    }

    pub fn can_afford(&self, other: &ResourceBundle) -> bool {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .all(|(have, need)| have >= need)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&value| value == 0)
    }

    /// True when some resource type has a positive count in both bundles.
    pub fn overlaps(&self, other: &ResourceBundle) -> bool {
        self.counts
            .iter()
            .zip(other.counts.iter())
            .any(|(a, b)| *a > 0 && *b > 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, u8)> + '_ {
        Resource::ALL.into_iter().zip(self.counts.iter().copied())
    }

    pub fn counts(&self) -> [u8; Resource::COUNT] {
        self.counts
    }

    pub fn get(&self, resource: Resource) -> u8 {
        self.counts[resource.index()]
    }

    pub fn max_count(&self) -> u8 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn min_count(&self) -> u8 {
        self.counts.iter().copied().min().unwrap_or(0)
    }

    pub fn tied_at(&self, count: u8) -> TiedResources {
        self.iter()
            .filter(|(_, amount)| *amount == count)
            .map(|(resource, _)| resource)
            .collect()
    }
}

impl fmt::Display for ResourceBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![];
        for (resource, amount) in self.iter() {
            if amount > 0 {
                parts.push(format!("{amount}x{resource}"));
            }
        }
        if parts.is_empty() {
            return write!(f, "nothing");
        }
        write!(f, "{}", parts.join(", "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("insufficient {resource:?}: have {available}, need {requested}")]
    InsufficientResource {
        resource: Resource,
        available: u8,
        requested: u8,
    },
    #[error("insufficient resources: have {have}, need {need}")]
    InsufficientBundle {
        have: ResourceBundle,
        need: ResourceBundle,
    },
}

pub const COST_ROAD: ResourceBundle = ResourceBundle::from_counts([1, 1, 0, 0, 0]);
pub const COST_SETTLEMENT: ResourceBundle = ResourceBundle::from_counts([1, 1, 1, 1, 0]);
pub const COST_CITY: ResourceBundle = ResourceBundle::from_counts([0, 0, 0, 2, 3]);
pub const COST_DEVELOPMENT: ResourceBundle = ResourceBundle::from_counts([0, 0, 1, 1, 1]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtract_bundle_is_all_or_nothing() {
        let mut hand = ResourceBundle::from_counts([2, 0, 1, 0, 0]);
        assert!(hand.subtract_bundle(&COST_ROAD).is_err());
        assert_eq!(hand, ResourceBundle::from_counts([2, 0, 1, 0, 0]));

        hand.add(Resource::Brick, 1);
        hand.subtract_bundle(&COST_ROAD).unwrap();
        assert_eq!(hand, ResourceBundle::from_counts([1, 0, 1, 0, 0]));
    }

    #[test]
    fn ties_are_reported_in_canonical_order() {
        let hand = ResourceBundle::from_counts([3, 0, 3, 1, 0]);
        assert_eq!(hand.max_count(), 3);
        assert_eq!(hand.min_count(), 0);
        assert_eq!(
            hand.tied_at(3).as_slice(),
            &[Resource::Wood, Resource::Sheep]
        );
        assert_eq!(hand.tied_at(0).as_slice(), &[Resource::Brick, Resource::Ore]);
    }

    #[test]
    fn overlap_only_counts_positive_entries() {
        let give = ResourceBundle::single(Resource::Wood, 2);
        assert!(!give.overlaps(&ResourceBundle::single(Resource::Ore, 1)));
        assert!(give.overlaps(&ResourceBundle::from_counts([1, 0, 0, 0, 1])));
    }

    #[test]
    fn display_lists_non_zero_counts() {
        let hand = ResourceBundle::from_counts([1, 0, 0, 2, 0]);
        assert_eq!(hand.to_string(), "1xWOOD, 2xWHEAT");
        assert_eq!(ResourceBundle::zero().to_string(), "nothing");
    }
}
