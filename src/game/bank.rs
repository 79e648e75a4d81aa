use rand::seq::SliceRandom;

use crate::game::resources::{COST_DEVELOPMENT, ResourceBundle, ResourceError};
use crate::types::{DevelopmentCard, Resource};

const CARDS_PER_RESOURCE: u8 = 19;

#[derive(Debug, Clone)]
pub struct Bank {
    resources: ResourceBundle,
    development_deck: Vec<DevelopmentCard>,
}

impl Bank {
    pub fn standard(rng: &mut impl rand::Rng) -> Self {
        let mut deck = build_development_deck();
        deck.shuffle(rng);
        Self {
            resources: ResourceBundle::from_counts([CARDS_PER_RESOURCE; Resource::COUNT]),
            development_deck: deck,
        }
    }

    pub fn resources(&self) -> &ResourceBundle {
        &self.resources
    }

    pub fn receive(&mut self, bundle: &ResourceBundle) {
        self.resources.add_bundle(bundle);
    }

    pub fn dispense(&mut self, bundle: &ResourceBundle) -> Result<(), ResourceError> {
        self.resources.subtract_bundle(bundle)
    }

    /// Charges the development cost and draws the top card. `Ok(None)` once
    /// the deck is exhausted; the payment is not taken in that case.
    pub fn buy_development_card(
        &mut self,
        player_resources: &mut ResourceBundle,
    ) -> Result<Option<DevelopmentCard>, ResourceError> {
        if self.development_deck.is_empty() {
            return Ok(None);
        }
        player_resources.subtract_bundle(&COST_DEVELOPMENT)?;
        self.resources.add_bundle(&COST_DEVELOPMENT);
        Ok(self.development_deck.pop())
    }

    pub fn available(&self, resource: Resource) -> u8 {
        self.resources.get(resource)
    }

    pub fn development_deck_len(&self) -> usize {
        self.development_deck.len()
    }
}

fn build_development_deck() -> Vec<DevelopmentCard> {
    use DevelopmentCard::*;
    const DISTRIBUTION: &[(DevelopmentCard, usize)] = &[
        (Knight, 14),
        (VictoryPoint, 5),
        (RoadBuilding, 2),
        (YearOfPlenty, 2),
        (Monopoly, 2),
    ];

    DISTRIBUTION
        .iter()
        .flat_map(|(card, count)| std::iter::repeat(*card).take(*count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn development_purchase_moves_cost_into_the_bank() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bank = Bank::standard(&mut rng);
        let mut hand = ResourceBundle::from_counts([0, 0, 1, 1, 2]);

        let card = bank.buy_development_card(&mut hand).unwrap();
        assert!(card.is_some());
        assert_eq!(hand, ResourceBundle::from_counts([0, 0, 0, 0, 1]));
        assert_eq!(bank.available(Resource::Ore), CARDS_PER_RESOURCE + 1);
        assert_eq!(bank.development_deck_len(), 24);
    }

    #[test]
    fn failed_purchase_keeps_the_deck() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bank = Bank::standard(&mut rng);
        let mut hand = ResourceBundle::single(Resource::Sheep, 1);
        assert!(bank.buy_development_card(&mut hand).is_err());
        assert_eq!(bank.development_deck_len(), 25);
    }
}
