use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::game::resources::{ResourceBundle, ResourceError};
use crate::game::view::PortSet;
use crate::types::{Color, DevelopmentCard, Resource};

pub const MAX_ROADS: u8 = 15;
pub const MAX_SETTLEMENTS: u8 = 5;
pub const MAX_CITIES: u8 = 4;

/// A settlement's claim on a numbered tile. Cities upgrade the multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub number: u8,
    pub resource: Resource,
    pub multiplier: u8,
}

impl Holding {
    pub fn new(number: u8, resource: Resource) -> Self {
        Self {
            number,
            resource,
            multiplier: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub color: Color,
    pub resources: ResourceBundle,
    pub dev_cards: Vec<DevelopmentCard>,
    pub holdings: Vec<Holding>,
    /// `None` is a generic 3:1 harbor.
    pub ports: BTreeSet<Option<Resource>>,
    pub roads: u8,
    pub settlements: u8,
    pub cities: u8,
    pub hidden_victory_points: u8,
    pub has_rolled: bool,
    pub trades_completed: u32,
}

impl PlayerState {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            resources: ResourceBundle::zero(),
            dev_cards: Vec::new(),
            holdings: Vec::new(),
            ports: BTreeSet::new(),
            roads: 0,
            settlements: 0,
            cities: 0,
            hidden_victory_points: 0,
            has_rolled: false,
            trades_completed: 0,
        }
    }

    pub fn reset_for_new_turn(&mut self) {
        self.has_rolled = false;
    }

    pub fn add_resources(&mut self, bundle: &ResourceBundle) {
        self.resources.add_bundle(bundle);
    }

    pub fn remove_resources(&mut self, bundle: &ResourceBundle) -> Result<(), ResourceError> {
        self.resources.subtract_bundle(bundle)
    }

    pub fn add_dev_card(&mut self, card: DevelopmentCard) {
        if matches!(card, DevelopmentCard::VictoryPoint) {
            self.hidden_victory_points += 1;
        }
        self.dev_cards.push(card);
    }

    pub fn port_resources(&self) -> PortSet {
        self.ports.iter().flatten().copied().collect()
    }

    pub fn has_generic_port(&self) -> bool {
        self.ports.contains(&None)
    }

    pub fn settlement_limit_reached(&self) -> bool {
        self.settlements >= MAX_SETTLEMENTS
    }

    pub fn city_limit_reached(&self) -> bool {
        self.cities >= MAX_CITIES
    }

    pub fn road_limit_reached(&self) -> bool {
        self.roads >= MAX_ROADS
    }

    pub fn public_points(&self) -> u8 {
        self.settlements + self.cities * 2
    }

    pub fn total_points(&self) -> u8 {
        self.public_points() + self.hidden_victory_points
    }
}
