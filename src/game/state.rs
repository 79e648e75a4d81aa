use std::collections::VecDeque;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::types::{ActionPrompt, ActionType, Color, Resource};

use super::{
    action::{ActionPayload, GameAction, TradeProposal},
    bank::Bank,
    players::{Holding, PlayerState},
    resources::{COST_CITY, COST_DEVELOPMENT, COST_ROAD, COST_SETTLEMENT, ResourceBundle},
};

const DICE_NUMBERS: [u8; 10] = [2, 3, 4, 5, 6, 8, 9, 10, 11, 12];
const DISCARD_LIMIT: u32 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub num_players: usize,
    pub vps_to_win: u8,
    pub seed: u64,
    /// Tiles claimed by each of the two starting settlements.
    pub holdings_per_settlement: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            num_players: 4,
            vps_to_win: 10,
            seed: 42,
            holdings_per_settlement: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    Completed { winner: Option<usize> },
}

/// Compact rules engine: production is driven by per-player holdings instead
/// of a board, and domestic offers are settled on the spot.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub players: Vec<PlayerState>,
    pub bank: Bank,
    pub phase: GamePhase,
    pub pending_prompt: ActionPrompt,
    pub current_player: usize,
    turn_owner: usize,
    pub turn: u32,
    pub last_roll: Option<(u8, u8)>,
    pub actions: Vec<GameAction>,
    available_actions: Vec<GameAction>,
    discard_queue: VecDeque<usize>,
    rng: StdRng,
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("game already completed")]
    GameFinished,
    #[error("invalid player index {0}")]
    InvalidPlayer(usize),
    #[error("action by player {actual} but expected {expected}")]
    ActionOutOfTurn { expected: usize, actual: usize },
    #[error("action {action:?} invalid for prompt {prompt:?}")]
    InvalidPrompt {
        prompt: ActionPrompt,
        action: ActionType,
    },
    #[error("missing or invalid payload: {0}")]
    InvalidPayload(&'static str),
    #[error("insufficient resources")]
    InsufficientResources,
    #[error("bank resources unavailable")]
    BankOutOfResources,
    #[error("building limit reached")]
    LimitReached,
    #[error("action not allowed at this stage")]
    IllegalAction,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        assert!(
            (2..=4).contains(&config.num_players),
            "Catan supports between 2 and 4 players"
        );

        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut bank = Bank::standard(&mut rng);
        let mut players = Vec::with_capacity(config.num_players);
        for color in Color::ORDERED.iter().take(config.num_players) {
            let mut player = PlayerState::new(*color);
            player.settlements = 2;
            for _ in 0..2 * config.holdings_per_settlement {
                let holding = random_holding(&mut rng);
                let starting = ResourceBundle::single(holding.resource, 1);
                if bank.dispense(&starting).is_ok() {
                    player.add_resources(&starting);
                }
                player.holdings.push(holding);
            }
            player.ports.insert(random_port(&mut rng));
            players.push(player);
        }

        let mut state = Self {
            config,
            players,
            bank,
            phase: GamePhase::Playing,
            pending_prompt: ActionPrompt::PlayTurn,
            current_player: 0,
            turn_owner: 0,
            turn: 0,
            last_roll: None,
            actions: Vec::new(),
            available_actions: Vec::new(),
            discard_queue: VecDeque::new(),
            rng,
        };
        state.refresh_available_actions();
        state
    }

    pub fn step(&mut self, mut action: GameAction) -> Result<(), GameError> {
        if matches!(self.phase, GamePhase::Completed { .. }) {
            return Err(GameError::GameFinished);
        }
        if action.player_index >= self.players.len() {
            return Err(GameError::InvalidPlayer(action.player_index));
        }
        if action.player_index != self.current_player {
            return Err(GameError::ActionOutOfTurn {
                expected: self.current_player,
                actual: action.player_index,
            });
        }
        match self.pending_prompt {
            ActionPrompt::PlayTurn => self.handle_turn_action(&mut action)?,
            ActionPrompt::Discard if action.action_type == ActionType::Discard => {
                self.handle_discard_action(&mut action)?
            }
            prompt => {
                return Err(GameError::InvalidPrompt {
                    prompt,
                    action: action.action_type,
                });
            }
        }
        self.actions.push(action);
        self.check_victory();
        self.refresh_available_actions();
        Ok(())
    }

    pub fn legal_actions(&self) -> &[GameAction] {
        &self.available_actions
    }

    pub fn action_log(&self) -> &[GameAction] {
        &self.actions
    }

    /// Recomputes the legal action list. Call after editing fields directly.
    pub fn refresh_available_actions(&mut self) {
        self.available_actions = self.compute_available_actions();
    }

    /// Moves `bundle` between hands; neither hand changes on error.
    pub fn transfer(
        &mut self,
        from: usize,
        to: usize,
        bundle: &ResourceBundle,
    ) -> Result<(), GameError> {
        if from >= self.players.len() {
            return Err(GameError::InvalidPlayer(from));
        }
        if to >= self.players.len() {
            return Err(GameError::InvalidPlayer(to));
        }
        self.players[from]
            .remove_resources(bundle)
            .map_err(|_| GameError::InsufficientResources)?;
        self.players[to].add_resources(bundle);
        Ok(())
    }

    fn handle_turn_action(&mut self, action: &mut GameAction) -> Result<(), GameError> {
        let player_idx = action.player_index;
        match action.action_type {
            ActionType::Roll => {
                if self.players[player_idx].has_rolled {
                    return Err(GameError::IllegalAction);
                }
                let (d1, d2) = match action.payload {
                    ActionPayload::Dice(a, b) => (a.clamp(1, 6), b.clamp(1, 6)),
                    _ => (self.roll_die(), self.roll_die()),
                };
                let sum = d1 + d2;
                self.last_roll = Some((d1, d2));
                self.players[player_idx].has_rolled = true;
                action.payload = ActionPayload::Dice(d1, d2);
                if sum != 7 {
                    self.distribute_resources(sum);
                } else {
                    self.begin_discard_phase();
                }
            }
            ActionType::BuildRoad => {
                self.ensure_can_act_after_roll(player_idx)?;
                if self.players[player_idx].road_limit_reached() {
                    return Err(GameError::LimitReached);
                }
                self.pay_cost(player_idx, &COST_ROAD)?;
                self.players[player_idx].roads += 1;
            }
            ActionType::BuildSettlement => {
                self.ensure_can_act_after_roll(player_idx)?;
                if self.players[player_idx].settlement_limit_reached() {
                    return Err(GameError::LimitReached);
                }
                self.pay_cost(player_idx, &COST_SETTLEMENT)?;
                let holding = random_holding(&mut self.rng);
                let player = &mut self.players[player_idx];
                player.settlements += 1;
                player.holdings.push(holding);
            }
            ActionType::BuildCity => {
                self.ensure_can_act_after_roll(player_idx)?;
                let player = &self.players[player_idx];
                if player.settlements == 0 || player.city_limit_reached() {
                    return Err(GameError::LimitReached);
                }
                self.pay_cost(player_idx, &COST_CITY)?;
                let player = &mut self.players[player_idx];
                player.settlements -= 1;
                player.cities += 1;
                if let Some(holding) = player.holdings.iter_mut().find(|h| h.multiplier == 1) {
                    holding.multiplier = 2;
                }
            }
            ActionType::BuyDevelopmentCard => {
                self.ensure_can_act_after_roll(player_idx)?;
                let card = self
                    .bank
                    .buy_development_card(&mut self.players[player_idx].resources)
                    .map_err(|_| GameError::InsufficientResources)?
                    .ok_or(GameError::IllegalAction)?;
                self.players[player_idx].add_dev_card(card);
            }
            ActionType::MaritimeTrade => {
                self.ensure_can_act_after_roll(player_idx)?;
                let (give, receive) = match action.payload {
                    ActionPayload::MaritimeTrade { give, receive } => (give, receive),
                    _ => return Err(GameError::InvalidPayload("expected maritime trade payload")),
                };
                self.maritime_trade(player_idx, give, receive)?;
            }
            ActionType::OfferTrade => {
                self.ensure_can_act_after_roll(player_idx)?;
                let (proposal, partner) = match action.payload {
                    ActionPayload::Offer { proposal, partner } => (proposal, partner),
                    _ => return Err(GameError::InvalidPayload("expected domestic trade payload")),
                };
                let settled = self.settle_offer(player_idx, &proposal, partner)?;
                action.payload = ActionPayload::Offer {
                    proposal,
                    partner: settled,
                };
            }
            ActionType::EndTurn => {
                self.ensure_can_act_after_roll(player_idx)?;
                self.advance_turn();
            }
            ActionType::Discard => {
                return Err(GameError::InvalidPrompt {
                    prompt: self.pending_prompt,
                    action: ActionType::Discard,
                });
            }
        }
        Ok(())
    }

    fn handle_discard_action(&mut self, action: &mut GameAction) -> Result<(), GameError> {
        let player_idx = action.player_index;
        let required = self.players[player_idx].resources.total() / 2;
        let bundle = match action.payload {
            ActionPayload::Resources(bundle) => {
                if bundle.total() != required {
                    return Err(GameError::InvalidPayload("discard must cover half the hand"));
                }
                bundle
            }
            _ => self.random_discard_bundle(player_idx, required),
        };
        self.players[player_idx]
            .remove_resources(&bundle)
            .map_err(|_| GameError::InsufficientResources)?;
        self.bank.receive(&bundle);
        action.payload = ActionPayload::Resources(bundle);
        self.advance_discard_queue();
        Ok(())
    }

    /// Settles a domestic offer against `partner`, or the first opponent able
    /// to pay. `Ok(None)` means nobody could take it and nothing moved.
    fn settle_offer(
        &mut self,
        player_idx: usize,
        proposal: &TradeProposal,
        partner: Option<usize>,
    ) -> Result<Option<usize>, GameError> {
        if !self.players[player_idx]
            .resources
            .can_afford(proposal.offered())
        {
            return Err(GameError::InsufficientResources);
        }
        let counterparty = match partner {
            Some(idx) if idx == player_idx => return Err(GameError::IllegalAction),
            Some(idx) => self
                .players
                .get(idx)
                .ok_or(GameError::InvalidPlayer(idx))?
                .resources
                .can_afford(proposal.received())
                .then_some(idx),
            None => (0..self.players.len()).find(|idx| {
                *idx != player_idx && self.players[*idx].resources.can_afford(proposal.received())
            }),
        };
        let Some(counterparty) = counterparty else {
            return Ok(None);
        };
        self.transfer(player_idx, counterparty, proposal.offered())?;
        self.transfer(counterparty, player_idx, proposal.received())?;
        self.players[player_idx].trades_completed += 1;
        Ok(Some(counterparty))
    }

    fn maritime_trade(
        &mut self,
        player_idx: usize,
        give: ResourceBundle,
        receive: Resource,
    ) -> Result<(), GameError> {
        let mut offered = give.iter().filter(|(_, amount)| *amount > 0);
        let (resource, amount) = offered.next().ok_or(GameError::IllegalAction)?;
        if offered.next().is_some() || resource == receive {
            return Err(GameError::IllegalAction);
        }
        if amount != self.maritime_rate(player_idx, resource) {
            return Err(GameError::IllegalAction);
        }
        let receive_bundle = ResourceBundle::single(receive, 1);
        if !self.bank.resources().can_afford(&receive_bundle) {
            return Err(GameError::BankOutOfResources);
        }
        self.players[player_idx]
            .remove_resources(&give)
            .map_err(|_| GameError::InsufficientResources)?;
        self.bank.receive(&give);
        self.bank
            .dispense(&receive_bundle)
            .map_err(|_| GameError::BankOutOfResources)?;
        self.players[player_idx].add_resources(&receive_bundle);
        Ok(())
    }

    pub fn maritime_rate(&self, player_idx: usize, resource: Resource) -> u8 {
        let player = &self.players[player_idx];
        if player.ports.contains(&Some(resource)) {
            2
        } else if player.has_generic_port() {
            3
        } else {
            4
        }
    }

    fn begin_discard_phase(&mut self) {
        self.discard_queue = (0..self.players.len())
            .filter(|idx| self.players[*idx].resources.total() > DISCARD_LIMIT)
            .collect();
        self.advance_discard_queue();
    }

    fn advance_discard_queue(&mut self) {
        if let Some(next) = self.discard_queue.pop_front() {
            self.pending_prompt = ActionPrompt::Discard;
            self.current_player = next;
        } else {
            self.pending_prompt = ActionPrompt::PlayTurn;
            self.current_player = self.turn_owner;
        }
    }

    fn random_discard_bundle(&mut self, player_idx: usize, required: u32) -> ResourceBundle {
        let mut remaining = self.players[player_idx].resources;
        let mut bundle = ResourceBundle::zero();
        for _ in 0..required {
            let total = remaining.total();
            if total == 0 {
                break;
            }
            let mut pick = self.rng.gen_range(0..total);
            let chosen = remaining.iter().find_map(|(resource, amount)| {
                if pick < amount as u32 {
                    Some(resource)
                } else {
                    pick -= amount as u32;
                    None
                }
            });
            if let Some(resource) = chosen {
                if remaining.subtract(resource, 1).is_ok() {
                    bundle.add(resource, 1);
                }
            }
        }
        bundle
    }

    fn ensure_can_act_after_roll(&self, player_idx: usize) -> Result<(), GameError> {
        if self.players[player_idx].has_rolled {
            Ok(())
        } else {
            Err(GameError::IllegalAction)
        }
    }

    fn pay_cost(&mut self, player_idx: usize, cost: &ResourceBundle) -> Result<(), GameError> {
        self.players[player_idx]
            .remove_resources(cost)
            .map_err(|_| GameError::InsufficientResources)?;
        self.bank.receive(cost);
        Ok(())
    }

    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    fn distribute_resources(&mut self, dice_sum: u8) {
        for idx in 0..self.players.len() {
            let yields: Vec<ResourceBundle> = self.players[idx]
                .holdings
                .iter()
                .filter(|holding| holding.number == dice_sum)
                .map(|holding| ResourceBundle::single(holding.resource, holding.multiplier))
                .collect();
            for bundle in yields {
                if self.bank.dispense(&bundle).is_ok() {
                    self.players[idx].add_resources(&bundle);
                }
            }
        }
    }

    fn advance_turn(&mut self) {
        if let Some(player) = self.players.get_mut(self.current_player) {
            player.reset_for_new_turn();
        }
        self.current_player = (self.current_player + 1) % self.players.len();
        self.turn_owner = self.current_player;
        self.turn += 1;
        self.pending_prompt = ActionPrompt::PlayTurn;
    }

    fn check_victory(&mut self) {
        if matches!(self.phase, GamePhase::Completed { .. }) {
            return;
        }
        if let Some(idx) = self
            .players
            .iter()
            .position(|player| player.total_points() >= self.config.vps_to_win)
        {
            self.phase = GamePhase::Completed { winner: Some(idx) };
        }
    }

    fn compute_available_actions(&self) -> Vec<GameAction> {
        if matches!(self.phase, GamePhase::Completed { .. }) {
            return Vec::new();
        }
        match self.pending_prompt {
            ActionPrompt::PlayTurn => self.legal_play_turn_actions(),
            ActionPrompt::Discard => vec![GameAction::new(self.current_player, ActionType::Discard)],
            _ => Vec::new(),
        }
    }

    fn legal_play_turn_actions(&self) -> Vec<GameAction> {
        let player_idx = self.current_player;
        let player = &self.players[player_idx];
        if !player.has_rolled {
            return vec![GameAction::new(player_idx, ActionType::Roll)];
        }

        let mut actions = vec![GameAction::new(player_idx, ActionType::EndTurn)];
        if player.resources.can_afford(&COST_ROAD) && !player.road_limit_reached() {
            actions.push(GameAction::new(player_idx, ActionType::BuildRoad));
        }
        if player.resources.can_afford(&COST_SETTLEMENT) && !player.settlement_limit_reached() {
            actions.push(GameAction::new(player_idx, ActionType::BuildSettlement));
        }
        if player.resources.can_afford(&COST_CITY)
            && player.settlements > 0
            && !player.city_limit_reached()
        {
            actions.push(GameAction::new(player_idx, ActionType::BuildCity));
        }
        if player.resources.can_afford(&COST_DEVELOPMENT) && self.bank.development_deck_len() > 0
        {
            actions.push(GameAction::new(player_idx, ActionType::BuyDevelopmentCard));
        }
        actions.extend(self.legal_maritime_trades(player_idx));
        actions
    }

    fn legal_maritime_trades(&self, player_idx: usize) -> Vec<GameAction> {
        let mut actions = Vec::new();
        for resource in Resource::ALL {
            let rate = self.maritime_rate(player_idx, resource);
            if self.players[player_idx].resources.get(resource) < rate {
                continue;
            }
            for target in Resource::ALL {
                if target == resource || self.bank.available(target) == 0 {
                    continue;
                }
                actions.push(
                    GameAction::new(player_idx, ActionType::MaritimeTrade).with_payload(
                        ActionPayload::MaritimeTrade {
                            give: ResourceBundle::single(resource, rate),
                            receive: target,
                        },
                    ),
                );
            }
        }
        actions
    }
}

fn random_holding(rng: &mut impl Rng) -> Holding {
    let number = DICE_NUMBERS[rng.gen_range(0..DICE_NUMBERS.len())];
    let resource = Resource::ALL[rng.gen_range(0..Resource::COUNT)];
    Holding::new(number, resource)
}

fn random_port(rng: &mut impl Rng) -> Option<Resource> {
    let pick = rng.gen_range(0..=Resource::COUNT);
    Resource::ALL.get(pick).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_state() -> GameState {
        let mut state = GameState::new(GameConfig {
            num_players: 2,
            ..GameConfig::default()
        });
        for player in &mut state.players {
            player.resources = ResourceBundle::zero();
            player.ports.clear();
            player.holdings.clear();
        }
        state.refresh_available_actions();
        state
    }

    #[test]
    fn turn_starts_with_roll_only() {
        let state = two_player_state();
        let actions = state.legal_actions();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].action_type, ActionType::Roll);
    }

    #[test]
    fn roll_distributes_matching_holdings() {
        let mut state = two_player_state();
        state.players[0].holdings.push(Holding::new(6, Resource::Ore));
        state.players[1].holdings.push(Holding {
            number: 6,
            resource: Resource::Wheat,
            multiplier: 2,
        });
        state
            .step(GameAction::new(0, ActionType::Roll).with_payload(ActionPayload::Dice(3, 3)))
            .unwrap();
        assert_eq!(state.players[0].resources.get(Resource::Ore), 1);
        assert_eq!(state.players[1].resources.get(Resource::Wheat), 2);
        assert!(state.players[0].has_rolled);
        assert!(
            state
                .legal_actions()
                .iter()
                .any(|a| a.action_type == ActionType::EndTurn)
        );
    }

    #[test]
    fn seven_sends_heavy_hands_to_discard() {
        let mut state = two_player_state();
        state.players[1].resources = ResourceBundle::from_counts([3, 3, 3, 0, 0]);
        state
            .step(GameAction::new(0, ActionType::Roll).with_payload(ActionPayload::Dice(3, 4)))
            .unwrap();
        assert_eq!(state.pending_prompt, ActionPrompt::Discard);
        assert_eq!(state.current_player, 1);

        state.step(GameAction::new(1, ActionType::Discard)).unwrap();
        assert_eq!(state.players[1].resources.total(), 5);
        assert_eq!(state.pending_prompt, ActionPrompt::PlayTurn);
        assert_eq!(state.current_player, 0);
    }

    #[test]
    fn offer_settles_with_first_able_opponent() {
        let mut state = GameState::new(GameConfig {
            num_players: 3,
            ..GameConfig::default()
        });
        for player in &mut state.players {
            player.resources = ResourceBundle::zero();
        }
        state.players[0].resources = ResourceBundle::single(Resource::Wood, 2);
        state.players[0].has_rolled = true;
        state.players[2].resources = ResourceBundle::single(Resource::Brick, 1);
        state.refresh_available_actions();

        let proposal = TradeProposal::swap(Resource::Wood, Resource::Brick, 1);
        state.step(GameAction::offer(0, proposal)).unwrap();

        assert_eq!(
            state.players[0].resources,
            ResourceBundle::from_counts([1, 1, 0, 0, 0])
        );
        assert_eq!(state.players[2].resources, ResourceBundle::single(Resource::Wood, 1));
        assert_eq!(
            state.action_log().last().and_then(|a| match a.payload {
                ActionPayload::Offer { partner, .. } => partner,
                _ => None,
            }),
            Some(2)
        );
    }

    #[test]
    fn unanswerable_offer_changes_nothing() {
        let mut state = two_player_state();
        state.players[0].resources = ResourceBundle::single(Resource::Wood, 2);
        state.players[0].has_rolled = true;
        let proposal = TradeProposal::swap(Resource::Wood, Resource::Ore, 2);
        state.step(GameAction::offer(0, proposal)).unwrap();
        assert_eq!(state.players[0].resources, ResourceBundle::single(Resource::Wood, 2));
        assert_eq!(state.players[0].trades_completed, 0);
    }

    #[test]
    fn maritime_rate_follows_ports() {
        let mut state = two_player_state();
        assert_eq!(state.maritime_rate(0, Resource::Sheep), 4);
        state.players[0].ports.insert(None);
        assert_eq!(state.maritime_rate(0, Resource::Sheep), 3);
        state.players[0].ports.insert(Some(Resource::Sheep));
        assert_eq!(state.maritime_rate(0, Resource::Sheep), 2);
    }

    #[test]
    fn transfer_is_all_or_nothing() {
        let mut state = two_player_state();
        state.players[0].resources = ResourceBundle::single(Resource::Ore, 1);
        let err = state.transfer(0, 1, &ResourceBundle::single(Resource::Ore, 2));
        assert!(matches!(err, Err(GameError::InsufficientResources)));
        assert_eq!(state.players[0].resources.get(Resource::Ore), 1);
        assert!(state.players[1].resources.is_empty());
    }
}
