use std::cell::Cell;

use catan_trader::cli::{PlayerInstance, create_player};
use catan_trader::game::resources::ResourceBundle;
use catan_trader::game::{Game, GameAction, GameConfig, TradeProposal, TradingGame};
use catan_trader::players::{AgentConfig, BasePlayer, ValueTraderPlayer};
use catan_trader::trading::{self, ProposalContext, ProposalHeuristic, TurnState};
use catan_trader::types::{ActionType, Color, Resource};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn two_player_game(ledgers: [[u8; 5]; 2], rolled: bool) -> Game {
    let mut game = Game::new(GameConfig {
        num_players: 2,
        seed: 7,
        ..GameConfig::default()
    });
    for (player, counts) in game.state.players.iter_mut().zip(ledgers) {
        player.resources = ResourceBundle::from_counts(counts);
        player.ports.clear();
    }
    game.state.players[0].has_rolled = rolled;
    game.state.refresh_available_actions();
    game
}

fn offer(give: [u8; 5], get: [u8; 5]) -> GameAction {
    let proposal = TradeProposal::new(
        ResourceBundle::from_counts(give),
        ResourceBundle::from_counts(get),
    )
    .unwrap();
    GameAction::offer(0, proposal)
}

#[test]
fn most_for_least_trades_surplus_wood_for_missing_brick() {
    let ctx = ProposalContext::new(ResourceBundle::from_counts([4, 0, 1, 1, 1]), Default::default());
    let proposals = ProposalHeuristic::MostForLeast.generate(&ctx);

    assert_eq!(proposals.len(), 4);
    for (idx, proposal) in proposals.iter().enumerate() {
        let amount = idx as u8 + 1;
        assert_eq!(
            *proposal.offered(),
            ResourceBundle::single(Resource::Wood, amount)
        );
        assert_eq!(
            *proposal.received(),
            ResourceBundle::single(Resource::Brick, amount)
        );
    }
}

#[test]
fn lone_roll_is_returned_without_valuation() {
    let game = two_player_game([[4, 0, 1, 1, 1], [0, 0, 0, 0, 0]], false);
    let legal = game.legal_actions().to_vec();
    assert_eq!(legal.len(), 1);
    assert_eq!(legal[0].action_type, ActionType::Roll);

    let calls = Cell::new(0);
    let counting = |_: &Game, _: usize| {
        calls.set(calls.get() + 1);
        1.0
    };
    let mut turn = TurnState::new();
    let mut rng = StdRng::seed_from_u64(3);
    let chosen = trading::decide(
        &AgentConfig::default(),
        &mut turn,
        &counting,
        &mut rng,
        &game,
        0,
        &legal,
    );

    assert_eq!(chosen, Some(legal[0].clone()));
    assert_eq!(calls.get(), 0);
}

#[test]
fn offer_nobody_can_answer_loses_to_an_answerable_one() {
    let game = two_player_game([[2, 0, 0, 0, 0], [0, 1, 0, 0, 0]], true);
    let for_ore = offer([1, 0, 0, 0, 0], [0, 0, 0, 0, 1]);
    let for_brick = offer([1, 0, 0, 0, 0], [0, 1, 0, 0, 0]);
    let legal = vec![
        GameAction::new(0, ActionType::EndTurn),
        for_ore,
        for_brick.clone(),
    ];

    let brick = |g: &Game, p: usize| g.ledger(p).get(Resource::Brick) as f64;
    let config = AgentConfig {
        heuristics: Vec::new(),
        ..AgentConfig::default()
    };
    let mut turn = TurnState::new();
    let mut rng = StdRng::seed_from_u64(3);
    let chosen = trading::decide(&config, &mut turn, &brick, &mut rng, &game, 0, &legal);

    assert_eq!(chosen, Some(for_brick));
    assert!(turn.trade_attempted());
    assert_eq!(game.ledger(0), ResourceBundle::from_counts([2, 0, 0, 0, 0]));
}

#[test]
fn lone_unanswerable_offer_is_returned_unscored() {
    let game = two_player_game([[2, 0, 0, 0, 0], [0, 0, 0, 0, 0]], true);
    let for_ore = offer([1, 0, 0, 0, 0], [0, 0, 0, 0, 1]);
    let legal = vec![for_ore.clone()];

    let calls = Cell::new(0);
    let counting = |_: &Game, _: usize| {
        calls.set(calls.get() + 1);
        0.0
    };
    let mut turn = TurnState::new();
    let mut rng = StdRng::seed_from_u64(3);
    let chosen = trading::decide(
        &AgentConfig::default(),
        &mut turn,
        &counting,
        &mut rng,
        &game,
        0,
        &legal,
    );

    assert_eq!(chosen, Some(for_ore));
    assert_eq!(calls.get(), 0);
    assert!(turn.trade_attempted());
}

#[test]
fn value_trader_proposes_once_then_plays_on() {
    let mut game = two_player_game([[4, 0, 0, 0, 0], [0, 3, 0, 0, 0]], true);
    let config = AgentConfig {
        heuristics: vec![ProposalHeuristic::MostForLeast],
        seed: Some(11),
        ..AgentConfig::default()
    };
    let mut player = ValueTraderPlayer::with_value_fn(
        Color::Red,
        config,
        |g: &Game, p: usize| g.ledger(p).get(Resource::Brick) as f64,
    );

    let legal = game.legal_actions().to_vec();
    assert!(legal.len() > 1);
    let first = player.decide(&game, &legal).unwrap();
    assert_eq!(first.action_type, ActionType::OfferTrade);
    game.state.step(first).unwrap();
    assert_eq!(game.ledger(0), ResourceBundle::from_counts([1, 3, 0, 0, 0]));

    let legal = game.legal_actions().to_vec();
    let second = player.decide(&game, &legal).unwrap();
    assert_ne!(second.action_type, ActionType::OfferTrade);
    assert!(player.turn_state().trade_attempted());
}

#[test]
fn seeded_mixed_table_plays_to_completion() {
    let template = AgentConfig::default();
    let mut players: Vec<PlayerInstance> = ["V", "T", "W", "R"]
        .iter()
        .zip(Color::ORDERED)
        .enumerate()
        .map(|(seat, (code, color))| {
            create_player(code, color, &[], Some(seat as u64), &template).unwrap()
        })
        .collect();

    let mut game = Game::new(GameConfig {
        num_players: players.len(),
        seed: 5,
        ..GameConfig::default()
    });
    game.play(&mut players);

    assert!(game.state.turn > 0);
    assert!(!game.state.action_log().is_empty());
    for player in &game.state.players {
        assert!(player.resources.total() <= 19 * 5);
    }
}
