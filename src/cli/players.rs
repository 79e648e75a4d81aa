use crate::game::action::GameAction;
use crate::game::game::Game;
use crate::players::{
    AgentConfig, BasePlayer, RandomPlayer, RandomTraderPlayer, ValueFnKind, ValueTraderPlayer,
    WeightedTraderPlayer,
};
use crate::types::Color;

pub struct CliPlayer {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const CLI_PLAYERS: &[CliPlayer] = &[
    CliPlayer {
        code: "R",
        name: "RandomPlayer",
        description: "Chooses legal actions at random. Never proposes trades.",
    },
    CliPlayer {
        code: "T",
        name: "RandomTraderPlayer",
        description: "Chooses at random among legal actions and synthesized trade offers.",
    },
    CliPlayer {
        code: "W",
        name: "WeightedTraderPlayer",
        description: "Like T, but favors cities, settlements, offers and development cards.",
    },
    CliPlayer {
        code: "V",
        name: "ValueTraderPlayer",
        description: "Values every candidate one ply ahead. Params: C for contender weights, then EPSILON (e.g. V:C:0.1).",
    },
];

#[derive(Clone)]
pub enum PlayerInstance {
    Random(Color, RandomPlayer),
    RandomTrader(RandomTraderPlayer),
    WeightedTrader(WeightedTraderPlayer),
    ValueTrader(ValueTraderPlayer),
}

impl PlayerInstance {
    pub fn color(&self) -> Color {
        match self {
            PlayerInstance::Random(color, _) => *color,
            PlayerInstance::RandomTrader(p) => p.color,
            PlayerInstance::WeightedTrader(p) => p.color,
            PlayerInstance::ValueTrader(p) => p.color,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerInstance::Random(..) => "Random",
            PlayerInstance::RandomTrader(_) => "RandomTrader",
            PlayerInstance::WeightedTrader(_) => "WeightedTrader",
            PlayerInstance::ValueTrader(_) => "ValueTrader",
        }
    }
}

impl BasePlayer<Game> for PlayerInstance {
    fn decide(&mut self, game: &Game, actions: &[GameAction]) -> Option<GameAction> {
        match self {
            PlayerInstance::Random(_, p) => p.decide(game, actions),
            PlayerInstance::RandomTrader(p) => p.decide(game, actions),
            PlayerInstance::WeightedTrader(p) => p.decide(game, actions),
            PlayerInstance::ValueTrader(p) => p.decide(game, actions),
        }
    }
}

/// Builds the player for `code`. `template` seeds every value trader;
/// `V` params may switch its weights (`C`) and set epsilon, in either order.
pub fn create_player(
    code: &str,
    color: Color,
    params: &[&str],
    seed: Option<u64>,
    template: &AgentConfig,
) -> Option<PlayerInstance> {
    match code {
        "R" => Some(PlayerInstance::Random(color, RandomPlayer::new(seed))),
        "T" => Some(PlayerInstance::RandomTrader(RandomTraderPlayer::new(
            color, seed,
        ))),
        "W" => Some(PlayerInstance::WeightedTrader(WeightedTraderPlayer::new(
            color, seed,
        ))),
        "V" => {
            let mut config = template.clone();
            config.seed = seed;
            for param in params {
                match param.parse::<f64>() {
                    Ok(epsilon) if (0.0..=1.0).contains(&epsilon) => config.epsilon = Some(epsilon),
                    Ok(_) => return None,
                    Err(_) => {
                        config.value_fn = ValueFnKind::from_code(param);
                        config.params = None;
                    }
                }
            }
            Some(PlayerInstance::ValueTrader(ValueTraderPlayer::new(
                color, config,
            )))
        }
        _ => None,
    }
}

pub fn print_player_help() {
    println!("Player Legend:");
    println!("{:<5} {:<25} {}", "CODE", "PLAYER", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for player in CLI_PLAYERS {
        println!("{:<5} {:<25} {}", player.code, player.name, player.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_trader_params_parse() {
        let template = AgentConfig::default();
        let Some(PlayerInstance::ValueTrader(player)) =
            create_player("V", Color::Blue, &["C", "0.1"], Some(7), &template)
        else {
            panic!("expected a value trader");
        };
        assert_eq!(player.color, Color::Blue);
        assert_eq!(player.config.value_fn, ValueFnKind::Contender);
        assert_eq!(player.config.epsilon, Some(0.1));
        assert_eq!(player.config.seed, Some(7));
    }

    #[test]
    fn unknown_codes_and_bad_epsilon_are_rejected() {
        let template = AgentConfig::default();
        assert!(create_player("X", Color::Red, &[], None, &template).is_none());
        assert!(create_player("V", Color::Red, &["2.0"], None, &template).is_none());
    }

    #[test]
    fn every_listed_code_builds() {
        let template = AgentConfig::default();
        for player in CLI_PLAYERS {
            let built = create_player(player.code, Color::White, &[], Some(1), &template).unwrap();
            assert_eq!(built.color(), Color::White);
        }
    }
}
