use std::collections::HashMap;
use std::time::Duration;

use crate::game::game::Game;
use crate::types::Color;

#[derive(Debug, Default, Clone)]
pub struct GameStats {
    pub wins: HashMap<Color, u32>,
    pub results_by_player: HashMap<Color, Vec<u8>>,
    pub trades_by_player: HashMap<Color, u32>,
    pub games: u32,
    pub total_ticks: u64,
    pub total_turns: u64,
    pub total_duration: Duration,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_game(&mut self, game: &Game, duration: Duration) {
        self.games += 1;
        self.total_duration += duration;
        self.total_turns += game.state.turn as u64;
        self.total_ticks += game.state.actions.len() as u64;

        if let Some(winner) = game.winning_color() {
            *self.wins.entry(winner).or_insert(0) += 1;
        }

        for player in &game.state.players {
            self.results_by_player
                .entry(player.color)
                .or_default()
                .push(player.total_points());
            *self.trades_by_player.entry(player.color).or_insert(0) += player.trades_completed;
        }
    }

    fn per_game(&self, total: f64) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        total / self.games as f64
    }

    pub fn avg_ticks(&self) -> f64 {
        self.per_game(self.total_ticks as f64)
    }

    pub fn avg_turns(&self) -> f64 {
        self.per_game(self.total_turns as f64)
    }

    pub fn avg_trades(&self, color: Color) -> f64 {
        self.per_game(self.trades_by_player.get(&color).copied().unwrap_or(0) as f64)
    }

    pub fn avg_vps(&self, color: Color) -> f64 {
        match self.results_by_player.get(&color) {
            Some(vps) if !vps.is_empty() => {
                vps.iter().map(|&v| v as f64).sum::<f64>() / vps.len() as f64
            }
            _ => 0.0,
        }
    }

    pub fn win_rate(&self, color: Color) -> f64 {
        self.per_game(self.wins.get(&color).copied().unwrap_or(0) as f64) * 100.0
    }

    pub fn avg_duration(&self) -> Duration {
        if self.games == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.games
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;

    #[test]
    fn empty_stats_average_to_zero() {
        let stats = GameStats::new();
        assert_eq!(stats.avg_turns(), 0.0);
        assert_eq!(stats.avg_trades(Color::Red), 0.0);
        assert_eq!(stats.avg_duration(), Duration::ZERO);
    }

    #[test]
    fn records_every_seat() {
        let mut game = Game::new(GameConfig {
            num_players: 3,
            ..GameConfig::default()
        });
        game.state.players[1].trades_completed = 4;
        let mut stats = GameStats::new();
        stats.record_game(&game, Duration::from_millis(10));
        stats.record_game(&game, Duration::from_millis(30));

        assert_eq!(stats.games, 2);
        assert_eq!(stats.results_by_player.len(), 3);
        assert_eq!(stats.avg_trades(game.state.players[1].color), 4.0);
        assert_eq!(stats.avg_duration(), Duration::from_millis(20));
    }
}
