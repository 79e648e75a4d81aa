use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use catan_trader::cli::{GameStats, PlayerInstance, create_player, print_player_help};
use catan_trader::game::{Game, GameConfig};
use catan_trader::players::AgentConfig;
use catan_trader::types::Color;
use clap::Parser;

#[derive(Debug, Parser, Clone)]
#[command(name = "catan-trader-sim")]
#[command(about = "Simulate games between trading agents")]
struct Args {
    /// Number of games to play
    #[arg(short = 'n', long, default_value_t = 5)]
    num: u32,

    /// Comma-separated player codes (e.g., V,T,W,R)
    /// Use ':' to set player-specific params (e.g., V:C:0.1)
    #[arg(long, default_value = "V,T,T,T")]
    players: String,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Victory points needed to win
    #[arg(long, default_value_t = 10)]
    vps_to_win: u8,

    /// JSON agent config applied to every value trader
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show player codes and exit
    #[arg(long)]
    help_players: bool,

    /// Silence console output
    #[arg(long)]
    quiet: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.help_players {
        print_player_help();
        return;
    }

    let template = match &args.config {
        Some(path) => AgentConfig::load(path).unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }),
        None => AgentConfig::default(),
    };

    let player_keys: Vec<&str> = args.players.split(',').collect();
    if player_keys.len() < 2 || player_keys.len() > Color::ORDERED.len() {
        eprintln!("Error: Must specify 2-4 players");
        std::process::exit(1);
    }

    let mut players = Vec::with_capacity(player_keys.len());
    for (seat, key) in player_keys.iter().enumerate() {
        let mut parts = key.split(':');
        let code = parts.next().unwrap_or_default();
        let params: Vec<&str> = parts.collect();
        let seed = args.seed.wrapping_add(1000 * (seat as u64 + 1));

        match create_player(code, Color::ORDERED[seat], &params, Some(seed), &template) {
            Some(player) => players.push(player),
            None => {
                eprintln!("Error: Unknown player '{key}'");
                eprintln!("Use --help-players to see available codes");
                std::process::exit(1);
            }
        }
    }

    let mut stats = GameStats::new();
    run_simulations(&args, &mut players, &mut stats);

    if !args.quiet {
        print_summary(&stats, &players);
    }
}

fn run_simulations(args: &Args, players: &mut [PlayerInstance], stats: &mut GameStats) {
    for game_idx in 0..args.num {
        let config = GameConfig {
            num_players: players.len(),
            vps_to_win: args.vps_to_win,
            seed: args.seed + game_idx as u64,
            ..GameConfig::default()
        };

        let start = Instant::now();
        let mut game = Game::new(config);
        let winner = game.play(players);
        let duration = start.elapsed();

        stats.record_game(&game, duration);

        if args.quiet {
            continue;
        }
        let last_n = 10;
        if game_idx < last_n || game_idx >= args.num.saturating_sub(last_n) {
            let winner_str = winner
                .map(|c| c.to_string())
                .unwrap_or_else(|| "None".to_string());
            println!(
                "Game {:>4}: Winner={:>6}, Turns={:>4}, Ticks={:>5}, Duration={:?}",
                game_idx + 1,
                winner_str,
                game.state.turn,
                game.state.actions.len(),
                duration
            );
        } else if (game_idx + 1) % 100 == 0 {
            print!(".");
            let _ = std::io::stdout().flush();
        }
    }
}

fn print_summary(stats: &GameStats, players: &[PlayerInstance]) {
    println!("\n{}", "=".repeat(80));
    println!("SIMULATION SUMMARY");
    println!("{}", "=".repeat(80));

    println!("\nPlayer Summary:");
    println!(
        "{:<25} {:<10} {:<12} {:<12} {:<12}",
        "Player", "Wins", "Win Rate", "Avg VP", "Avg Trades"
    );
    println!("{}", "-".repeat(72));

    for player in players {
        let color = player.color();
        println!(
            "{:<25} {:<10} {:<11.1}% {:<12.2} {:<12.2}",
            format!("{} ({})", player.name(), color),
            stats.wins.get(&color).copied().unwrap_or(0),
            stats.win_rate(color),
            stats.avg_vps(color),
            stats.avg_trades(color)
        );
    }

    println!("\nGame Summary:");
    println!("  Total Games: {}", stats.games);
    println!("  Avg Turns: {:.2}", stats.avg_turns());
    println!("  Avg Ticks: {:.2}", stats.avg_ticks());
    println!("  Avg Duration: {:.2?}", stats.avg_duration());
}
