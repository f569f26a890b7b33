use anyhow::Result;
use chrono::Utc;

use chessrecap::analysis_stats::analyze_games;
use chessrecap::archive_fetch::fetch_player_history;
use chessrecap::config::FetchConfig;
use chessrecap::game_store::save_games;
use chessrecap::games::GamesFile;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();
    chessrecap::logging::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = FetchConfig::from_args(&args)?;

    println!("Fetching game archives for {}...", cfg.username);
    let (games, summary) = fetch_player_history(&cfg.username, cfg.request_delay);

    println!("Archives fetched: {}/{}", summary.archives_fetched, summary.archives_total);
    println!("Total games fetched: {}", summary.games_total);
    if !summary.errors.is_empty() {
        println!("Errors: {}", summary.errors.len());
        for err in summary.errors.iter().take(6) {
            println!(" - {err}");
        }
    }

    if games.is_empty() {
        println!("No games were fetched. Check the username and connection.");
        return Ok(());
    }

    let file = GamesFile {
        fetched_at: Some(Utc::now().to_rfc3339()),
        games,
    };
    save_games(&cfg.output_path, &file)?;
    println!("Games saved to {}", cfg.output_path.display());

    // Quick summary so a fetch run ends with the headline numbers.
    let stats = analyze_games(&file.games, &cfg.username);
    println!();
    println!("Wins: {}  Losses: {}  Draws: {}", stats.wins, stats.losses, stats.draws);
    if stats.wins + stats.losses > 0 {
        let win_rate = stats.wins as f64 / (stats.wins + stats.losses) as f64 * 100.0;
        println!("Win Rate: {win_rate:.1}%");
    }

    Ok(())
}
