use anyhow::Result;

use chessrecap::analysis_report::render_report;
use chessrecap::analysis_stats::analyze_games;
use chessrecap::config::AnalyzeConfig;
use chessrecap::game_store::load_games_or_empty;

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();
    chessrecap::logging::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = AnalyzeConfig::from_args(&args)?;

    println!("Loading games from {}...", cfg.input_path.display());
    let file = load_games_or_empty(&cfg.input_path);
    println!("Loaded {} games", file.games.len());

    let stats = analyze_games(&file.games, &cfg.username);
    print!("{}", render_report(&stats, &cfg.username));
    Ok(())
}
