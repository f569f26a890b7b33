use anyhow::Result;

use chessrecap::config::CombineConfig;
use chessrecap::game_store::{combine_game_files, save_games};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();
    chessrecap::logging::init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let cfg = CombineConfig::from_args(&args)?;

    let (merged, summary) = combine_game_files(&cfg.pattern)?;
    println!(
        "Found {} game files matching {}",
        summary.files_found, cfg.pattern
    );
    println!(
        "Merged {} files, {} games total",
        summary.files_merged, summary.games_total
    );
    if !summary.skipped.is_empty() {
        println!("Skipped {} files:", summary.skipped.len());
        for (path, err) in &summary.skipped {
            println!(" - {}: {err}", path.display());
        }
    }

    save_games(&cfg.output_path, &merged)?;
    println!("All games saved to {}", cfg.output_path.display());
    Ok(())
}
