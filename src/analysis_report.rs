use std::fmt::Write;

use crate::analysis_stats::{OpeningStat, ReportStats, title_case};

const TOP_OPENINGS: usize = 5;

/// Openings the player met as White, most played first. Ties keep
/// first-encountered order (stable sort over insertion order).
pub fn openings_as_white(stats: &ReportStats) -> Vec<&OpeningStat> {
    let mut rows: Vec<&OpeningStat> = stats
        .openings
        .iter()
        .filter(|o| o.as_white > 0)
        .collect();
    rows.sort_by(|a, b| b.as_white.cmp(&a.as_white));
    rows
}

/// Openings the player met as Black, most played first.
pub fn openings_as_black(stats: &ReportStats) -> Vec<&OpeningStat> {
    let mut rows: Vec<&OpeningStat> = stats
        .openings
        .iter()
        .filter(|o| o.as_black > 0)
        .collect();
    rows.sort_by(|a, b| b.as_black.cmp(&a.as_black));
    rows
}

/// Time classes by descending game count, ties in first-encountered order.
pub fn time_classes_by_count(stats: &ReportStats) -> Vec<(&str, usize)> {
    let mut rows: Vec<(&str, usize)> = stats
        .time_classes
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    rows
}

/// Render the full console report. Every percentage is guarded: a bucket
/// with zero games is omitted rather than divided by.
pub fn render_report(stats: &ReportStats, username: &str) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "GAME REPORT - {}", username.to_uppercase());
    let _ = writeln!(out, "{rule}");

    if stats.counted == 0 {
        let _ = writeln!(out);
        if stats.raw_records > 0 {
            let _ = writeln!(
                out,
                "No games involving {username} found ({} records ignored).",
                stats.raw_records
            );
        } else {
            let _ = writeln!(out, "No games to analyze!");
        }
        return out;
    }

    let counted = stats.counted as f64;
    let _ = writeln!(out);
    let _ = writeln!(out, "OVERALL STATISTICS");
    let _ = writeln!(out, "  Total Games: {}", stats.counted);
    if stats.skipped_other > 0 {
        let _ = writeln!(out, "  Ignored (other players): {}", stats.skipped_other);
    }
    let _ = writeln!(
        out,
        "  Wins: {} ({:.1}%)",
        stats.wins,
        stats.wins as f64 / counted * 100.0
    );
    let _ = writeln!(
        out,
        "  Losses: {} ({:.1}%)",
        stats.losses,
        stats.losses as f64 / counted * 100.0
    );
    let _ = writeln!(
        out,
        "  Draws: {} ({:.1}%)",
        stats.draws,
        stats.draws as f64 / counted * 100.0
    );
    if stats.unknown > 0 {
        let _ = writeln!(
            out,
            "  Unrecognized results: {} ({:.1}%)",
            stats.unknown,
            stats.unknown as f64 / counted * 100.0
        );
    }
    if stats.wins + stats.losses > 0 {
        let win_rate = stats.wins as f64 / (stats.wins + stats.losses) as f64 * 100.0;
        let _ = writeln!(out, "  Win Rate: {win_rate:.1}%");
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "PERFORMANCE BY COLOR");
    if stats.white_games > 0 {
        let _ = writeln!(
            out,
            "  As White: {} games, {} wins ({:.1}%)",
            stats.white_games,
            stats.white_wins,
            stats.white_wins as f64 / stats.white_games as f64 * 100.0
        );
    }
    if stats.black_games > 0 {
        let _ = writeln!(
            out,
            "  As Black: {} games, {} wins ({:.1}%)",
            stats.black_games,
            stats.black_wins,
            stats.black_wins as f64 / stats.black_games as f64 * 100.0
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "TIME CONTROLS");
    for (time_class, count) in time_classes_by_count(stats) {
        let _ = writeln!(out, "  {}: {} games", title_case(time_class), count);
    }

    render_opening_board(
        &mut out,
        "TOP OPENINGS AS WHITE",
        &openings_as_white(stats),
        |o| o.as_white,
    );
    render_opening_board(
        &mut out,
        "TOP OPENINGS AS BLACK",
        &openings_as_black(stats),
        |o| o.as_black,
    );

    if !stats.loss_causes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "HOW YOU LOSE");
        for (cause, count) in &stats.loss_causes {
            let _ = writeln!(out, "  {}: {} times", title_case(cause), count);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{rule}");
    out
}

fn render_opening_board(
    out: &mut String,
    title: &str,
    rows: &[&OpeningStat],
    count_of: impl Fn(&OpeningStat) -> usize,
) {
    if rows.is_empty() {
        return;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    for opening in rows.iter().copied().take(TOP_OPENINGS) {
        match opening.win_rate() {
            Some(rate) => {
                let _ = writeln!(
                    out,
                    "  {}: {} games (Win rate: {rate:.1}%)",
                    opening.name,
                    count_of(opening)
                );
            }
            None => {
                let _ = writeln!(out, "  {}: {} games", opening.name, count_of(opening));
            }
        }
    }
}
