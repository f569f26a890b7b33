use std::collections::HashMap;

use crate::games::{Color, GameRecord};

/// Result codes the API uses for a lost game. The generic `lose` code is
/// part of win/loss classification but is excluded from the loss-cause
/// breakdown below (see [`loss_breakdown`]).
pub const LOSS_RESULTS: &[&str] = &["checkmated", "resigned", "timeout", "abandoned", "lose"];

/// Loss causes tracked by the "how you lose" breakdown.
pub const LOSS_CAUSES: &[&str] = &["checkmated", "resigned", "timeout", "abandoned"];

/// Result codes the API uses for drawn games.
pub const DRAW_RESULTS: &[&str] = &[
    "agreed",
    "repetition",
    "stalemate",
    "insufficient",
    "50move",
    "timevsinsufficient",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    /// Result code outside the known sets. Counted separately so a new
    /// API code shows up in the report instead of inflating draws.
    Unknown,
}

pub fn classify_outcome(result: &str) -> Outcome {
    if result == "win" {
        Outcome::Win
    } else if LOSS_RESULTS.contains(&result) {
        Outcome::Loss
    } else if DRAW_RESULTS.contains(&result) {
        Outcome::Draw
    } else {
        Outcome::Unknown
    }
}

/// Per-opening aggregate, accumulated in first-encountered order.
#[derive(Debug, Clone, Default)]
pub struct OpeningStat {
    pub name: String,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub unknown: usize,
    pub as_white: usize,
    pub as_black: usize,
}

impl OpeningStat {
    pub fn total(&self) -> usize {
        self.wins + self.losses + self.draws + self.unknown
    }

    /// Win percentage over all games in this opening, if any were played.
    pub fn win_rate(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.wins as f64 / total as f64 * 100.0)
    }
}

/// Everything the report needs, from one pass over the collection
/// (plus the separate loss-cause pass).
#[derive(Debug, Clone, Default)]
pub struct ReportStats {
    /// Records in the input file, matched or not.
    pub raw_records: usize,
    /// Records where the tracked player held one of the two sides. This is
    /// the denominator for every percentage in the report.
    pub counted: usize,
    /// Records where neither side matched the tracked player.
    pub skipped_other: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub unknown: usize,
    pub white_games: usize,
    pub white_wins: usize,
    pub black_games: usize,
    pub black_wins: usize,
    /// First-encountered order; sorting happens at render time so ties
    /// stay stable.
    pub openings: Vec<OpeningStat>,
    /// First-encountered order, as (time class, games).
    pub time_classes: Vec<(String, usize)>,
    /// Descending count, as (cause, games).
    pub loss_causes: Vec<(String, usize)>,
}

/// Aggregate a game collection for one tracked player.
///
/// Records where neither side matches `username` are skipped entirely.
/// Missing fields degrade to defaults: no `eco` reference becomes the
/// "Unknown" opening, no `time_class` becomes "unknown".
pub fn analyze_games(games: &[GameRecord], username: &str) -> ReportStats {
    let mut stats = ReportStats {
        raw_records: games.len(),
        ..ReportStats::default()
    };
    let mut opening_index: HashMap<String, usize> = HashMap::new();
    let mut time_index: HashMap<String, usize> = HashMap::new();

    for game in games {
        let Some((color, side)) = game.side_of(username) else {
            stats.skipped_other += 1;
            continue;
        };
        stats.counted += 1;

        let outcome = classify_outcome(&side.result);
        match outcome {
            Outcome::Win => stats.wins += 1,
            Outcome::Loss => stats.losses += 1,
            Outcome::Draw => stats.draws += 1,
            Outcome::Unknown => stats.unknown += 1,
        }
        match color {
            Color::White => {
                stats.white_games += 1;
                if outcome == Outcome::Win {
                    stats.white_wins += 1;
                }
            }
            Color::Black => {
                stats.black_games += 1;
                if outcome == Outcome::Win {
                    stats.black_wins += 1;
                }
            }
        }

        let opening = extract_opening(game.eco.as_deref());
        let slot = match opening_index.get(&opening) {
            Some(slot) => *slot,
            None => {
                stats.openings.push(OpeningStat {
                    name: opening.clone(),
                    ..OpeningStat::default()
                });
                let slot = stats.openings.len() - 1;
                opening_index.insert(opening, slot);
                slot
            }
        };
        let entry = &mut stats.openings[slot];
        match color {
            Color::White => entry.as_white += 1,
            Color::Black => entry.as_black += 1,
        }
        match outcome {
            Outcome::Win => entry.wins += 1,
            Outcome::Loss => entry.losses += 1,
            Outcome::Draw => entry.draws += 1,
            Outcome::Unknown => entry.unknown += 1,
        }

        let time_class = game.time_class.as_deref().unwrap_or("unknown");
        match time_index.get(time_class) {
            Some(slot) => stats.time_classes[*slot].1 += 1,
            None => {
                time_index.insert(time_class.to_string(), stats.time_classes.len());
                stats.time_classes.push((time_class.to_string(), 1));
            }
        }
    }

    stats.loss_causes = loss_breakdown(games, username);
    stats
}

/// Second pass over the collection: histogram of loss causes, most
/// frequent first. Only the enumerated causes count here; the generic
/// `lose` code stays out of this breakdown even though classification
/// treats it as a loss.
pub fn loss_breakdown(games: &[GameRecord], username: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for game in games {
        let Some((_, side)) = game.side_of(username) else {
            continue;
        };
        let Some(cause) = LOSS_CAUSES.iter().copied().find(|cause| *cause == side.result)
        else {
            continue;
        };
        match index.get(cause) {
            Some(slot) => counts[*slot].1 += 1,
            None => {
                index.insert(cause, counts.len());
                counts.push((cause.to_string(), 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Derive a display label from a chess.com opening reference URL.
///
/// The slug after the last `openings/` segment is de-hyphenated,
/// truncated at the literal `...` move-continuation delimiter, and
/// title-cased. Records with no usable reference get `"Unknown"`.
/// Numeric suffixes are kept unless they follow the delimiter.
pub fn extract_opening(eco_url: Option<&str>) -> String {
    let Some(url) = eco_url else {
        return "Unknown".to_string();
    };
    let Some((_, slug)) = url.rsplit_once("openings/") else {
        return "Unknown".to_string();
    };
    let spaced = slug.replace('-', " ");
    let head = spaced.split("...").next().unwrap_or("").trim();
    if head.is_empty() {
        return "Unknown".to_string();
    }
    title_case(head)
}

/// Capitalize the first letter of each word, lowercase the rest. Any
/// non-alphabetic character starts a new word.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}
