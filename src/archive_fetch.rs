use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

use crate::games::GameRecord;
use crate::http_client::http_client;

const PLAYER_API_BASE: &str = "https://api.chess.com/pub/player";

/// Outcome of one full history download.
#[derive(Debug, Clone, Default)]
pub struct FetchSummary {
    pub username: String,
    pub archives_total: usize,
    pub archives_fetched: usize,
    pub games_total: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ArchivesResponse {
    #[serde(default)]
    archives: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct MonthResponse {
    #[serde(default)]
    games: Vec<GameRecord>,
}

pub fn archives_url(username: &str) -> String {
    format!("{PLAYER_API_BASE}/{username}/games/archives")
}

/// List the monthly archive URLs for a player, in API (oldest-first) order.
pub fn list_archives(username: &str) -> Result<Vec<String>> {
    let body = get_text(&archives_url(username)).context("archives request failed")?;
    parse_archives_json(&body)
}

/// Fetch one month's batch of games.
pub fn fetch_month(url: &str) -> Result<Vec<GameRecord>> {
    let body = get_text(url).context("month request failed")?;
    parse_month_json(&body)
}

fn get_text(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow::anyhow!("http {status}: {body}"));
    }
    Ok(body)
}

pub fn parse_archives_json(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let parsed: ArchivesResponse =
        serde_json::from_str(trimmed).context("invalid archives json")?;
    Ok(parsed.archives)
}

pub fn parse_month_json(raw: &str) -> Result<Vec<GameRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let parsed: MonthResponse = serde_json::from_str(trimmed).context("invalid month json")?;
    Ok(parsed.games)
}

/// Trailing "YYYY/MM" of an archive URL, for progress lines.
pub fn archive_label(url: &str) -> String {
    let mut tail = url.trim_end_matches('/').rsplit('/');
    match (tail.next(), tail.next()) {
        (Some(month), Some(year)) => format!("{year}/{month}"),
        _ => url.to_string(),
    }
}

/// Download a player's full game history, one archive at a time with a
/// politeness delay between requests. No retries: a failed archive is
/// skipped and noted in the summary, and a failed archive listing yields
/// an empty history rather than an error.
pub fn fetch_player_history(username: &str, delay: Duration) -> (Vec<GameRecord>, FetchSummary) {
    let mut summary = FetchSummary {
        username: username.to_string(),
        ..FetchSummary::default()
    };

    let archives = match list_archives(username) {
        Ok(archives) => archives,
        Err(err) => {
            warn!("archive listing for {username} failed: {err:#}");
            summary.errors.push(format!("archives: {err:#}"));
            return (Vec::new(), summary);
        }
    };
    summary.archives_total = archives.len();
    info!("found {} months with games for {username}", archives.len());

    let mut all_games = Vec::new();
    for (idx, url) in archives.iter().enumerate() {
        info!(
            "fetching games from {} ({}/{})",
            archive_label(url),
            idx + 1,
            archives.len()
        );
        match fetch_month(url) {
            Ok(mut games) => {
                summary.archives_fetched += 1;
                all_games.append(&mut games);
            }
            Err(err) => {
                warn!("skipping archive {url}: {err:#}");
                summary.errors.push(format!("{url}: {err:#}"));
            }
        }
        if idx + 1 < archives.len() {
            thread::sleep(delay);
        }
    }

    summary.games_total = all_games.len();
    (all_games, summary)
}
