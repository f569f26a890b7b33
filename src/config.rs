use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};

pub const ENV_USERNAME: &str = "CHESSRECAP_USERNAME";
pub const ENV_INPUT: &str = "CHESSRECAP_INPUT";
pub const ENV_OUTPUT: &str = "CHESSRECAP_OUTPUT";
pub const ENV_PATTERN: &str = "CHESSRECAP_PATTERN";
pub const ENV_FETCH_DELAY_MS: &str = "CHESSRECAP_FETCH_DELAY_MS";

pub const DEFAULT_COMBINED_FILE: &str = "all_games_combined.json";

// Stay inside the API's informal rate tolerance.
const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Value of `--name <v>` or `--name=<v>` from an argument list.
pub fn flag_value(args: &[String], name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
        if arg == name {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            let trimmed = next.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn resolve_username(args: &[String]) -> Result<String> {
    flag_value(args, "--username")
        .or_else(|| env_value(ENV_USERNAME))
        .ok_or_else(|| anyhow!("no username configured; pass --username or set {ENV_USERNAME}"))
}

fn default_raw_file(username: &str) -> PathBuf {
    PathBuf::from(format!("{username}_games.json"))
}

/// Run configuration for the fetcher.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub username: String,
    pub output_path: PathBuf,
    pub request_delay: Duration,
}

impl FetchConfig {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let username = resolve_username(args)?;
        let output_path = flag_value(args, "--output")
            .or_else(|| env_value(ENV_OUTPUT))
            .map(PathBuf::from)
            .unwrap_or_else(|| default_raw_file(&username));
        let request_delay = flag_value(args, "--delay-ms")
            .or_else(|| env_value(ENV_FETCH_DELAY_MS))
            .and_then(|raw| raw.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REQUEST_DELAY);
        Ok(Self {
            username,
            output_path,
            request_delay,
        })
    }
}

/// Run configuration for the combiner.
#[derive(Debug, Clone)]
pub struct CombineConfig {
    pub pattern: String,
    pub output_path: PathBuf,
}

impl CombineConfig {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let pattern = match flag_value(args, "--pattern").or_else(|| env_value(ENV_PATTERN)) {
            Some(pattern) => pattern,
            // Without an explicit pattern, derive one from the username.
            None => {
                let username = resolve_username(args).map_err(|_| {
                    anyhow!("no input files configured; pass --pattern or --username")
                })?;
                format!("{username}_games_*.json")
            }
        };
        let output_path = flag_value(args, "--output")
            .or_else(|| env_value(ENV_OUTPUT))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_COMBINED_FILE));
        Ok(Self {
            pattern,
            output_path,
        })
    }
}

/// Run configuration for the analyzer.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub username: String,
    pub input_path: PathBuf,
}

impl AnalyzeConfig {
    pub fn from_args(args: &[String]) -> Result<Self> {
        let username = resolve_username(args)?;
        let input_path = flag_value(args, "--input")
            .or_else(|| env_value(ENV_INPUT))
            .map(PathBuf::from)
            .unwrap_or_else(|| default_raw_file(&username));
        Ok(Self {
            username,
            input_path,
        })
    }
}
