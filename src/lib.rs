//! Fetch, merge and analyze a chess.com player's game history.
//!
//! Three batch binaries share this library: `fetch_games` downloads the
//! monthly archives, `combine_games` merges saved files, and
//! `analyze_games` prints a report over one file. All three hand off
//! through the same on-disk envelope, `{"games": [...]}`.

pub mod analysis_report;
pub mod analysis_stats;
pub mod archive_fetch;
pub mod config;
pub mod error;
pub mod game_store;
pub mod games;
pub mod http_client;
pub mod logging;
