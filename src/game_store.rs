use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;

use crate::error::StoreError;
use crate::games::GamesFile;

/// Outcome of one merge run. Skipped files carry the load error text so
/// the binary can list them without aborting the merge.
#[derive(Debug, Clone, Default)]
pub struct CombineSummary {
    pub files_found: usize,
    pub files_merged: usize,
    pub games_total: usize,
    pub skipped: Vec<(PathBuf, String)>,
}

/// Load a saved game file, classifying the failure mode.
pub fn load_games(path: &Path) -> Result<GamesFile, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::FileNotFound(path.to_path_buf())
        } else {
            StoreError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&raw).map_err(|source| StoreError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Lenient load for the analyzer: any failure degrades to an empty
/// collection after logging.
pub fn load_games_or_empty(path: &Path) -> GamesFile {
    match load_games(path) {
        Ok(file) => file,
        Err(err) => {
            warn!("{err}; continuing with an empty collection");
            GamesFile::default()
        }
    }
}

/// Write a game file via temp-file + rename so an interrupted run never
/// leaves a truncated file behind.
pub fn save_games(path: &Path, file: &GamesFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).ok();
        }
    }
    let json = serde_json::to_string_pretty(file).context("serialize game file")?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("swap {}", path.display()))?;
    Ok(())
}

/// Merge every file matching `pattern` into one collection.
///
/// Files are visited in lexicographic path order so repeated runs merge
/// identically regardless of filesystem enumeration order. Files that
/// fail to load are skipped and listed in the summary; games from every
/// file that parsed are all included.
pub fn combine_game_files(pattern: &str) -> Result<(GamesFile, CombineSummary)> {
    let mut paths: Vec<PathBuf> = glob::glob(pattern)
        .with_context(|| format!("bad glob pattern {pattern}"))?
        .filter_map(|entry| entry.ok())
        .collect();
    paths.sort();

    let mut summary = CombineSummary {
        files_found: paths.len(),
        ..CombineSummary::default()
    };
    let mut merged = GamesFile::default();
    for path in &paths {
        match load_games(path) {
            Ok(mut file) => {
                summary.files_merged += 1;
                merged.games.append(&mut file.games);
            }
            Err(err) => {
                warn!("skipping {}: {err}", path.display());
                summary.skipped.push((path.clone(), err.to_string()));
            }
        }
    }
    summary.games_total = merged.games.len();
    Ok((merged, summary))
}
