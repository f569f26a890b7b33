use std::fs;
use std::path::PathBuf;

use chessrecap::analysis_report::{
    openings_as_black, openings_as_white, render_report, time_classes_by_count,
};
use chessrecap::analysis_stats::{analyze_games, extract_opening, loss_breakdown};
use chessrecap::archive_fetch::parse_month_json;
use chessrecap::games::{GameRecord, PlayerSide};

const PLAYER: &str = "testplayer";

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn side(username: &str, result: &str) -> PlayerSide {
    PlayerSide {
        username: username.to_string(),
        result: result.to_string(),
        ..PlayerSide::default()
    }
}

fn game(white: PlayerSide, black: PlayerSide) -> GameRecord {
    GameRecord {
        white,
        black,
        ..GameRecord::default()
    }
}

#[test]
fn win_plus_resignation_splits_fifty_fifty() {
    let games = vec![
        game(side(PLAYER, "win"), side("rival", "resigned")),
        game(side("rival", "win"), side(PLAYER, "resigned")),
    ];
    let stats = analyze_games(&games, PLAYER);

    assert_eq!(stats.counted, 2);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.draws, 0);
    assert_eq!(stats.white_games, 1);
    assert_eq!(stats.white_wins, 1);
    assert_eq!(stats.black_games, 1);
    assert_eq!(stats.black_wins, 0);

    let report = render_report(&stats, PLAYER);
    assert!(report.contains("Win Rate: 50.0%"));
}

#[test]
fn unmatched_records_are_excluded_everywhere() {
    let games = vec![
        game(side(PLAYER, "win"), side("rival", "resigned")),
        game(side("alice", "win"), side("bob", "checkmated")),
    ];
    let stats = analyze_games(&games, PLAYER);

    assert_eq!(stats.raw_records, 2);
    assert_eq!(stats.counted, 1);
    assert_eq!(stats.skipped_other, 1);
    assert_eq!(stats.counted + stats.skipped_other, stats.raw_records);
    // The strangers' game contributes to no aggregate.
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.losses, 0);
    assert_eq!(stats.openings.iter().map(|o| o.total()).sum::<usize>(), 1);
    assert_eq!(loss_breakdown(&games, PLAYER).len(), 0);
}

#[test]
fn outcome_partition_is_complete() {
    let games = vec![
        game(side(PLAYER, "win"), side("a", "resigned")),
        game(side(PLAYER, "checkmated"), side("b", "win")),
        game(side("c", "win"), side(PLAYER, "lose")),
        game(side(PLAYER, "stalemate"), side("d", "stalemate")),
        game(side(PLAYER, "agreed"), side("e", "agreed")),
        game(side("f", "win"), side(PLAYER, "kingofthehill")),
    ];
    let stats = analyze_games(&games, PLAYER);

    assert_eq!(stats.counted, 6);
    assert_eq!(stats.wins + stats.losses + stats.draws + stats.unknown, stats.counted);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.losses, 2);
    assert_eq!(stats.draws, 2);
    assert_eq!(stats.unknown, 1);
}

#[test]
fn opening_labels_from_reference_urls() {
    // No reference, or a reference without an openings segment.
    assert_eq!(extract_opening(None), "Unknown");
    assert_eq!(extract_opening(Some("https://example.com/nothing")), "Unknown");

    // Numeric suffixes are kept; hyphens become spaces; words title-case.
    assert_eq!(
        extract_opening(Some("https://www.chess.com/openings/queens-gambit-declined-123")),
        "Queens Gambit Declined 123"
    );

    // The move-continuation delimiter truncates the label.
    assert_eq!(
        extract_opening(Some("https://www.chess.com/openings/Queens-Gambit-Declined...3.Nf3-Nf6")),
        "Queens Gambit Declined"
    );

    // Deterministic and idempotent.
    let url = Some("https://www.chess.com/openings/Caro-Kann-Defense");
    assert_eq!(extract_opening(url), extract_opening(url));
    assert_eq!(extract_opening(url), "Caro Kann Defense");
}

#[test]
fn unknown_results_surface_in_report() {
    let games = vec![game(side(PLAYER, "bughouse"), side("x", "win"))];
    let stats = analyze_games(&games, PLAYER);

    assert_eq!(stats.unknown, 1);
    assert_eq!(stats.draws, 0);
    let report = render_report(&stats, PLAYER);
    assert!(report.contains("Unrecognized results: 1"));
}

#[test]
fn lose_code_counts_as_loss_but_not_as_cause() {
    let games = vec![game(side(PLAYER, "lose"), side("x", "win"))];
    let stats = analyze_games(&games, PLAYER);

    assert_eq!(stats.losses, 1);
    assert!(stats.loss_causes.is_empty());
    assert!(!render_report(&stats, PLAYER).contains("HOW YOU LOSE"));
}

#[test]
fn loss_causes_sorted_by_descending_count() {
    let games = vec![
        game(side(PLAYER, "timeout"), side("a", "win")),
        game(side(PLAYER, "checkmated"), side("b", "win")),
        game(side("c", "win"), side(PLAYER, "timeout")),
    ];
    let causes = loss_breakdown(&games, PLAYER);
    assert_eq!(
        causes,
        vec![("timeout".to_string(), 2), ("checkmated".to_string(), 1)]
    );
}

#[test]
fn top_openings_sorted_with_stable_ties() {
    let eco = |slug: &str| Some(format!("https://www.chess.com/openings/{slug}"));
    let mut games = Vec::new();
    for slug in ["Alpha", "Beta", "Gamma"] {
        games.push(GameRecord {
            eco: eco(slug),
            ..game(side(PLAYER, "win"), side("x", "resigned"))
        });
    }
    // Delta played twice, so it must lead despite being seen last.
    for _ in 0..2 {
        games.push(GameRecord {
            eco: eco("Delta"),
            ..game(side(PLAYER, "win"), side("x", "resigned"))
        });
    }

    let stats = analyze_games(&games, PLAYER);
    let names: Vec<&str> = openings_as_white(&stats)
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(names, vec!["Delta", "Alpha", "Beta", "Gamma"]);
    assert!(openings_as_black(&stats).is_empty());
}

#[test]
fn time_classes_sorted_by_descending_count() {
    let tagged = |class: Option<&str>| GameRecord {
        time_class: class.map(|c| c.to_string()),
        ..game(side(PLAYER, "win"), side("x", "resigned"))
    };
    let games = vec![
        tagged(Some("rapid")),
        tagged(Some("blitz")),
        tagged(Some("blitz")),
        tagged(None),
    ];
    let stats = analyze_games(&games, PLAYER);
    assert_eq!(
        time_classes_by_count(&stats),
        vec![("blitz", 2), ("rapid", 1), ("unknown", 1)]
    );
}

#[test]
fn empty_collection_prints_notice() {
    let stats = analyze_games(&[], PLAYER);
    let report = render_report(&stats, PLAYER);
    assert!(report.contains("No games to analyze!"));

    // Records exist but none involve the player: still no percentages.
    let games = vec![game(side("alice", "win"), side("bob", "resigned"))];
    let stats = analyze_games(&games, PLAYER);
    let report = render_report(&stats, PLAYER);
    assert!(report.contains("No games involving testplayer"));
    assert!(!report.contains('%'));
}

#[test]
fn month_fixture_aggregates_end_to_end() {
    let games = parse_month_json(&read_fixture("month_2024_11.json")).expect("fixture parses");
    let stats = analyze_games(&games, PLAYER);

    assert_eq!(stats.raw_records, 3);
    assert_eq!(stats.counted, 2);
    assert_eq!(stats.skipped_other, 1);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.losses, 1);
    assert_eq!(stats.white_games, 1);
    assert_eq!(stats.white_wins, 1);
    assert_eq!(stats.black_games, 1);

    let white_names: Vec<&str> = openings_as_white(&stats)
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(white_names, vec!["Queens Gambit Declined"]);
    let black_names: Vec<&str> = openings_as_black(&stats)
        .iter()
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(black_names, vec!["Sicilian Defense Open 2"]);

    assert_eq!(stats.loss_causes, vec![("timeout".to_string(), 1)]);

    let report = render_report(&stats, PLAYER);
    assert!(report.contains("Total Games: 2"));
    assert!(report.contains("Rapid: 1 games"));
    assert!(report.contains("Blitz: 1 games"));
    assert!(report.contains("Timeout: 1 times"));
}
