//! End-to-end tours over file-backed stores.

use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use rusqlite::Connection;
use shelf_tour::format::artifact_path;
use shelf_tour::pipeline::{self, PipelineConfig};
use shelf_tour::projection::PcaProjection;
use shelf_tour::store::{JsonStore, SqliteStore};
use shelf_tour::tour::TourConfig;
use shelf_tour::Error;
use tempfile::TempDir;

fn config(out_dir: &Path) -> PipelineConfig {
    PipelineConfig {
        tour: TourConfig::default()
            .with_time_budget(Duration::from_secs(20))
            .with_seed(11),
        suppress_return: true,
        out_dir: out_dir.to_path_buf(),
    }
}

/// First book sits apart; the rest lie on a line in shuffled id order.
fn create_bookshelf(path: &Path) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE books (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT,
            embedding TEXT
        );
        INSERT INTO books (title, embedding) VALUES ('DUNE', '[10.0, 10.0]');
        INSERT INTO books (title, embedding) VALUES ('EMMA', '[4.0, 0.0]');
        INSERT INTO books (title, embedding) VALUES ('BELOVED', '[1.0, 0.0]');
        INSERT INTO books (title, embedding) VALUES ('ULYSSES', NULL);
        INSERT INTO books (title, embedding) VALUES ('MIDDLEMARCH', '[3.0, 0.0]');
        INSERT INTO books (title, embedding) VALUES ('BEOWULF', '[2.0, 0.0]');",
    )
    .unwrap();
}

#[test]
fn full_space_tour_from_sqlite() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("bookshelf.db");
    create_bookshelf(&db);
    let out = dir.path().join("tours");

    let store = SqliteStore::open(&db).unwrap();
    let now = NaiveDate::from_ymd_opt(2026, 10, 18)
        .and_then(|d| d.and_hms_opt(9, 15, 0))
        .unwrap();
    let result = pipeline::full_space_tour_at(store, &config(&out), now).unwrap();

    // The unembedded book is skipped.
    assert_eq!(result.entries.len(), 5);
    assert_eq!(result.entries[0], "DUNE");
    assert!(!result.entries.iter().any(|e| e == "ULYSSES"));
    // Edges touching DUNE are free, so only the walk along the line counts.
    assert!((result.total_length - 3.0).abs() < 1e-9, "length {}", result.total_length);

    let artifact = result.artifact.clone().unwrap();
    assert_eq!(artifact, artifact_path(&out, now, "txt"));
    let body = fs::read_to_string(&artifact).unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines, result.numbered());
    assert_eq!(lines[0], "1. DUNE");
}

#[test]
fn full_space_tour_from_json() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("items.json");
    fs::write(
        &json,
        r#"[
            {"id": "a", "label": "Start", "vector": [0.0, 0.0, 0.0]},
            {"id": "b", "label": "Far", "vector": [9.0, 0.0, 0.0]},
            {"id": "c", "label": "Near", "vector": [1.0, 0.0, 0.0]},
            {"id": "d", "label": "Unembedded", "vector": null},
            {"id": "e", "label": "Mid", "vector": [5.0, 0.0, 0.0]}
        ]"#,
    )
    .unwrap();

    let result = pipeline::full_space_tour(JsonStore::new(&json), &config(dir.path())).unwrap();

    assert_eq!(result.entries.len(), 4);
    assert_eq!(result.entries[0], "Start");
    assert!((result.total_length - 8.0).abs() < 1e-9);
    assert!(result.artifact.as_ref().is_some_and(|p| p.exists()));
}

#[test]
fn closed_cycle_counts_every_edge() {
    let dir = TempDir::new().unwrap();
    let json = dir.path().join("square.json");
    fs::write(
        &json,
        r#"[
            {"id": "1", "label": "A", "vector": [0.0, 0.0]},
            {"id": "2", "label": "B", "vector": [0.0, 1.0]},
            {"id": "3", "label": "C", "vector": [1.0, 1.0]},
            {"id": "4", "label": "D", "vector": [1.0, 0.0]}
        ]"#,
    )
    .unwrap();

    let mut cfg = config(dir.path());
    cfg.suppress_return = false;
    let result = pipeline::full_space_tour(JsonStore::new(&json), &cfg).unwrap();

    assert_eq!(result.entries[0], "A");
    assert!((result.total_length - 4.0).abs() < 1e-9);
}

#[test]
fn visual_tour_writes_svg() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("bookshelf.db");
    create_bookshelf(&db);

    let store = SqliteStore::open(&db).unwrap();
    let result = pipeline::visual_tour(store, &PcaProjection::default(), &config(dir.path())).unwrap();

    assert_eq!(result.entries.len(), 5);
    assert_eq!(result.entries[0], "DUNE");

    let artifact = result.artifact.clone().unwrap();
    assert_eq!(artifact.extension().and_then(|e| e.to_str()), Some("svg"));
    let svg = fs::read_to_string(&artifact).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("BELOVED"));
    // One segment per consecutive pair.
    assert_eq!(svg.matches("<line ").count(), 4);
}

#[test]
fn missing_embeddings_surface_guidance() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("bookshelf.db");
    {
        let conn = Connection::open(&db).unwrap();
        conn.execute_batch(
            "CREATE TABLE books (id INTEGER PRIMARY KEY, title TEXT NOT NULL);
             INSERT INTO books (title) VALUES ('DUNE');",
        )
        .unwrap();
    }

    let store = SqliteStore::open(&db).unwrap();
    let err = pipeline::full_space_tour(store, &config(dir.path())).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert!(err.to_string().contains("generate embeddings"));
    // Nothing is written on failure.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn missing_database_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = SqliteStore::open(dir.path().join("absent.db")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
