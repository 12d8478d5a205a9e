//! Note record lifecycle alongside index mutations.

use super::support::service;
use chartindex::timeframe::TimeframeCode;
use tempfile::TempDir;

#[test]
fn note_round_trip_through_the_catalog() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC"]);

    assert!(catalog.note("BTC", "2024-01-15-1").unwrap().is_none());

    let saved = catalog
        .save_note(
            "BTC",
            "2024-01-15-1",
            Some("breakout".to_string()),
            "watch the 1h close".to_string(),
        )
        .unwrap();
    assert_eq!(saved.title.as_deref(), Some("breakout"));

    let loaded = catalog.note("BTC", "2024-01-15-1").unwrap().unwrap();
    assert_eq!(loaded, saved);

    assert!(catalog.delete_note("BTC", "2024-01-15-1").unwrap());
    assert!(!catalog.delete_note("BTC", "2024-01-15-1").unwrap());
}

#[test]
fn notes_are_scoped_per_asset() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC", "ETH"]);

    catalog
        .save_note("BTC", "2024-01-15-1", None, "btc only".to_string())
        .unwrap();
    assert!(catalog.note("ETH", "2024-01-15-1").unwrap().is_none());
}

#[test]
fn deleting_a_date_entry_drops_its_note() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC"]);

    let batch = vec![(TimeframeCode::M1, b"one".to_vec())];
    catalog.upload("BTC", "2024-01-15", &batch).unwrap();
    catalog
        .save_note("BTC", "2024-01-15-1", None, "doomed".to_string())
        .unwrap();

    catalog.delete_date_entry("BTC", "2024-01-15-1").unwrap();
    assert!(catalog.note("BTC", "2024-01-15-1").unwrap().is_none());
}

#[test]
fn renaming_a_date_entry_keeps_the_note_under_the_old_key() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC"]);

    let batch = vec![(TimeframeCode::M1, b"one".to_vec())];
    catalog.upload("BTC", "2024-01-15", &batch).unwrap();
    catalog
        .save_note("BTC", "2024-01-15-1", None, "sticky".to_string())
        .unwrap();

    let outcome = catalog
        .rename_date_entry("BTC", "2024-01-15-1", "2024-02-01")
        .unwrap();

    // The caller migrates explicitly using the keys in the outcome.
    assert!(catalog.note("BTC", &outcome.old_date_key).unwrap().is_some());
    assert!(catalog.note("BTC", &outcome.new_date_key).unwrap().is_none());

    let record = catalog.note("BTC", &outcome.old_date_key).unwrap().unwrap();
    catalog
        .save_note("BTC", &outcome.new_date_key, record.title, record.note)
        .unwrap();
    catalog.delete_note("BTC", &outcome.old_date_key).unwrap();
    assert!(catalog.note("BTC", &outcome.new_date_key).unwrap().is_some());
}
