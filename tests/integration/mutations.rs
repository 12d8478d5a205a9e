//! Mutation operations against a live catalog: upload, delete, rename.

use super::support::{service, touch};
use chartindex::error::ApiError;
use chartindex::timeframe::TimeframeCode;
use tempfile::TempDir;

#[test]
fn upload_batches_share_one_sequence_and_reindex() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC"]);

    let first = vec![
        (TimeframeCode::M1, b"one".to_vec()),
        (TimeframeCode::M5, b"five".to_vec()),
    ];
    let outcome = catalog.upload("BTC", "2024-01-15", &first).unwrap();
    assert_eq!(outcome.sequence, 1);

    let second = vec![(TimeframeCode::M1, b"again".to_vec())];
    let outcome = catalog.upload("BTC", "2024-01-15", &second).unwrap();
    assert_eq!(outcome.sequence, 2);

    let index = catalog.asset_index("BTC").unwrap();
    let keys: Vec<&str> = index.iter().map(|e| e.date_key.as_str()).collect();
    assert_eq!(keys, vec!["2024-01-15-1", "2024-01-15-2"]);
    assert_eq!(index[0].images.len(), 2);
    assert_eq!(index[1].images.len(), 1);
}

#[test]
fn sequence_allocation_skips_gaps_to_the_maximum() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC"]);
    let dir = tmp.path().join("BTC");
    touch(&dir, "2024.01.15_1m.png");
    touch(&dir, "2024.01.15-2_1m.png");
    touch(&dir, "2024.01.15-4_1m.png");

    let batch = vec![(TimeframeCode::M1, b"next".to_vec())];
    let outcome = catalog.upload("BTC", "2024-01-15", &batch).unwrap();
    assert_eq!(outcome.sequence, 5);
}

#[test]
fn delete_removes_all_matching_files_and_the_entry() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC"]);

    let batch = vec![
        (TimeframeCode::M1, b"one".to_vec()),
        (TimeframeCode::H1, b"hour".to_vec()),
    ];
    catalog.upload("BTC", "2024-01-15", &batch).unwrap();
    catalog
        .upload("BTC", "2024-01-16", &batch[..1].to_vec())
        .unwrap();

    let outcome = catalog.delete_date_entry("BTC", "2024-01-15-1").unwrap();
    assert_eq!(outcome.deleted.len(), 2);

    let index = catalog.asset_index("BTC").unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].date_key, "2024-01-16-1");
    assert!(!tmp.path().join("BTC/2024.01.15-1_1m.png").exists());
}

#[test]
fn rename_rewrites_dates_and_reindexes() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC"]);

    let batch = vec![
        (TimeframeCode::M1, b"one".to_vec()),
        (TimeframeCode::M15, b"fifteen".to_vec()),
    ];
    catalog.upload("BTC", "2024-01-15", &batch).unwrap();

    let outcome = catalog
        .rename_date_entry("BTC", "2024-01-15-1", "2024-03-01")
        .unwrap();
    assert_eq!(outcome.old_date_key, "2024-01-15-1");
    assert_eq!(outcome.new_date_key, "2024-03-01-1");
    assert_eq!(outcome.renamed.len(), 2);

    let index = catalog.asset_index("BTC").unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].date_key, "2024-03-01-1");
    assert!(tmp.path().join("BTC/2024.03.01-1_1m.png").exists());
    assert!(tmp.path().join("BTC/2024.03.01-1_15m.png").exists());
}

#[test]
fn rename_collision_aborts_before_touching_files() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC"]);
    let dir = tmp.path().join("BTC");
    touch(&dir, "2024.01.15_1m.png");
    touch(&dir, "2024.03.01_4h.png");

    let err = catalog
        .rename_date_entry("BTC", "2024-01-15-1", "2024-03-01")
        .unwrap_err();
    assert!(matches!(err, ApiError::RenameCollision { .. }));
    assert!(dir.join("2024.01.15_1m.png").exists());
    assert!(dir.join("2024.03.01_4h.png").exists());
}

#[test]
fn mutations_against_unknown_assets_are_rejected() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC"]);
    let batch = vec![(TimeframeCode::M1, b"one".to_vec())];

    assert!(matches!(
        catalog.upload("DOGE", "2024-01-15", &batch),
        Err(ApiError::UnknownAsset(_))
    ));
    assert!(matches!(
        catalog.delete_date_entry("DOGE", "2024-01-15-1"),
        Err(ApiError::UnknownAsset(_))
    ));
    assert!(matches!(
        catalog.rename_date_entry("DOGE", "2024-01-15-1", "2024-02-01"),
        Err(ApiError::UnknownAsset(_))
    ));
}

#[test]
fn files_dropped_out_of_band_appear_after_the_next_mutation() {
    let tmp = TempDir::new().unwrap();
    let catalog = service(&tmp, &["BTC"]);
    let dir = tmp.path().join("BTC");

    // A file written behind the catalog's back is invisible until a rescan.
    touch(&dir, "2024.01.10_4h.png");
    assert!(catalog.asset_index("BTC").unwrap().is_empty());

    let batch = vec![(TimeframeCode::M1, b"one".to_vec())];
    catalog.upload("BTC", "2024-01-15", &batch).unwrap();

    let keys: Vec<String> = catalog
        .asset_index("BTC")
        .unwrap()
        .into_iter()
        .map(|e| e.date_key)
        .collect();
    assert_eq!(keys, vec!["2024-01-10-1", "2024-01-15-1"]);
}
