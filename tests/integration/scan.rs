//! End-to-end scan behavior over a seeded directory tree.

use super::support::{config, service, touch};
use chartindex::catalog::CatalogService;
use chartindex::notes::SledNoteStore;
use chartindex::timeframe::TimeframeCode;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn initial_index_groups_and_orders_entries() {
    let tmp = TempDir::new().unwrap();
    let btc = tmp.path().join("BTC");
    fs::create_dir_all(&btc).unwrap();
    touch(&btc, "2024.01.15_1m.png");
    touch(&btc, "2024.01.15_5m.png");
    touch(&btc, "2024.01.15-2_1m.png");
    touch(&btc, "2024.01.10_4h.jpg");
    touch(&btc, "2024.01.15_2min.png"); // unknown token, filtered
    touch(&btc, "notanimage.txt"); // not an image, filtered

    let service = service(&tmp, &["BTC"]);
    let index = service.asset_index("BTC").unwrap();

    let keys: Vec<&str> = index.iter().map(|e| e.date_key.as_str()).collect();
    assert_eq!(keys, vec!["2024-01-10-1", "2024-01-15-1", "2024-01-15-2"]);

    let grouped = &index[1];
    assert_eq!(grouped.images.len(), 2);
    assert!(grouped.images.get(TimeframeCode::M1).is_some());
    assert!(grouped.images.get(TimeframeCode::M5).is_some());
}

#[test]
fn missing_asset_directory_yields_an_empty_index() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("BTC")).unwrap();
    // ETH gets no directory, so build directly from config instead of the
    // support helper (which creates every asset directory).
    let notes = Arc::new(SledNoteStore::temporary().unwrap());
    let service =
        CatalogService::with_note_store(config(tmp.path(), &["BTC", "ETH"]), notes).unwrap();

    assert!(service.asset_index("ETH").unwrap().is_empty());
    assert_eq!(service.list_assets(), vec!["BTC", "ETH"]);
}

#[test]
fn rescanning_an_unchanged_tree_is_deterministic() {
    let tmp = TempDir::new().unwrap();
    let btc = tmp.path().join("BTC");
    fs::create_dir_all(&btc).unwrap();
    touch(&btc, "2024.01.15_1m.png");
    touch(&btc, "2024.01.16-3_15min.webp");
    touch(&btc, "2023.11.02_4h.gif");

    let first = service(&tmp, &["BTC"]).asset_index("BTC").unwrap();
    let second = service(&tmp, &["BTC"]).asset_index("BTC").unwrap();
    assert_eq!(first, second);
}

#[test]
fn disabled_timeframes_are_filtered_out() {
    let tmp = TempDir::new().unwrap();
    let btc = tmp.path().join("BTC");
    fs::create_dir_all(&btc).unwrap();
    touch(&btc, "2024.01.15_1m.png");
    touch(&btc, "2024.01.15_4h.png");

    let mut cfg = config(tmp.path(), &["BTC"]);
    cfg.timeframes = vec![TimeframeCode::M1];
    let notes = Arc::new(SledNoteStore::temporary().unwrap());
    let service = CatalogService::with_note_store(cfg, notes).unwrap();

    let index = service.asset_index("BTC").unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].images.len(), 1);
    assert!(index[0].images.get(TimeframeCode::H4).is_none());
}

#[test]
fn stats_count_images_per_timeframe() {
    let tmp = TempDir::new().unwrap();
    let btc = tmp.path().join("BTC");
    let eth = tmp.path().join("ETH");
    fs::create_dir_all(&btc).unwrap();
    fs::create_dir_all(&eth).unwrap();
    touch(&btc, "2024.01.15_1m.png");
    touch(&btc, "2024.01.15_5m.png");
    touch(&eth, "2024.01.15_1m.png");

    let service = service(&tmp, &["BTC", "ETH"]);
    let stats = service.stats();
    assert_eq!(stats.total_assets, 2);
    assert_eq!(stats.by_timeframe[&TimeframeCode::M1], 2);
    assert_eq!(stats.by_timeframe[&TimeframeCode::M5], 1);
    assert_eq!(stats.by_asset["BTC"].total_dates, 1);
}

