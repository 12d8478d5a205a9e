//! Image counts per asset and per timeframe over an index snapshot.

use crate::index::Index;
use crate::timeframe::TimeframeCode;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts for one asset.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AssetStats {
    pub total_dates: usize,
    pub by_timeframe: BTreeMap<TimeframeCode, u64>,
}

/// Counts over the whole catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStats {
    pub total_assets: usize,
    pub by_timeframe: BTreeMap<TimeframeCode, u64>,
    pub by_asset: BTreeMap<String, AssetStats>,
}

impl CatalogStats {
    pub fn from_index(index: &Index) -> Self {
        let mut stats = CatalogStats {
            total_assets: index.len(),
            ..Default::default()
        };

        for (asset, entries) in index {
            let mut asset_stats = AssetStats {
                total_dates: entries.len(),
                ..Default::default()
            };
            for entry in entries {
                for (code, _) in entry.images.iter() {
                    *stats.by_timeframe.entry(code).or_insert(0) += 1;
                    *asset_stats.by_timeframe.entry(code).or_insert(0) += 1;
                }
            }
            stats.by_asset.insert(asset.clone(), asset_stats);
        }

        stats
    }
}
