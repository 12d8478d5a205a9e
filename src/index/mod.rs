//! Index data model: images grouped into date entries per asset.
//!
//! The whole structure is derived from the filesystem and rebuilt wholesale
//! after every mutation; nothing here is persisted.

pub mod mutations;
pub mod scanner;
pub mod sequence;

use crate::timeframe::TimeframeCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One screenshot file, as discovered by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    /// Owning asset (collection key).
    pub asset: String,
    pub timeframe: TimeframeCode,
    pub filename: String,
    pub path: PathBuf,
}

/// Fixed-slot image set: at most one image per timeframe code.
///
/// Modeled as a record rather than an open map so the one-per-code invariant
/// holds by construction. Serializes as a map keyed by the canonical token,
/// empty slots omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(rename = "1m", default, skip_serializing_if = "Option::is_none")]
    m1: Option<ImageAsset>,
    #[serde(rename = "3m", default, skip_serializing_if = "Option::is_none")]
    m3: Option<ImageAsset>,
    #[serde(rename = "5m", default, skip_serializing_if = "Option::is_none")]
    m5: Option<ImageAsset>,
    #[serde(rename = "15m", default, skip_serializing_if = "Option::is_none")]
    m15: Option<ImageAsset>,
    #[serde(rename = "1h", default, skip_serializing_if = "Option::is_none")]
    h1: Option<ImageAsset>,
    #[serde(rename = "4h", default, skip_serializing_if = "Option::is_none")]
    h4: Option<ImageAsset>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, code: TimeframeCode) -> &Option<ImageAsset> {
        match code {
            TimeframeCode::M1 => &self.m1,
            TimeframeCode::M3 => &self.m3,
            TimeframeCode::M5 => &self.m5,
            TimeframeCode::M15 => &self.m15,
            TimeframeCode::H1 => &self.h1,
            TimeframeCode::H4 => &self.h4,
        }
    }

    fn slot_mut(&mut self, code: TimeframeCode) -> &mut Option<ImageAsset> {
        match code {
            TimeframeCode::M1 => &mut self.m1,
            TimeframeCode::M3 => &mut self.m3,
            TimeframeCode::M5 => &mut self.m5,
            TimeframeCode::M15 => &mut self.m15,
            TimeframeCode::H1 => &mut self.h1,
            TimeframeCode::H4 => &mut self.h4,
        }
    }

    pub fn get(&self, code: TimeframeCode) -> Option<&ImageAsset> {
        self.slot(code).as_ref()
    }

    /// Place an image in its timeframe slot, returning the previous occupant
    /// if the slot was already filled.
    pub fn insert(&mut self, image: ImageAsset) -> Option<ImageAsset> {
        self.slot_mut(image.timeframe).replace(image)
    }

    /// Occupied slots in canonical timeframe order.
    pub fn iter(&self) -> impl Iterator<Item = (TimeframeCode, &ImageAsset)> {
        TimeframeCode::ALL
            .iter()
            .filter_map(|code| self.get(*code).map(|img| (*code, img)))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// One (asset, calendar date, sequence) group of images.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateEntry {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Per-(asset, date) sequence number, >= 1.
    pub sequence: u32,
    /// `"{date}-{sequence}"`, unique within one asset's index.
    pub date_key: String,
    pub images: ImageSet,
}

impl DateEntry {
    pub fn new(date: String, sequence: u32) -> Self {
        let date_key = format!("{}-{}", date, sequence);
        Self {
            date,
            sequence,
            date_key,
            images: ImageSet::new(),
        }
    }
}

/// Ordered date entries for one asset, sorted by (date, sequence) ascending.
pub type AssetIndex = Vec<DateEntry>;

/// The full derived index: asset name -> ordered entries.
pub type Index = BTreeMap<String, AssetIndex>;
