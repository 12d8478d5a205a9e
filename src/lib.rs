//! Chartindex: Filesystem Index Engine for Backtest Chart Screenshots
//!
//! Indexes a directory tree of chart screenshots, grouping files into date
//! entries per asset and per (calendar date, sequence), and keeps the
//! in-memory index consistent with the on-disk layout across uploads,
//! deletes, and renames.

pub mod catalog;
pub mod config;
pub mod error;
pub mod filename;
pub mod index;
pub mod logging;
pub mod notes;
pub mod stats;
pub mod timeframe;
pub mod tooling;
