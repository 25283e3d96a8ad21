//! Disc shelf for Spindle - the disc data model, scanning, and caching
//!
//! A "disc" is an album folder turned into a playable unit: title, artist,
//! optional cover image, and an ordered track list. The shelf is the
//! collection the carousel browses.

mod cache;
mod config;
mod disc;
mod scanner;
mod shelf;

pub use cache::{CacheError, ShelfCache};
pub use config::Config;
pub use disc::{Disc, DiscError, DiscId};
pub use scanner::{ScanConfig, ScanError, ScanProgress, ScanResult, ShelfScanner};
pub use shelf::Shelf;
