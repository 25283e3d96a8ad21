//! The disc data model

use std::path::PathBuf;
use thiserror::Error;
use xxhash_rust::xxh3::xxh3_64;

/// Errors constructing a disc
#[derive(Error, Debug)]
pub enum DiscError {
    #[error("disc '{0}' has no tracks")]
    Empty(String),
}

/// Stable identity of a disc, derived from its source path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscId(u64);

impl DiscId {
    /// Derive an id from the disc's source path (or any stable tag)
    pub fn from_source(source: &str) -> Self {
        Self(xxh3_64(source.as_bytes()))
    }

    /// Raw id value (for cache keys and logging)
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DiscId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A playable disc: title, artist, cover art, and an ordered track list
///
/// Read-only once built. The track list is never empty; `Disc::new`
/// rejects empty ones so downstream track indexing needs no emptiness
/// checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Disc {
    id: DiscId,
    title: String,
    artist: String,
    cover: Option<PathBuf>,
    tracks: Vec<String>,
    /// Folder this disc was scanned from (None for built-in demo discs)
    source: Option<PathBuf>,
}

impl Disc {
    /// Build a disc scanned from a folder
    pub fn new(
        source: PathBuf,
        title: impl Into<String>,
        artist: impl Into<String>,
        cover: Option<PathBuf>,
        tracks: Vec<String>,
    ) -> Result<Self, DiscError> {
        let title = title.into();
        if tracks.is_empty() {
            return Err(DiscError::Empty(title));
        }
        Ok(Self {
            id: DiscId::from_source(&source.to_string_lossy()),
            title,
            artist: artist.into(),
            cover,
            tracks,
            source: Some(source),
        })
    }

    /// Build a built-in demo disc (no backing folder)
    pub fn builtin(
        title: impl Into<String>,
        artist: impl Into<String>,
        tracks: Vec<String>,
    ) -> Result<Self, DiscError> {
        let title = title.into();
        if tracks.is_empty() {
            return Err(DiscError::Empty(title));
        }
        Ok(Self {
            id: DiscId::from_source(&format!("builtin:{}", title)),
            title,
            artist: artist.into(),
            cover: None,
            tracks,
            source: None,
        })
    }

    pub fn id(&self) -> DiscId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn cover(&self) -> Option<&PathBuf> {
        self.cover.as_ref()
    }

    /// Ordered track names, always at least one
    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    pub fn source(&self) -> Option<&PathBuf> {
        self.source.as_ref()
    }
}
