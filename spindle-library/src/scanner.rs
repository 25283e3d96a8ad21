//! Shelf scanner - turns a directory of album folders into discs
//!
//! Each subdirectory containing at least one audio file becomes a disc:
//! track names from the sorted file stems, cover art from the first image
//! file, title/artist from an "Artist - Title" folder name. Results are
//! stored in the cache so the next startup can skip the walk.

use crate::cache::{CacheError, ShelfCache};
use crate::disc::{Disc, DiscError};
use crossbeam_channel::{self, Receiver, Sender};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::SystemTime;
use thiserror::Error;

/// Progress updates during shelf scanning
#[derive(Debug, Clone)]
pub enum ScanProgress {
    /// Scanning started
    Started {
        /// Total number of album folders to inspect
        total: usize,
    },
    /// A disc was built from an album folder
    Found {
        /// Current folder number (1-indexed)
        current: usize,
        /// Total number of folders
        total: usize,
        /// Title of the disc that was built
        title: String,
    },
    /// A folder was served from the cache (unchanged since last scan)
    Cached {
        /// Current folder number (1-indexed)
        current: usize,
        /// Total number of folders
        total: usize,
        /// Title of the cached disc
        title: String,
    },
    /// Scanning completed
    Complete {
        /// Number of discs built fresh
        found: usize,
        /// Number of discs served from cache
        cached: usize,
        /// Number of folders that failed (no tracks, unreadable)
        failed: usize,
    },
    /// Error building a disc from a folder
    Error {
        /// Folder that failed
        path: PathBuf,
        /// Error message
        message: String,
    },
}

/// Configuration for the shelf scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory whose subdirectories are album folders
    pub directory: PathBuf,
    /// Audio file extensions that count as tracks
    pub audio_extensions: Vec<String>,
    /// Image file extensions that count as cover art
    pub image_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            audio_extensions: vec![
                "mp3".into(),
                "flac".into(),
                "wav".into(),
                "ogg".into(),
                "m4a".into(),
                "aac".into(),
            ],
            image_extensions: vec!["jpg".into(), "jpeg".into(), "png".into()],
        }
    }
}

/// Error type for scanning operations
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Disc error: {0}")]
    Disc(#[from] DiscError),
}

/// Result of a shelf scan
pub struct ScanResult {
    /// All discs (fresh + cached), sorted by title
    pub discs: Vec<Disc>,
    /// Number of discs built fresh
    pub found_count: usize,
    /// Number of discs from cache
    pub cached_count: usize,
    /// Number of folders that failed
    pub failed_count: usize,
}

/// Shelf scanner with cache-backed incremental rescans
pub struct ShelfScanner {
    cache: Arc<Mutex<ShelfCache>>,
}

impl ShelfScanner {
    /// Create a new scanner with the given cache
    pub fn new(cache: ShelfCache) -> Self {
        Self {
            cache: Arc::new(Mutex::new(cache)),
        }
    }

    /// Load every disc from the cache (startup path, no filesystem walk)
    pub fn get_all_discs(&self) -> Result<Vec<Disc>, CacheError> {
        self.cache.lock().unwrap().get_all()
    }

    /// Scan a directory synchronously (blocking)
    ///
    /// Returns the scan result and sends progress updates through the channel.
    pub fn scan(
        &self,
        config: &ScanConfig,
        progress_tx: Option<Sender<ScanProgress>>,
    ) -> Result<ScanResult, ScanError> {
        let folders = Self::collect_album_folders(&config.directory)?;
        let total = folders.len();

        if let Some(ref tx) = progress_tx {
            let _ = tx.send(ScanProgress::Started { total });
        }

        tracing::info!(directory = %config.directory.display(), total, "shelf scan started");

        let mut discs = Vec::new();
        let mut found_count = 0;
        let mut cached_count = 0;
        let mut failed_count = 0;

        for (i, folder) in folders.iter().enumerate() {
            let current = i + 1;
            let modified_time = Self::folder_mtime(folder);

            // Serve unchanged folders from the cache
            let cached = {
                let cache = self.cache.lock().unwrap();
                cache.get(folder, modified_time)
            };
            if let Some(disc) = cached {
                if let Some(ref tx) = progress_tx {
                    let _ = tx.send(ScanProgress::Cached {
                        current,
                        total,
                        title: disc.title().to_string(),
                    });
                }
                cached_count += 1;
                discs.push(disc);
                continue;
            }

            match Self::build_disc(folder, config) {
                Ok(disc) => {
                    if let Err(e) = self.cache.lock().unwrap().put(&disc, modified_time) {
                        tracing::warn!(folder = %folder.display(), error = %e, "cache write failed");
                    }
                    if let Some(ref tx) = progress_tx {
                        let _ = tx.send(ScanProgress::Found {
                            current,
                            total,
                            title: disc.title().to_string(),
                        });
                    }
                    found_count += 1;
                    discs.push(disc);
                }
                Err(e) => {
                    tracing::debug!(folder = %folder.display(), error = %e, "folder skipped");
                    if let Some(ref tx) = progress_tx {
                        let _ = tx.send(ScanProgress::Error {
                            path: folder.clone(),
                            message: e.to_string(),
                        });
                    }
                    failed_count += 1;
                }
            }
        }

        discs.sort_by(|a, b| a.title().to_lowercase().cmp(&b.title().to_lowercase()));

        if let Some(ref tx) = progress_tx {
            let _ = tx.send(ScanProgress::Complete {
                found: found_count,
                cached: cached_count,
                failed: failed_count,
            });
        }

        tracing::info!(found_count, cached_count, failed_count, "shelf scan complete");

        Ok(ScanResult {
            discs,
            found_count,
            cached_count,
            failed_count,
        })
    }

    /// Start an asynchronous scan
    ///
    /// Returns a receiver for progress updates and a handle to the scanning thread.
    pub fn scan_async(
        &self,
        config: ScanConfig,
    ) -> (Receiver<ScanProgress>, JoinHandle<Result<ScanResult, ScanError>>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let cache = Arc::clone(&self.cache);

        let handle = thread::spawn(move || {
            let scanner = ShelfScanner { cache };
            scanner.scan(&config, Some(tx))
        });

        (rx, handle)
    }

    /// Collect album folders (immediate subdirectories), sorted by name
    fn collect_album_folders(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
        let mut folders = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                folders.push(path);
            }
        }
        folders.sort();
        Ok(folders)
    }

    /// Build a disc from an album folder
    fn build_disc(folder: &Path, config: &ScanConfig) -> Result<Disc, ScanError> {
        let mut audio_files = Vec::new();
        Self::collect_files(folder, &config.audio_extensions, &mut audio_files);
        audio_files.sort();

        let tracks: Vec<String> = audio_files
            .iter()
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()))
            .map(Self::clean_track_name)
            .collect();

        let cover = Self::find_cover(folder, &config.image_extensions);
        let (artist, title) = Self::split_folder_name(folder);

        Ok(Disc::new(folder.to_path_buf(), title, artist, cover, tracks)?)
    }

    /// Collect files with matching extensions, recursively
    fn collect_files(dir: &Path, extensions: &[String], out: &mut Vec<PathBuf>) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(_) => return,
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() {
                if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
                    if extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
                        out.push(path);
                    }
                }
            } else if path.is_dir() {
                Self::collect_files(&path, extensions, out);
            }
        }
    }

    /// First image file in the album folder (top level only)
    fn find_cover(folder: &Path, extensions: &[String]) -> Option<PathBuf> {
        let mut images: Vec<PathBuf> = std::fs::read_dir(folder)
            .ok()?
            .flatten()
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .and_then(|e| e.to_str())
                        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
                        .unwrap_or(false)
            })
            .collect();
        images.sort();
        images.into_iter().next()
    }

    /// Split "Artist - Title" folder names; otherwise the whole name is the title
    fn split_folder_name(folder: &Path) -> (String, String) {
        let name = folder
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled")
            .to_string();

        match name.split_once(" - ") {
            Some((artist, title)) if !artist.is_empty() && !title.is_empty() => {
                (artist.trim().to_string(), title.trim().to_string())
            }
            _ => ("Unknown Artist".to_string(), name),
        }
    }

    /// Modification time of an album folder as a Unix timestamp
    fn folder_mtime(folder: &Path) -> u64 {
        std::fs::metadata(folder)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Strip a leading track number ("01 - foo", "01. foo", "01_foo", "01 foo")
    fn clean_track_name(stem: &str) -> String {
        let trimmed = stem.trim_start_matches(|c: char| c.is_ascii_digit());
        if trimmed.len() == stem.len() {
            return stem.to_string();
        }
        let trimmed = trimmed
            .trim_start_matches([' ', '.', '-', '_'])
            .trim_start();
        if trimmed.is_empty() {
            stem.to_string()
        } else {
            trimmed.to_string()
        }
    }
}
