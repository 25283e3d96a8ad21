//! SQLite cache for the scanned shelf
//!
//! Stores discovered discs so startup can show the previous library
//! without rescanning the folder.

use crate::disc::Disc;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during cache operations
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt cache entry: {0}")]
    Corrupt(String),
}

/// Shelf cache backed by SQLite
pub struct ShelfCache {
    conn: Connection,
}

impl ShelfCache {
    /// SQL schema for the discs and tracks tables
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS discs (
            id INTEGER PRIMARY KEY,
            path TEXT UNIQUE NOT NULL,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            cover TEXT,
            modified_time INTEGER NOT NULL,
            scanned_at INTEGER NOT NULL
        );
        CREATE TABLE IF NOT EXISTS disc_tracks (
            disc_path TEXT NOT NULL,
            idx INTEGER NOT NULL,
            name TEXT NOT NULL,
            PRIMARY KEY (disc_path, idx)
        );
        CREATE INDEX IF NOT EXISTS idx_disc_path ON disc_tracks(disc_path);
    "#;

    /// Open or create a cache database at the given path
    pub fn open(db_path: &Path) -> Result<Self, CacheError> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        conn.execute_batch(Self::SCHEMA)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self, CacheError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(Self::SCHEMA)?;
        Ok(Self { conn })
    }

    /// Get a cached disc if its folder hasn't changed since the scan
    pub fn get(&self, path: &Path, modified_time: u64) -> Option<Disc> {
        let row = self
            .conn
            .query_row(
                "SELECT path, title, artist, cover
                 FROM discs
                 WHERE path = ?1 AND modified_time = ?2",
                params![path.to_string_lossy().to_string(), modified_time],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, Option<String>>(3)?,
                    ))
                },
            )
            .ok()?;

        let tracks = self.tracks_for(&row.0).ok()?;
        Disc::new(
            PathBuf::from(row.0),
            row.1,
            row.2,
            row.3.map(PathBuf::from),
            tracks,
        )
        .ok()
    }

    /// Store a scanned disc, replacing any previous entry for its folder
    pub fn put(&mut self, disc: &Disc, modified_time: u64) -> Result<(), CacheError> {
        let path = disc
            .source()
            .ok_or_else(|| CacheError::Corrupt("disc has no source folder".into()))?
            .to_string_lossy()
            .to_string();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT OR REPLACE INTO discs (path, title, artist, cover, modified_time, scanned_at)
             VALUES (?1, ?2, ?3, ?4, ?5, strftime('%s', 'now'))",
            params![
                path,
                disc.title(),
                disc.artist(),
                disc.cover().map(|p| p.to_string_lossy().to_string()),
                modified_time,
            ],
        )?;
        tx.execute("DELETE FROM disc_tracks WHERE disc_path = ?1", params![path])?;
        for (idx, name) in disc.tracks().iter().enumerate() {
            tx.execute(
                "INSERT INTO disc_tracks (disc_path, idx, name) VALUES (?1, ?2, ?3)",
                params![path, idx as i64, name],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Load every cached disc, ordered by title
    pub fn get_all(&self) -> Result<Vec<Disc>, CacheError> {
        let mut stmt = self.conn.prepare(
            "SELECT path, title, artist, cover FROM discs ORDER BY title COLLATE NOCASE",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })?;

        let mut discs = Vec::new();
        for row in rows {
            let (path, title, artist, cover) = row?;
            let tracks = self.tracks_for(&path)?;
            // Skip entries whose track rows were lost rather than fail the load
            if let Ok(disc) = Disc::new(
                PathBuf::from(&path),
                title,
                artist,
                cover.map(PathBuf::from),
                tracks,
            ) {
                discs.push(disc);
            }
        }
        Ok(discs)
    }

    /// Remove every cached disc (before a full rescan)
    pub fn clear(&self) -> Result<(), CacheError> {
        self.conn.execute("DELETE FROM disc_tracks", [])?;
        self.conn.execute("DELETE FROM discs", [])?;
        Ok(())
    }

    fn tracks_for(&self, disc_path: &str) -> Result<Vec<String>, CacheError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM disc_tracks WHERE disc_path = ?1 ORDER BY idx")?;
        let rows = stmt.query_map(params![disc_path], |row| row.get::<_, String>(0))?;
        let mut tracks = Vec::new();
        for row in rows {
            tracks.push(row?);
        }
        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_disc(path: &str, title: &str) -> Disc {
        Disc::new(
            PathBuf::from(path),
            title,
            "Test Artist",
            None,
            vec!["one".into(), "two".into(), "three".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_put_get_roundtrip() {
        let mut cache = ShelfCache::in_memory().unwrap();
        let disc = make_disc("/shelf/album", "Album");

        cache.put(&disc, 1000).unwrap();

        let got = cache.get(Path::new("/shelf/album"), 1000).unwrap();
        assert_eq!(got.title(), "Album");
        assert_eq!(got.tracks(), disc.tracks());
        assert_eq!(got.id(), disc.id());
    }

    #[test]
    fn test_stale_mtime_misses() {
        let mut cache = ShelfCache::in_memory().unwrap();
        cache.put(&make_disc("/shelf/album", "Album"), 1000).unwrap();

        assert!(cache.get(Path::new("/shelf/album"), 2000).is_none());
    }

    #[test]
    fn test_get_all_sorted_by_title() {
        let mut cache = ShelfCache::in_memory().unwrap();
        cache.put(&make_disc("/shelf/b", "Bravo"), 1).unwrap();
        cache.put(&make_disc("/shelf/a", "alpha"), 1).unwrap();

        let all = cache.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].title(), "alpha");
        assert_eq!(all[1].title(), "Bravo");
    }

    #[test]
    fn test_replace_updates_tracks() {
        let mut cache = ShelfCache::in_memory().unwrap();
        cache.put(&make_disc("/shelf/album", "Album"), 1000).unwrap();

        let updated = Disc::new(
            PathBuf::from("/shelf/album"),
            "Album",
            "Test Artist",
            None,
            vec!["just one".into()],
        )
        .unwrap();
        cache.put(&updated, 2000).unwrap();

        let got = cache.get(Path::new("/shelf/album"), 2000).unwrap();
        assert_eq!(got.tracks(), &["just one".to_string()]);
    }

    #[test]
    fn test_clear() {
        let mut cache = ShelfCache::in_memory().unwrap();
        cache.put(&make_disc("/shelf/album", "Album"), 1000).unwrap();
        cache.clear().unwrap();
        assert!(cache.get_all().unwrap().is_empty());
    }
}
