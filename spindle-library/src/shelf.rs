//! The shelf - the ordered collection of discs the carousel browses

use crate::disc::{Disc, DiscId};
use std::sync::Arc;

/// Ordered disc collection with id lookup
#[derive(Debug, Clone, Default)]
pub struct Shelf {
    discs: Vec<Arc<Disc>>,
}

impl Shelf {
    pub fn new(discs: Vec<Disc>) -> Self {
        Self {
            discs: discs.into_iter().map(Arc::new).collect(),
        }
    }

    /// The demo catalog shown before any folder has been scanned
    pub fn builtin() -> Self {
        let discs = vec![
            Disc::builtin(
                "Midnight Dreams",
                "Synthwave Collective",
                vec![
                    "neon lights".into(),
                    "digital love".into(),
                    "retrowave".into(),
                    "city nights".into(),
                    "electric soul".into(),
                ],
            ),
            Disc::builtin(
                "Ocean Waves",
                "Ambient Shores",
                vec![
                    "deep blue".into(),
                    "coastal breeze".into(),
                    "sunrise calm".into(),
                    "tidal flow".into(),
                    "peaceful waters".into(),
                ],
            ),
            Disc::builtin(
                "Urban Pulse",
                "Metro Beats",
                vec![
                    "street rhythm".into(),
                    "city lights".into(),
                    "underground".into(),
                    "metro line".into(),
                    "concrete jungle".into(),
                ],
            ),
        ];
        // Built-in track lists are non-empty by construction
        Self::new(discs.into_iter().map(|d| d.expect("builtin disc")).collect())
    }

    pub fn len(&self) -> usize {
        self.discs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.discs.is_empty()
    }

    pub fn discs(&self) -> &[Arc<Disc>] {
        &self.discs
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Disc>> {
        self.discs.get(index)
    }

    pub fn by_id(&self, id: DiscId) -> Option<&Arc<Disc>> {
        self.discs.iter().find(|d| d.id() == id)
    }

    pub fn index_of(&self, id: DiscId) -> Option<usize> {
        self.discs.iter().position(|d| d.id() == id)
    }

    /// Replace the shelf contents (after a scan completes)
    pub fn set_discs(&mut self, discs: Vec<Disc>) {
        self.discs = discs.into_iter().map(Arc::new).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_shelf() {
        let shelf = Shelf::builtin();
        assert_eq!(shelf.len(), 3);
        for disc in shelf.discs() {
            assert!(disc.track_count() >= 1);
        }
        assert_eq!(shelf.get(0).unwrap().title(), "Midnight Dreams");
    }

    #[test]
    fn test_lookup_by_id() {
        let shelf = Shelf::builtin();
        let id = shelf.get(1).unwrap().id();
        assert_eq!(shelf.by_id(id).unwrap().title(), "Ocean Waves");
        assert_eq!(shelf.index_of(id), Some(1));

        let unknown = DiscId::from_source("nowhere");
        assert!(shelf.by_id(unknown).is_none());
    }
}
