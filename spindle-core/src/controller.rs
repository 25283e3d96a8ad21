//! Tray state machine - arming, drag insertion, playback, timed eject
//!
//! Every intent validates its precondition against the current state and
//! rejects illegal transitions as silent no-ops; the UI disables the same
//! affordances, so this is a second, independent guard. State is only
//! readable through `snapshot()`, so every consumer sees one consistent
//! view per frame.

use spindle_library::{Disc, DiscId};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Length of the eject window: the disc is still present but no longer
/// playing while the tray animation runs, then is removed automatically.
pub const EJECT_DURATION: Duration = Duration::from_millis(2000);

const KNOB_MAX: u8 = 100;
const KNOB_DEFAULT: u8 = 50;

/// Read-only view of the player for rendering and motor gating
#[derive(Debug, Clone)]
pub struct PlayerSnapshot {
    /// Disc in the tray, if any
    pub inserted: Option<Arc<Disc>>,
    pub is_playing: bool,
    pub is_ejecting: bool,
    /// Index into the inserted disc's track list
    pub selected_track: usize,
    /// Shelf item armed for drag insertion
    pub armed: Option<DiscId>,
    /// Active drag payload
    pub dragging: Option<Arc<Disc>>,
    pub volume: u8,
    pub bass: u8,
}

impl Default for PlayerSnapshot {
    /// Empty tray, nothing armed, knobs centered
    fn default() -> Self {
        Self {
            inserted: None,
            is_playing: false,
            is_ejecting: false,
            selected_track: 0,
            armed: None,
            dragging: None,
            volume: KNOB_DEFAULT,
            bass: KNOB_DEFAULT,
        }
    }
}

impl PlayerSnapshot {
    pub fn has_disc(&self) -> bool {
        self.inserted.is_some()
    }

    /// Whether the platter should be spinning this frame
    pub fn spinning(&self) -> bool {
        self.is_playing && !self.is_ejecting
    }

    /// Name of the selected track, if a disc is present
    pub fn current_track(&self) -> Option<&str> {
        self.inserted
            .as_ref()
            .and_then(|d| d.tracks().get(self.selected_track))
            .map(|s| s.as_str())
    }
}

/// The tray state machine
///
/// Invariants, held after every intent:
/// - `is_playing` implies a disc is present and no eject is running
/// - `is_ejecting` implies not playing
/// - `selected_track < tracks.len()` whenever a disc is present
pub struct Player {
    inserted: Option<Arc<Disc>>,
    is_playing: bool,
    is_ejecting: bool,
    selected_track: usize,
    armed: Option<DiscId>,
    dragging: Option<Arc<Disc>>,
    /// Deadline for the running eject window, polled by `update`
    eject_due: Option<Instant>,
    volume: u8,
    bass: u8,
}

impl Player {
    pub fn new() -> Self {
        Self {
            inserted: None,
            is_playing: false,
            is_ejecting: false,
            selected_track: 0,
            armed: None,
            dragging: None,
            eject_due: None,
            volume: KNOB_DEFAULT,
            bass: KNOB_DEFAULT,
        }
    }

    /// Arm a shelf item for drag insertion
    ///
    /// Does not touch the inserted disc; selecting while something plays
    /// only changes which item may be dragged next.
    pub fn select_disc(&mut self, id: DiscId) {
        self.armed = Some(id);
    }

    /// Begin dragging a disc toward the tray
    ///
    /// Rejected unless this exact disc was armed first; incidental pointer
    /// movement over the shelf must never start a drag.
    pub fn begin_drag(&mut self, disc: Arc<Disc>) -> bool {
        if self.armed != Some(disc.id()) {
            tracing::debug!(disc = %disc.id(), "drag rejected: not armed");
            return false;
        }
        self.dragging = Some(disc);
        true
    }

    /// Finish a drag: insert if the drop landed on the tray
    ///
    /// Arming and the payload are cleared regardless of the outcome, so an
    /// abandoned drag leaves nothing armed.
    pub fn finish_drag(&mut self, over_tray: bool) -> bool {
        let payload = self.dragging.take();
        self.armed = None;

        match payload {
            Some(disc) if over_tray => self.insert(disc),
            _ => false,
        }
    }

    /// Abandon the active drag without dropping
    pub fn cancel_drag(&mut self) {
        self.dragging = None;
        self.armed = None;
    }

    /// Insert a disc into the tray and start playback
    ///
    /// No-op if the tray is occupied or an eject is running.
    pub fn insert(&mut self, disc: Arc<Disc>) -> bool {
        if self.inserted.is_some() || self.is_ejecting {
            tracing::debug!(disc = %disc.id(), "insert rejected: tray busy");
            return false;
        }
        tracing::info!(disc = %disc.id(), title = disc.title(), "disc inserted");
        self.inserted = Some(disc);
        self.is_playing = true;
        self.selected_track = 0;
        true
    }

    /// Toggle play/pause; no-op without a disc or during the eject window
    pub fn toggle_play(&mut self) {
        if self.inserted.is_none() || self.is_ejecting {
            return;
        }
        self.is_playing = !self.is_playing;
    }

    /// Start the eject window; the disc stays present until `update` sees
    /// the deadline pass
    pub fn eject(&mut self, now: Instant) {
        if self.inserted.is_none() || self.is_ejecting {
            tracing::debug!("eject rejected: no disc or already ejecting");
            return;
        }
        tracing::info!("eject started");
        self.is_ejecting = true;
        self.is_playing = false;
        self.eject_due = Some(now + EJECT_DURATION);
    }

    /// Advance timed state; call once per frame
    ///
    /// The deadline only takes effect while the player is still ejecting,
    /// so a stale deadline can never clear a disc that was re-handled by
    /// other means.
    pub fn update(&mut self, now: Instant) {
        if !self.is_ejecting {
            return;
        }
        if self.eject_due.is_some_and(|due| now >= due) {
            tracing::info!("eject complete");
            self.inserted = None;
            self.is_ejecting = false;
            self.selected_track = 0;
            self.eject_due = None;
        }
    }

    /// Eject animation progress in 0.0..=1.0 while the window runs
    pub fn eject_progress(&self, now: Instant) -> Option<f32> {
        if !self.is_ejecting {
            return None;
        }
        let due = self.eject_due?;
        let remaining = due.saturating_duration_since(now);
        let frac = 1.0 - remaining.as_secs_f32() / EJECT_DURATION.as_secs_f32();
        Some(frac.clamp(0.0, 1.0))
    }

    /// Jump to a track and start playback
    pub fn select_track(&mut self, index: usize) {
        let Some(disc) = self.inserted.as_ref() else {
            return;
        };
        if self.is_ejecting || index >= disc.track_count() {
            return;
        }
        self.selected_track = index;
        self.is_playing = true;
    }

    /// Next track, wrapping past the end
    pub fn skip_forward(&mut self) {
        let Some(disc) = self.inserted.as_ref() else {
            return;
        };
        if self.is_ejecting {
            return;
        }
        self.selected_track = (self.selected_track + 1) % disc.track_count();
        self.is_playing = true;
    }

    /// Previous track, wrapping past the start
    pub fn skip_back(&mut self) {
        let Some(disc) = self.inserted.as_ref() else {
            return;
        };
        if self.is_ejecting {
            return;
        }
        let count = disc.track_count();
        self.selected_track = (self.selected_track + count - 1) % count;
        self.is_playing = true;
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(KNOB_MAX);
    }

    pub fn adjust_volume(&mut self, delta: i16) {
        self.volume = (self.volume as i16 + delta).clamp(0, KNOB_MAX as i16) as u8;
    }

    pub fn set_bass(&mut self, bass: u8) {
        self.bass = bass.min(KNOB_MAX);
    }

    pub fn adjust_bass(&mut self, delta: i16) {
        self.bass = (self.bass as i16 + delta).clamp(0, KNOB_MAX as i16) as u8;
    }

    pub fn has_disc(&self) -> bool {
        self.inserted.is_some()
    }

    /// Read-only view for rendering and motor gating
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            inserted: self.inserted.clone(),
            is_playing: self.is_playing,
            is_ejecting: self.is_ejecting,
            selected_track: self.selected_track,
            armed: self.armed,
            dragging: self.dragging.clone(),
            volume: self.volume,
            bass: self.bass,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spindle_library::Shelf;

    fn demo_disc(index: usize) -> Arc<Disc> {
        Shelf::builtin().get(index).unwrap().clone()
    }

    fn assert_invariants(player: &Player) {
        let snap = player.snapshot();
        if snap.is_playing {
            assert!(snap.inserted.is_some(), "playing requires a disc");
            assert!(!snap.is_ejecting, "playing excludes ejecting");
        }
        if snap.is_ejecting {
            assert!(!snap.is_playing, "ejecting excludes playing");
        }
        if let Some(disc) = &snap.inserted {
            assert!(snap.selected_track < disc.track_count());
        }
        assert!(snap.volume <= 100 && snap.bass <= 100);
    }

    /// Arm and insert a disc through the drag path
    fn insert_via_drag(player: &mut Player, disc: Arc<Disc>) -> bool {
        player.select_disc(disc.id());
        assert!(player.begin_drag(disc));
        player.finish_drag(true)
    }

    #[test]
    fn test_insertion_requires_arming() {
        let mut player = Player::new();
        let disc = demo_disc(0);

        // Never armed: the drag must not even start
        assert!(!player.begin_drag(disc.clone()));
        assert!(!player.finish_drag(true));
        assert!(!player.has_disc());

        // Armed for a different disc: still rejected
        player.select_disc(demo_disc(1).id());
        assert!(!player.begin_drag(disc));
        assert!(!player.has_disc());
        assert_invariants(&player);
    }

    #[test]
    fn test_armed_drag_inserts_and_plays() {
        let mut player = Player::new();
        let disc = demo_disc(0);

        assert!(insert_via_drag(&mut player, disc.clone()));

        let snap = player.snapshot();
        assert_eq!(snap.inserted.as_ref().unwrap().id(), disc.id());
        assert!(snap.is_playing);
        assert_eq!(snap.selected_track, 0);
        // Arming is consumed by the drop
        assert!(snap.armed.is_none());
        assert!(snap.dragging.is_none());
        assert_invariants(&player);
    }

    #[test]
    fn test_drop_off_tray_clears_arming_without_insertion() {
        let mut player = Player::new();
        let disc = demo_disc(0);

        player.select_disc(disc.id());
        assert!(player.begin_drag(disc));
        assert!(!player.finish_drag(false));

        let snap = player.snapshot();
        assert!(snap.inserted.is_none());
        assert!(snap.armed.is_none());
        assert!(snap.dragging.is_none());
        assert_invariants(&player);
    }

    #[test]
    fn test_no_double_insertion() {
        let mut player = Player::new();
        let first = demo_disc(0);
        let second = demo_disc(1);

        assert!(insert_via_drag(&mut player, first.clone()));
        assert!(!insert_via_drag(&mut player, second));

        assert_eq!(player.snapshot().inserted.unwrap().id(), first.id());
        assert_invariants(&player);
    }

    #[test]
    fn test_toggle_play_needs_disc() {
        let mut player = Player::new();
        player.toggle_play();
        assert!(!player.snapshot().is_playing);

        insert_via_drag(&mut player, demo_disc(0));
        assert!(player.snapshot().is_playing);

        player.toggle_play();
        assert!(!player.snapshot().is_playing);
        player.toggle_play();
        assert!(player.snapshot().is_playing);
        assert_invariants(&player);
    }

    #[test]
    fn test_eject_round_trip() {
        let mut player = Player::new();
        insert_via_drag(&mut player, demo_disc(0));
        player.skip_forward();

        let t0 = Instant::now();
        player.eject(t0);

        let snap = player.snapshot();
        assert!(snap.is_ejecting);
        assert!(!snap.is_playing);
        // Disc is still logically present during the window
        assert!(snap.has_disc());
        assert_invariants(&player);

        // Just before the deadline nothing happens
        player.update(t0 + EJECT_DURATION - Duration::from_millis(1));
        assert!(player.snapshot().is_ejecting);
        assert!(player.has_disc());

        // At the deadline the tray empties and resets
        player.update(t0 + EJECT_DURATION);
        let snap = player.snapshot();
        assert!(snap.inserted.is_none());
        assert!(!snap.is_ejecting);
        assert!(!snap.is_playing);
        assert_eq!(snap.selected_track, 0);
        assert_invariants(&player);
    }

    #[test]
    fn test_reentrant_eject_is_noop() {
        let mut player = Player::new();
        insert_via_drag(&mut player, demo_disc(0));

        let t0 = Instant::now();
        player.eject(t0);
        // A later eject during the window must not extend the deadline
        player.eject(t0 + Duration::from_millis(1500));

        player.update(t0 + EJECT_DURATION);
        assert!(!player.snapshot().is_ejecting);
        assert!(!player.has_disc());
    }

    #[test]
    fn test_eject_window_blocks_insert_and_playback() {
        let mut player = Player::new();
        insert_via_drag(&mut player, demo_disc(0));

        let t0 = Instant::now();
        player.eject(t0);

        // Re-insertion during the window is rejected even through the drag path
        assert!(!insert_via_drag(&mut player, demo_disc(1)));

        player.toggle_play();
        player.select_track(2);
        player.skip_forward();
        player.skip_back();
        let snap = player.snapshot();
        assert!(!snap.is_playing);
        assert_eq!(snap.selected_track, 0);
        assert_invariants(&player);
    }

    #[test]
    fn test_stale_deadline_does_not_fire_after_completion() {
        let mut player = Player::new();
        insert_via_drag(&mut player, demo_disc(0));

        let t0 = Instant::now();
        player.eject(t0);
        player.update(t0 + EJECT_DURATION);
        assert!(!player.has_disc());

        // New disc after the eject completed; a very late update must not
        // clear it
        insert_via_drag(&mut player, demo_disc(1));
        player.update(t0 + EJECT_DURATION * 10);
        assert!(player.has_disc());
        assert_invariants(&player);
    }

    #[test]
    fn test_track_wraparound() {
        let mut player = Player::new();
        let disc = demo_disc(0);
        assert_eq!(disc.track_count(), 5);
        insert_via_drag(&mut player, disc);

        player.select_track(4);
        assert_eq!(player.snapshot().selected_track, 4);

        player.skip_forward();
        assert_eq!(player.snapshot().selected_track, 0);

        player.skip_back();
        assert_eq!(player.snapshot().selected_track, 4);
        assert_invariants(&player);
    }

    #[test]
    fn test_select_track_bounds() {
        let mut player = Player::new();
        player.select_track(0); // no disc: no-op
        insert_via_drag(&mut player, demo_disc(0));

        player.toggle_play(); // pause
        player.select_track(7); // out of range: no-op
        let snap = player.snapshot();
        assert_eq!(snap.selected_track, 0);
        assert!(!snap.is_playing);

        player.select_track(3);
        let snap = player.snapshot();
        assert_eq!(snap.selected_track, 3);
        // Selecting a track resumes playback
        assert!(snap.is_playing);
        assert_invariants(&player);
    }

    #[test]
    fn test_selecting_does_not_touch_inserted_disc() {
        let mut player = Player::new();
        insert_via_drag(&mut player, demo_disc(0));

        player.select_disc(demo_disc(1).id());
        let snap = player.snapshot();
        assert_eq!(snap.inserted.unwrap().id(), demo_disc(0).id());
        assert_eq!(snap.armed, Some(demo_disc(1).id()));
    }

    #[test]
    fn test_knob_clamping() {
        let mut player = Player::new();
        assert_eq!(player.snapshot().volume, 50);

        player.adjust_volume(100);
        assert_eq!(player.snapshot().volume, 100);
        player.adjust_volume(5);
        assert_eq!(player.snapshot().volume, 100);

        player.adjust_bass(-200);
        assert_eq!(player.snapshot().bass, 0);
        player.set_bass(250);
        assert_eq!(player.snapshot().bass, 100);
        assert_invariants(&player);
    }

    #[test]
    fn test_eject_progress_range() {
        let mut player = Player::new();
        assert!(player.eject_progress(Instant::now()).is_none());

        insert_via_drag(&mut player, demo_disc(0));
        let t0 = Instant::now();
        player.eject(t0);

        assert_eq!(player.eject_progress(t0), Some(0.0));
        let half = player.eject_progress(t0 + EJECT_DURATION / 2).unwrap();
        assert!((half - 0.5).abs() < 0.01);
        assert_eq!(player.eject_progress(t0 + EJECT_DURATION * 2), Some(1.0));
    }

    #[test]
    fn test_invariants_across_intent_storm() {
        let mut player = Player::new();
        let t0 = Instant::now();
        let discs = [demo_disc(0), demo_disc(1), demo_disc(2)];

        // A messy but realistic sequence; invariants must hold at every step
        let mut step = 0u32;
        let mut check = |p: &Player| {
            assert_invariants(p);
            step += 1;
        };

        player.toggle_play();
        check(&player);
        player.select_disc(discs[0].id());
        check(&player);
        assert!(player.begin_drag(discs[0].clone()));
        check(&player);
        player.finish_drag(true);
        check(&player);
        player.skip_forward();
        check(&player);
        player.eject(t0);
        check(&player);
        player.toggle_play();
        check(&player);
        player.select_disc(discs[1].id());
        check(&player);
        assert!(player.begin_drag(discs[1].clone()));
        check(&player);
        player.finish_drag(true); // tray still ejecting: rejected
        check(&player);
        player.update(t0 + EJECT_DURATION);
        check(&player);
        player.select_disc(discs[2].id());
        check(&player);
        assert!(player.begin_drag(discs[2].clone()));
        check(&player);
        assert!(player.finish_drag(true));
        check(&player);
        assert!(step > 0);
    }
}
