//! Application state management

use crate::theme::{Theme, BRUSHED_SILVER, CRT_AMBER, CRT_GREEN};
use crate::widgets::CarouselState;
use ratatui::layout::Rect;
use spindle_core::PlayerSnapshot;
use spindle_input::Mode;
use spindle_library::Shelf;

/// Message type for colored status messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageType {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

/// Screen regions recorded during layout for mouse hit-testing
#[derive(Debug, Clone, Copy, Default)]
pub struct PaneAreas {
    pub tray: Rect,
    pub track_list: Rect,
    pub controls: Rect,
    pub carousel: Rect,
}

impl PaneAreas {
    /// Check if (col, row) is inside a Rect
    pub fn hit(rect: Rect, col: u16, row: u16) -> bool {
        rect.width > 0
            && rect.height > 0
            && col >= rect.x
            && col < rect.x + rect.width
            && row >= rect.y
            && row < rect.y + rect.height
    }
}

/// Application state
pub struct AppState {
    /// Latest view of the playback core, refreshed every frame
    pub player: PlayerSnapshot,
    /// Platter angle in degrees, read from the motor each frame
    pub angle: f32,
    /// Eject animation progress while the window runs
    pub eject_progress: Option<f32>,

    // Shelf state
    pub shelf: Shelf,
    pub carousel: CarouselState,
    pub is_scanning: bool,
    pub scan_progress: (usize, usize),

    // Drag state (pointer position while a disc is being dragged)
    pub drag_pos: Option<(u16, u16)>,

    // UI state
    pub mode: Mode,
    pub command_buffer: String,
    pub message: Option<String>,
    pub message_type: MessageType,
    pub show_help: bool,
    pub help_scroll: u16,
    pub areas: PaneAreas,

    // Theme & animation
    pub theme: Theme,
    pub frame_count: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            player: PlayerSnapshot::default(),
            angle: 0.0,
            eject_progress: None,
            shelf: Shelf::default(),
            carousel: CarouselState::default(),
            is_scanning: false,
            scan_progress: (0, 0),
            drag_pos: None,
            mode: Mode::Normal,
            command_buffer: String::new(),
            message: None,
            message_type: MessageType::Info,
            show_help: false,
            help_scroll: 0,
            areas: PaneAreas::default(),
            theme: Theme::default(),
            frame_count: 0,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the per-frame view of the core
    pub fn sync_player(&mut self, snapshot: PlayerSnapshot, angle: f32, eject: Option<f32>) {
        self.player = snapshot;
        self.angle = angle;
        self.eject_progress = eject;
    }

    /// Replace the shelf (after a scan) and reset the carousel onto it
    pub fn set_shelf(&mut self, shelf: Shelf) {
        self.carousel = CarouselState::new(shelf.len());
        self.shelf = shelf;
    }

    /// Set current mode
    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        if mode != Mode::Command {
            self.command_buffer.clear();
        }
    }

    /// Toggle help display
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening
        }
    }

    /// Scroll help up
    pub fn help_scroll_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(3);
    }

    /// Scroll help down
    pub fn help_scroll_down(&mut self) {
        self.help_scroll = self.help_scroll.saturating_add(3);
    }

    /// Set theme by name
    ///
    /// Returns true if the name matched a theme.
    pub fn set_theme(&mut self, name: &str) -> bool {
        self.theme = match name.to_lowercase().as_str() {
            "silver" | "metal" | "brushed" => BRUSHED_SILVER,
            "green" | "phosphor" | "phosphor-green" => CRT_GREEN,
            "amber" | "orange" => CRT_AMBER,
            _ => {
                self.set_error(format!("Unknown theme: {}. Use silver/green/amber", name));
                return false;
            }
        };
        self.set_success(format!("Theme set to: {}", self.theme.name));
        true
    }

    /// Clear any displayed message
    pub fn clear_message(&mut self) {
        self.message = None;
        self.message_type = MessageType::Info;
    }

    /// Set a message to display (info level)
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Info;
    }

    /// Set a success message (green)
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Success;
    }

    /// Set a warning message (yellow)
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Warning;
    }

    /// Set an error message (red)
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.message_type = MessageType::Error;
    }
}

/// Top-level application handle
pub struct App {
    pub state: AppState,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_theme() {
        let mut state = AppState::new();
        assert!(state.set_theme("amber"));
        assert_eq!(state.theme.name, "amber");
        assert_eq!(state.message_type, MessageType::Success);

        assert!(!state.set_theme("plaid"));
        assert_eq!(state.theme.name, "amber");
        assert_eq!(state.message_type, MessageType::Error);
    }

    #[test]
    fn test_set_shelf_resets_carousel() {
        let mut state = AppState::new();
        state.set_shelf(Shelf::builtin());
        state.carousel.next();
        assert_eq!(state.carousel.center_index(), 1);

        state.set_shelf(Shelf::builtin());
        assert_eq!(state.carousel.center_index(), 0);
    }

    #[test]
    fn test_mode_change_clears_command_buffer() {
        let mut state = AppState::new();
        state.set_mode(Mode::Command);
        state.command_buffer.push_str("scan /x");
        state.set_mode(Mode::Normal);
        assert!(state.command_buffer.is_empty());
    }

    #[test]
    fn test_hit() {
        let rect = Rect::new(2, 3, 4, 2);
        assert!(PaneAreas::hit(rect, 2, 3));
        assert!(PaneAreas::hit(rect, 5, 4));
        assert!(!PaneAreas::hit(rect, 6, 4));
        assert!(!PaneAreas::hit(rect, 2, 5));
        assert!(!PaneAreas::hit(Rect::new(0, 0, 0, 0), 0, 0));
    }
}
