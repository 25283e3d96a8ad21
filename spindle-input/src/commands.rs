//! Command definitions for Spindle

use std::path::PathBuf;

/// Commands that can be dispatched from input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // Transport
    TogglePlay,
    Eject,
    SkipForward,
    SkipBack,
    SelectTrack(usize),

    // Carousel
    CarouselNext,
    CarouselPrev,
    /// Arm the focused shelf item for insertion (Enter)
    SelectFocused,
    /// Insert the armed disc without a pointer drag (keyboard path)
    InsertArmed,

    // Knobs
    AdjustVolume(i16),
    AdjustBass(i16),

    // Shelf
    ShelfScan(PathBuf),

    // UI
    SetTheme(String),
    ToggleHelp,
    HelpScrollUp,
    HelpScrollDown,

    // Mode changes
    EnterCommandMode,
    EnterNormalMode,

    // Command mode
    ExecuteCommand(String),

    // Application
    Quit,
    Cancel,
}
