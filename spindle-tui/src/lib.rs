//! Terminal UI for Spindle - widgets, themes, and layout
//!
//! Renders the player as a physical unit: tray with a spinning platter,
//! track list, control surface, and the disc carousel underneath.

mod app;
mod theme;
pub mod widgets;

pub use app::{App, AppState, MessageType, PaneAreas};
pub use theme::{Theme, BRUSHED_SILVER, CRT_AMBER, CRT_GREEN};
pub use widgets::status_bar::HelpWidget;
pub use widgets::{
    CarouselState, CarouselWidget, ControlHit, ControlsWidget, StatusBarWidget, TrackListWidget,
    TrayWidget,
};
