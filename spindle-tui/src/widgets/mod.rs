//! UI widgets for Spindle

mod carousel;
mod controls;
pub mod status_bar;
mod tracklist;
mod tray;

pub use carousel::{CarouselState, CarouselWidget};
pub use controls::{ControlHit, ControlsWidget};
pub use status_bar::{HelpWidget, StatusBarWidget};
pub use tracklist::TrackListWidget;
pub use tray::TrayWidget;
