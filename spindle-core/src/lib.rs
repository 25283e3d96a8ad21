//! Playback core for Spindle - the tray state machine and platter physics
//!
//! Two independent pieces:
//! - SpindleMotor: drives the disc's angular position toward a target spin
//!   speed with asymmetric spin-up/spin-down steps, one tick per frame.
//! - Player: the state machine over disc presence, arming, drag insertion,
//!   play/pause, track navigation, and the timed eject window.
//!
//! The two never read each other; the app feeds the player's derived flags
//! into the motor each frame.

mod controller;
mod rotation;

pub use controller::{Player, PlayerSnapshot, EJECT_DURATION};
pub use rotation::{SpindleMotor, PLAY_SPEED, SPIN_DOWN, SPIN_UP};
