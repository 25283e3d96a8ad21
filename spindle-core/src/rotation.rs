//! Platter physics - spin-up, spin-down, and angular position
//!
//! Models the disc motor as an explicit scheduler object: plain fields
//! stepped by `tick()`, one call per display frame, no clock of its own.
//! The driver keeps ticking while `is_active()` and stops once the platter
//! is fully at rest, so no frames are burned while stopped.

/// Nominal spin speed while playing, degrees per frame
pub const PLAY_SPEED: f32 = 6.0;

/// Spin-up step per tick, degrees per frame
///
/// Larger than SPIN_DOWN: the platter snaps up to speed and coasts down.
pub const SPIN_UP: f32 = 0.3;

/// Spin-down step per tick, degrees per frame
pub const SPIN_DOWN: f32 = 0.2;

/// Disc platter motor
#[derive(Debug, Clone)]
pub struct SpindleMotor {
    /// Angular position in degrees, always in [0, 360)
    angle: f32,
    /// Current speed in degrees per frame, always >= 0
    current_speed: f32,
    /// Target speed in degrees per frame, PLAY_SPEED or 0
    target_speed: f32,
}

impl SpindleMotor {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            current_speed: 0.0,
            target_speed: 0.0,
        }
    }

    /// Set whether the platter should be spinning
    pub fn set_running(&mut self, running: bool) {
        self.target_speed = if running { PLAY_SPEED } else { 0.0 };
    }

    /// Hard stop: zero both speeds immediately (eject, teardown)
    ///
    /// The angle is left where it is; the disc slides out at whatever
    /// orientation it stopped in.
    pub fn halt(&mut self) {
        self.current_speed = 0.0;
        self.target_speed = 0.0;
    }

    /// Whether the driver should keep ticking this motor
    pub fn is_active(&self) -> bool {
        self.current_speed > 0.0 || self.target_speed > 0.0
    }

    /// Advance one frame: step speed toward the target, then advance the angle
    pub fn tick(&mut self) {
        if self.current_speed < self.target_speed {
            // Spin up; a gap within one step lands exactly on the target
            let gap = self.target_speed - self.current_speed;
            self.current_speed = if gap <= SPIN_UP {
                self.target_speed
            } else {
                self.current_speed + SPIN_UP
            };
        } else if self.current_speed > self.target_speed {
            // Coast down, clamped at the target the same way
            let gap = self.current_speed - self.target_speed;
            self.current_speed = if gap <= SPIN_DOWN {
                self.target_speed
            } else {
                self.current_speed - SPIN_DOWN
            };
        }

        // Forward only; wraps via modulo, never snaps back to zero
        self.angle = (self.angle + self.current_speed) % 360.0;
    }

    /// Angular position in degrees, [0, 360)
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Current speed in degrees per frame
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }
}

impl Default for SpindleMotor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spin_up_converges_without_overshoot() {
        let mut motor = SpindleMotor::new();
        motor.set_running(true);

        let ticks_to_full = (PLAY_SPEED / SPIN_UP).ceil() as usize;
        let mut prev = 0.0f32;
        for _ in 0..ticks_to_full {
            motor.tick();
            assert!(motor.current_speed() >= prev, "speed must rise monotonically");
            assert!(motor.current_speed() <= PLAY_SPEED, "speed must never exceed target");
            prev = motor.current_speed();
        }
        assert_eq!(motor.current_speed(), PLAY_SPEED);
    }

    #[test]
    fn test_spin_down_reaches_exact_zero_then_idles() {
        let mut motor = SpindleMotor::new();
        motor.set_running(true);
        for _ in 0..((PLAY_SPEED / SPIN_UP).ceil() as usize) {
            motor.tick();
        }

        motor.set_running(false);
        let ticks_to_stop = (PLAY_SPEED / SPIN_DOWN).ceil() as usize;
        let mut prev = motor.current_speed();
        for _ in 0..ticks_to_stop {
            motor.tick();
            assert!(motor.current_speed() <= prev, "speed must fall monotonically");
            prev = motor.current_speed();
        }
        assert_eq!(motor.current_speed(), 0.0);
        assert!(!motor.is_active(), "fully stopped motor must not request ticks");
    }

    #[test]
    fn test_angle_wraps_never_resets() {
        let mut motor = SpindleMotor::new();
        motor.angle = 359.5;
        motor.current_speed = 1.0;
        motor.target_speed = 1.0;

        motor.tick();
        assert!((motor.angle() - 0.5).abs() < 1e-4, "got {}", motor.angle());
    }

    #[test]
    fn test_angle_advances_by_speed_each_tick() {
        let mut motor = SpindleMotor::new();
        motor.current_speed = PLAY_SPEED;
        motor.target_speed = PLAY_SPEED;

        for i in 1..=10 {
            motor.tick();
            let expected = (PLAY_SPEED * i as f32) % 360.0;
            assert!((motor.angle() - expected).abs() < 1e-3);
        }
    }

    #[test]
    fn test_halt_is_immediate() {
        let mut motor = SpindleMotor::new();
        motor.set_running(true);
        for _ in 0..40 {
            motor.tick();
        }
        assert!(motor.current_speed() > 0.0);

        let angle_before = motor.angle();
        motor.halt();
        assert_eq!(motor.current_speed(), 0.0);
        assert!(!motor.is_active());

        // A stray tick after halt must not move the platter
        motor.tick();
        assert_eq!(motor.angle(), angle_before);
    }

    #[test]
    fn test_active_while_coasting() {
        let mut motor = SpindleMotor::new();
        motor.set_running(true);
        motor.tick();
        motor.set_running(false);

        // Target is zero but the platter still carries speed
        assert!(motor.is_active());
        while motor.is_active() {
            motor.tick();
        }
        assert_eq!(motor.current_speed(), 0.0);
    }
}
