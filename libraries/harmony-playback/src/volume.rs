//! Volume control
//!
//! Volume is a fraction in [0, 1] applied linearly to the output. Mute is
//! kept separate so the level survives a mute/unmute cycle.

/// Clamp any real number into [0, 1]; NaN maps to 0
pub fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Volume controller
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    /// Volume level (0.0-1.0)
    level: f64,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create new volume controller with a clamped level
    pub fn new(level: f64) -> Self {
        Self {
            level: clamp_fraction(level),
            muted: false,
        }
    }

    /// Set volume level; returns true if the stored level changed
    pub fn set_level(&mut self, level: f64) -> bool {
        let level = clamp_fraction(level);
        let changed = level != self.level;
        self.level = level;
        changed
    }

    /// Current volume level (0.0-1.0)
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain handed to the audio output: 0 when muted, otherwise the level
    pub fn gain(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(0.8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_volume_level_clamps() {
        let mut vol = Volume::new(0.5);
        assert_eq!(vol.level(), 0.5);

        vol.set_level(1.5);
        assert_eq!(vol.level(), 1.0);

        vol.set_level(-3.0);
        assert_eq!(vol.level(), 0.0);

        vol.set_level(f64::NAN);
        assert_eq!(vol.level(), 0.0);

        vol.set_level(f64::INFINITY);
        assert_eq!(vol.level(), 1.0);
    }

    #[test]
    fn set_level_reports_changes() {
        let mut vol = Volume::new(0.3);
        assert!(vol.set_level(0.6));
        assert!(!vol.set_level(0.6));
    }

    #[test]
    fn mute_preserves_level() {
        let mut vol = Volume::new(0.8);
        vol.mute();
        assert!(vol.is_muted());
        assert_eq!(vol.gain(), 0.0);
        assert_eq!(vol.level(), 0.8);

        vol.toggle_mute();
        assert!(!vol.is_muted());
        assert_eq!(vol.gain(), 0.8);
    }
}
