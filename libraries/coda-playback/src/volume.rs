//! Volume state
//!
//! Level 0-100 with a mute toggle that preserves the level. Gain is
//! linear, matching the slider-to-element mapping the web UI uses.

/// Volume controller
#[derive(Debug, Clone)]
pub struct Volume {
    /// Volume level (0-100)
    level: u8,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create a new volume controller at the given level (clamped to 100).
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(100),
            muted: false,
        }
    }

    /// Set the level (0-100).
    ///
    /// Moving the slider while muted also unmutes.
    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(100);
        self.muted = false;
    }

    /// Current level (0-100), preserved while muted.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Toggle mute, preserving the level.
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted.
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Linear gain multiplier for the engine (0.0 while muted).
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            f32::from(self.level) / 100.0
        }
    }

    /// What the volume slider should read: 0 while muted, else the level.
    pub fn slider_value(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.level
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_clamps_to_hundred() {
        let mut volume = Volume::new(150);
        assert_eq!(volume.level(), 100);

        volume.set_level(200);
        assert_eq!(volume.level(), 100);
    }

    #[test]
    fn gain_is_linear() {
        assert_eq!(Volume::new(0).gain(), 0.0);
        assert_eq!(Volume::new(50).gain(), 0.5);
        assert_eq!(Volume::new(100).gain(), 1.0);
    }

    #[test]
    fn mute_preserves_level() {
        let mut volume = Volume::new(70);
        volume.toggle_mute();

        assert!(volume.is_muted());
        assert_eq!(volume.gain(), 0.0);
        assert_eq!(volume.level(), 70);
        assert_eq!(volume.slider_value(), 0);

        volume.toggle_mute();
        assert!(!volume.is_muted());
        assert_eq!(volume.gain(), 0.7);
        assert_eq!(volume.slider_value(), 70);
    }

    #[test]
    fn setting_level_unmutes() {
        let mut volume = Volume::new(70);
        volume.toggle_mute();

        volume.set_level(30);
        assert!(!volume.is_muted());
        assert_eq!(volume.gain(), 0.3);
    }
}
