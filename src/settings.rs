//! Page settings
//!
//! Read once at startup from an optional inline JSON block:
//! `<script type="application/json" id="card-settings">{ ... }</script>`.
//! Missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{HEART_COUNT, MAX_PIXEL_RATIO};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Decorative hearts in the hero scene
    pub fn heart_count(&self) -> usize {
        match self {
            QualityPreset::Low => HEART_COUNT / 2,
            QualityPreset::Medium => HEART_COUNT,
            QualityPreset::High => HEART_COUNT + HEART_COUNT / 2,
        }
    }

    /// Cap on the device pixel ratio used for the canvas backing store
    pub fn pixel_ratio_cap(&self) -> f64 {
        match self {
            QualityPreset::Low => 1.0,
            QualityPreset::Medium => MAX_PIXEL_RATIO,
            QualityPreset::High => MAX_PIXEL_RATIO,
        }
    }
}

/// Page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Effects ===
    /// Confetti bursts on click
    pub confetti: bool,
    /// Heart cursor follower
    pub cursor_follower: bool,

    // === Audio ===
    /// Ambient track volume (0.0 - 1.0)
    pub audio_volume: f32,

    // === Accessibility ===
    /// Force reduced motion regardless of the user agent preference
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            confetti: true,
            cursor_follower: true,
            audio_volume: 0.6,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring invalid card settings: {}", e);
                Self::default()
            }
        }
    }

    /// OR in the user agent's reduced-motion preference
    pub fn with_user_preference(mut self, prefers_reduced_motion: bool) -> Self {
        self.reduced_motion |= prefers_reduced_motion;
        self
    }

    /// Confetti is decorative motion
    pub fn effective_confetti(&self) -> bool {
        self.confetti && !self.reduced_motion
    }

    /// The follower is decorative motion
    pub fn effective_cursor_follower(&self) -> bool {
        self.cursor_follower && !self.reduced_motion
    }

    pub fn effective_audio_volume(&self) -> f32 {
        self.audio_volume.clamp(0.0, 1.0)
    }

    /// Backing-store pixel ratio for a device ratio
    pub fn pixel_ratio(&self, device_pixel_ratio: f64) -> f64 {
        if device_pixel_ratio <= 0.0 {
            return 1.0;
        }
        device_pixel_ratio.min(self.quality.pixel_ratio_cap())
    }

    /// Id of the inline settings block
    const ELEMENT_ID: &'static str = "card-settings";

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => {
                log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                Self::from_json(&json)
            }
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No #{} outside the browser", Self::ELEMENT_ID);
        Self::default()
    }
}
