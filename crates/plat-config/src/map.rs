//! Map/camera tuning.

use serde::{Deserialize, Serialize};

/// Default bounds-fit padding in pixels.
const fn default_fit_padding_px() -> u32 {
    48
}

/// Default close-in zoom level after a click search resolves.
const fn default_click_zoom() -> f64 {
    17.0
}

/// Default number of one-line addresses sampled into a history event.
const fn default_max_history_sample() -> usize {
    5
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    /// Padding passed to `fit_bounds` after a bulk result list installs.
    #[serde(default = "default_fit_padding_px")]
    pub fit_padding_px: u32,

    /// Zoom level for `fly_to` after a single click-search resolves.
    #[serde(default = "default_click_zoom")]
    pub click_zoom: f64,

    /// How many result addresses a search-history event samples.
    #[serde(default = "default_max_history_sample")]
    pub max_history_sample: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            fit_padding_px: default_fit_padding_px(),
            click_zoom: default_click_zoom(),
            max_history_sample: default_max_history_sample(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = MapConfig::default();
        assert_eq!(config.fit_padding_px, 48);
        assert!(config.click_zoom > 10.0);
        assert_eq!(config.max_history_sample, 5);
    }
}
