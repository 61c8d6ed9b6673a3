//! Lighting modes

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

const MODE_NAME_STATIC: &str = "static";
const MODE_NAME_RAINBOW: &str = "rainbow";

/// Modes that can be stored and restored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeId {
    Static,
    Rainbow,
}

impl ModeId {
    /// Name used in the state file and in logs
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => MODE_NAME_STATIC,
            Self::Rainbow => MODE_NAME_RAINBOW,
        }
    }
}

/// What the zone is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightMode {
    /// Nothing requested yet, or rainbow stopped without a new color
    #[default]
    Off,
    /// Holding a static color
    Static(Rgb),
    /// Rainbow session running
    Rainbow { tick: Duration },
}
