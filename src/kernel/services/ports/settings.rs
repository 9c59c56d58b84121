use crate::kernel::jump::{JumpMode, KeyLayout, TagAlphabet};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_SKIM_DELAY_MS: u64 = 400;
const DEFAULT_SKIM_THRESHOLD: usize = 100_000;

/// User settings for jump sessions, stored as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpSettings {
    #[serde(default)]
    pub layout: KeyLayout,
    /// Keys tags are built from. Empty means every key of `layout`.
    #[serde(default, alias = "allowedChars")]
    pub allowed_chars: String,
    /// Search the whole document instead of only the visible area.
    #[serde(default = "default_true", alias = "searchWholeFile")]
    pub search_whole_file: bool,
    #[serde(default = "default_cycle_modes", alias = "cycleModes")]
    pub cycle_modes: Vec<JumpMode>,
    /// Delay between a skim and the tag assignment that follows it.
    #[serde(default = "default_skim_delay_ms", alias = "skimDelayMs")]
    pub skim_delay_ms: u64,
    /// Documents with at least this many chars skim before solving.
    #[serde(default = "default_skim_threshold", alias = "skimThreshold")]
    pub skim_threshold: usize,
}

impl JumpSettings {
    pub fn alphabet(&self) -> TagAlphabet {
        TagAlphabet::new(self.layout, &self.allowed_chars)
    }

    pub fn skim_delay(&self) -> Duration {
        Duration::from_millis(self.skim_delay_ms)
    }
}

impl Default for JumpSettings {
    fn default() -> Self {
        Self {
            layout: KeyLayout::default(),
            allowed_chars: String::new(),
            search_whole_file: default_true(),
            cycle_modes: default_cycle_modes(),
            skim_delay_ms: default_skim_delay_ms(),
            skim_threshold: default_skim_threshold(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cycle_modes() -> Vec<JumpMode> {
    vec![JumpMode::Jump, JumpMode::Target, JumpMode::JumpEnd]
}

fn default_skim_delay_ms() -> u64 {
    DEFAULT_SKIM_DELAY_MS
}

fn default_skim_threshold() -> usize {
    DEFAULT_SKIM_THRESHOLD
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
