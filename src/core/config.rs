/// Engine configuration, loadable from RON.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::keymap::{default_bindings, Command, Key, Keymap};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Page title when the story has none.
    pub title_placeholder: String,
    /// Label for choices authored without one.
    pub default_choice_label: String,
    /// Node id that restarts the story when navigated to.
    pub restart_node: String,
    /// Choice target that restarts the story without applying effects.
    pub start_target: String,
    pub bindings: Vec<(Key, Command)>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title_placeholder: "cyoa-engine".to_string(),
            default_choice_label: "Next".to_string(),
            restart_node: "restart".to_string(),
            start_target: "start".to_string(),
            bindings: default_bindings(),
        }
    }
}

impl EngineConfig {
    pub fn load_from_ron(path: &Path) -> Result<EngineConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    pub fn parse_ron(input: &str) -> Result<EngineConfig, ConfigError> {
        Ok(ron::from_str(input)?)
    }

    pub fn keymap(&self) -> Keymap {
        Keymap::from_bindings(self.bindings.iter().copied())
    }

    /// Targets the engine handles itself instead of resolving a node.
    pub fn reserved_targets(&self) -> [&str; 2] {
        [self.restart_node.as_str(), self.start_target.as_str()]
    }
}
