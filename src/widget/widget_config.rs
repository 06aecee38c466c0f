use serde::{Deserialize, Serialize};

use crate::config::LoaderConfig;

/// Context the controller runs in, chosen by the host at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetMode {
    /// Published page: `init` enhances every mount.
    #[default]
    Display,
    /// Inside the editor: passes run only when the editor calls `rerender`.
    Authoring,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub mode: WidgetMode,
    #[serde(default)]
    pub loader: LoaderConfig,
}

impl WidgetConfig {
    #[must_use]
    pub fn new(loader: LoaderConfig) -> Self {
        Self {
            mode: WidgetMode::default(),
            loader,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: WidgetMode) -> Self {
        self.mode = mode;
        self
    }
}
