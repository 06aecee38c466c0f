use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT_PATH: &str = "/wp-json/atera/v1/calc-sliders";

/// Where the slider configuration is fetched from.
///
/// Serializable so hosts can keep it next to their own settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Origin the widget is served from, e.g. `https://example.com`.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            endpoint_path: default_endpoint_path(),
        }
    }
}

impl LoaderConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    #[must_use]
    pub fn endpoint_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if self.endpoint_path.starts_with('/') {
            format!("{base}{}", self.endpoint_path)
        } else {
            format!("{base}/{}", self.endpoint_path)
        }
    }
}

fn default_endpoint_path() -> String {
    DEFAULT_ENDPOINT_PATH.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_without_double_slash() {
        let config = LoaderConfig::new("https://example.com/");
        assert_eq!(
            config.endpoint_url(),
            "https://example.com/wp-json/atera/v1/calc-sliders"
        );
        let config = config.with_endpoint_path("sliders.json");
        assert_eq!(config.endpoint_url(), "https://example.com/sliders.json");
    }

    #[test]
    fn missing_path_deserializes_to_default() {
        let config: LoaderConfig =
            serde_json::from_str(r#"{"base_url":"http://localhost"}"#).expect("valid config");
        assert_eq!(config.endpoint_path, DEFAULT_ENDPOINT_PATH);
    }
}
