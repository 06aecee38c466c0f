use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tracing::{debug, warn};

pub const SLIDERS_ROUTE: &str = "/atera/v1/calc-sliders";
pub const SLIDERS_CACHE_CONTROL: &str = "public, max-age=300";

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResponse {
    pub status: u16,
    pub cache_control: Option<&'static str>,
    pub body: Value,
}

impl EndpointResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: 200,
            cache_control: Some(SLIDERS_CACHE_CONTROL),
            body,
        }
    }

    fn error(status: u16, code: &str, message: &str) -> Self {
        Self {
            status,
            cache_control: None,
            body: json!({
                "code": code,
                "message": message,
                "data": { "status": status },
            }),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Serves the slider configuration document from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct SliderEndpoint {
    path: PathBuf,
}

impl SliderEndpoint {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document fresh on every call; caching is left to HTTP
    /// intermediaries via the `Cache-Control` header.
    #[must_use]
    pub fn respond(&self) -> EndpointResponse {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "sliders config not found");
            return EndpointResponse::error(
                404,
                "atera_cc_not_found",
                "Sliders configuration not found.",
            );
        }

        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read sliders config");
                return EndpointResponse::error(
                    500,
                    "atera_cc_read_error",
                    "Failed to read sliders configuration.",
                );
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(body) => {
                debug!(path = %self.path.display(), "serving sliders config");
                EndpointResponse::ok(body)
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "invalid sliders config json");
                EndpointResponse::error(
                    500,
                    "atera_cc_bad_json",
                    "Invalid sliders configuration JSON.",
                )
            }
        }
    }
}
