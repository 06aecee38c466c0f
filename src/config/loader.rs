use async_trait::async_trait;
use tracing::{debug, warn};

use crate::core::{SLIDER_COUNT, SliderConfig, SlidersDocument};
use crate::error::{WidgetError, WidgetResult};

use super::LoaderConfig;

/// Source of the three slider configurations.
///
/// Implementors only provide `fetch_document`; `load` turns every failure into
/// the built-in fallback so callers never see an error.
#[async_trait(?Send)]
pub trait SliderConfigSource {
    async fn fetch_document(&self) -> WidgetResult<SlidersDocument>;

    async fn load(&self) -> [SliderConfig; SLIDER_COUNT] {
        match self.fetch_document().await {
            Ok(document) => resolve_document(document),
            Err(err) => {
                warn!(error = %err, "failed to load sliders config, using defaults");
                Default::default()
            }
        }
    }
}

#[must_use]
pub fn resolve_document(document: SlidersDocument) -> [SliderConfig; SLIDER_COUNT] {
    let records = document.into_records();
    std::array::from_fn(|index| SliderConfig::resolve(index, records[index].as_ref()))
}

/// Fetches the slider document over HTTP.
///
/// The host passes in its own `reqwest::Client` so cookies and other
/// same-origin credentials travel with the request. No caching, retry or
/// timeout is applied here; freshness comes from the endpoint's
/// `Cache-Control` directive.
#[derive(Debug, Clone)]
pub struct HttpConfigLoader {
    client: reqwest::Client,
    config: LoaderConfig,
}

impl HttpConfigLoader {
    #[must_use]
    pub fn new(config: LoaderConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: reqwest::Client, config: LoaderConfig) -> Self {
        Self { client, config }
    }

    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl SliderConfigSource for HttpConfigLoader {
    async fn fetch_document(&self) -> WidgetResult<SlidersDocument> {
        let url = self.config.endpoint_url();
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WidgetError::ConfigFetch(format!(
                "unexpected status {status} from {url}"
            )));
        }

        let body = response.text().await?;
        let document: SlidersDocument = serde_json::from_str(&body)
            .map_err(|e| WidgetError::ConfigFetch(format!("invalid sliders json: {e}")))?;
        debug!(url = %url, sliders = document.sliders.len(), "fetched sliders config");
        Ok(document)
    }
}

/// In-memory source for offline hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigSource {
    document: Option<SlidersDocument>,
}

impl StaticConfigSource {
    #[must_use]
    pub fn new(document: SlidersDocument) -> Self {
        Self {
            document: Some(document),
        }
    }

    pub fn from_json(input: &str) -> WidgetResult<Self> {
        let document = serde_json::from_str(input)
            .map_err(|e| WidgetError::ConfigFetch(format!("invalid sliders json: {e}")))?;
        Ok(Self::new(document))
    }

    /// A source whose every fetch fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { document: None }
    }
}

#[async_trait(?Send)]
impl SliderConfigSource for StaticConfigSource {
    async fn fetch_document(&self) -> WidgetResult<SlidersDocument> {
        self.document
            .clone()
            .ok_or_else(|| WidgetError::ConfigFetch("static source unavailable".to_owned()))
    }
}
