mod endpoint;
mod loader;
mod loader_config;

pub use endpoint::{EndpointResponse, SLIDERS_CACHE_CONTROL, SLIDERS_ROUTE, SliderEndpoint};
pub use loader::{HttpConfigLoader, SliderConfigSource, StaticConfigSource, resolve_document};
pub use loader_config::{DEFAULT_ENDPOINT_PATH, LoaderConfig};
