use thiserror::Error;

pub type WidgetResult<T> = Result<T, WidgetError>;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("slider config fetch failed: {0}")]
    ConfigFetch(String),

    #[error("invalid display attributes: {0}")]
    AttributeParse(String),

    #[error("invalid slider config at index {index}: {reason}")]
    InvalidSliderConfig { index: usize, reason: String },

    #[error("mount surface write failed: {0}")]
    Surface(String),

    #[error("no slider at position {position}")]
    UnknownSlider { position: usize },

    #[error("unknown mount id: {0}")]
    UnknownMount(u64),
}

impl From<reqwest::Error> for WidgetError {
    fn from(err: reqwest::Error) -> Self {
        Self::ConfigFetch(err.to_string())
    }
}
