pub mod calculation;
pub mod format;
pub mod slider_config;

pub use calculation::{CalculationResult, compute};
pub use format::{format_currency, format_plain};
pub use slider_config::{
    SLIDER_COUNT, SliderConfig, SliderConfigJson, SliderFormat, SlidersDocument, TickLabels,
};
