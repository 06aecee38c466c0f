//! atera-calc: headless engine for the embeddable savings calculator widget.
//!
//! The crate owns the reactive part of the widget: slider configuration,
//! slider reconciliation, the savings formula and the lead-capture flow.
//! Hosts plug their presentation layer in through [`widget::MountSurface`].

pub mod config;
pub mod core;
pub mod error;
pub mod telemetry;
pub mod widget;

pub use config::{HttpConfigLoader, LoaderConfig, SliderConfigSource, StaticConfigSource};
pub use core::{CalculationResult, compute};
pub use error::{WidgetError, WidgetResult};
pub use widget::{EnhanceOutcome, MemoryMount, MountId, WidgetController, WidgetMode};
