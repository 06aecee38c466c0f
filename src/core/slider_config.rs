use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::error::WidgetError;

pub const SLIDER_COUNT: usize = 3;

pub const FALLBACK_MIN: f64 = 0.0;
pub const FALLBACK_MAX: f64 = 100.0;
pub const FALLBACK_STEP: f64 = 1.0;

pub type TickLabels = SmallVec<[String; 8]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliderFormat {
    #[default]
    Plain,
    Currency,
}

/// Slider record as served by the configuration endpoint.
///
/// Every field is optional; resolution into a usable [`SliderConfig`] happens
/// in [`SliderConfig::resolve`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SliderConfigJson {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
    #[serde(default)]
    pub default: Option<f64>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub ticks: Option<Vec<serde_json::Value>>,
}

/// Top-level body of `GET /atera/v1/calc-sliders`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlidersDocument {
    #[serde(default)]
    pub sliders: Vec<serde_json::Value>,
}

impl SlidersDocument {
    /// Decodes the per-slider records, padding absent or unreadable entries
    /// with `None` so exactly [`SLIDER_COUNT`] slots are returned.
    #[must_use]
    pub fn into_records(self) -> [Option<SliderConfigJson>; SLIDER_COUNT] {
        let mut records: [Option<SliderConfigJson>; SLIDER_COUNT] = Default::default();
        for (index, raw) in self.sliders.into_iter().take(SLIDER_COUNT).enumerate() {
            match serde_json::from_value::<SliderConfigJson>(raw) {
                Ok(record) => records[index] = Some(record),
                Err(err) => warn!(index, error = %err, "ignoring unreadable slider record"),
            }
        }
        records
    }
}

/// Fully resolved slider configuration. Always satisfies
/// `min <= default <= max` and `step > 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub format: SliderFormat,
    pub ticks: TickLabels,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: FALLBACK_MIN,
            max: FALLBACK_MAX,
            step: FALLBACK_STEP,
            default: FALLBACK_MIN,
            format: SliderFormat::Plain,
            ticks: TickLabels::new(),
        }
    }
}

impl SliderConfig {
    /// Resolves an endpoint record field by field, substituting fallbacks
    /// for anything missing or out of contract.
    #[must_use]
    pub fn resolve(index: usize, raw: Option<&SliderConfigJson>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };

        let min = finite_or(raw.min, FALLBACK_MIN);
        let max = finite_or(raw.max, FALLBACK_MAX);
        if max < min {
            let err = WidgetError::InvalidSliderConfig {
                index,
                reason: format!("max {max} is below min {min}"),
            };
            warn!(error = %err, "using fallback slider config");
            return Self::default();
        }

        let step = match raw.step.filter(|s| s.is_finite()) {
            Some(step) if step > 0.0 => step,
            Some(step) => {
                warn!(index, step, "non-positive slider step, using 1");
                FALLBACK_STEP
            }
            None => FALLBACK_STEP,
        };

        let format = match raw.format.as_deref() {
            Some("currency") => SliderFormat::Currency,
            _ => SliderFormat::Plain,
        };

        let ticks = raw
            .ticks
            .as_deref()
            .map(|ticks| ticks.iter().map(tick_label).collect())
            .unwrap_or_default();

        let mut config = Self {
            min,
            max,
            step,
            default: min,
            format,
            ticks,
        };
        config.default = config.constrain(finite_or(raw.default, min));
        config
    }

    /// Clamps `value` into `[min, max]` and snaps it onto the `min + k * step`
    /// grid, the way a native range input does.
    #[must_use]
    pub fn constrain(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        if snapped > self.max {
            self.min + ((self.max - self.min) / self.step).floor() * self.step
        } else {
            snapped
        }
    }

    /// Position of `value` along the track in `[0, 1]`.
    #[must_use]
    pub fn fill_fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

fn finite_or(value: Option<f64>, fallback: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(fallback)
}

fn tick_label(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
