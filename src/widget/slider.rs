use std::fmt;

use tracing::trace;

use crate::core::{SliderConfig, SliderFormat, TickLabels, format_currency, format_plain};

pub const FILL_ACTIVE_COLOR: &str = "#D1AD78";
pub const FILL_INACTIVE_COLOR: &str = "#E5E5E5";

/// Emitted on creation and on every user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderChange {
    /// Configured slider index (`0..SLIDER_COUNT`), not the visible position.
    pub slot: usize,
    pub value: f64,
}

pub type SliderChangeFn = Box<dyn FnMut(SliderChange)>;

/// Two-tone track fill derived from the current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderFill {
    pub percent: f64,
    pub active_color: &'static str,
    pub inactive_color: &'static str,
}

impl SliderFill {
    #[must_use]
    pub fn css_gradient(&self) -> String {
        let p = self.percent;
        format!(
            "linear-gradient(to right, {a} 0%, {a} {p}%, {i} {p}%, {i} 100%)",
            a = self.active_color,
            i = self.inactive_color,
        )
    }
}

/// Everything the presentation layer needs to draw one slider.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderView {
    pub slot: usize,
    pub label: String,
    pub value: f64,
    pub value_text: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub fill: SliderFill,
    pub ticks: TickLabels,
}

/// A labeled range input bound to one [`SliderConfig`].
pub struct SliderControl {
    slot: usize,
    label: String,
    config: SliderConfig,
    value: f64,
    on_change: SliderChangeFn,
}

impl fmt::Debug for SliderControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SliderControl")
            .field("slot", &self.slot)
            .field("label", &self.label)
            .field("config", &self.config)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl SliderControl {
    /// Builds the control at its configured default and notifies `on_change`
    /// once so downstream state is seeded.
    pub fn create(
        slot: usize,
        label: impl Into<String>,
        config: SliderConfig,
        on_change: SliderChangeFn,
    ) -> Self {
        let value = config.default;
        let mut control = Self {
            slot,
            label: label.into(),
            config,
            value,
            on_change,
        };
        control.notify();
        control
    }

    /// Applies a user interaction. Returns the constrained value.
    pub fn input(&mut self, value: f64) -> f64 {
        self.value = self.config.constrain(value);
        trace!(slot = self.slot, value = self.value, "slider input");
        self.notify();
        self.value
    }

    /// Sets the value without notifying; used for external reconciliation.
    pub fn set_value(&mut self, value: f64) {
        self.value = self.config.constrain(value);
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` when the label actually changed.
    pub fn set_label(&mut self, label: &str) -> bool {
        if self.label == label {
            return false;
        }
        label.clone_into(&mut self.label);
        true
    }

    #[must_use]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    #[must_use]
    pub fn display_text(&self) -> String {
        match self.config.format {
            SliderFormat::Currency => format_currency(self.value),
            SliderFormat::Plain => format_plain(self.value),
        }
    }

    #[must_use]
    pub fn fill(&self) -> SliderFill {
        SliderFill {
            percent: self.config.fill_fraction(self.value) * 100.0,
            active_color: FILL_ACTIVE_COLOR,
            inactive_color: FILL_INACTIVE_COLOR,
        }
    }

    #[must_use]
    pub fn view(&self) -> SliderView {
        SliderView {
            slot: self.slot,
            label: self.label.clone(),
            value: self.value,
            value_text: self.display_text(),
            min: self.config.min,
            max: self.config.max,
            step: self.config.step,
            fill: self.fill(),
            ticks: self.config.ticks.clone(),
        }
    }

    fn notify(&mut self) {
        (self.on_change)(SliderChange {
            slot: self.slot,
            value: self.value,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::SliderConfigJson;

    fn recording() -> (Rc<RefCell<Vec<SliderChange>>>, SliderChangeFn) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, Box::new(move |change| sink.borrow_mut().push(change)))
    }

    #[test]
    fn creation_seeds_once_then_each_input_notifies() {
        let (log, on_change) = recording();
        let mut slider = SliderControl::create(1, "Endpoints", SliderConfig::default(), on_change);
        assert_eq!(log.borrow().len(), 1);

        slider.input(42.0);
        slider.set_value(10.0);
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(log.borrow()[1], SliderChange { slot: 1, value: 42.0 });
        assert_eq!(slider.value(), 10.0);
    }

    #[test]
    fn currency_format_and_fill_follow_value() {
        let raw = SliderConfigJson {
            min: Some(0.0),
            max: Some(20.0),
            default: Some(5.0),
            format: Some("currency".to_owned()),
            ..SliderConfigJson::default()
        };
        let (_, on_change) = recording();
        let mut slider =
            SliderControl::create(2, "Price", SliderConfig::resolve(2, Some(&raw)), on_change);
        assert_eq!(slider.display_text(), "$5");
        assert_eq!(slider.fill().percent, 25.0);

        slider.input(1_000.0);
        assert_eq!(slider.value(), 20.0);
        assert_eq!(slider.fill().percent, 100.0);
        assert!(slider.fill().css_gradient().contains("#D1AD78 100%"));
    }

    #[test]
    fn set_label_reports_changes_only() {
        let (_, on_change) = recording();
        let mut slider = SliderControl::create(0, "A", SliderConfig::default(), on_change);
        assert!(!slider.set_label("A"));
        assert!(slider.set_label("B"));
        assert_eq!(slider.label(), "B");
    }
}
