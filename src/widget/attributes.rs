use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::SLIDER_COUNT;
use crate::error::WidgetError;

pub const DEFAULT_TITLE: &str = "Calculate how much you save with Atera";
pub const DEFAULT_PANEL_TITLE: &str = "Adjust the scales below to see your savings:";
pub const DEFAULT_PANEL_TITLE_FONT_SIZE_PX: f64 = 12.0;
pub const DEFAULT_PANEL_TITLE_COLOR: &str = "#475569";
pub const DEFAULT_RESULT_TITLE: &str = "You save";
pub const DEFAULT_SAVE_SUB: &str = "annually — estimated based on Atera's Pro Plan";
pub const DEFAULT_CTA_TEXT: &str = "Start free trial";
pub const DEFAULT_CTA_NOTE: &str = "No credit card required";
pub const DEFAULT_COSTS_TITLE: &str = "Average annual cost";
pub const DEFAULT_COSTS_ATERA_NAME: &str = "Atera";
pub const DEFAULT_COSTS_PROVIDER_NAME: &str = "Current provider";
pub const DEFAULT_EMAIL_PLACEHOLDER: &str = "Enter your work email";
pub const DEFAULT_THANK_YOU: &str = "Thank you";
pub const DEFAULT_SLIDER_LABELS: [&str; SLIDER_COUNT] = [
    "How many technicians are in your company?",
    "How many endpoints do you manage?",
    "How much are you charged per endpoint per month?",
];

/// Viewport width at which the desktop email-field flag takes over from the
/// mobile one. Enforced by the presentation layer.
pub const EMAIL_FIELD_DESKTOP_BREAKPOINT_PX: u32 = 1024;

/// Display attributes supplied by the page renderer or the editor.
///
/// Every field is optional. Empty strings behave like absent keys.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DisplayAttributes {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub slider1_label: Option<String>,
    pub slider2_label: Option<String>,
    pub slider3_label: Option<String>,
    pub show_slider1: Option<bool>,
    pub show_slider2: Option<bool>,
    pub show_slider3: Option<bool>,
    pub cta_text: Option<String>,
    pub cta_url: Option<String>,
    pub cta_note: Option<String>,
    pub result_title: Option<String>,
    pub save_label: Option<String>,
    pub save_sub: Option<String>,
    pub result_description: Option<String>,
    pub footnote: Option<String>,
    pub costs_title: Option<String>,
    pub costs_atera_name: Option<String>,
    pub costs_provider_name: Option<String>,
    pub panel_title: Option<String>,
    pub panel_title_font_size: Option<f64>,
    pub panel_title_color: Option<String>,
    pub panel_title_bold: Option<bool>,
    pub show_email_field_desktop: Option<bool>,
    pub show_email_field_mobile: Option<bool>,
}

/// Parses the serialized attribute blob. Malformed input yields an empty set.
#[must_use]
pub fn parse_display_attributes(blob: Option<&str>) -> DisplayAttributes {
    let Some(blob) = blob.filter(|b| !b.trim().is_empty()) else {
        return DisplayAttributes::default();
    };
    match serde_json::from_str::<DisplayAttributes>(blob) {
        Ok(attributes) => attributes,
        Err(err) => {
            let err = WidgetError::AttributeParse(err.to_string());
            warn!(error = %err, "treating display attributes as empty");
            DisplayAttributes::default()
        }
    }
}

fn text_or<'a>(value: Option<&'a String>, fallback: &'a str) -> &'a str {
    non_empty(value).unwrap_or(fallback)
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelTitleStyle {
    pub font_size_px: f64,
    pub color: String,
    pub bold: bool,
}

impl DisplayAttributes {
    #[must_use]
    pub fn title(&self) -> &str {
        text_or(self.title.as_ref(), DEFAULT_TITLE)
    }

    /// `None` hides the subtitle slot.
    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        non_empty(self.subtitle.as_ref())
    }

    #[must_use]
    pub fn slider_labels(&self) -> [&str; SLIDER_COUNT] {
        [
            text_or(self.slider1_label.as_ref(), DEFAULT_SLIDER_LABELS[0]),
            text_or(self.slider2_label.as_ref(), DEFAULT_SLIDER_LABELS[1]),
            text_or(self.slider3_label.as_ref(), DEFAULT_SLIDER_LABELS[2]),
        ]
    }

    /// Sliders are visible unless explicitly switched off.
    #[must_use]
    pub fn slider_visibility(&self) -> [bool; SLIDER_COUNT] {
        [
            self.show_slider1 != Some(false),
            self.show_slider2 != Some(false),
            self.show_slider3 != Some(false),
        ]
    }

    #[must_use]
    pub fn cta_text(&self) -> &str {
        text_or(self.cta_text.as_ref(), DEFAULT_CTA_TEXT)
    }

    /// Trimmed call-to-action URL, if one is configured.
    #[must_use]
    pub fn cta_url(&self) -> Option<&str> {
        self.cta_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    #[must_use]
    pub fn cta_note(&self) -> &str {
        text_or(self.cta_note.as_ref(), DEFAULT_CTA_NOTE)
    }

    #[must_use]
    pub fn result_title(&self) -> &str {
        non_empty(self.result_title.as_ref())
            .or_else(|| non_empty(self.save_label.as_ref()))
            .unwrap_or(DEFAULT_RESULT_TITLE)
    }

    #[must_use]
    pub fn save_sub(&self) -> &str {
        text_or(self.save_sub.as_ref(), DEFAULT_SAVE_SUB)
    }

    /// `None` hides the footnote slot.
    #[must_use]
    pub fn result_description(&self) -> Option<&str> {
        non_empty(self.result_description.as_ref()).or_else(|| non_empty(self.footnote.as_ref()))
    }

    #[must_use]
    pub fn costs_title(&self) -> &str {
        text_or(self.costs_title.as_ref(), DEFAULT_COSTS_TITLE)
    }

    #[must_use]
    pub fn costs_atera_name(&self) -> &str {
        text_or(self.costs_atera_name.as_ref(), DEFAULT_COSTS_ATERA_NAME)
    }

    #[must_use]
    pub fn costs_provider_name(&self) -> &str {
        text_or(self.costs_provider_name.as_ref(), DEFAULT_COSTS_PROVIDER_NAME)
    }

    #[must_use]
    pub fn panel_title(&self) -> &str {
        text_or(self.panel_title.as_ref(), DEFAULT_PANEL_TITLE)
    }

    #[must_use]
    pub fn panel_title_style(&self) -> PanelTitleStyle {
        let font_size_px = self
            .panel_title_font_size
            .filter(|size| size.is_finite() && *size > 0.0)
            .unwrap_or(DEFAULT_PANEL_TITLE_FONT_SIZE_PX);
        PanelTitleStyle {
            font_size_px,
            color: text_or(self.panel_title_color.as_ref(), DEFAULT_PANEL_TITLE_COLOR).to_owned(),
            bold: self.panel_title_bold.unwrap_or(false),
        }
    }
}
