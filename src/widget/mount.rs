use std::collections::HashMap;

use crate::error::{WidgetError, WidgetResult};

use super::attributes::{EMAIL_FIELD_DESKTOP_BREAKPOINT_PX, PanelTitleStyle, parse_display_attributes};
use super::headline::Headline;
use super::lead_capture::CallToAction;
use super::slider::SliderView;

/// Text regions of the widget written from display attributes or results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextSlot {
    Subtitle,
    PanelTitle,
    SaveLabel,
    SaveValue,
    SaveSub,
    EmailPlaceholder,
    ThankYou,
    CtaNote,
    CostsTitle,
    CostsAteraName,
    CostsAteraValue,
    CostsProviderName,
    CostsProviderValue,
    Footnote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailFieldVisibility {
    pub desktop: bool,
    pub mobile: bool,
}

impl Default for EmailFieldVisibility {
    fn default() -> Self {
        Self {
            desktop: true,
            mobile: true,
        }
    }
}

impl EmailFieldVisibility {
    #[must_use]
    pub fn visible_at(self, viewport_width_px: u32) -> bool {
        if viewport_width_px >= EMAIL_FIELD_DESKTOP_BREAKPOINT_PX {
            self.desktop
        } else {
            self.mobile
        }
    }
}

/// The region a widget renders into, implemented by the host's presentation
/// layer.
///
/// Writes are fire-and-forget; a surface that is no longer attached to a page
/// should ignore them rather than fail.
pub trait MountSurface {
    /// Serialized display attributes, if the host supplied any.
    fn attributes_blob(&self) -> Option<String>;
    fn email_field_visibility(&self) -> EmailFieldVisibility;
    fn email_value(&self) -> String;

    /// `None` hides the slot.
    fn write_text(&mut self, slot: TextSlot, text: Option<&str>);
    fn write_headline(&mut self, headline: &Headline);
    fn write_panel_title_style(&mut self, style: &PanelTitleStyle);

    fn slider_count(&self) -> usize;
    fn clear_sliders(&mut self);
    fn append_slider(&mut self, view: &SliderView) -> WidgetResult<()>;
    /// Redraws the slider at visible `position` (label, value text, fill).
    fn update_slider(&mut self, position: usize, view: &SliderView) -> WidgetResult<()>;

    fn write_call_to_action(&mut self, call_to_action: &CallToAction);
    fn set_lead_capture_visibility(&mut self, email_input: bool, thank_you: bool);
    fn focus_email(&mut self);
}

/// Headless surface that records every write.
///
/// Used by tests and by hosts that render from a snapshot of the widget.
#[derive(Debug, Clone)]
pub struct MemoryMount {
    attributes_blob: Option<String>,
    email_visibility: EmailFieldVisibility,
    email_value: String,
    texts: HashMap<TextSlot, Option<String>>,
    headline: Option<Headline>,
    panel_title_style: Option<PanelTitleStyle>,
    sliders: Vec<SliderView>,
    call_to_action: Option<CallToAction>,
    call_to_action_replacements: usize,
    email_input_visible: bool,
    thank_you_visible: bool,
    email_focus_count: usize,
    slider_clear_count: usize,
    slider_writes_fail: bool,
}

impl Default for MemoryMount {
    fn default() -> Self {
        Self::new(None)
    }
}

impl MemoryMount {
    /// Creates a mount the way the page renderer does: the email flags are
    /// derived from the attribute blob.
    #[must_use]
    pub fn new(attributes_blob: Option<&str>) -> Self {
        let mut mount = Self {
            attributes_blob: None,
            email_visibility: EmailFieldVisibility::default(),
            email_value: String::new(),
            texts: HashMap::new(),
            headline: None,
            panel_title_style: None,
            sliders: Vec::new(),
            call_to_action: None,
            call_to_action_replacements: 0,
            email_input_visible: true,
            thank_you_visible: false,
            email_focus_count: 0,
            slider_clear_count: 0,
            slider_writes_fail: false,
        };
        mount.set_attributes_blob(attributes_blob);
        mount
    }

    /// Replaces the attribute blob, as the editor does after each edit.
    pub fn set_attributes_blob(&mut self, blob: Option<&str>) {
        let attributes = parse_display_attributes(blob);
        self.email_visibility = EmailFieldVisibility {
            desktop: attributes.show_email_field_desktop != Some(false),
            mobile: attributes.show_email_field_mobile != Some(false),
        };
        self.attributes_blob = blob.map(str::to_owned);
    }

    /// Simulates the user typing into the email field.
    pub fn type_email(&mut self, value: &str) {
        value.clone_into(&mut self.email_value);
    }

    /// Makes every subsequent slider write fail.
    pub fn fail_slider_writes(&mut self, fail: bool) {
        self.slider_writes_fail = fail;
    }

    /// Text of a slot; `None` when unwritten or hidden.
    #[must_use]
    pub fn text(&self, slot: TextSlot) -> Option<&str> {
        self.texts.get(&slot).and_then(|text| text.as_deref())
    }

    #[must_use]
    pub fn is_hidden(&self, slot: TextSlot) -> bool {
        matches!(self.texts.get(&slot), Some(None))
    }

    #[must_use]
    pub fn headline(&self) -> Option<&Headline> {
        self.headline.as_ref()
    }

    #[must_use]
    pub fn panel_title_style(&self) -> Option<&PanelTitleStyle> {
        self.panel_title_style.as_ref()
    }

    #[must_use]
    pub fn sliders(&self) -> &[SliderView] {
        &self.sliders
    }

    #[must_use]
    pub fn call_to_action(&self) -> Option<&CallToAction> {
        self.call_to_action.as_ref()
    }

    /// How many times the call-to-action element was swapped between
    /// link and button.
    #[must_use]
    pub fn call_to_action_replacements(&self) -> usize {
        self.call_to_action_replacements
    }

    #[must_use]
    pub fn email_input_visible(&self) -> bool {
        self.email_input_visible
    }

    #[must_use]
    pub fn thank_you_visible(&self) -> bool {
        self.thank_you_visible
    }

    #[must_use]
    pub fn email_focus_count(&self) -> usize {
        self.email_focus_count
    }

    #[must_use]
    pub fn slider_clear_count(&self) -> usize {
        self.slider_clear_count
    }

    fn check_slider_writes(&self) -> WidgetResult<()> {
        if self.slider_writes_fail {
            return Err(WidgetError::Surface("slider container rejected write".to_owned()));
        }
        Ok(())
    }
}

impl MountSurface for MemoryMount {
    fn attributes_blob(&self) -> Option<String> {
        self.attributes_blob.clone()
    }

    fn email_field_visibility(&self) -> EmailFieldVisibility {
        self.email_visibility
    }

    fn email_value(&self) -> String {
        self.email_value.clone()
    }

    fn write_text(&mut self, slot: TextSlot, text: Option<&str>) {
        self.texts.insert(slot, text.map(str::to_owned));
    }

    fn write_headline(&mut self, headline: &Headline) {
        self.headline = Some(headline.clone());
    }

    fn write_panel_title_style(&mut self, style: &PanelTitleStyle) {
        self.panel_title_style = Some(style.clone());
    }

    fn slider_count(&self) -> usize {
        self.sliders.len()
    }

    fn clear_sliders(&mut self) {
        self.sliders.clear();
        self.slider_clear_count += 1;
    }

    fn append_slider(&mut self, view: &SliderView) -> WidgetResult<()> {
        self.check_slider_writes()?;
        self.sliders.push(view.clone());
        Ok(())
    }

    fn update_slider(&mut self, position: usize, view: &SliderView) -> WidgetResult<()> {
        self.check_slider_writes()?;
        let slot = self.sliders.get_mut(position).ok_or_else(|| {
            WidgetError::Surface(format!("no slider at position {position}"))
        })?;
        *slot = view.clone();
        Ok(())
    }

    fn write_call_to_action(&mut self, call_to_action: &CallToAction) {
        if let Some(current) = &self.call_to_action {
            if current.is_navigation() != call_to_action.is_navigation() {
                self.call_to_action_replacements += 1;
            }
        }
        self.call_to_action = Some(call_to_action.clone());
    }

    fn set_lead_capture_visibility(&mut self, email_input: bool, thank_you: bool) {
        self.email_input_visible = email_input;
        self.thank_you_visible = thank_you;
    }

    fn focus_email(&mut self) {
        self.email_focus_count += 1;
    }
}
