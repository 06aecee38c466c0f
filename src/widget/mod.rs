mod attributes;
mod controller;
mod enhancement;
mod headline;
mod lead_capture;
mod mount;
mod slider;
mod widget_config;

pub use attributes::{
    DEFAULT_COSTS_ATERA_NAME, DEFAULT_COSTS_PROVIDER_NAME, DEFAULT_COSTS_TITLE, DEFAULT_CTA_NOTE,
    DEFAULT_CTA_TEXT, DEFAULT_EMAIL_PLACEHOLDER, DEFAULT_PANEL_TITLE, DEFAULT_PANEL_TITLE_COLOR,
    DEFAULT_PANEL_TITLE_FONT_SIZE_PX, DEFAULT_RESULT_TITLE, DEFAULT_SAVE_SUB,
    DEFAULT_SLIDER_LABELS, DEFAULT_THANK_YOU, DEFAULT_TITLE, DisplayAttributes,
    EMAIL_FIELD_DESKTOP_BREAKPOINT_PX, PanelTitleStyle, parse_display_attributes,
};
pub use controller::{EnhanceOutcome, MountId, WidgetController};
pub use enhancement::{EnhancementGuard, EnhancementState};
pub use headline::{BRAND_WORD, Headline};
pub use lead_capture::{
    CallToAction, ClickNavigation, ClickOutcome, LeadCaptureController, LeadCaptureState,
    is_valid_email,
};
pub use mount::{EmailFieldVisibility, MemoryMount, MountSurface, TextSlot};
pub use slider::{
    FILL_ACTIVE_COLOR, FILL_INACTIVE_COLOR, SliderChange, SliderChangeFn, SliderControl,
    SliderFill, SliderView,
};
pub use widget_config::{WidgetConfig, WidgetMode};
