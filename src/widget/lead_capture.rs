use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

// Same grammar browsers apply to `<input type="email">`.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email regex")
});

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && EMAIL.is_match(email)
}

/// The primary actionable element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallToAction {
    /// A link: clicking navigates to `url`.
    Navigation { url: String, text: String },
    /// A button: clicking submits the lead form.
    Action { text: String },
}

impl CallToAction {
    #[must_use]
    pub fn new(text: &str, url: Option<&str>) -> Self {
        match url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self::Navigation {
                url: url.to_owned(),
                text: text.to_owned(),
            },
            None => Self::Action {
                text: text.to_owned(),
            },
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Navigation { text, .. } | Self::Action { text } => text,
        }
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Navigation { url, .. } => Some(url),
            Self::Action { .. } => None,
        }
    }

    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(self, Self::Navigation { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadCaptureState {
    #[default]
    Idle,
    Submitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickNavigation {
    /// Let the link's default navigation happen.
    Proceed,
    /// The default action was cancelled.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickOutcome {
    pub navigation: ClickNavigation,
    pub focus_email: bool,
    /// This click moved the controller from `Idle` to `Submitted`.
    pub submitted: bool,
}

/// Email / call-to-action / thank-you interaction for one mount.
///
/// `Submitted` is terminal for the lifetime of the mount.
#[derive(Debug, Clone)]
pub struct LeadCaptureController {
    call_to_action: CallToAction,
    state: LeadCaptureState,
}

impl LeadCaptureController {
    #[must_use]
    pub fn new(call_to_action: CallToAction) -> Self {
        Self {
            call_to_action,
            state: LeadCaptureState::Idle,
        }
    }

    /// Swaps in the call-to-action for a new pass while keeping the
    /// interaction state. Returns `true` when the element kind changed.
    pub fn rebind(&mut self, call_to_action: CallToAction) -> bool {
        let kind_changed = self.call_to_action.is_navigation() != call_to_action.is_navigation();
        if kind_changed {
            debug!(
                navigation = call_to_action.is_navigation(),
                "call-to-action element kind changed"
            );
        }
        self.call_to_action = call_to_action;
        kind_changed
    }

    #[must_use]
    pub fn call_to_action(&self) -> &CallToAction {
        &self.call_to_action
    }

    #[must_use]
    pub fn state(&self) -> LeadCaptureState {
        self.state
    }

    #[must_use]
    pub fn email_input_visible(&self) -> bool {
        self.state == LeadCaptureState::Idle
    }

    #[must_use]
    pub fn thank_you_visible(&self) -> bool {
        self.state == LeadCaptureState::Submitted
    }

    /// Handles a click given the email field's current text.
    pub fn click(&mut self, email: &str) -> ClickOutcome {
        let valid = is_valid_email(email);
        let was_idle = self.state == LeadCaptureState::Idle;

        match self.call_to_action {
            CallToAction::Navigation { .. } => {
                if valid && was_idle {
                    self.state = LeadCaptureState::Submitted;
                }
                ClickOutcome {
                    navigation: ClickNavigation::Proceed,
                    focus_email: false,
                    submitted: valid && was_idle,
                }
            }
            CallToAction::Action { .. } => {
                if !was_idle {
                    return ClickOutcome {
                        navigation: ClickNavigation::Cancelled,
                        focus_email: false,
                        submitted: false,
                    };
                }
                if valid {
                    self.state = LeadCaptureState::Submitted;
                    debug!("lead captured");
                }
                ClickOutcome {
                    navigation: ClickNavigation::Cancelled,
                    focus_email: !valid,
                    submitted: valid,
                }
            }
        }
    }
}
