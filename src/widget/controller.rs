use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use futures::future::join_all;
use indexmap::IndexMap;
use tracing::{debug, error, trace};

use crate::config::{HttpConfigLoader, SliderConfigSource};
use crate::core::{CalculationResult, SLIDER_COUNT, SliderConfig, compute, format_currency};
use crate::error::{WidgetError, WidgetResult};

use super::attributes::{
    DEFAULT_EMAIL_PLACEHOLDER, DEFAULT_THANK_YOU, DisplayAttributes, parse_display_attributes,
};
use super::enhancement::EnhancementState;
use super::headline::Headline;
use super::lead_capture::{
    CallToAction, ClickNavigation, ClickOutcome, LeadCaptureController, LeadCaptureState,
};
use super::mount::{MountSurface, TextSlot};
use super::slider::{SliderChange, SliderControl};
use super::widget_config::{WidgetConfig, WidgetMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MountId(u64);

impl MountId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mount#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhanceOutcome {
    Completed { rebuilt: bool },
    /// Another pass for the same mount is in flight; the request was dropped.
    SkippedInFlight,
    /// The mount already shows exactly these attributes.
    SkippedUnchanged,
    /// The mount was removed while the configuration was being fetched.
    Detached,
    UnknownMount,
    /// The pass hit a surface error; the mount stays available for later passes.
    Failed,
}

struct MountEntry<S> {
    surface: S,
    state: Rc<EnhancementState>,
    sliders: Vec<SliderControl>,
    lead: Option<LeadCaptureController>,
    changes: Rc<RefCell<Vec<SliderChange>>>,
    /// Latest notified value per configured slot.
    values: [f64; SLIDER_COUNT],
    result: Option<CalculationResult>,
}

impl<S> MountEntry<S> {
    fn new(surface: S) -> Self {
        Self {
            surface,
            state: Rc::new(EnhancementState::default()),
            sliders: Vec::new(),
            lead: None,
            changes: Rc::new(RefCell::new(Vec::new())),
            values: [0.0; SLIDER_COUNT],
            result: None,
        }
    }
}

/// Orchestrates enhancement passes for any number of independent mounts.
///
/// All state is single-threaded; the only suspension point of a pass is the
/// configuration fetch.
pub struct WidgetController<L, S> {
    loader: L,
    mode: WidgetMode,
    mounts: RefCell<IndexMap<MountId, MountEntry<S>>>,
    next_id: Cell<u64>,
}

impl<S: MountSurface> WidgetController<HttpConfigLoader, S> {
    #[must_use]
    pub fn from_config(config: WidgetConfig) -> Self {
        Self::new(HttpConfigLoader::new(config.loader), config.mode)
    }
}

impl<L: SliderConfigSource, S: MountSurface> WidgetController<L, S> {
    #[must_use]
    pub fn new(loader: L, mode: WidgetMode) -> Self {
        Self {
            loader,
            mode,
            mounts: RefCell::new(IndexMap::new()),
            next_id: Cell::new(1),
        }
    }

    #[must_use]
    pub fn mode(&self) -> WidgetMode {
        self.mode
    }

    #[must_use]
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Registers a surface. Nothing is rendered until a pass runs.
    pub fn mount(&self, surface: S) -> MountId {
        let id = MountId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.mounts.borrow_mut().insert(id, MountEntry::new(surface));
        debug!(mount = %id, "registered mount");
        id
    }

    /// Removes a mount. A pass still waiting on its fetch ends as `Detached`.
    pub fn unmount(&self, id: MountId) -> Option<S> {
        let entry = self.mounts.borrow_mut().shift_remove(&id)?;
        debug!(mount = %id, "removed mount");
        Some(entry.surface)
    }

    #[must_use]
    pub fn mount_ids(&self) -> Vec<MountId> {
        self.mounts.borrow().keys().copied().collect()
    }

    /// Page-load trigger: enhances every mount in `Display` mode and does
    /// nothing in `Authoring` mode.
    pub async fn init(&self) -> Vec<(MountId, EnhanceOutcome)> {
        if self.mode == WidgetMode::Authoring {
            debug!("authoring mode, skipping automatic enhancement");
            return Vec::new();
        }
        let ids = self.mount_ids();
        let outcomes = join_all(ids.iter().map(|id| self.enhance(*id))).await;
        ids.into_iter().zip(outcomes).collect()
    }

    /// Runs a pass unless one is in flight or the attributes are unchanged.
    pub async fn enhance(&self, id: MountId) -> EnhanceOutcome {
        self.run_pass(id, false).await
    }

    /// Editor hook: forces a fresh pass after attribute edits.
    ///
    /// Still dropped while another pass for the same mount is in flight.
    pub async fn rerender(&self, id: MountId) -> EnhanceOutcome {
        self.run_pass(id, true).await
    }

    async fn run_pass(&self, id: MountId, force: bool) -> EnhanceOutcome {
        let Some(state) = self.mounts.borrow().get(&id).map(|e| Rc::clone(&e.state)) else {
            return EnhanceOutcome::UnknownMount;
        };
        let Some(_guard) = state.try_acquire() else {
            debug!(mount = %id, "enhancement already in flight, dropping request");
            return EnhanceOutcome::SkippedInFlight;
        };

        let (blob, attributes) = {
            let mut mounts = self.mounts.borrow_mut();
            let Some(entry) = mounts.get_mut(&id) else {
                return EnhanceOutcome::Detached;
            };
            let blob = entry.surface.attributes_blob();
            if !force && state.is_unchanged(blob.as_deref()) {
                trace!(mount = %id, "attributes unchanged, skipping pass");
                return EnhanceOutcome::SkippedUnchanged;
            }
            let attributes = parse_display_attributes(blob.as_deref());
            write_static_content(&mut entry.surface, &attributes);
            (blob, attributes)
        };

        let configs = self.loader.load().await;

        let mut mounts = self.mounts.borrow_mut();
        let Some(entry) = mounts.get_mut(&id) else {
            debug!(mount = %id, "mount detached during fetch, discarding config");
            return EnhanceOutcome::Detached;
        };

        let rebuilt = match reconcile_sliders(entry, &attributes, configs) {
            Ok(rebuilt) => rebuilt,
            Err(err) => {
                error!(mount = %id, error = %err, "enhancement pass failed");
                return EnhanceOutcome::Failed;
            }
        };
        refresh_outputs(entry);
        wire_call_to_action(entry, &attributes);

        state.complete(blob.as_deref());
        debug!(mount = %id, rebuilt, sliders = entry.sliders.len(), "enhancement pass complete");
        EnhanceOutcome::Completed { rebuilt }
    }

    /// Applies a user slider interaction at visible `position` and returns
    /// the recomputed result.
    pub fn input(
        &self,
        id: MountId,
        position: usize,
        value: f64,
    ) -> WidgetResult<CalculationResult> {
        let mut mounts = self.mounts.borrow_mut();
        let entry = mounts
            .get_mut(&id)
            .ok_or(WidgetError::UnknownMount(id.get()))?;
        let slider = entry
            .sliders
            .get_mut(position)
            .ok_or(WidgetError::UnknownSlider { position })?;
        slider.input(value);
        let view = slider.view();
        let redraw = entry.surface.update_slider(position, &view);
        let result = refresh_outputs(entry);
        redraw?;
        Ok(result)
    }

    /// Handles a click on the call-to-action using the surface's current
    /// email text. Before the first pass the click is not intercepted.
    pub fn click_call_to_action(&self, id: MountId) -> WidgetResult<ClickOutcome> {
        let mut mounts = self.mounts.borrow_mut();
        let entry = mounts
            .get_mut(&id)
            .ok_or(WidgetError::UnknownMount(id.get()))?;
        let Some(lead) = entry.lead.as_mut() else {
            return Ok(ClickOutcome {
                navigation: ClickNavigation::Proceed,
                focus_email: false,
                submitted: false,
            });
        };

        let email = entry.surface.email_value();
        let outcome = lead.click(&email);
        entry
            .surface
            .set_lead_capture_visibility(lead.email_input_visible(), lead.thank_you_visible());
        if outcome.focus_email {
            entry.surface.focus_email();
        }
        Ok(outcome)
    }

    #[must_use]
    pub fn result(&self, id: MountId) -> Option<CalculationResult> {
        self.mounts.borrow().get(&id).and_then(|e| e.result)
    }

    /// Current values of the visible sliders, in display order.
    #[must_use]
    pub fn slider_values(&self, id: MountId) -> Option<Vec<f64>> {
        self.mounts
            .borrow()
            .get(&id)
            .map(|e| e.sliders.iter().map(SliderControl::value).collect())
    }

    #[must_use]
    pub fn slider_labels(&self, id: MountId) -> Option<Vec<String>> {
        self.mounts
            .borrow()
            .get(&id)
            .map(|e| e.sliders.iter().map(|s| s.label().to_owned()).collect())
    }

    #[must_use]
    pub fn lead_state(&self, id: MountId) -> Option<LeadCaptureState> {
        self.mounts
            .borrow()
            .get(&id)
            .and_then(|e| e.lead.as_ref().map(LeadCaptureController::state))
    }

    #[must_use]
    pub fn is_enhanced(&self, id: MountId) -> bool {
        self.mounts
            .borrow()
            .get(&id)
            .is_some_and(|e| e.state.is_enhanced())
    }

    #[must_use]
    pub fn is_enhancing(&self, id: MountId) -> bool {
        self.mounts
            .borrow()
            .get(&id)
            .is_some_and(|e| e.state.is_enhancing())
    }

    #[must_use]
    pub fn with_surface<R>(&self, id: MountId, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.mounts.borrow().get(&id).map(|e| f(&e.surface))
    }

    /// Mutable access for the host, e.g. to replace the attribute blob.
    pub fn with_surface_mut<R>(&self, id: MountId, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        self.mounts
            .borrow_mut()
            .get_mut(&id)
            .map(|e| f(&mut e.surface))
    }
}

fn write_static_content<S: MountSurface>(surface: &mut S, attributes: &DisplayAttributes) {
    surface.write_headline(&Headline::from_title(attributes.title()));
    surface.write_text(TextSlot::Subtitle, attributes.subtitle());
    surface.write_text(TextSlot::PanelTitle, Some(attributes.panel_title()));
    surface.write_panel_title_style(&attributes.panel_title_style());
    surface.write_text(TextSlot::SaveLabel, Some(attributes.result_title()));
    surface.write_text(TextSlot::SaveSub, Some(attributes.save_sub()));
    surface.write_text(TextSlot::EmailPlaceholder, Some(DEFAULT_EMAIL_PLACEHOLDER));
    surface.write_text(TextSlot::ThankYou, Some(DEFAULT_THANK_YOU));
    surface.write_text(TextSlot::CtaNote, Some(attributes.cta_note()));
    surface.write_text(TextSlot::CostsTitle, Some(attributes.costs_title()));
    surface.write_text(TextSlot::CostsAteraName, Some(attributes.costs_atera_name()));
    surface.write_text(TextSlot::CostsProviderName, Some(attributes.costs_provider_name()));
    surface.write_text(TextSlot::Footnote, attributes.result_description());
}

/// Rebuilds the slider set when the visible membership changed, otherwise
/// relabels in place. Returns whether a rebuild happened.
fn reconcile_sliders<S: MountSurface>(
    entry: &mut MountEntry<S>,
    attributes: &DisplayAttributes,
    configs: [SliderConfig; SLIDER_COUNT],
) -> WidgetResult<bool> {
    let labels = attributes.slider_labels();
    let visibility = attributes.slider_visibility();
    let visible: Vec<usize> = (0..SLIDER_COUNT).filter(|slot| visibility[*slot]).collect();

    let existing: Vec<usize> = entry.sliders.iter().map(SliderControl::slot).collect();
    let rebuild = existing != visible || entry.surface.slider_count() != visible.len();

    if rebuild {
        entry.surface.clear_sliders();
        entry.sliders.clear();
        entry.changes.borrow_mut().clear();
        entry.values = [0.0; SLIDER_COUNT];
        entry.result = None;
        for (slot, config) in configs.into_iter().enumerate() {
            if !visibility[slot] {
                continue;
            }
            let sink = Rc::clone(&entry.changes);
            let control = SliderControl::create(
                slot,
                labels[slot],
                config,
                Box::new(move |change| sink.borrow_mut().push(change)),
            );
            entry.surface.append_slider(&control.view())?;
            entry.sliders.push(control);
        }
        return Ok(true);
    }

    for (position, control) in entry.sliders.iter_mut().enumerate() {
        if control.set_label(labels[control.slot()]) {
            entry.surface.update_slider(position, &control.view())?;
        }
    }
    Ok(false)
}

/// Applies pending slider notifications and writes the recomputed outputs.
///
/// The formula reads the visible sliders in display order, so hiding a
/// slider shifts the later values into its place.
fn refresh_outputs<S: MountSurface>(entry: &mut MountEntry<S>) -> CalculationResult {
    let pending: Vec<SliderChange> = entry.changes.borrow_mut().drain(..).collect();
    if pending.is_empty() {
        if let Some(result) = entry.result {
            return result;
        }
    }
    trace!(pending = pending.len(), "recomputing savings");
    for change in pending {
        if let Some(value) = entry.values.get_mut(change.slot) {
            *value = change.value;
        }
    }

    let values: Vec<f64> = entry
        .sliders
        .iter()
        .map(|slider| entry.values[slider.slot()])
        .collect();
    let result = compute(&values);
    let outputs = [
        (TextSlot::SaveValue, result.savings),
        (TextSlot::CostsAteraValue, result.atera_cost),
        (TextSlot::CostsProviderValue, result.provider_cost),
    ];
    for (slot, amount) in outputs {
        entry
            .surface
            .write_text(slot, Some(format_currency(amount).as_str()));
    }
    entry.result = Some(result);
    result
}

fn wire_call_to_action<S: MountSurface>(entry: &mut MountEntry<S>, attributes: &DisplayAttributes) {
    let call_to_action = CallToAction::new(attributes.cta_text(), attributes.cta_url());
    match &mut entry.lead {
        Some(lead) => {
            lead.rebind(call_to_action);
        }
        slot @ None => *slot = Some(LeadCaptureController::new(call_to_action)),
    }
    if let Some(lead) = &entry.lead {
        entry.surface.write_call_to_action(lead.call_to_action());
        entry
            .surface
            .set_lead_capture_visibility(lead.email_input_visible(), lead.thank_you_visible());
    }
}
