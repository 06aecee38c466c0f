use atera_calc::config::StaticConfigSource;
use atera_calc::widget::{
    CallToAction, ClickNavigation, DEFAULT_CTA_TEXT, EmailFieldVisibility, LeadCaptureState,
    MemoryMount, MountId, MountSurface, WidgetController, WidgetMode,
};

type Controller = WidgetController<StaticConfigSource, MemoryMount>;

fn controller() -> Controller {
    WidgetController::new(StaticConfigSource::unavailable(), WidgetMode::Display)
}

fn type_email(controller: &Controller, id: MountId, email: &str) {
    controller
        .with_surface_mut(id, |mount| mount.type_email(email))
        .expect("mounted");
}

fn lead_flags(controller: &Controller, id: MountId) -> (bool, bool, usize) {
    controller
        .with_surface(id, |mount| {
            (
                mount.email_input_visible(),
                mount.thank_you_visible(),
                mount.email_focus_count(),
            )
        })
        .expect("mounted")
}

#[test]
fn click_before_enhancement_is_not_intercepted() {
    let controller = controller();
    let id = controller.mount(MemoryMount::default());

    let outcome = controller.click_call_to_action(id).expect("click");
    assert_eq!(outcome.navigation, ClickNavigation::Proceed);
    assert!(!outcome.submitted);
    assert_eq!(controller.lead_state(id), None);
}

#[tokio::test]
async fn action_button_requires_a_valid_email() {
    let controller = controller();
    let id = controller.mount(MemoryMount::default());
    controller.enhance(id).await;

    assert_eq!(
        controller.with_surface(id, |m| m.call_to_action().cloned()),
        Some(Some(CallToAction::Action {
            text: DEFAULT_CTA_TEXT.to_owned()
        }))
    );

    let outcome = controller.click_call_to_action(id).expect("click");
    assert_eq!(outcome.navigation, ClickNavigation::Cancelled);
    assert!(outcome.focus_email);
    assert_eq!(controller.lead_state(id), Some(LeadCaptureState::Idle));
    assert_eq!(lead_flags(&controller, id), (true, false, 1));

    type_email(&controller, id, "not-an-email");
    controller.click_call_to_action(id).expect("click");
    assert_eq!(controller.lead_state(id), Some(LeadCaptureState::Idle));
    assert_eq!(lead_flags(&controller, id), (true, false, 2));

    type_email(&controller, id, "  ops@example.com ");
    let outcome = controller.click_call_to_action(id).expect("click");
    assert!(outcome.submitted);
    assert!(!outcome.focus_email);
    assert_eq!(controller.lead_state(id), Some(LeadCaptureState::Submitted));
    assert_eq!(lead_flags(&controller, id), (false, true, 2));

    let again = controller.click_call_to_action(id).expect("click");
    assert_eq!(again.navigation, ClickNavigation::Cancelled);
    assert!(!again.submitted);
    assert_eq!(lead_flags(&controller, id), (false, true, 2));
}

#[tokio::test]
async fn navigation_link_always_proceeds() {
    let controller = controller();
    let id = controller.mount(MemoryMount::new(Some(
        r#"{"ctaText":"Try it","ctaUrl":"https://app.example.com/signup"}"#,
    )));
    controller.enhance(id).await;

    let outcome = controller.click_call_to_action(id).expect("click");
    assert_eq!(outcome.navigation, ClickNavigation::Proceed);
    assert!(!outcome.focus_email);
    assert_eq!(controller.lead_state(id), Some(LeadCaptureState::Idle));

    type_email(&controller, id, "ops@example.com");
    let outcome = controller.click_call_to_action(id).expect("click");
    assert_eq!(outcome.navigation, ClickNavigation::Proceed);
    assert!(outcome.submitted);
    assert_eq!(controller.lead_state(id), Some(LeadCaptureState::Submitted));
    assert_eq!(lead_flags(&controller, id), (false, true, 0));
}

#[tokio::test]
async fn swapping_link_and_button_keeps_submission() {
    let controller = controller();
    let id = controller.mount(MemoryMount::default());
    controller.enhance(id).await;
    type_email(&controller, id, "ops@example.com");
    controller.click_call_to_action(id).expect("click");

    controller
        .with_surface_mut(id, |mount| {
            mount.set_attributes_blob(Some(r#"{"ctaUrl":"https://example.com/trial"}"#));
        })
        .expect("mounted");
    controller.enhance(id).await;

    controller
        .with_surface(id, |mount| {
            let call_to_action = mount.call_to_action().expect("call to action");
            assert_eq!(call_to_action.url(), Some("https://example.com/trial"));
            assert_eq!(call_to_action.text(), DEFAULT_CTA_TEXT);
            assert_eq!(mount.call_to_action_replacements(), 1);
            assert!(mount.thank_you_visible());
            assert!(!mount.email_input_visible());
        })
        .expect("mounted");
    assert_eq!(controller.lead_state(id), Some(LeadCaptureState::Submitted));

    controller
        .with_surface_mut(id, |mount| mount.set_attributes_blob(Some("{}")))
        .expect("mounted");
    controller.enhance(id).await;
    assert_eq!(
        controller.with_surface(id, |m| m.call_to_action_replacements()),
        Some(2)
    );
    assert_eq!(controller.lead_state(id), Some(LeadCaptureState::Submitted));
}

#[tokio::test]
async fn blank_url_keeps_button_form() {
    let controller = controller();
    let id = controller.mount(MemoryMount::new(Some(r#"{"ctaUrl":"   "}"#)));
    controller.enhance(id).await;

    assert_eq!(
        controller.with_surface(id, |m| m.call_to_action().map(CallToAction::is_navigation)),
        Some(Some(false))
    );
}

#[test]
fn email_field_flags_follow_viewport() {
    let mount = MemoryMount::new(Some(r#"{"showEmailFieldDesktop":false}"#));
    let visibility = mount.email_field_visibility();
    assert_eq!(
        visibility,
        EmailFieldVisibility {
            desktop: false,
            mobile: true,
        }
    );
    assert!(!visibility.visible_at(1280));
    assert!(visibility.visible_at(1024 - 1));
}
