use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use resfi::registry::{DUPLICATE_EMAIL_DETAIL, WELCOME_MESSAGE};
use resfi::waitlist::{
    FormState, Goal, Notification, NotificationLevel, Notifier, SubmissionController,
    SubmissionStatus, SubmitError, WaitlistClient, WaitlistPayload, RESET_DELAY,
};
use tokio::sync::Notify;

/// Client double replaying scripted responses and capturing payloads.
#[derive(Default)]
struct ScriptedClient {
    replies: Mutex<VecDeque<Result<String, SubmitError>>>,
    captured: Mutex<Vec<WaitlistPayload>>,
}

impl ScriptedClient {
    fn with_replies(replies: impl IntoIterator<Item = Result<String, SubmitError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            captured: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.captured.lock().expect("capture mutex poisoned").len()
    }

    fn captured(&self) -> Vec<WaitlistPayload> {
        self.captured
            .lock()
            .expect("capture mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl WaitlistClient for ScriptedClient {
    async fn submit(&self, payload: WaitlistPayload) -> Result<String, SubmitError> {
        self.captured
            .lock()
            .expect("capture mutex poisoned")
            .push(payload);
        self.replies
            .lock()
            .expect("reply mutex poisoned")
            .pop_front()
            .expect("scripted client called more times than scripted")
    }
}

/// Client double that parks every call until released, so tests can observe
/// the `Submitting` window.
#[derive(Default)]
struct GatedClient {
    release: Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl WaitlistClient for GatedClient {
    async fn submit(&self, _payload: WaitlistPayload) -> Result<String, SubmitError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(WELCOME_MESSAGE.to_string())
    }
}

#[derive(Default)]
struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().expect("notifier mutex poisoned").clone()
    }

    fn last(&self) -> Option<Notification> {
        self.notifications().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
    }
}

fn controller_with(
    client: Arc<ScriptedClient>,
) -> (
    SubmissionController<ScriptedClient, RecordingNotifier>,
    Arc<RecordingNotifier>,
) {
    let notifier = Arc::new(RecordingNotifier::default());
    (
        SubmissionController::new(client, notifier.clone()),
        notifier,
    )
}

fn fill_valid_form<C, N>(controller: &SubmissionController<C, N>)
where
    C: WaitlistClient + 'static,
    N: Notifier + 'static,
{
    controller.set_email("A@X.com");
    controller.set_first_name("Jo");
    controller.set_last_name("Do");
    controller.toggle_goal(Goal::Automate);
}

#[tokio::test]
async fn successful_submission_normalizes_email_and_surfaces_message() {
    let client = Arc::new(ScriptedClient::with_replies([Ok(
        WELCOME_MESSAGE.to_string()
    )]));
    let (controller, notifier) = controller_with(client.clone());

    fill_valid_form(&controller);
    let status = controller.submit().await;

    assert_eq!(status, SubmissionStatus::Submitted);
    let sent = client.captured();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].email, "a@x.com");
    assert!(sent[0].automate);
    assert!(!sent[0].debt && !sent[0].loan && !sent[0].savings);

    let toast = notifier.last().expect("success toast recorded");
    assert_eq!(toast.level, NotificationLevel::Success);
    assert_eq!(toast.message, WELCOME_MESSAGE);
}

#[tokio::test]
async fn missing_last_name_blocks_the_network_call() {
    let client = Arc::new(ScriptedClient::default());
    let (controller, notifier) = controller_with(client.clone());

    controller.set_email("a@x.com");
    controller.set_first_name("Jo");
    controller.toggle_goal(Goal::Debt);

    let status = controller.submit().await;

    assert_eq!(status, SubmissionStatus::Idle);
    assert_eq!(client.calls(), 0);
    let toast = notifier.last().expect("validation toast recorded");
    assert_eq!(toast.level, NotificationLevel::Error);
    assert_eq!(toast.message, "Please fill in all required fields");
}

#[tokio::test]
async fn no_goal_selected_blocks_the_network_call() {
    let client = Arc::new(ScriptedClient::default());
    let (controller, notifier) = controller_with(client.clone());

    controller.set_email("a@x.com");
    controller.set_first_name("Jo");
    controller.set_last_name("Do");

    let status = controller.submit().await;

    assert_eq!(status, SubmissionStatus::Idle);
    assert_eq!(client.calls(), 0);
    assert_eq!(
        notifier.last().expect("toast recorded").message,
        "Please select at least one goal"
    );
}

#[tokio::test]
async fn duplicate_rejection_detail_is_surfaced_verbatim() {
    let client = Arc::new(ScriptedClient::with_replies([Err(SubmitError::Rejected(
        DUPLICATE_EMAIL_DETAIL.to_string(),
    ))]));
    let (controller, notifier) = controller_with(client.clone());

    fill_valid_form(&controller);
    let status = controller.submit().await;

    assert_eq!(
        status,
        SubmissionStatus::Failed(DUPLICATE_EMAIL_DETAIL.to_string())
    );
    let toast = notifier.last().expect("error toast recorded");
    assert_eq!(toast.level, NotificationLevel::Error);
    assert_eq!(toast.message, DUPLICATE_EMAIL_DETAIL);
}

#[tokio::test]
async fn failed_state_accepts_a_fresh_submission() {
    let client = Arc::new(ScriptedClient::with_replies([
        Err(SubmitError::Transport("connection refused".to_string())),
        Ok(WELCOME_MESSAGE.to_string()),
    ]));
    let (controller, _notifier) = controller_with(client.clone());

    fill_valid_form(&controller);
    assert!(matches!(
        controller.submit().await,
        SubmissionStatus::Failed(_)
    ));

    // User edits and retries without any explicit dismiss.
    controller.set_email("second@x.com");
    let status = controller.submit().await;

    assert_eq!(status, SubmissionStatus::Submitted);
    assert_eq!(client.calls(), 2);
}

#[tokio::test]
async fn validation_failure_clears_a_stale_failed_state() {
    let client = Arc::new(ScriptedClient::with_replies([Err(SubmitError::Rejected(
        DUPLICATE_EMAIL_DETAIL.to_string(),
    ))]));
    let (controller, _notifier) = controller_with(client.clone());

    fill_valid_form(&controller);
    controller.submit().await;
    assert!(matches!(controller.status(), SubmissionStatus::Failed(_)));

    controller.set_email("");
    let status = controller.submit().await;

    assert_eq!(status, SubmissionStatus::Idle);
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn second_submit_while_in_flight_is_a_no_op() {
    let client = Arc::new(GatedClient::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let controller = SubmissionController::new(client.clone(), notifier);

    fill_valid_form(&controller);

    let in_flight = {
        let controller = controller.clone();
        tokio::spawn(async move { controller.submit().await })
    };
    // Let the spawned attempt reach the suspension point inside the client.
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
    assert_eq!(controller.status(), SubmissionStatus::Submitting);

    let second = controller.submit().await;
    assert_eq!(second, SubmissionStatus::Submitting);
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);

    client.release.notify_one();
    let first = in_flight.await.expect("first attempt completes");
    assert_eq!(first, SubmissionStatus::Submitted);
    assert_eq!(client.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn submitted_state_resets_to_an_empty_idle_form() {
    let client = Arc::new(ScriptedClient::with_replies([Ok(
        WELCOME_MESSAGE.to_string()
    )]));
    let (controller, _notifier) = controller_with(client);

    fill_valid_form(&controller);
    assert_eq!(controller.submit().await, SubmissionStatus::Submitted);

    // Just before the delay elapses nothing moves.
    tokio::time::sleep(RESET_DELAY - Duration::from_millis(100)).await;
    assert_eq!(controller.status(), SubmissionStatus::Submitted);
    assert!(!controller.form().email.is_empty());

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(controller.status(), SubmissionStatus::Idle);
    assert_eq!(controller.form(), FormState::default());
}

#[tokio::test(start_paused = true)]
async fn teardown_invalidates_the_pending_reset() {
    let client = Arc::new(ScriptedClient::with_replies([Ok(
        WELCOME_MESSAGE.to_string()
    )]));
    let (controller, _notifier) = controller_with(client);

    fill_valid_form(&controller);
    controller.submit().await;
    controller.teardown();

    tokio::time::sleep(RESET_DELAY + Duration::from_secs(1)).await;
    assert_eq!(controller.status(), SubmissionStatus::Submitted);
    assert_eq!(controller.form().email, "A@X.com");
}

#[tokio::test]
async fn submitted_state_ignores_further_submits_until_reset() {
    let client = Arc::new(ScriptedClient::with_replies([Ok(
        WELCOME_MESSAGE.to_string()
    )]));
    let (controller, _notifier) = controller_with(client.clone());

    fill_valid_form(&controller);
    assert_eq!(controller.submit().await, SubmissionStatus::Submitted);
    assert_eq!(controller.submit().await, SubmissionStatus::Submitted);
    assert_eq!(client.calls(), 1);
}
