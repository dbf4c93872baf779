use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;

use super::client::{WaitlistClient, WaitlistPayload};
use super::form::FormState;
use super::goals::Goal;
use super::notify::{Notification, Notifier};
use super::validate::validate;

/// Delay between a successful submission and the automatic form reset.
pub const RESET_DELAY: Duration = Duration::from_millis(3000);

/// Lifecycle of one waitlist submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    Idle,
    Submitting,
    Submitted,
    /// Carries the mapped failure message. Not persisted: the next submit
    /// attempt is accepted exactly as from `Idle`.
    Failed(String),
}

impl SubmissionStatus {
    pub const fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Failed(_) => "failed",
        }
    }

    /// `Submitting` is the only state that disables the submit affordance.
    pub const fn accepts_submit(&self) -> bool {
        matches!(self, SubmissionStatus::Idle | SubmissionStatus::Failed(_))
    }
}

#[derive(Debug)]
struct ControllerState {
    form: FormState,
    status: SubmissionStatus,
    reset: Option<JoinHandle<()>>,
}

impl ControllerState {
    fn new() -> Self {
        Self {
            form: FormState::default(),
            status: SubmissionStatus::Idle,
            reset: None,
        }
    }

    fn cancel_reset(&mut self) {
        if let Some(handle) = self.reset.take() {
            handle.abort();
        }
    }
}

/// Orchestrates the submit lifecycle for a single rendered form:
/// idle → submitting → (submitted | failed), plus the timed reset.
///
/// State lives behind a mutex that is never held across an await; the only
/// suspension point per attempt is the collaborator call itself.
pub struct SubmissionController<C, N> {
    client: Arc<C>,
    notifier: Arc<N>,
    state: Arc<Mutex<ControllerState>>,
    reset_delay: Duration,
}

impl<C, N> Clone for SubmissionController<C, N> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            notifier: self.notifier.clone(),
            state: self.state.clone(),
            reset_delay: self.reset_delay,
        }
    }
}

impl<C, N> SubmissionController<C, N>
where
    C: WaitlistClient + 'static,
    N: Notifier + 'static,
{
    pub fn new(client: Arc<C>, notifier: Arc<N>) -> Self {
        Self::with_reset_delay(client, notifier, RESET_DELAY)
    }

    pub fn with_reset_delay(client: Arc<C>, notifier: Arc<N>, reset_delay: Duration) -> Self {
        Self {
            client,
            notifier,
            state: Arc::new(Mutex::new(ControllerState::new())),
            reset_delay,
        }
    }

    pub fn status(&self) -> SubmissionStatus {
        self.lock().status.clone()
    }

    pub fn form(&self) -> FormState {
        self.lock().form.clone()
    }

    pub fn set_email(&self, value: impl Into<String>) {
        self.lock().form.email = value.into();
    }

    pub fn set_first_name(&self, value: impl Into<String>) {
        self.lock().form.first_name = value.into();
    }

    pub fn set_last_name(&self, value: impl Into<String>) {
        self.lock().form.last_name = value.into();
    }

    pub fn toggle_goal(&self, goal: Goal) {
        self.lock().form.goals.toggle(goal);
    }

    pub fn selected_goals(&self) -> Vec<Goal> {
        self.lock().form.goals.selected_goals()
    }

    /// Run one submission attempt and return the resulting status.
    ///
    /// A call while `Submitting` is a no-op, so a second network call can
    /// never be dispatched for the same in-flight attempt. A call while
    /// `Submitted` is likewise a no-op: the reset timer owns that
    /// transition. No automatic retry ever happens; every retry is a fresh
    /// user-initiated call.
    pub async fn submit(&self) -> SubmissionStatus {
        let payload = {
            let mut state = self.lock();
            if !state.status.accepts_submit() {
                return state.status.clone();
            }
            if let Err(reason) = validate(&state.form) {
                // Local validation failure: no network call, stale `Failed`
                // clears back to idle.
                self.notifier.notify(Notification::error(reason.to_string()));
                state.status = SubmissionStatus::Idle;
                return state.status.clone();
            }
            state.status = SubmissionStatus::Submitting;
            WaitlistPayload::from_form(&state.form)
        };

        tracing::debug!(email = %payload.email, "dispatching waitlist submission");
        let outcome = self.client.submit(payload).await;

        let mut state = self.lock();
        match outcome {
            Ok(message) => {
                state.status = SubmissionStatus::Submitted;
                self.notifier.notify(Notification::success(message));
                self.schedule_reset(&mut state);
            }
            Err(error) => {
                tracing::debug!(reason = %error, "waitlist submission failed");
                self.notifier
                    .notify(Notification::error(error.message().to_string()));
                state.status = SubmissionStatus::Failed(error.message().to_string());
            }
        }
        state.status.clone()
    }

    /// Invalidate the pending reset timer. Call when the hosting view is
    /// torn down so the deferred reset cannot fire against a destroyed form.
    pub fn teardown(&self) {
        self.lock().cancel_reset();
    }

    fn schedule_reset(&self, state: &mut ControllerState) {
        state.cancel_reset();
        // The timer only holds a weak handle: a dropped controller lets the
        // task fall through without touching freed state.
        let shared = Arc::downgrade(&self.state);
        let delay = self.reset_delay;
        state.reset = Some(tokio::spawn(reset_after(shared, delay)));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ControllerState> {
        self.state.lock().expect("controller mutex poisoned")
    }
}

async fn reset_after(shared: Weak<Mutex<ControllerState>>, delay: Duration) {
    tokio::time::sleep(delay).await;
    let Some(state) = shared.upgrade() else {
        return;
    };
    let mut state = state.lock().expect("controller mutex poisoned");
    if state.status == SubmissionStatus::Submitted {
        state.form.clear();
        state.status = SubmissionStatus::Idle;
    }
    state.reset = None;
}
