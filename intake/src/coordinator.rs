use crate::adapters::HttpWaitlistClient;
use crate::configuration::{get_configuration, WaitlistClientSettings};
use anyhow::Context;
use crate::domain::{RegistrationOutcome, SubmissionError, WaitlistClient, WaitlistEmail};
use crate::form::{render, update, Effect, Feedback, FormState, Msg, RequestId, SubmissionState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// One mounted waitlist form.
///
/// Owns the [`FormState`], feeds every event through [`update`], and runs the
/// registration effect on the given runtime without blocking the caller.
/// Observers get every state change through [`WaitlistForm::subscribe`].
pub struct WaitlistForm {
    state: Arc<watch::Sender<FormState>>,
    client: Arc<dyn WaitlistClient>,
    timeout: Duration,
    runtime: Handle,
    torn_down: Arc<AtomicBool>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl WaitlistForm {
    pub fn new(client: Arc<dyn WaitlistClient>, timeout: Duration, runtime: Handle) -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self {
            state: Arc::new(state),
            client,
            timeout,
            runtime,
            torn_down: Arc::new(AtomicBool::new(false)),
            in_flight: Mutex::new(None),
        }
    }

    /// Build a form talking to the HTTP waitlist service described by `settings`.
    pub fn from_settings(
        settings: &WaitlistClientSettings,
        runtime: Handle,
    ) -> Result<Self, reqwest::Error> {
        let client = HttpWaitlistClient::new(
            settings.base_url.clone(),
            settings.api_token.clone(),
            settings.timeout(),
        )?;
        Ok(Self::new(Arc::new(client), settings.timeout(), runtime))
    }

    /// Build a form from `configuration/` and `APP_*` overrides in the working directory.
    pub fn from_configuration(runtime: Handle) -> Result<Self, anyhow::Error> {
        let configuration = get_configuration().context("Failed to read configuration")?;
        Self::from_settings(&configuration.waitlist, runtime)
            .context("Failed to build the waitlist client")
    }

    /// Keystroke handler: stores the new field text.
    pub fn on_change(&self, raw_text: impl Into<String>) {
        self.apply(Msg::EmailChanged(raw_text.into()));
    }

    /// Submit handler. Returns the id of the dispatched registration, if one was started.
    pub fn on_submit(&self, current_email: impl Into<String>) -> Option<RequestId> {
        let effect = self.apply(Msg::Submitted {
            email: current_email.into(),
        })?;
        let Effect::Register { request, email } = effect;
        self.dispatch(request, email);
        Some(request)
    }

    pub fn dismiss_error(&self) {
        self.apply(Msg::ErrorDismissed);
    }

    /// Unmount the form. The submission state returns to `Idle`, any
    /// registration still running is cancelled and its answer, should it
    /// arrive, is discarded.
    pub fn teardown(&self) {
        // Raising the flag under the channel lock orders it against a result
        // being applied concurrently.
        self.state.send_if_modified(|form| {
            if self.torn_down.swap(true, Ordering::SeqCst) {
                return false;
            }
            form.in_flight = None;
            let pending = form.submission != SubmissionState::Idle;
            form.submission = SubmissionState::Idle;
            pending
        });
        let handle = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
        }
        tracing::debug!("Waitlist form torn down");
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn submission(&self) -> SubmissionState {
        self.state.borrow().submission
    }

    /// What the view should show for the current state.
    pub fn feedback(&self) -> Feedback {
        render(&self.state.borrow().submission)
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Wait until no registration is pending, or the form is torn down, and
    /// return the resulting state.
    pub async fn settled(&self) -> FormState {
        let mut receiver = self.subscribe();
        let torn_down = Arc::clone(&self.torn_down);
        let settled = match receiver
            .wait_for(|form| {
                form.submission != SubmissionState::Submitting
                    || torn_down.load(Ordering::SeqCst)
            })
            .await
        {
            Ok(form) => form.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }

    fn apply(&self, msg: Msg) -> Option<Effect> {
        if self.is_torn_down() {
            tracing::debug!(?msg, "Dropping event for a torn down form");
            return None;
        }
        let mut effect = None;
        self.state.send_if_modified(|form| {
            let before = form.clone();
            effect = update(form, msg);
            *form != before
        });
        effect
    }

    fn dispatch(&self, request: RequestId, email: WaitlistEmail) {
        let client = Arc::clone(&self.client);
        let state = Arc::clone(&self.state);
        let torn_down = Arc::clone(&self.torn_down);
        let timeout = self.timeout;

        let handle = self.runtime.spawn(async move {
            let result = register_within(client.as_ref(), &email, request, timeout).await;
            resolve(&state, &torn_down, request, result);
        });

        *self.in_flight.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }
}

impl Drop for WaitlistForm {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Feed a registration result back into the form, unless it was torn down
/// while the request was running. Returns whether the state changed.
fn resolve(
    state: &watch::Sender<FormState>,
    torn_down: &AtomicBool,
    request: RequestId,
    result: Result<RegistrationOutcome, SubmissionError>,
) -> bool {
    state.send_if_modified(|form| {
        if torn_down.load(Ordering::SeqCst) {
            tracing::debug!(%request, "Discarding registration result after teardown");
            return false;
        }
        let before = form.clone();
        update(form, Msg::RegistrationResolved { request, result });
        *form != before
    })
}

#[tracing::instrument(
    name = "Registering email on the waitlist",
    skip(client, email, request, timeout),
    fields(waitlist_email = %email, %request)
)]
async fn register_within(
    client: &dyn WaitlistClient,
    email: &WaitlistEmail,
    request: RequestId,
    timeout: Duration,
) -> Result<RegistrationOutcome, SubmissionError> {
    match tokio::time::timeout(timeout, client.register(email)).await {
        Ok(result) => result,
        Err(_) => Err(SubmissionError::Timeout(timeout)),
    }
}
