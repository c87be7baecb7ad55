use crate::contact::{deliver, ContactForm, EmailSender, FormField, SubmissionStatus, ValidationError};
use crate::i18n::Language;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A previous submission has not resolved yet; this one was dropped.
    #[error("a submission is already in flight")]
    InFlight,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("contact form has been torn down")]
    Unmounted,
}

struct FormState {
    form: ContactForm,
    status: SubmissionStatus,
    in_flight: bool,
    mounted: bool,
    reset_timer: Option<JoinHandle<()>>,
}

/// State of one mounted contact form.
///
/// All state changes happen under a short lock that is never held across an
/// `.await`; the single outstanding network call runs unlocked.
pub struct ContactFormController<S> {
    sender: S,
    state: Arc<Mutex<FormState>>,
    reset_after: Duration,
}

impl<S: EmailSender> ContactFormController<S> {
    /// `reset_after` is how long a success message stays before reverting
    /// to `Idle`.
    pub fn new(sender: S, reset_after: Duration) -> Self {
        Self {
            sender,
            state: Arc::new(Mutex::new(FormState {
                form: ContactForm::default(),
                status: SubmissionStatus::Idle,
                in_flight: false,
                mounted: true,
                reset_timer: None,
            })),
            reset_after,
        }
    }

    pub fn set_field(&self, field: FormField, value: impl Into<String>) {
        self.lock().form.set(field, value);
    }

    pub fn fields(&self) -> ContactForm {
        self.lock().form.clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        self.lock().status.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.lock().in_flight
    }

    /// Label of the submit trigger, which is disabled while sending.
    pub fn submit_label(&self, language: Language) -> &'static str {
        if self.is_submitting() {
            language.t("contact.form.sending")
        } else {
            language.t("contact.form.send")
        }
    }

    /// Validate and send the current fields.
    ///
    /// On success the fields are cleared and the status reverts to `Idle`
    /// after the reset delay. On failure the fields stay so the visitor can
    /// retry. A result that arrives after `teardown` changes nothing.
    pub async fn submit(&self, language: Language) -> Result<SubmissionStatus, SubmitError> {
        let form = {
            let mut state = self.lock();
            if !state.mounted {
                return Err(SubmitError::Unmounted);
            }
            if state.in_flight {
                debug!("Ignoring submit while another is in flight");
                return Err(SubmitError::InFlight);
            }
            state.form.validate()?;
            state.in_flight = true;
            state.status = SubmissionStatus::Idle;
            state.form.clone()
        };

        let guard = InFlightGuard { state: &self.state };
        let status = deliver(&self.sender, &form, language).await;

        // The outcome is recorded before the in-flight flag drops, under the
        // same lock, so a queued submit never sees the delivered fields.
        let mut state = self.lock();
        guard.disarm();
        if state.mounted {
            if status.is_success() {
                state.form.clear();
                self.schedule_reset(&mut state);
            }
            state.status = status.clone();
        } else {
            debug!("Contact form torn down before delivery resolved; result ignored");
        }
        state.in_flight = false;

        Ok(status)
    }

    /// Unmount: cancel the pending status reset and ignore late results.
    pub fn teardown(&self) {
        let mut state = self.lock();
        state.mounted = false;
        if let Some(timer) = state.reset_timer.take() {
            timer.abort();
        }
    }

    fn schedule_reset(&self, state: &mut FormState) {
        if let Some(previous) = state.reset_timer.take() {
            previous.abort();
        }

        let weak = Arc::downgrade(&self.state);
        let delay = self.reset_after;
        state.reset_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(shared) = weak.upgrade() {
                let mut state = lock(&shared);
                if state.status.is_success() {
                    state.status = SubmissionStatus::Idle;
                }
            }
        }));
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        lock(&self.state)
    }
}

impl<S> Drop for ContactFormController<S> {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.state).reset_timer.take() {
            timer.abort();
        }
    }
}

/// Clears the in-flight flag when the `submit` future is dropped mid-call.
/// A submission that resolves disarms it and clears the flag itself.
struct InFlightGuard<'a> {
    state: &'a Mutex<FormState>,
}

impl InFlightGuard<'_> {
    fn disarm(self) {
        std::mem::forget(self);
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).in_flight = false;
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
