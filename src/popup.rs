//! Welcome popup shown at most once per visitor session.
//!
//! The session marker lives behind the `SessionStore` trait so the controller
//! can be driven by an in-memory store in tests and by any real per-session
//! backend in the service.

use crate::config::Config;
use crate::i18n::Language;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Session key recording that the popup has been shown.
pub const POPUP_SHOWN_KEY: &str = "welcomePopupShown";

/// Key-value store scoped to one visitor session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str);
}

/// `SessionStore` backed by a map, one instance per session.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    NotShown,
    Armed,
    Visible,
    Dismissed,
    /// Unmounted while armed; the timer never fired.
    TornDown,
}

/// When the session marker is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkPolicy {
    /// At arm time: a popup torn down during the delay still uses up the
    /// session's one showing.
    #[default]
    OnArm,
    /// When the popup actually becomes visible.
    OnDisplay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupOptions {
    pub delay: Duration,
    pub mark: MarkPolicy,
}

impl PopupOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            delay: config.popup_delay(),
            ..Self::default()
        }
    }
}

impl Default for PopupOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            mark: MarkPolicy::OnArm,
        }
    }
}

/// Localized popup text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupContent {
    pub title: &'static str,
    pub message: &'static str,
    pub close_label: &'static str,
}

/// One mounted instance of the welcome popup.
///
/// Must be mounted inside a tokio runtime. Dropping the controller tears it
/// down and cancels a pending timer.
pub struct WelcomePopup {
    state: Arc<Mutex<PopupState>>,
    timer: Option<JoinHandle<()>>,
}

impl WelcomePopup {
    pub fn mount(session: Arc<dyn SessionStore>, options: PopupOptions) -> Self {
        if session.get(POPUP_SHOWN_KEY).is_some() {
            debug!("Welcome popup already shown this session");
            return Self {
                state: Arc::new(Mutex::new(PopupState::Dismissed)),
                timer: None,
            };
        }

        let state = Arc::new(Mutex::new(PopupState::Armed));
        if options.mark == MarkPolicy::OnArm {
            session.set(POPUP_SHOWN_KEY, "true");
        }

        let timer_state = Arc::clone(&state);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(options.delay).await;

            let mut state = lock(&timer_state);
            if *state == PopupState::Armed {
                *state = PopupState::Visible;
                if options.mark == MarkPolicy::OnDisplay {
                    session.set(POPUP_SHOWN_KEY, "true");
                }
                debug!("Welcome popup visible");
            }
        });

        Self {
            state,
            timer: Some(timer),
        }
    }

    pub fn state(&self) -> PopupState {
        *lock(&self.state)
    }

    pub fn is_visible(&self) -> bool {
        self.state() == PopupState::Visible
    }

    /// Close button and primary action both land here.
    pub fn dismiss(&self) {
        let mut state = lock(&self.state);
        if *state == PopupState::Visible {
            *state = PopupState::Dismissed;
        }
    }

    /// Popup text for `language`, or `None` while nothing is on screen.
    pub fn content(&self, language: Language) -> Option<PopupContent> {
        self.is_visible().then(|| PopupContent {
            title: language.t("popup.title"),
            message: language.t("popup.message"),
            close_label: language.t("popup.close"),
        })
    }

    /// Unmount: cancel the delay timer if it has not fired yet.
    pub fn teardown(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let mut state = lock(&self.state);
        if *state == PopupState::Armed {
            *state = PopupState::TornDown;
        }
    }
}

impl Drop for WelcomePopup {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn lock(state: &Mutex<PopupState>) -> MutexGuard<'_, PopupState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Arc<dyn SessionStore> {
        Arc::new(MemorySessionStore::new())
    }

    async fn past_delay() {
        tokio::time::sleep(Duration::from_millis(501)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_mount_arms_then_shows() {
        let popup = WelcomePopup::mount(session(), PopupOptions::default());
        assert_eq!(popup.state(), PopupState::Armed);
        assert!(popup.content(Language::ENGLISH).is_none());

        past_delay().await;
        assert_eq!(popup.state(), PopupState::Visible);
        assert_eq!(popup.content(Language::ENGLISH).unwrap().title, "Welcome!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_visible_before_delay() {
        let popup = WelcomePopup::mount(session(), PopupOptions::default());
        tokio::time::sleep(Duration::from_millis(499)).await;
        assert_eq!(popup.state(), PopupState::Armed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_is_terminal() {
        let popup = WelcomePopup::mount(session(), PopupOptions::default());
        past_delay().await;

        popup.dismiss();
        assert_eq!(popup.state(), PopupState::Dismissed);
        popup.dismiss();
        assert_eq!(popup.state(), PopupState::Dismissed);
        assert!(popup.content(Language::ARABIC).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shown_at_most_once_per_session() {
        let session = session();
        let mut shown = 0;

        for _ in 0..3 {
            let popup = WelcomePopup::mount(Arc::clone(&session), PopupOptions::default());
            past_delay().await;
            if popup.is_visible() {
                shown += 1;
                popup.dismiss();
            }
        }

        assert_eq!(shown, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_marker_present_never_arms() {
        let session = session();
        session.set(POPUP_SHOWN_KEY, "true");

        let popup = WelcomePopup::mount(session, PopupOptions::default());
        assert_eq!(popup.state(), PopupState::Dismissed);
        assert!(popup.timer.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_timer_and_consumes_budget_on_arm() {
        let session = session();
        let mut popup = WelcomePopup::mount(Arc::clone(&session), PopupOptions::default());

        popup.teardown();
        past_delay().await;
        assert_eq!(popup.state(), PopupState::TornDown);
        assert_eq!(session.get(POPUP_SHOWN_KEY).as_deref(), Some("true"));

        let again = WelcomePopup::mount(session, PopupOptions::default());
        assert_eq!(again.state(), PopupState::Dismissed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mark_on_display_keeps_budget_after_early_teardown() {
        let session = session();
        let options = PopupOptions {
            mark: MarkPolicy::OnDisplay,
            ..PopupOptions::default()
        };

        drop(WelcomePopup::mount(Arc::clone(&session), options));
        past_delay().await;
        assert!(session.get(POPUP_SHOWN_KEY).is_none());

        let popup = WelcomePopup::mount(Arc::clone(&session), options);
        past_delay().await;
        assert!(popup.is_visible());
        assert!(session.get(POPUP_SHOWN_KEY).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_language_switch_keeps_visibility() {
        let popup = WelcomePopup::mount(session(), PopupOptions::default());
        past_delay().await;

        let en = popup.content(Language::ENGLISH).unwrap();
        let ar = popup.content(Language::ARABIC).unwrap();
        assert!(popup.is_visible());
        assert_eq!(en.close_label, "Close");
        assert_eq!(ar.close_label, "إغلاق");
    }
}
