//! Debounced search controller
//!
//! [`Debouncer`] is the two-state machine (Idle / Pending) on its own, driven
//! by explicit instants. [`SearchController`] runs it on a tokio task: every
//! keystroke re-arms the quiet period, and once the period elapses without
//! input the current location is rewritten exactly once through the
//! [`Navigator`].
//!
//! ```text
//!            input               input (re-arm)
//!   Idle ───────────▶ Pending ◀──────────────┐
//!    ▲                  │  └─────────────────┘
//!    └── rewrite URL ◀──┘ quiet period elapsed
//! ```

use super::params::Location;
use crate::config::DashboardConfig;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

/// Quiet period between the last keystroke and the URL rewrite
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Client-side navigation
pub trait Navigator: Send + Sync {
    /// Replace the current history entry without a full reload
    fn replace(&self, href: &str);
}

/// Debounce state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Pending { term: String, deadline: Instant },
}

/// Coalesces rapid input into a single term
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    state: SearchState,
}

impl Debouncer {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            state: SearchState::Idle,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Record a keystroke at `now`; any earlier pending term is superseded
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.state = SearchState::Pending {
            term: term.into(),
            deadline: now + self.quiet_period,
        };
    }

    /// When the pending term fires, if any
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            SearchState::Idle => None,
            SearchState::Pending { deadline, .. } => Some(*deadline),
        }
    }

    /// Take the pending term if its quiet period is over, returning to Idle
    pub fn fire(&mut self, now: Instant) -> Option<String> {
        match &self.state {
            SearchState::Pending { deadline, .. } if now >= *deadline => {
                match std::mem::replace(&mut self.state, SearchState::Idle) {
                    SearchState::Pending { term, .. } => Some(term),
                    SearchState::Idle => None,
                }
            }
            _ => None,
        }
    }

    /// Drop any pending term without firing
    pub fn cancel(&mut self) {
        self.state = SearchState::Idle;
    }
}

/// Handle to a running search box
///
/// Dropping the handle tears the controller down: its task is aborted and a
/// pending rewrite never happens.
pub struct SearchController {
    input: mpsc::UnboundedSender<String>,
    location: Arc<Mutex<Location>>,
    task: JoinHandle<()>,
}

impl SearchController {
    /// Start a controller at `location` with the default quiet period
    pub fn spawn(location: Location, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_quiet_period(location, navigator, SEARCH_DEBOUNCE)
    }

    /// Start a controller whose quiet period is `search.debounce_ms`
    pub fn from_config(
        location: Location,
        navigator: Arc<dyn Navigator>,
        config: &DashboardConfig,
    ) -> Self {
        Self::with_quiet_period(location, navigator, config.debounce())
    }

    /// Start a controller with a custom quiet period
    pub fn with_quiet_period(
        location: Location,
        navigator: Arc<dyn Navigator>,
        quiet_period: Duration,
    ) -> Self {
        let (input, rx) = mpsc::unbounded_channel();
        let location = Arc::new(Mutex::new(location));
        let task = tokio::spawn(run(
            rx,
            location.clone(),
            navigator,
            Debouncer::new(quiet_period),
        ));

        Self {
            input,
            location,
            task,
        }
    }

    /// Feed the current content of the search box
    pub fn on_input(&self, term: impl Into<String>) {
        // The task only stops when this handle is dropped
        let _ = self.input.send(term.into());
    }

    /// Location after the last rewrite
    pub fn location(&self) -> Location {
        self.location
            .lock()
            .map(|loc| loc.clone())
            .unwrap_or_default()
    }

    /// Initial value for the search box
    pub fn initial_term(&self) -> String {
        self.location().initial_term()
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.task.abort();
    }
}

enum Event {
    Input(Option<String>),
    Elapsed,
}

async fn run(
    mut rx: mpsc::UnboundedReceiver<String>,
    location: Arc<Mutex<Location>>,
    navigator: Arc<dyn Navigator>,
    mut debouncer: Debouncer,
) {
    loop {
        let event = match debouncer.deadline() {
            Some(deadline) => tokio::select! {
                term = rx.recv() => Event::Input(term),
                _ = sleep_until(deadline) => Event::Elapsed,
            },
            None => Event::Input(rx.recv().await),
        };

        match event {
            Event::Input(Some(term)) => debouncer.input(term, Instant::now()),
            Event::Input(None) => {
                debouncer.cancel();
                break;
            }
            Event::Elapsed => {
                let Some(term) = debouncer.fire(Instant::now()) else {
                    continue;
                };
                let href = {
                    let Ok(mut current) = location.lock() else {
                        break;
                    };
                    *current = current.with_search_term(&term);
                    current.href()
                };
                tracing::debug!(term = %term, href = %href, "search rewrote location");
                navigator.replace(&href);
            }
        }
    }
}
