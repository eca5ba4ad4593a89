//! Screen state machine. Every screen change is parked as a pending
//! transition and committed once its delay has elapsed.

use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const TRANSITION_DELAY: Duration = Duration::from_millis(650);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewState {
    #[default]
    Loading,
    Roster,
    CategoryFilter,
    Detail {
        name: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    OpenFilter,
    OpenDetail(String),
    ApplyCategories(BTreeSet<String>),
    Back,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTransition {
    pub ticket: u64,
    pub transition: Transition,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigator {
    view: ViewState,
    pending: Option<PendingTransition>,
    next_ticket: u64,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn pending(&self) -> Option<&PendingTransition> {
        self.pending.as_ref()
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    /// `Loading -> Roster`. Returns false from any other screen.
    pub fn finish_loading(&mut self) -> bool {
        if self.view != ViewState::Loading {
            return false;
        }
        self.view = ViewState::Roster;
        true
    }

    /// Parks `transition` if it is valid from the current screen and nothing
    /// else is pending. The returned ticket is what `settle` expects.
    pub fn request(&mut self, transition: Transition) -> Option<u64> {
        if self.pending.is_some() || !self.accepts(&transition) {
            return None;
        }
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        self.pending = Some(PendingTransition { ticket, transition });
        Some(ticket)
    }

    /// Commits the pending transition matching `ticket`. Stale tickets are
    /// ignored and leave the pending transition in place.
    pub fn settle(&mut self, ticket: u64) -> Option<Transition> {
        if self.pending.as_ref().map(|pending| pending.ticket) != Some(ticket) {
            return None;
        }
        let pending = self.pending.take()?;
        self.view = match &pending.transition {
            Transition::OpenFilter => ViewState::CategoryFilter,
            Transition::OpenDetail(name) => ViewState::Detail { name: name.clone() },
            Transition::ApplyCategories(_) | Transition::Back => ViewState::Roster,
        };
        Some(pending.transition)
    }

    fn accepts(&self, transition: &Transition) -> bool {
        match (&self.view, transition) {
            (ViewState::Roster, Transition::OpenFilter) => true,
            (ViewState::Roster, Transition::OpenDetail(_)) => true,
            (ViewState::Detail { name: current }, Transition::OpenDetail(name)) => current != name,
            (ViewState::CategoryFilter, Transition::ApplyCategories(_)) => true,
            (ViewState::CategoryFilter, Transition::Back) => true,
            (ViewState::Detail { .. }, Transition::Back) => true,
            _ => false,
        }
    }
}

/// Awaits `fut`, then sleeps out whatever is left of `min`.
pub async fn hold_for<F: Future>(min: Duration, fut: F) -> F::Output {
    let started = tokio::time::Instant::now();
    let output = fut.await;
    let elapsed = started.elapsed();
    if elapsed < min {
        tokio::time::sleep(min - elapsed).await;
    }
    output
}
