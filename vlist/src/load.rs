use alloc::sync::Arc;
use core::fmt;

use crate::Viewport;

/// Distance from the bottom of the content at which more data is requested.
pub const LOAD_THRESHOLD: u64 = 100;

/// Starts an incremental fetch.
///
/// The callback must return promptly: it kicks off the asynchronous work and hands the ticket to
/// whatever completes it, which later reports back through [`LoadTrigger::settle`].
pub type RequestMore = Arc<dyn Fn(LoadTicket) + Send + Sync>;

/// Identifies one issued fetch and the dataset generation it was issued for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadState {
    pub pending: bool,
    /// Bumped whenever the dataset is replaced.
    pub generation: u64,
}

/// What [`LoadTrigger::settle`] did with a completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settlement {
    /// The ticket belonged to the current dataset; the trigger is idle again.
    Applied,
    /// The dataset was replaced after the ticket was issued; the completion was ignored.
    Stale,
}

/// Single-flight guard around an incremental fetch.
///
/// `Idle -> Pending` when the viewport comes within [`LOAD_THRESHOLD`] of the end of the content,
/// and back to `Idle` when the fetch for the current generation settles. Evaluations while
/// pending are no-ops; failed fetches are not retried.
#[derive(Clone, Default)]
pub struct LoadTrigger {
    request_more: Option<RequestMore>,
    state: LoadState,
}

impl LoadTrigger {
    pub fn new(request_more: Option<RequestMore>) -> Self {
        Self {
            request_more,
            state: LoadState::default(),
        }
    }

    pub fn with_request_more(request_more: impl Fn(LoadTicket) + Send + Sync + 'static) -> Self {
        Self::new(Some(Arc::new(request_more)))
    }

    pub fn set_request_more(&mut self, request_more: Option<RequestMore>) {
        self.request_more = request_more;
    }

    pub fn has_request_more(&self) -> bool {
        self.request_more.is_some()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state.pending
    }

    pub fn generation(&self) -> u64 {
        self.state.generation
    }

    /// Returns `true` when a fetch would fire for this viewport, ignoring the pending guard.
    pub fn is_near_end(viewport: Viewport, total_extent: u64) -> bool {
        viewport.end() >= total_extent.saturating_sub(LOAD_THRESHOLD)
    }

    /// Fires the fetch if it is configured, idle, the dataset is non-empty, and the viewport is
    /// within the threshold of the end. Returns the issued ticket.
    pub fn evaluate(
        &mut self,
        viewport: Viewport,
        total_extent: u64,
        count: usize,
    ) -> Option<LoadTicket> {
        let request_more = self.request_more.as_ref()?;
        if self.state.pending || count == 0 {
            return None;
        }
        if !Self::is_near_end(viewport, total_extent) {
            return None;
        }

        self.state.pending = true;
        let ticket = LoadTicket {
            generation: self.state.generation,
        };
        vdebug!(
            generation = ticket.generation,
            scroll_offset = viewport.scroll_offset,
            total_extent,
            "LoadTrigger: requesting more"
        );
        request_more(ticket);
        Some(ticket)
    }

    /// Reports the outcome of a fetch. Failures are logged and otherwise treated like success.
    pub fn settle<E: fmt::Display>(
        &mut self,
        ticket: LoadTicket,
        result: Result<(), E>,
    ) -> Settlement {
        if let Err(_err) = &result {
            vdebug!(generation = ticket.generation, error = %_err, "LoadTrigger: fetch failed");
        }
        if ticket.generation != self.state.generation {
            vtrace!(
                ticket = ticket.generation,
                current = self.state.generation,
                "LoadTrigger: stale completion ignored"
            );
            return Settlement::Stale;
        }
        self.state.pending = false;
        Settlement::Applied
    }

    /// Starts a new generation for a replacement dataset. Any in-flight fetch becomes stale.
    pub fn reset_generation(&mut self) {
        self.state.generation = self.state.generation.wrapping_add(1);
        self.state.pending = false;
        vdebug!(generation = self.state.generation, "LoadTrigger: new generation");
    }
}

impl fmt::Debug for LoadTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadTrigger")
            .field("has_request_more", &self.request_more.is_some())
            .field("state", &self.state)
            .finish()
    }
}
