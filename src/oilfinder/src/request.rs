//! Latest-wins sequencing and input debouncing
//!
//! Lookups triggered by typing are asynchronous and can complete out of
//! order. [`RequestSequencer`] tags each request with a ticket so that only
//! the newest one may update display state, and [`Debouncer`] holds input
//! back until typing pauses.
//!
//! Both take caller-supplied millisecond timestamps and never read a clock,
//! so they behave the same natively and under wasm.

/// Quiet period before a typed query is looked up
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Sequence number identifying one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Where a request stands relative to newer ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Newest request, response not yet applied
    Pending,
    /// Newest request, response applied
    Resolved(u64),
    /// A newer request exists or the request was cancelled; drop its response
    Superseded,
}

/// Issues request tickets and decides which responses may be applied
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    issued: u64,
    resolved: Option<u64>,
    cancelled_through: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier ticket becomes superseded
    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    /// The most recently issued ticket
    pub fn latest(&self) -> Option<RequestTicket> {
        (self.issued > 0).then_some(RequestTicket(self.issued))
    }

    pub fn state(&self, ticket: RequestTicket) -> RequestState {
        if ticket.0 != self.issued || ticket.0 <= self.cancelled_through {
            RequestState::Superseded
        } else if self.resolved == Some(ticket.0) {
            RequestState::Resolved(ticket.0)
        } else {
            RequestState::Pending
        }
    }

    /// Record that a response arrived.
    ///
    /// Returns [`RequestState::Resolved`] when the response belongs to the
    /// newest live request and should be applied, otherwise
    /// [`RequestState::Superseded`].
    pub fn complete(&mut self, ticket: RequestTicket) -> RequestState {
        match self.state(ticket) {
            RequestState::Superseded => {
                tracing::debug!(seq = ticket.0, latest = self.issued, "dropping stale response");
                RequestState::Superseded
            }
            RequestState::Pending | RequestState::Resolved(_) => {
                self.resolved = Some(ticket.0);
                RequestState::Resolved(ticket.0)
            }
        }
    }

    /// Supersede every request issued so far
    pub fn cancel(&mut self) {
        self.cancelled_through = self.issued;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingInput {
    query: String,
    due_ms: u64,
}

/// Trailing-edge debouncer for typed queries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    delay_ms: u64,
    pending: Option<PendingInput>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MS)
    }
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Debouncer {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Register new input, restarting the quiet period
    pub fn input(&mut self, query: &str, now_ms: u64) {
        self.pending = Some(PendingInput {
            query: query.to_string(),
            due_ms: now_ms.saturating_add(self.delay_ms),
        });
    }

    /// Drop any pending input
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// When the pending input becomes due, if any
    pub fn due_at(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.due_ms)
    }

    /// Take the pending query once its quiet period has elapsed
    pub fn poll(&mut self, now_ms: u64) -> Option<String> {
        match &self.pending {
            Some(p) if now_ms >= p.due_ms => self.pending.take().map(|p| p.query),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_wins() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue();
        let second = seq.issue();

        assert_eq!(seq.state(first), RequestState::Superseded);
        assert_eq!(seq.state(second), RequestState::Pending);

        // second finishes first, then the stale first response arrives
        assert_eq!(seq.complete(second), RequestState::Resolved(2));
        assert_eq!(seq.complete(first), RequestState::Superseded);
        assert_eq!(seq.state(second), RequestState::Resolved(2));
    }

    #[test]
    fn test_newer_issue_supersedes_resolved() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue();
        assert_eq!(seq.complete(first), RequestState::Resolved(1));

        let second = seq.issue();
        assert_eq!(seq.state(first), RequestState::Superseded);
        assert_eq!(seq.latest(), Some(second));
    }

    #[test]
    fn test_cancel() {
        let mut seq = RequestSequencer::new();
        assert_eq!(seq.latest(), None);

        let ticket = seq.issue();
        seq.cancel();
        assert_eq!(seq.complete(ticket), RequestState::Superseded);

        let next = seq.issue();
        assert_eq!(seq.complete(next), RequestState::Resolved(next.seq()));
    }

    #[test]
    fn test_debounce_waits_for_quiet_period() {
        let mut debounce = Debouncer::default();
        debounce.input("to", 1_000);
        assert_eq!(debounce.poll(1_200), None);

        debounce.input("toy", 1_200);
        assert_eq!(debounce.due_at(), Some(1_500));
        assert_eq!(debounce.poll(1_400), None);
        assert_eq!(debounce.poll(1_500).as_deref(), Some("toy"));
        assert_eq!(debounce.poll(2_000), None);
    }

    #[test]
    fn test_debounce_clear() {
        let mut debounce = Debouncer::new(50);
        debounce.input("bmw", 0);
        debounce.clear();
        assert_eq!(debounce.due_at(), None);
        assert_eq!(debounce.poll(100), None);
    }
}
