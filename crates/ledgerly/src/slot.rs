//! Last-write-wins result slot.
//!
//! A screen may start a new query before the previous one finished (every
//! keystroke in a search box, say). Each evaluation takes a [`Ticket`] from
//! [`LatestResult::begin`]; only a result carrying the newest ticket is
//! kept, so a slow, superseded evaluation can never overwrite a fresher one.

/// Generation marker handed out by [`LatestResult::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Holds the result of the most recently started evaluation.
#[derive(Debug, Clone)]
pub struct LatestResult<T> {
    generation: u64,
    value: Option<T>,
}

impl<T> Default for LatestResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestResult<T> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        LatestResult {
            generation: 0,
            value: None,
        }
    }

    /// Starts a new evaluation, superseding every earlier ticket.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    /// Returns `true` if `ticket` is the newest one handed out.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Stores `value` if `ticket` is still current. Returns whether it was
    /// kept; a stale result is dropped.
    pub fn publish(&mut self, ticket: Ticket, value: T) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.value = Some(value);
        true
    }

    /// The last accepted result.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Removes and returns the last accepted result.
    pub fn take(&mut self) -> Option<T> {
        self.value.take()
    }
}
