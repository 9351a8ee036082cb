// SPDX-License-Identifier: MPL-2.0
//! Request sequencing for overlapping list refreshes.
//!
//! Each refresh is tagged with a [`RequestToken`]. Responses are applied only
//! when their token is newer than the last one applied, so a slow response can
//! never overwrite the result of a refresh that started after it.

/// Monotonic tag attached to one list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Raw sequence number, for logging.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Issues request tokens and remembers the newest one applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSequencer {
    issued: u64,
    applied: u64,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token newer than every token issued before.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    /// Records `token` as applied if it is newer than the last applied one.
    ///
    /// Returns `false` for stale tokens; their responses must be dropped.
    pub fn accept(&mut self, token: RequestToken) -> bool {
        if token.0 <= self.applied {
            return false;
        }
        self.applied = token.0;
        true
    }

    /// Marks every token issued so far as stale.
    ///
    /// Used when local state is cleared so in-flight listings cannot
    /// resurrect it.
    pub fn invalidate(&mut self) {
        self.applied = self.issued;
    }

    /// Whether a request has been issued but not yet applied or invalidated.
    pub fn has_pending(&self) -> bool {
        self.issued > self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase() {
        let mut sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(second > first);
    }

    #[test]
    fn in_order_responses_are_accepted() {
        let mut sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(sequencer.accept(first));
        assert!(sequencer.accept(second));
        assert!(!sequencer.has_pending());
    }

    #[test]
    fn stale_response_is_rejected() {
        let mut sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(sequencer.accept(second));
        assert!(!sequencer.accept(first));
    }

    #[test]
    fn same_token_is_accepted_once() {
        let mut sequencer = RequestSequencer::new();
        let token = sequencer.issue();
        assert!(sequencer.accept(token));
        assert!(!sequencer.accept(token));
    }

    #[test]
    fn invalidate_discards_in_flight_requests() {
        let mut sequencer = RequestSequencer::new();
        let in_flight = sequencer.issue();
        assert!(sequencer.has_pending());

        sequencer.invalidate();
        assert!(!sequencer.has_pending());
        assert!(!sequencer.accept(in_flight));

        let fresh = sequencer.issue();
        assert!(sequencer.accept(fresh));
    }
}
