//! Lifecycle of one logical card, keyed by (user, correlation id).
//!
//! The transition function is pure so the delivery decision can be tested
//! without any I/O. `Orphaned` is terminal: once the update mapping for a
//! card is lost the flow only ever produces a user-visible notice, it never
//! re-sends the card.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// No card has been delivered for this correlation id yet.
    Unsent,
    /// First delivery happened; a mapping record exists.
    Sent,
    /// Refreshed in place at least once. Self-loops on every further refresh.
    Updated,
    /// Refresh ran but the mapping record was gone. Terminal.
    Orphaned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    /// A brand-new card went out.
    FirstSend,
    /// Refresh found the prior record and updated the card in place.
    RefreshHit,
    /// Refresh found no record for the correlation id.
    RefreshMiss,
}

impl CardState {
    pub fn transition(self, event: CardEvent) -> CardState {
        match (self, event) {
            (CardState::Orphaned, _) => CardState::Orphaned,
            (_, CardEvent::FirstSend) => CardState::Sent,
            (_, CardEvent::RefreshHit) => CardState::Updated,
            (_, CardEvent::RefreshMiss) => CardState::Orphaned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_send_then_refreshes() {
        let state = CardState::Unsent.transition(CardEvent::FirstSend);
        assert_eq!(state, CardState::Sent);
        let state = state.transition(CardEvent::RefreshHit);
        assert_eq!(state, CardState::Updated);
        // Self-loop on every further refresh.
        assert_eq!(state.transition(CardEvent::RefreshHit), CardState::Updated);
    }

    #[test]
    fn refresh_without_record_orphans() {
        assert_eq!(
            CardState::Sent.transition(CardEvent::RefreshMiss),
            CardState::Orphaned
        );
    }

    #[test]
    fn orphaned_is_terminal() {
        let orphaned = CardState::Orphaned;
        assert_eq!(orphaned.transition(CardEvent::FirstSend), CardState::Orphaned);
        assert_eq!(orphaned.transition(CardEvent::RefreshHit), CardState::Orphaned);
        assert_eq!(orphaned.transition(CardEvent::RefreshMiss), CardState::Orphaned);
    }
}
