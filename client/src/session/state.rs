//! Connection state machine
//!
//! The lifecycle of one transport handle, expressed as a pure transition
//! function so it can be tested without a live socket. The session manager
//! applies the returned effect against its owned handle and transcript.

use crate::transport::TransportEvent;

/// Lifecycle state of the current handle, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No handle. Initial state, and terminal for each handle lifetime.
    Disconnected,
    /// Handle created, awaiting the open event
    Connecting,
    /// Open and usable; the only state that reads as connected
    Open,
    /// The transport errored. Status already reads disconnected, but the
    /// handle survives until the authoritative close event arrives.
    Failed,
}

/// Connection status exposed to the hosting surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Disconnected,
    Connected,
}

impl ConnectionState {
    /// Whether a handle exists in this state
    pub fn has_handle(&self) -> bool {
        !matches!(self, ConnectionState::Disconnected)
    }

    pub fn status(&self) -> SessionStatus {
        match self {
            ConnectionState::Open => SessionStatus::Connected,
            _ => SessionStatus::Disconnected,
        }
    }
}

/// Side effect the session manager must apply after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Drop the handle, retire its generation, clear the transcript
    Teardown,
    /// Decode the frame and append to the transcript
    Ingest,
}

/// Result of feeding one event through the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: ConnectionState,
    pub effect: Effect,
}

/// Apply one transport event to the current state.
///
/// Message frames never change the connection state; close is the only event
/// that performs full teardown. An error only degrades the state (two-phase
/// shutdown: the close that follows does the cleanup). Events arriving with no
/// live handle are ignored entirely.
pub fn transition(state: ConnectionState, event: &TransportEvent) -> Transition {
    use ConnectionState::*;

    let (next, effect) = match (state, event) {
        (Disconnected, _) => (Disconnected, Effect::None),

        (Connecting, TransportEvent::Opened) => (Open, Effect::None),
        // Duplicate open is harmless; stay put.
        (Open | Failed, TransportEvent::Opened) => (state, Effect::None),

        (_, TransportEvent::Closed) => (Disconnected, Effect::Teardown),

        (Connecting | Open, TransportEvent::Error(_)) => (Failed, Effect::None),
        (Failed, TransportEvent::Error(_)) => (Failed, Effect::None),

        (_, TransportEvent::Frame(_)) => (state, Effect::Ingest),
    };

    Transition { next, effect }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_event_connects() {
        let t = transition(ConnectionState::Connecting, &TransportEvent::Opened);
        assert_eq!(t.next, ConnectionState::Open);
        assert_eq!(t.next.status(), SessionStatus::Connected);
        assert_eq!(t.effect, Effect::None);
    }

    #[test]
    fn test_close_tears_down_from_any_live_state() {
        for state in [
            ConnectionState::Connecting,
            ConnectionState::Open,
            ConnectionState::Failed,
        ] {
            let t = transition(state, &TransportEvent::Closed);
            assert_eq!(t.next, ConnectionState::Disconnected);
            assert_eq!(t.effect, Effect::Teardown);
        }
    }

    #[test]
    fn test_error_degrades_status_without_teardown() {
        let t = transition(
            ConnectionState::Open,
            &TransportEvent::Error("boom".to_string()),
        );
        assert_eq!(t.next, ConnectionState::Failed);
        assert_eq!(t.next.status(), SessionStatus::Disconnected);
        assert_eq!(t.effect, Effect::None);
        assert!(t.next.has_handle());
    }

    #[test]
    fn test_frames_never_change_state() {
        for state in [
            ConnectionState::Connecting,
            ConnectionState::Open,
            ConnectionState::Failed,
        ] {
            let t = transition(state, &TransportEvent::Frame("{}".to_string()));
            assert_eq!(t.next, state);
            assert_eq!(t.effect, Effect::Ingest);
        }
    }

    #[test]
    fn test_disconnected_ignores_everything() {
        for event in [
            TransportEvent::Opened,
            TransportEvent::Frame("{}".to_string()),
            TransportEvent::Closed,
            TransportEvent::Error("late".to_string()),
        ] {
            let t = transition(ConnectionState::Disconnected, &event);
            assert_eq!(t.next, ConnectionState::Disconnected);
            assert_eq!(t.effect, Effect::None);
        }
    }

    #[test]
    fn test_error_then_close_reaches_disconnected_once() {
        let t1 = transition(
            ConnectionState::Open,
            &TransportEvent::Error("reset".to_string()),
        );
        assert_eq!(t1.next.status(), SessionStatus::Disconnected);
        let t2 = transition(t1.next, &TransportEvent::Closed);
        assert_eq!(t2.next, ConnectionState::Disconnected);
        assert_eq!(t2.effect, Effect::Teardown);
    }
}
