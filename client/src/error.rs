//! Session error kinds
//!
//! All of these are handled inside the session manager and surfaced only as
//! logged diagnostics plus the status/transcript observables. Nothing here
//! escapes to the hosting surface.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// Connect was attempted with a blank room name. Rejected with no state
    /// change.
    #[error("room name is required")]
    EmptyRoom,

    /// Underlying connection failure. Degrades status to disconnected; no
    /// automatic retry is performed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Undecodable inbound payload. The frame is dropped; the connection is
    /// unaffected.
    #[error("malformed frame: {0}")]
    MalformedFrame(#[from] serde_json::Error),
}
