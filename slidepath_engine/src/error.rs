// Engine error type.
//
// Every failure here is deterministic given the inputs: the same pitch
// sequence and instrument either always succeeds or always fails the same
// way, so nothing is retryable. Errors surface synchronously to the caller.

use slidepath_pitch::Pitch;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizeError {
    /// No (position, partial) pair can produce the pitch within the
    /// instrument's slide length.
    #[error("no playable slide position for {pitch:?} within the instrument's slide length")]
    UnplayablePitch { pitch: Pitch },

    /// The input pitch sequence was empty. Caller error; no graph is built.
    #[error("pitch sequence is empty")]
    EmptySequence,

    /// An optimization mode name did not match any known mode.
    #[error("unknown optimization mode '{0}' (expected distance, direction, gliss, or legato)")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, OptimizeError>;
