//! Acknowledgment messages returned by fire-and-forget operations.

use std::fmt;

/// Reply to `start_job` and `terminate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// A job was submitted; solving continues in the background.
    SolvingStarted,
    /// A live job was asked to stop.
    Terminating,
    /// No live job existed. Not an error.
    AlreadyTerminated,
}

impl Ack {
    pub fn message(&self) -> &'static str {
        match self {
            Ack::SolvingStarted => "Solving started",
            Ack::Terminating => "Solver terminating early.",
            Ack::AlreadyTerminated => "Solver was already terminated.",
        }
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Serialized as `{"text": "<message>"}`.
#[cfg(feature = "serde")]
impl serde::Serialize for Ack {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut message = serializer.serialize_struct("Ack", 1)?;
        message.serialize_field("text", self.message())?;
        message.end()
    }
}
