//! Location-gated check-in for UNICHAMADA.
//!
//! [`CheckInSession`] is the synchronous validation state machine; [`CheckInFlow`] drives it
//! with a [`PositionProvider`] and an [`AttendanceBackend`]. [`DirectValidation`] is the
//! alternate flow that forwards raw coordinates for the backend to judge.

#![deny(unsafe_code)]

pub mod direct;
pub mod errors;
pub mod flow;
pub mod state;
pub mod traits;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use direct::DirectValidation;
pub use errors::{BackendError, CheckInError, PositionError, UNSUPPORTED_MESSAGE};
pub use flow::CheckInFlow;
pub use state::{CheckInSession, LocationCheck, PositionTicket};
pub use traits::{AttendanceBackend, PositionProvider};
