//! Real-time session coordination core.
//!
//! Two managers own all mutation of the shared session rows: the roll-call
//! manager ([`rollcall::RollcallManager`]) and the buzzer manager
//! ([`buzzer::BuzzerManager`]). Both are built on the lifecycle primitives
//! in [`lifecycle`]: close-all-open-then-create-one for starts, and a
//! single-row conditional update for first-wins claims.

pub mod buzzer;
pub mod error;
pub mod lifecycle;
pub mod rollcall;

pub use error::ServiceError;
