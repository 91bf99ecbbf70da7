//! Request middleware.

pub mod admission;

pub use admission::{admission_middleware, AccessEvent, BLOCKED_BODY};
