//! Data models for the issue tracker.
//!
//! These models match the frontend TypeScript interfaces for seamless interoperability.

mod issue;

pub use issue::*;
