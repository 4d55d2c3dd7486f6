//! Session-level tests.
//!
//! - `scenarios.rs`: end-to-end turn sequences through a [`TurnSession`]
//! - `properties.rs`: proptest checks over arbitrary turn sequences
//! - `helpers.rs`: recording collaborators and session setup
//!
//! [`TurnSession`]: crate::session::TurnSession

mod helpers;
