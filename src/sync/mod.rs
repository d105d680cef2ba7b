//! Master-to-slave sync core.
//!
//! Leaves first: [`extract`] reads typed values off source pages,
//! [`encode`] re-encodes them for the destination schema, [`schema`]
//! fetches that schema, [`select`] finds the eligible pages, and
//! [`engine`] orchestrates the per-record state machine over all of
//! them.

pub mod encode;
pub mod engine;
pub mod extract;
pub mod schema;
pub mod select;

#[cfg(test)]
pub(crate) mod testing;

pub use engine::{Outcome, RecordOutcome, RunReport, SyncEngine, REQUIRED_FIELDS};
pub use schema::fetch_schema;
pub use select::select_eligible;
