//! netdecker-cardfile: Card reference data for netdecker-rs.
//!
//! Provides [`CardDatabase`], an in-memory implementation of
//! [`netdecker_core::CardReference`] loaded from Scryfall oracle-cards bulk
//! JSON. It depends on netdecker-core for the shared data types.

pub mod database;
pub mod error;

pub use database::{CardDatabase, CardRecord};
pub use error::CardfileError;
pub use netdecker_core;
