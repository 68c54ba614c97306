//! Writing fixtures to the document store.
//!
//! The [`Seeder`] writes each record family in a fixed order, one awaited
//! write at a time, and stops at the first failure.

mod seeder;

pub use seeder::{SeedError, SeedReport, Seeder};
