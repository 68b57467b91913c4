//! Validation check modules.
//!
//! Each module performs one family of checks. Every check is a pure function
//! of the dataset set and silently returns nothing when a table it needs is
//! absent.

pub mod arrays;
pub mod attributes;
pub mod capacity;
pub mod columns;
pub mod identifier;
pub mod ranges;
pub mod references;
pub mod skills;
