//! Format-agnostic passes over block sequences.

pub mod list_merge;
