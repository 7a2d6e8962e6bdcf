//! Collection storage module
//!
//! Whole-file JSON arrays, one file per collection.

pub mod json_store;

pub use json_store::JsonStore;
