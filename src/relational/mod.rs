//! Relational operators over tables
//!
//! Operators read their inputs and return a new table that is not
//! registered anywhere; the caller decides where it lives.

mod product;

pub use product::product;
