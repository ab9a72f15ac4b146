//! Repository Module
//!
//! Storage operations for the registry tables. Functions take either the
//! pool (reads) or an open transaction (writes that must be atomic with
//! the rest of the operation). Every mutating service operation issues a
//! fixed, ordered sequence of these calls inside one transaction.

pub mod acte;
pub mod archive;
pub mod copie;
pub mod journal;
pub mod sequence;

pub use sequence::CounterKind;
