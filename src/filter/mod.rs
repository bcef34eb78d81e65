//! Record Filter Module
//!
//! Applies the configurable inclusion predicate to fetched records before
//! publishing. The predicate is supplied by the caller, so the filter
//! criterion stays out of the fetch path; the shipped implementation is an
//! address-substring match against the configured district terms.

pub mod predicate;

pub use predicate::{AddressFilter, filter_records};
