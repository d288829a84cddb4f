//! Pure helpers behind the conversion session.
//!
//! Everything in this crate is synchronous and side-effect free: conversion
//! math and formatting, remapping a selection onto a freshly fetched listing,
//! and narrowing the listing down for the currency picker. The backend calls
//! these during state transitions; nothing here knows about channels,
//! networking, or snapshots.

pub mod convert;
pub mod filter;
pub mod selection;

pub use convert::{convert, format_amount, parse_amount};
pub use filter::filter_records;
pub use selection::remap;
