//! This library implements the processing logic for ICS-20 (token transfer)
//! messages: escrow accounting, the packet relay state machine, and the
//! multi-hop forwarding engine.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::disallowed_methods, clippy::disallowed_types))]
#![deny(
    warnings,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

pub mod context;
pub mod handler;
pub mod module;

/// Re-exports the ICS-20 token transfer data structures.
pub mod types {
    #[doc(inline)]
    pub use ics20_transfer_types::*;
}
