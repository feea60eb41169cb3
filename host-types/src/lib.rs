//! Defines the host-facing types used by the ICS-20 relay: identifiers and
//! their validation, packets, timeouts, and acknowledgements.
#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::disallowed_methods, clippy::disallowed_types))]
#![deny(
    warnings,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod error;
pub mod identifiers;
pub mod validate;

mod acknowledgement;
mod height;
mod module;
mod packet;
mod timeout;

pub use acknowledgement::*;
pub use height::*;
pub use module::*;
pub use packet::*;
pub use timeout::*;
