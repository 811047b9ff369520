//! Ethereum smart contract ABI (application binary interface) utility library.
//!
//! Parses standard Solidity JSON interfaces and encodes/decodes function
//! call data: the 4-byte selector followed by the ABI-encoded arguments.

mod abi;
mod error;
mod event;
mod params;
mod types;
mod values;

pub use abi::*;
pub use error::*;
pub use event::*;
pub use params::*;
pub use types::*;
pub use values::*;
