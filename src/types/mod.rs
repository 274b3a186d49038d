//! Type definitions module.
//!
//! Contains the decoded views of registry and NFT state.

pub mod registry;

pub use registry::*;
