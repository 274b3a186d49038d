//! Smart contract bindings.

pub mod admined;
pub mod erc721;
pub mod registry;
