//! Contract façade services module.

pub mod admined;
pub mod erc721;
pub mod registry;

pub use admined::DeveryAdmined;
pub use erc721::DeveryERC721;
pub use registry::DeveryRegistry;
