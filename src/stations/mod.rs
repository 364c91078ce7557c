pub mod directory;
pub mod error;
pub mod networks;
