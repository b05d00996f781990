pub mod registry;
pub mod shared;
