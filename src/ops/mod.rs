pub mod region;
pub mod registry;
pub mod transforms;
