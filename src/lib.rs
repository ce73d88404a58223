pub mod candidates;
pub mod core;
pub mod gateway;
pub mod parties;
pub mod registry;
pub mod utils;
