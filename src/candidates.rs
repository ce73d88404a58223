pub mod dto;
pub mod factory;
pub mod gateway;
