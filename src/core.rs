pub mod command;
pub mod controller;
pub mod domain;
pub mod election;
pub mod events;
pub mod repository;
