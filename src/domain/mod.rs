pub mod property;
pub mod repository;
