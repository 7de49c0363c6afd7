pub mod entity;
pub mod errors;
pub mod partition;
pub mod repository;
pub mod validation;
