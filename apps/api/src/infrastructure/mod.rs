pub mod csv;
pub mod database;
pub mod reports;
pub mod repositories;
