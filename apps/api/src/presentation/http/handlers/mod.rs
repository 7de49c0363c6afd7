pub mod docs;
pub mod download;
pub mod health;
pub mod upload;
pub mod users;
