pub mod import_users;
pub mod list_users;
