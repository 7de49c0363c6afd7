//! CSV user import service.
//!
//! Uploaded CSV files are validated row by row against a fixed schema. Valid
//! rows are inserted into the `users` table; invalid rows are written with
//! their reasons to a downloadable error workbook.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
