//! Extracurricular activities portal: JSON API plus a rendered directory page,
//! backed by SQLite.

pub mod database;
pub mod error;
pub mod models;
pub mod services;
pub mod web;
