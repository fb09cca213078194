//! Admin backend for a nutrition catalog: foods, categories and serving
//! units behind an admin-only JSON API, plus the dashboard filter state that
//! drives the food listing.

pub mod app;
pub mod auth;
pub mod catalog;
pub mod categories;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod foods;
pub mod pagination;
pub mod serving_units;
pub mod state;
