pub mod api;
pub mod business;
pub mod config;
pub mod domain;
pub mod error;
pub mod frappe;
pub mod logging;
pub mod selector;
