pub mod config;
pub mod model;
pub mod service;
pub mod ui;
