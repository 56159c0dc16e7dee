pub mod aggregators;
pub mod config;
pub mod fetch;
pub mod filters;
pub mod models;
pub mod output;
pub mod portal;
pub mod services;
pub mod store;
