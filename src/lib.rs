pub mod api;
pub mod config_handler;
pub mod fixture_service;
pub mod match_filter;
pub mod match_service;
pub mod models;
pub mod models_api;
pub mod models_external;
pub mod rest_client;
