pub mod authentication;
pub mod configuration;
pub mod content;
pub mod document_store;
pub mod domain;
pub mod identity;
pub mod newsletter;
pub mod routes;
pub mod session_state;
pub mod sitemap;
pub mod startup;
pub mod telemetry;
pub mod utils;
