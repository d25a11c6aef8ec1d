pub mod config;
pub mod domain;
pub mod errors;
pub mod ml;
pub mod services;
pub mod table;

#[cfg(feature = "graphql")]
pub mod graphql;
#[cfg(feature = "server")]
pub mod server;
