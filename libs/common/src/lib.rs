//! Common library for the storefront and knowledge-base services
//!
//! This crate provides functionality shared by the services: the document
//! store gateway, error types, the response envelope and server
//! configuration.
//!
//! ```rust,no_run
//! use common::collection::Filter;
//! use common::database::{DatabaseConfig, init_pool, health_check};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env("knowledgebase")?;
//!     let database = init_pool(&config).await?;
//!     println!("Database health check: {}", health_check(&database).await?);
//!
//!     let notes = database.collection("notes")?;
//!     let all: Vec<serde_json::Value> = notes.find_many(&Filter::All).await?;
//!     println!("{} notes", all.len());
//!     Ok(())
//! }
//! ```

pub mod collection;
pub mod config;
pub mod database;
pub mod error;
pub mod response;
