//! # Catalog HTTP client
//!
//! This module provides the transport layer for the recipe catalog API:
//! the [`RecipeApi`] trait the rest of the crate programs against, the
//! reqwest-backed [`RecipeClient`], and the request/response types.
//!
//! ## Modules
//!
//! - [`client`] - The `RecipeApi` trait and its HTTP implementation
//! - [`error`] - Transport error taxonomy
//! - [`types`] - Type definitions for API requests and responses
//!
//! ## Quick Start
//!
//! ```no_run
//! use recetario::client::{RecipeApi, RecipeClient};
//!
//! # async fn example() -> Result<(), recetario::client::ApiError> {
//! let client = RecipeClient::new("http://localhost:3000/api");
//!
//! // First page of the collection
//! let page = client.list(1, 10).await?;
//! println!("{} recipes total", page.total);
//! # Ok(())
//! # }
//! ```

#[allow(clippy::module_inception)]
pub mod client;
pub mod error;
pub mod types;

pub use client::{RecipeApi, RecipeClient};
pub use error::ApiError;
pub use types::*;
