//! # Recetario client
//!
//! Client library for a remote recipe-catalog HTTP API. It consists of two
//! cooperating components:
//!
//! ## Client module
//!
//! The [`client`] module provides the transport layer: the [`RecipeApi`]
//! trait, the reqwest-backed [`RecipeClient`], and the wire types.
//!
//! ## Catalog module
//!
//! The [`catalog`] module provides [`RecipeCatalog`], the query/mutation
//! coordinator a consuming view drives: it owns pagination and search
//! state, reloads after every successful mutation, and normalizes remote
//! failures into a recorded error plus a [`notify::Notifier`] notification.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use recetario::{LogNotifier, RecipeCatalog, RecipeClient};
//!
//! # async fn example() {
//! let api = Arc::new(RecipeClient::new("http://localhost:3000/api"));
//! let catalog = Arc::new(RecipeCatalog::new(api, Arc::new(LogNotifier)));
//!
//! catalog.reload().await;
//! for recipe in catalog.snapshot().recipes {
//!     println!("{}", recipe.title);
//! }
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod debounce;
pub mod notify;

pub use catalog::{CatalogOptions, CatalogState, RecipeCatalog};
pub use client::{RecipeApi, RecipeClient};
pub use notify::{LogNotifier, Notifier, Severity};
