//! Type definitions for the recipe catalog API.
//!
//! This module contains the data structures exchanged with the remote
//! catalog service: the recipe record itself, the draft/patch shapes used
//! for mutations, and the pagination wrapper shared by the list and search
//! endpoints.
//!
//! ## API compatibility
//!
//! The server speaks camelCase JSON with a Mongo-style `_id` field, so the
//! Rust types carry `#[serde(rename)]` attributes where the wire name and
//! the field name differ. Fields the server may omit are `#[serde(default)]`
//! so older server versions keep deserializing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recipe record as returned by the catalog service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Opaque server-assigned identifier
    #[serde(rename = "_id")]
    pub id: String,
    /// Recipe title (never empty on the server side)
    pub title: String,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered ingredient lines; order is significant for display
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Free-text preparation instructions
    #[serde(default)]
    pub instructions: Option<String>,
    /// Creation timestamp, server-assigned and read-only
    #[serde(rename = "createdAt", default)]
    pub created: Option<DateTime<Utc>>,
    /// Last modification timestamp, server-assigned and read-only
    #[serde(rename = "updatedAt", default)]
    pub updated: Option<DateTime<Utc>>,
}

/// Payload for creating a recipe. Same shape as [`Recipe`] minus the
/// server-assigned identity and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl RecipeDraft {
    /// Drop blank ingredient lines, preserving the order of the rest.
    ///
    /// Form input arrives with empty rows (the form always renders a
    /// trailing blank field); the server must never see them.
    pub fn normalized(mut self) -> Self {
        self.ingredients.retain(|i| !i.trim().is_empty());
        self
    }
}

/// Partial payload for updating a recipe. Fields left `None` are omitted
/// from the request body and keep their server-side value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl RecipePatch {
    /// Drop blank ingredient lines if an ingredients list is present.
    pub fn normalized(mut self) -> Self {
        if let Some(ingredients) = &mut self.ingredients {
            ingredients.retain(|i| !i.trim().is_empty());
        }
        self
    }
}

/// Paginated response wrapper shared by the list and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Total number of records across all pages
    pub total: u64,
    /// 1-based page number this response covers
    pub page: u32,
    /// Total number of pages at the requested page size
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
    /// Records for this page
    pub results: Vec<Recipe>,
}

/// Reply of the delete endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deleted {
    pub message: String,
}

/// Error payload carried by non-2xx responses.
///
/// The server populates `message` or `error` depending on the failure, and
/// `errors` with per-field validation detail. All fields are optional; an
/// unrecognized shape simply deserializes to an empty body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}
