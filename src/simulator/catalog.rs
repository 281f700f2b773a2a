//! Static catalog of supported model identifiers.
//!
//! The catalog is built once at startup from configuration and shared
//! read-only across requests.

use crate::simulator::types::{ModelInfo, ModelList};

/// Models served when configuration does not override the list.
pub const DEFAULT_MODELS: &[&str] = &[
    "gpt-3.5-turbo",
    "gpt-4",
    "gpt-4-turbo",
    "gpt-4o",
    "gpt-4o-mini",
];

/// Owner reported for every catalog model.
pub const MODEL_OWNER: &str = "simulator";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<String>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_MODELS.iter().map(|m| m.to_string()))
    }
}

impl ModelCatalog {
    pub fn new<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: models.into_iter().map(Into::into).collect(),
        }
    }

    /// Exact, case-sensitive membership check.
    pub fn contains(&self, model: &str) -> bool {
        self.models.iter().any(|m| m == model)
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Render the `/v1/models` listing, stamped with `created`.
    pub fn to_model_list(&self, created: u64) -> ModelList {
        ModelList {
            object: "list".to_string(),
            data: self
                .models
                .iter()
                .map(|id| ModelInfo {
                    id: id.clone(),
                    object: "model".to_string(),
                    created,
                    owned_by: MODEL_OWNER.to_string(),
                })
                .collect(),
        }
    }
}
