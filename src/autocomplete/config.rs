//! Declarative configuration.
//!
//! Screens that describe their forms as data can deserialize a [`Config`]
//! and turn it into a model instead of chaining builder calls.
//!
//! ```rust
//! use bubbletea_autocomplete::autocomplete::{Config, HttpFetcher};
//! use std::sync::Arc;
//!
//! let config: Config = serde_json::from_str(r#"{
//!     "endpoint": "https://hr.example/api/v1/branches/",
//!     "fields": {"value": "slug", "display": "name"},
//!     "params": {"organization": "acme"},
//!     "multiple": true
//! }"#).unwrap();
//!
//! let model = config.into_model(Arc::new(HttpFetcher::new().unwrap()));
//! assert!(model.selection().is_multiple());
//! ```

use super::fetch::Fetcher;
use super::page::Params;
use super::types::{FieldNames, Identifier, Record};
use super::Model;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Construction-time settings of an auto-complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint options are loaded from.
    pub endpoint: String,
    /// Identifier and label field names.
    pub fields: FieldNames,
    /// Caller parameters sent with every request.
    pub params: Params,
    /// Multiple selection.
    pub multiple: bool,
    /// Load as soon as a value is set.
    pub force_fetch: bool,
    /// Fixed option list replacing remote loading.
    pub static_items: Vec<Record>,
    /// Identifiers never shown.
    pub items_to_exclude: Vec<Identifier>,
    /// When set, the only identifiers shown.
    pub items_to_include: Option<Vec<Identifier>>,
}

impl Config {
    /// Builds a model loading through `fetcher`.
    pub fn into_model(self, fetcher: Arc<dyn Fetcher>) -> Model {
        let model = Model::new(self.endpoint, self.fields, fetcher)
            .with_params(self.params)
            .with_multiple(self.multiple)
            .with_force_fetch(self.force_fetch)
            .with_static_items(self.static_items)
            .with_items_to_exclude(self.items_to_exclude);
        match self.items_to_include {
            Some(ids) => model.with_items_to_include(ids),
            None => model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autocomplete::testing::ScriptedFetcher;
    use serde_json::json;

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_json::from_value(json!({"endpoint": "/x/"})).unwrap();
        assert_eq!(config.fields, FieldNames::default());
        assert!(!config.multiple);
        assert!(config.items_to_include.is_none());
    }

    #[test]
    fn test_identifiers_accept_numbers_and_strings() {
        let config: Config =
            serde_json::from_value(json!({"items_to_exclude": [4, "hr-admin"]})).unwrap();
        assert_eq!(
            config.items_to_exclude,
            vec![Identifier::Int(4), Identifier::from("hr-admin")]
        );
    }

    #[test]
    fn test_into_model_applies_settings() {
        let config = Config {
            endpoint: "/departments/".into(),
            multiple: true,
            static_items: vec![Record::from_value(json!({"id": 1, "name": "HR"})).unwrap()],
            items_to_include: Some(vec![Identifier::Int(1)]),
            ..Config::default()
        };
        let model = config.into_model(ScriptedFetcher::empty());
        assert_eq!(model.endpoint(), "/departments/");
        assert!(model.selection().is_multiple());
        assert!(model.has_static_items());
    }
}
