use crate::error::{ClassQueryError, ClassQueryResult};
use serde::{Deserialize, Serialize};

/// Naming conventions the engine shares with author-written CSS and markup.
///
/// Every field has a default matching the published convention, so a plain
/// `Config::default()` is what almost every caller wants. Sites that rename
/// the marker attribute or the reusable-class prefix can load overrides from
/// YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Attribute carrying the query grammar, e.g. `data-classquery`.
    pub marker_attribute: String,
    /// Attribute the engine writes back with each element's assigned queryId.
    pub query_id_attribute: String,
    /// Prefix of the author-authored reusable style classes, e.g. `classquery-`.
    pub style_prefix: String,
    /// Marker class scoping the legacy-fallback selectors, e.g. `ltie9`.
    pub legacy_marker_class: String,
    /// Stem of the lifecycle classes toggled on the document root
    /// (`<stem>-init` while processing, `<stem>-complete` afterwards).
    pub lifecycle_stem: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker_attribute: "data-classquery".to_string(),
            query_id_attribute: "data-classquery-id".to_string(),
            style_prefix: "classquery-".to_string(),
            legacy_marker_class: "ltie9".to_string(),
            lifecycle_stem: "classquery".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from YAML. Missing fields fall back to defaults.
    pub fn from_yaml(yaml: &str) -> ClassQueryResult<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ClassQueryError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The lifecycle class present while a pass is running.
    pub fn init_class(&self) -> String {
        format!("{}-init", self.lifecycle_stem)
    }

    /// The lifecycle class present once a pass has finished.
    pub fn complete_class(&self) -> String {
        format!("{}-complete", self.lifecycle_stem)
    }

    /// Attribute tagging the generated style node. Distinct from the marker
    /// attribute so a re-scan never mistakes the output for a marked element.
    pub fn stylesheet_attribute(&self) -> String {
        format!("{}-stylesheet", self.marker_attribute)
    }

    fn validate(&self) -> ClassQueryResult<()> {
        for (name, value) in [
            ("markerAttribute", &self.marker_attribute),
            ("queryIdAttribute", &self.query_id_attribute),
            ("stylePrefix", &self.style_prefix),
            ("legacyMarkerClass", &self.legacy_marker_class),
            ("lifecycleStem", &self.lifecycle_stem),
        ] {
            if value.trim().is_empty() {
                return Err(ClassQueryError::ConfigError(format!(
                    "'{}' must be a non-empty string",
                    name
                )));
            }
        }
        Ok(())
    }
}
