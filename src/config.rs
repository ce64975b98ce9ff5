//! Autofill configuration
//!
//! Which storage key to use and which form/select elements to bind. Pages
//! can override the defaults with an inline JSON block:
//!
//! ```html
//! <script id="autofill-config" type="application/json">
//!   { "storage_key": "uid", "form_id": "loginform", "select_id": "users" }
//! </script>
//! ```

use serde::{Deserialize, Serialize};

use crate::{AutofillError, Result};

/// Default storage key for the last selected user id
pub const DEFAULT_STORAGE_KEY: &str = "uid";
/// Default id of the login `<form>`
pub const DEFAULT_FORM_ID: &str = "loginform";
/// Default id of the user `<select>`
pub const DEFAULT_SELECT_ID: &str = "users";

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutofillConfig {
    /// LocalStorage key holding the remembered identity
    pub storage_key: String,
    /// Element id of the form whose submission is observed
    pub form_id: String,
    /// Element id of the select whose value is remembered
    pub select_id: String,
}

impl Default for AutofillConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            form_id: DEFAULT_FORM_ID.to_string(),
            select_id: DEFAULT_SELECT_ID.to_string(),
        }
    }
}

impl AutofillConfig {
    /// Element id of the inline config block
    pub const ELEMENT_ID: &'static str = "autofill-config";

    /// Parse and validate a JSON config; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty keys and ids that could never match an element
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.is_empty() {
            return Err(AutofillError::InvalidConfig(
                "storage_key must not be empty".to_string(),
            ));
        }
        for (field, id) in [("form_id", &self.form_id), ("select_id", &self.select_id)] {
            if id.is_empty() || id.chars().any(char::is_whitespace) {
                return Err(AutofillError::InvalidConfig(format!(
                    "{field} must be a non-empty id without whitespace, got {id:?}"
                )));
            }
        }
        if self.form_id == self.select_id {
            return Err(AutofillError::InvalidConfig(
                "form_id and select_id must differ".to_string(),
            ));
        }
        Ok(())
    }
}
