//! Manifest — static per-module metadata.
//!
//! A manifest is a JSON object, usually shipped as `properties.json` next to
//! the module:
//!
//! ```json
//! {
//!     "moduleID": "templatemodule",
//!     "moduleName": "Template Module",
//!     "cardDescription": {
//!         "title": "Template Module",
//!         "description": "This is a template module.",
//!         "icon": "tab_unselected",
//!         "iconColor": "text-blue-500"
//!     },
//!     "database": { "tableName": "template" }
//! }
//! ```
//!
//! Only `moduleID` is required. The typed fields are extracted once; the
//! original object is kept as-is so callers can read keys this crate knows
//! nothing about.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Why a manifest could not be accepted.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest is not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error("manifest must be a JSON object")]
    NotAnObject,

    #[error("manifest is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("manifest field `{field}` is invalid: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

/// Dashboard tile metadata (`cardDescription`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDescription {
    pub title: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub icon_color: Option<String>,
}

/// Storage settings (`database`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSettings {
    pub table_name: Option<String>,
}

/// Validated module manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    module_id: String,
    module_name: Option<String>,
    card: CardDescription,
    database: DatabaseSettings,
    raw: Map<String, Value>,
}

impl Manifest {
    /// Parse and validate a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] for malformed JSON and the other
    /// variants for structurally invalid content.
    pub fn from_json_str(input: &str) -> Result<Self, ManifestError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::NotAnObject`] when `value` is not an object,
    /// [`ManifestError::MissingField`] when `moduleID` is absent, and
    /// [`ManifestError::InvalidField`] when a field has the wrong shape.
    pub fn from_value(value: Value) -> Result<Self, ManifestError> {
        let Value::Object(raw) = value else {
            return Err(ManifestError::NotAnObject);
        };

        let module_id = required_str(&raw, "moduleID")?;
        validate_module_id(&module_id)?;
        let module_name = optional_str(&raw, "moduleName")?;

        let card = match raw.get("cardDescription") {
            None | Some(Value::Null) => CardDescription::default(),
            Some(value @ Value::Object(_)) => serde_json::from_value(value.clone()).map_err(|_| {
                ManifestError::InvalidField {
                    field: "cardDescription",
                    reason: "title, description, icon and iconColor must be strings",
                }
            })?,
            Some(_) => {
                return Err(ManifestError::InvalidField {
                    field: "cardDescription",
                    reason: "expected an object",
                });
            }
        };

        let database = match raw.get("database") {
            None | Some(Value::Null) => DatabaseSettings::default(),
            Some(value) => serde_json::from_value(value.clone()).map_err(|_| {
                ManifestError::InvalidField {
                    field: "database",
                    reason: "expected an object with a string `tableName`",
                }
            })?,
        };

        Ok(Self {
            module_id,
            module_name,
            card,
            database,
            raw,
        })
    }

    /// Unique module identifier; also the root of the module's routes.
    #[must_use]
    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    /// Human-readable module name, falling back to the id when the manifest
    /// declares none.
    #[must_use]
    pub fn module_name(&self) -> &str {
        self.module_name.as_deref().unwrap_or(&self.module_id)
    }

    /// The `moduleName` exactly as declared.
    #[must_use]
    pub fn declared_name(&self) -> Option<&str> {
        self.module_name.as_deref()
    }

    #[must_use]
    pub fn card(&self) -> &CardDescription {
        &self.card
    }

    /// Short description shown on the dashboard card.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.card.description.as_deref()
    }

    /// Storage table associated with the module, if any.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        self.database.table_name.as_deref()
    }

    /// The manifest exactly as it was read.
    #[must_use]
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}

fn required_str(raw: &Map<String, Value>, field: &'static str) -> Result<String, ManifestError> {
    optional_str(raw, field)?.ok_or(ManifestError::MissingField(field))
}

fn optional_str(
    raw: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, ManifestError> {
    match raw.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(ManifestError::InvalidField {
            field,
            reason: "expected a string",
        }),
    }
}

/// The id becomes a URL path segment, so it is restricted to a safe alphabet.
fn validate_module_id(id: &str) -> Result<(), ManifestError> {
    if id.is_empty() {
        return Err(ManifestError::InvalidField {
            field: "moduleID",
            reason: "must not be empty",
        });
    }
    let valid = id
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
    if !valid {
        return Err(ManifestError::InvalidField {
            field: "moduleID",
            reason: "may only contain ASCII letters, digits, '-', '_' and '.'",
        });
    }
    Ok(())
}
