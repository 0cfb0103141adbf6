//! List filters sent as GraphQL variables.
//!
//! Unset fields are omitted from the variables object, so the backend applies
//! its own defaults.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Soft-delete visibility (`Trashed` enum on the backend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Trashed {
    /// Live and soft-deleted records.
    With,
    /// Soft-deleted records only.
    Only,
    /// Live records only.
    Without,
}

impl Trashed {
    /// Backend spelling of the value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::With => "WITH",
            Self::Only => "ONLY",
            Self::Without => "WITHOUT",
        }
    }
}

impl fmt::Display for Trashed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trashed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "WITH" => Ok(Self::With),
            "ONLY" => Ok(Self::Only),
            "WITHOUT" => Ok(Self::Without),
            other => Err(format!("unknown trashed mode `{other}` (expected WITH, ONLY or WITHOUT)")),
        }
    }
}

/// Filter for rubric lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActivityFilter {
    /// Only active (`true`) or inactive (`false`) records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Soft-delete visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trashed: Option<Trashed>,
}

/// Filter for lists scoped to a rubric (categories, brands, shops).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RubricScopedFilter {
    /// Only active (`true`) or inactive (`false`) records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Soft-delete visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trashed: Option<Trashed>,
    /// Owning rubric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rubric_id: Option<String>,
}

impl RubricScopedFilter {
    /// Records of one rubric.
    #[must_use]
    pub fn rubric(rubric_id: impl Into<String>) -> Self {
        Self {
            rubric_id: Some(rubric_id.into()),
            ..Self::default()
        }
    }
}

/// Filter for product lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductFilter {
    /// Only active (`true`) or inactive (`false`) records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Soft-delete visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trashed: Option<Trashed>,
    /// Owning category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Featured flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    /// "New" badge flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,
}

/// Filter for countertop manufacturer lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManufacturerFilter {
    /// Only active (`true`) or inactive (`false`) records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Owning category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// Soft-delete visibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trashed: Option<Trashed>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_fields_are_omitted() {
        assert_eq!(serde_json::to_value(ActivityFilter::default()).unwrap(), json!({}));

        let filter = ProductFilter {
            is_featured: Some(true),
            trashed: Some(Trashed::Only),
            ..ProductFilter::default()
        };
        assert_eq!(
            serde_json::to_value(filter).unwrap(),
            json!({"trashed": "ONLY", "is_featured": true})
        );
    }

    #[test]
    fn rubric_scope() {
        assert_eq!(
            serde_json::to_value(RubricScopedFilter::rubric("3")).unwrap(),
            json!({"rubric_id": "3"})
        );
    }

    #[test]
    fn trashed_parses_any_case() {
        assert_eq!("with".parse::<Trashed>().unwrap(), Trashed::With);
        assert_eq!("WITHOUT".parse::<Trashed>().unwrap(), Trashed::Without);
        assert!("deleted".parse::<Trashed>().is_err());
        assert_eq!(Trashed::Only.to_string(), "ONLY");
    }
}
