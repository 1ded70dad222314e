//! Theme records and their single validation entry point.
//!
//! A stored theme is a loosely-typed JSON object. `Theme::from_json` is the only
//! way to obtain a `Theme`: it either returns a fully populated value or a
//! `CatalogError::InvalidTheme` naming what was wrong. There is no partially
//! valid theme.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::catalog::error::CatalogError;

/// Keys every stored theme record must carry.
pub const REQUIRED_FIELDS: [&str; 5] = ["title", "description", "items", "style", "free_space"];

/// A validated bingo theme.
///
/// `items` holds distinct strings in file order; duplicates in the stored record
/// are collapsed (first occurrence wins). `style` is passed through to clients
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub id: String,
    pub title: String,
    pub description: String,
    pub items: Vec<String>,
    pub style: Value,
    pub free_space: String,
}

/// Catalog listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSummary {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl Theme {
    /// Parses and validates raw theme bytes.
    pub fn from_json(theme_id: &str, bytes: &[u8]) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| CatalogError::invalid(theme_id, format!("malformed JSON: {e}")))?;
        Self::from_value(theme_id, value)
    }

    /// Validates an already-parsed JSON record.
    pub fn from_value(theme_id: &str, value: Value) -> Result<Self, CatalogError> {
        let Value::Object(mut record) = value else {
            return Err(CatalogError::invalid(theme_id, "record is not a JSON object"));
        };

        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| !record.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(CatalogError::invalid(
                theme_id,
                format!("missing required fields: {}", missing.join(", ")),
            ));
        }

        let title = take_string(theme_id, &mut record, "title")?;
        let description = take_string(theme_id, &mut record, "description")?;
        let free_space = take_string(theme_id, &mut record, "free_space")?;
        let items = take_items(theme_id, &mut record)?;
        let style = record.remove("style").unwrap_or(Value::Null);

        Ok(Theme {
            id: theme_id.to_string(),
            title,
            description,
            items,
            style,
            free_space,
        })
    }

    pub fn summary(&self) -> ThemeSummary {
        ThemeSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

fn take_string(
    theme_id: &str,
    record: &mut Map<String, Value>,
    field: &str,
) -> Result<String, CatalogError> {
    match record.remove(field) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(CatalogError::invalid(
            theme_id,
            format!("field '{field}' must be a string"),
        )),
    }
}

fn take_items(theme_id: &str, record: &mut Map<String, Value>) -> Result<Vec<String>, CatalogError> {
    let Some(Value::Array(raw)) = record.remove("items") else {
        return Err(CatalogError::invalid(theme_id, "field 'items' must be an array"));
    };

    let total = raw.len();
    let mut seen = HashSet::with_capacity(total);
    let mut items = Vec::with_capacity(total);
    for (idx, entry) in raw.into_iter().enumerate() {
        let Value::String(item) = entry else {
            return Err(CatalogError::invalid(
                theme_id,
                format!("items[{idx}] is not a string"),
            ));
        };
        if seen.insert(item.clone()) {
            items.push(item);
        }
    }

    if items.len() < total {
        warn!(
            theme_id,
            duplicates = total - items.len(),
            "Theme lists duplicate items; keeping first occurrences"
        );
    }
    Ok(items)
}
