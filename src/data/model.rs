use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Transparency flag – 't'/'f' encoding used by the catalog dumps
// ---------------------------------------------------------------------------

/// Error raised when a transparency flag is neither `t` nor `f`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid transparency flag '{0}' (expected 't' or 'f')")]
pub struct InvalidTransFlag(pub String);

/// Decode the catalog's `t`/`f` transparency encoding.
pub fn parse_trans_flag(raw: &str) -> Result<bool, InvalidTransFlag> {
    match raw.trim() {
        "t" => Ok(true),
        "f" => Ok(false),
        other => Err(InvalidTransFlag(other.to_string())),
    }
}

fn deserialize_trans_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_trans_flag(&raw).map_err(serde::de::Error::custom)
}

// ---------------------------------------------------------------------------
// Catalog rows – one struct per table
// ---------------------------------------------------------------------------

/// A single color entry. `rgb` is a six-digit hex string without `#`.
#[derive(Debug, Clone, Deserialize)]
pub struct Color {
    pub id: i32,
    pub name: String,
    pub rgb: String,
    #[serde(deserialize_with = "deserialize_trans_flag")]
    pub is_trans: bool,
}

/// A theme. Themes form a tree: `parent_id` is empty for root themes.
#[derive(Debug, Clone, Deserialize)]
pub struct Theme {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<u32>,
}

/// A catalog product. Every set belongs to exactly one theme.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSet {
    pub set_num: String,
    pub name: String,
    pub year: i32,
    pub theme_id: u32,
    pub num_parts: u32,
}

// ---------------------------------------------------------------------------
// Catalog – the three loaded tables
// ---------------------------------------------------------------------------

/// The full loaded catalog with a pre-computed theme-name index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub colors: Vec<Color>,
    pub themes: Vec<Theme>,
    pub sets: Vec<CatalogSet>,
    /// theme id → name, built once at load time.
    theme_names: BTreeMap<u32, String>,
}

impl Catalog {
    /// Assemble a catalog and build the theme index.
    pub fn new(colors: Vec<Color>, themes: Vec<Theme>, sets: Vec<CatalogSet>) -> Self {
        let theme_names = themes.iter().map(|t| (t.id, t.name.clone())).collect();
        Catalog {
            colors,
            themes,
            sets,
            theme_names,
        }
    }

    /// Look up a theme name by id.
    pub fn theme_name(&self, id: u32) -> Option<&str> {
        self.theme_names.get(&id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty() && self.themes.is_empty() && self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trans_flag_accepts_t_and_f_only() {
        assert_eq!(parse_trans_flag("t"), Ok(true));
        assert_eq!(parse_trans_flag("f"), Ok(false));
        assert_eq!(parse_trans_flag(" f "), Ok(false));
        assert!(parse_trans_flag("true").is_err());
        assert!(parse_trans_flag("").is_err());
    }

    #[test]
    fn theme_index_resolves_names() {
        let themes = vec![
            Theme {
                id: 1,
                name: "Technic".to_string(),
                parent_id: None,
            },
            Theme {
                id: 5,
                name: "Model Team".to_string(),
                parent_id: Some(1),
            },
        ];
        let catalog = Catalog::new(Vec::new(), themes, Vec::new());
        assert_eq!(catalog.theme_name(5), Some("Model Team"));
        assert_eq!(catalog.theme_name(99), None);
    }
}
