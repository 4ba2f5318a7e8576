use std::{collections::BTreeMap, path::Path, str::FromStr};

use anyhow::Context;

use crate::foundation::error::{TroopError, TroopResult};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// A wardrobe category. Every catalog entry and worn layer belongs to
/// exactly one category.
pub enum Category {
    /// Base body variants.
    Body,
    /// Hair styles.
    Hair,
    /// Hats and headwear.
    Hats,
    /// Trousers.
    Pants,
    /// Skirts and other bottoms.
    Bottoms,
    /// Shirts and jackets.
    Tops,
    /// Footwear.
    Shoes,
    /// Everything else.
    Extras,
}

impl Category {
    /// All known categories, in catalog order.
    pub const ALL: [Self; 8] = [
        Self::Body,
        Self::Hair,
        Self::Hats,
        Self::Pants,
        Self::Bottoms,
        Self::Tops,
        Self::Shoes,
        Self::Extras,
    ];

    /// Whether more than one layer of this category may be worn at once.
    ///
    /// Hair and hats stack; every other category evicts the previous pick
    /// when a new one is selected.
    pub fn allow_many(self) -> bool {
        matches!(self, Self::Hair | Self::Hats)
    }

    /// Lowercase name as it appears as a `wardrobe.json` key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Hair => "hair",
            Self::Hats => "hats",
            Self::Pants => "pants",
            Self::Bottoms => "bottoms",
            Self::Tops => "tops",
            Self::Shoes => "shoes",
            Self::Extras => "extras",
        }
    }

    /// Resolve a lowercase category name; `None` for unknown names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TroopError;

    fn from_str(s: &str) -> TroopResult<Self> {
        Self::from_name(s).ok_or_else(|| TroopError::catalog(format!("unknown category '{s}'")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// One decoded catalog entry.
///
/// The pixel offset encoded in the filename suffix (`-<x>x<y>.<ext>`) is
/// decoded exactly once, when the catalog is loaded.
pub struct CatalogEntry {
    /// Original catalog filename, e.g. `mohawk-10x20.gif`.
    pub name: String,
    /// Sprite path relative to the assets root, e.g. `hair/mohawk-10x20.gif`.
    pub source: String,
    /// Pixel offset at which the sprite is drawn on the avatar surface.
    pub offset: (i32, i32),
}

#[derive(Clone, Debug, Default)]
/// The layer catalog: per-category lists of decoration sprites, loaded from
/// a JSON object mapping category names to filename arrays.
pub struct Wardrobe {
    entries: BTreeMap<Category, Vec<CatalogEntry>>,
}

impl Wardrobe {
    /// Parse a catalog from `wardrobe.json` text.
    ///
    /// Unknown category keys and filenames without a parsable offset suffix
    /// are skipped with a warning; they never abort the rest of the catalog.
    pub fn from_json(json: &str) -> TroopResult<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)
            .map_err(|e| TroopError::catalog(format!("parse wardrobe json: {e}")))?;

        let mut entries: BTreeMap<Category, Vec<CatalogEntry>> = BTreeMap::new();
        for (key, names) in raw {
            let Some(category) = Category::from_name(&key) else {
                tracing::warn!(category = %key, "skipping unknown wardrobe category");
                continue;
            };
            let bucket = entries.entry(category).or_default();
            for name in names {
                match parse_offset_suffix(&name) {
                    Some(offset) => bucket.push(CatalogEntry {
                        source: format!("{category}/{name}"),
                        name,
                        offset,
                    }),
                    None => {
                        tracing::warn!(
                            category = %key,
                            entry = %name,
                            "skipping wardrobe entry without an offset suffix"
                        );
                    }
                }
            }
        }

        Ok(Self { entries })
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> TroopResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read wardrobe catalog '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Categories present in the catalog, in stable order.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.entries.keys().copied()
    }

    /// Entries for one category, in catalog order. Empty for absent
    /// categories.
    pub fn entries(&self, category: Category) -> &[CatalogEntry] {
        self.entries.get(&category).map_or(&[], Vec::as_slice)
    }

    /// Lookup one entry by category and catalog filename.
    pub fn entry(&self, category: Category, name: &str) -> Option<&CatalogEntry> {
        self.entries(category).iter().find(|e| e.name == name)
    }

    /// Total entry count across all categories.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Whether the catalog holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode the `-<x>x<y>.<ext>` suffix of a catalog filename.
///
/// Everything after the first `-` (extension stripped) must be two integers
/// joined by `x`.
fn parse_offset_suffix(name: &str) -> Option<(i32, i32)> {
    let rest = name.split_once('-')?.1;
    let stem = rest.rsplit_once('.').map_or(rest, |(s, _)| s);
    let (x, y) = stem.split_once('x')?;
    Some((x.parse().ok()?, y.parse().ok()?))
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/wardrobe.rs"]
mod tests;
