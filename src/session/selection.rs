use crate::{
    catalog::wardrobe::{Category, Wardrobe},
    foundation::error::{TroopError, TroopResult},
};

#[derive(Clone, Debug, PartialEq, Eq)]
/// One worn decoration layer. Read-only once handed to the exporter.
pub struct SelectedLayer {
    /// Category the layer was picked from.
    pub category: Category,
    /// Catalog filename identifying the layer within its category.
    pub name: String,
    /// Sprite path relative to the assets root.
    pub source: String,
    /// Pixel offset at which the sprite is drawn.
    pub offset: (i32, i32),
}

#[derive(Clone, Debug, Default)]
/// Insertion-ordered set of worn layers, keyed by `(category, name)`.
///
/// Insertion order is the stacking order: the exporter draws layers exactly
/// in the order they were toggled on.
pub struct Selection {
    layers: Vec<SelectedLayer>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a layer on or off. Returns `true` when the layer is worn after
    /// the call.
    ///
    /// Toggling an already-worn `(category, name)` removes it, so a toggle
    /// pair always restores the prior state. Selecting into a single-select
    /// category first evicts every other layer of that category; the new
    /// layer always lands at the end of the stacking order.
    pub fn toggle(&mut self, layer: SelectedLayer) -> bool {
        if let Some(idx) = self
            .layers
            .iter()
            .position(|l| l.category == layer.category && l.name == layer.name)
        {
            self.layers.remove(idx);
            return false;
        }

        if !layer.category.allow_many() {
            self.layers.retain(|l| l.category != layer.category);
        }
        self.layers.push(layer);
        true
    }

    /// Remove all worn layers unconditionally.
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Worn layers in insertion (= stacking) order.
    pub fn layers(&self) -> &[SelectedLayer] {
        &self.layers
    }

    /// Whether a specific `(category, name)` is currently worn.
    pub fn is_selected(&self, category: Category, name: &str) -> bool {
        self.layers
            .iter()
            .any(|l| l.category == category && l.name == name)
    }

    /// Count of worn layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether nothing is worn.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[derive(Clone, Debug)]
/// Session context binding one wardrobe catalog to one selection.
///
/// There is no module-global state: construct a session per user/page
/// lifetime and drop it to tear everything down.
pub struct Session {
    wardrobe: Wardrobe,
    selection: Selection,
}

impl Session {
    /// Start a session over a loaded wardrobe with nothing selected.
    pub fn new(wardrobe: Wardrobe) -> Self {
        Self {
            wardrobe,
            selection: Selection::new(),
        }
    }

    /// The catalog this session selects from.
    pub fn wardrobe(&self) -> &Wardrobe {
        &self.wardrobe
    }

    /// Current selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Toggle a catalog entry by category and filename. Returns `true` when
    /// the layer is worn after the call.
    pub fn toggle(&mut self, category: Category, name: &str) -> TroopResult<bool> {
        let entry = self.wardrobe.entry(category, name).ok_or_else(|| {
            TroopError::selection(format!("no wardrobe entry '{name}' in category '{category}'"))
        })?;
        let layer = SelectedLayer {
            category,
            name: entry.name.clone(),
            source: entry.source.clone(),
            offset: entry.offset,
        };
        let worn = self.selection.toggle(layer);
        tracing::debug!(%category, name, worn, "toggled layer");
        Ok(worn)
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.selection.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/selection.rs"]
mod tests;
