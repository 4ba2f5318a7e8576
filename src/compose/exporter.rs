use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Datelike, NaiveDateTime, Timelike};
use rayon::prelude::*;

use crate::{
    assets::decode::{self, Sprite},
    assets::source::LayerSource,
    compose::surface::Surface,
    foundation::error::{TroopError, TroopResult},
    session::selection::Selection,
};

/// Default base figure sprite, relative to the assets root. Always drawn
/// first, beneath every decoration.
pub const BASE_FIGURE: &str = "skeleton.gif";

#[derive(Clone, Debug, PartialEq, Eq)]
/// One pending layer fetch in an export operation.
pub struct LoadTask {
    /// Sprite path relative to the assets root.
    pub source: String,
    /// Offset at which the decoded sprite will be drawn.
    pub offset: (i32, i32),
}

/// Build the ordered load plan for one export: the base figure first at
/// `(0, 0)`, then every selected layer in insertion order.
///
/// Draw order equals plan order, so this ordering fixes the visual stacking
/// bit-for-bit.
pub fn build_plan(base_source: &str, selection: &Selection) -> Vec<LoadTask> {
    let mut plan = Vec::with_capacity(1 + selection.len());
    plan.push(LoadTask {
        source: base_source.to_string(),
        offset: (0, 0),
    });
    for layer in selection.layers() {
        plan.push(LoadTask {
            source: layer.source.clone(),
            offset: layer.offset,
        });
    }
    plan
}

/// Fetch and decode every planned layer concurrently, joined into a single
/// result.
///
/// The indexed collect is the join barrier: output order is plan order no
/// matter which load finishes first, and the first failure fails the whole
/// export with an error naming the offending source path.
pub fn load_all(
    source: &dyn LayerSource,
    plan: &[LoadTask],
) -> TroopResult<Vec<(Sprite, (i32, i32))>> {
    plan.par_iter()
        .map(|task| {
            let bytes = source.fetch(&task.source)?;
            let sprite = decode::decode_layer(&bytes)
                .map_err(|e| TroopError::load(format!("decode layer '{}': {e}", task.source)))?;
            Ok((sprite, task.offset))
        })
        .collect()
}

/// Composite the base figure and the current selection onto a fresh
/// avatar-sized surface, strictly in plan order.
///
/// An empty selection yields the base figure alone.
#[tracing::instrument(skip(source, selection), fields(layers = selection.len()))]
pub fn compose(
    source: &dyn LayerSource,
    base_source: &str,
    selection: &Selection,
) -> TroopResult<Surface> {
    let plan = build_plan(base_source, selection);
    tracing::debug!(tasks = plan.len(), "loading layers");
    let loaded = load_all(source, &plan)?;

    tracing::debug!("compositing");
    let mut surface = Surface::avatar();
    for (sprite, (x, y)) in &loaded {
        surface.draw_sprite(sprite, *x, *y);
    }
    Ok(surface)
}

/// Export filename for a wall-clock `timestamp`: day, month, year, hour,
/// minute and second concatenated without padding or separators.
pub fn export_filename(timestamp: NaiveDateTime) -> String {
    format!(
        "avatar_{}{}{}{}{}{}.png",
        timestamp.day(),
        timestamp.month(),
        timestamp.year(),
        timestamp.hour(),
        timestamp.minute(),
        timestamp.second()
    )
}

/// Compose the avatar and write it as a timestamp-named PNG under
/// `out_dir`. Returns the path of the written file.
#[tracing::instrument(skip(source, selection))]
pub fn export_png(
    source: &dyn LayerSource,
    base_source: &str,
    selection: &Selection,
    out_dir: &Path,
    timestamp: NaiveDateTime,
) -> TroopResult<PathBuf> {
    let surface = compose(source, base_source, selection)?;
    let png = surface.encode_png()?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;
    let path = out_dir.join(export_filename(timestamp));
    std::fs::write(&path, png)
        .map_err(|e| TroopError::export(format!("write '{}': {e}", path.display())))?;

    tracing::debug!(path = %path.display(), "export done");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/exporter.rs"]
mod tests;
