//! Troop is an avatar layer compositor.
//!
//! A wardrobe catalog maps clothing categories to decoration sprites, a
//! selection session tracks which sprites are currently worn, and the
//! exporter flattens the base figure plus every worn layer into a single
//! 91×139 PNG.
//!
//! # Pipeline overview
//!
//! 1. **Catalog**: `wardrobe.json -> Wardrobe` (offset suffixes decoded once
//!    at load time)
//! 2. **Select**: `Session::toggle` maintains the worn layers in insertion
//!    order; insertion order *is* the stacking order
//! 3. **Load**: every planned layer is fetched and decoded concurrently and
//!    joined into a single result (a failed load fails the export, naming
//!    the offending path)
//! 4. **Compose**: sprites are drawn onto a fresh surface strictly in plan
//!    order — base figure first, then selection order — independent of load
//!    completion order
//! 5. **Export**: the surface is encoded as PNG and written under a
//!    timestamp-derived filename
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic stacking**: draw order is fixed by the load plan, never
//!   by load completion order.
//! - **No IO in compositing**: all fetching/decoding is front-loaded before
//!   the first pixel is drawn.
//! - **Premultiplied RGBA8** internally; straight alpha only at PNG encode.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod catalog;
mod compose;
mod foundation;
mod session;

pub use assets::decode::{Sprite, decode_layer};
pub use assets::source::{FsSource, LayerSource, normalize_rel_path};
pub use catalog::wardrobe::{CatalogEntry, Category, Wardrobe};
pub use compose::exporter::{
    BASE_FIGURE, LoadTask, build_plan, compose, export_filename, export_png, load_all,
};
pub use compose::surface::{AVATAR_HEIGHT, AVATAR_WIDTH, Surface};
pub use foundation::error::{TroopError, TroopResult};
pub use session::selection::{SelectedLayer, Selection, Session};
