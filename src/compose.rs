pub mod exporter;
pub mod surface;
