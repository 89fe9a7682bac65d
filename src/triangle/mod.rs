//! Triangle store: development values keyed by measure and origin period

mod data;
pub mod loader;

pub use data::{MeasureType, Triangle, TriangleSet};
pub use loader::{load_triangles, load_triangles_from_reader, TriangleLayout};
