pub mod input;
pub mod shortcuts;
pub mod surface;
pub mod upload;

pub use surface::{DrawingSurface, StrokeState};
