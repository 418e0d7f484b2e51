pub mod dirty;
pub mod export;
pub mod raster;

pub use dirty::{DirtyRegion, PixelRect};
pub use export::encode_png;
pub use raster::{Raster, RasterSnapshot};
