pub mod io;
pub mod rgba;

pub use self::rgba::{ImageRgba8, Rgba8, RgbaImage};
