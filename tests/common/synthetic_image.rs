use perspector::image::{Rgba8, RgbaImage};

/// Generates a deterministic RGBA test pattern in which every pixel carries
/// a distinct color derived from its coordinates.
pub fn gradient_rgba(width: usize, height: usize) -> RgbaImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = RgbaImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let px = Rgba8::new(
                (x % 256) as u8,
                (y % 256) as u8,
                ((x * 7 + y * 13) % 256) as u8,
                255,
            );
            img.set(x, y, px);
        }
    }
    img
}
