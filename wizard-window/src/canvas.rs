use autotile_wizard::{tile::TileRect, Mask};
use glam::{IVec2, UVec2};
use image::RgbaImage;

pub type Rgba = [u8; 4];

/// RGBA frame buffer with clipped drawing
pub struct Canvas<'f> {
    frame: &'f mut [u8],
    dims: UVec2,
}

impl<'f> Canvas<'f> {
    pub fn new(frame: &'f mut [u8], dims: UVec2) -> Self {
        return Self { frame, dims };
    }

    pub fn dims(&self) -> UVec2 {
        return self.dims;
    }

    pub fn clear(&mut self, color: Rgba) {
        for pixel in self.frame.chunks_exact_mut(4) {
            pixel.copy_from_slice(&color);
        }
    }

    fn pixel_mut(&mut self, at: IVec2) -> Option<&mut [u8]> {
        if at.x < 0 || at.y < 0 || at.x as u32 >= self.dims.x || at.y as u32 >= self.dims.y {
            return None;
        }
        let idx = 4 * (at.y as usize * self.dims.x as usize + at.x as usize);
        return self.frame.get_mut(idx..idx + 4);
    }

    pub fn put(&mut self, at: IVec2, color: Rgba) {
        if let Some(pixel) = self.pixel_mut(at) {
            pixel.copy_from_slice(&color);
        }
    }

    pub fn fill_rect(&mut self, pos: IVec2, size: UVec2, color: Rgba) {
        for y in 0..size.y as i32 {
            for x in 0..size.x as i32 {
                self.put(pos + IVec2::new(x, y), color);
            }
        }
    }

    pub fn outline_rect(&mut self, pos: IVec2, size: UVec2, color: Rgba) {
        let max = pos + size.as_ivec2() - IVec2::ONE;
        for x in pos.x..=max.x {
            self.put(IVec2::new(x, pos.y), color);
            self.put(IVec2::new(x, max.y), color);
        }
        for y in pos.y..=max.y {
            self.put(IVec2::new(pos.x, y), color);
            self.put(IVec2::new(max.x, y), color);
        }
    }

    /// Blends everything inside the rect toward `color`
    pub fn highlight(&mut self, pos: IVec2, size: UVec2, color: Rgba, factor: f32) {
        for y in 0..size.y as i32 {
            for x in 0..size.x as i32 {
                if let Some(pixel) = self.pixel_mut(pos + IVec2::new(x, y)) {
                    let blended = blend_rgba([pixel[0], pixel[1], pixel[2], pixel[3]], color, factor);
                    pixel.copy_from_slice(&blended);
                }
            }
        }
    }

    /// Copies `rect` out of `image` to `at`, multiplying each channel by
    /// `tint`. Transparent pixels are left alone.
    pub fn blit(&mut self, image: &RgbaImage, rect: TileRect, at: IVec2, tint: [f32; 3]) {
        let (width, height) = image.dimensions();
        for y in 0..rect.size.y {
            for x in 0..rect.size.x {
                let src = rect.pos + UVec2::new(x, y);
                if src.x >= width || src.y >= height {
                    continue;
                }
                let [r, g, b, a] = image.get_pixel(src.x, src.y).0;
                if a == 0 {
                    continue;
                }
                let color = [
                    scale_channel(r, tint[0]),
                    scale_channel(g, tint[1]),
                    scale_channel(b, tint[2]),
                    255,
                ];
                self.put(at + UVec2::new(x, y).as_ivec2(), color);
            }
        }
    }
}

/// Bits 1, 2 and 4 of a mask light up the red, green and blue channels
pub fn mask_color(mask: Mask) -> Rgba {
    let channel = |bit: u8| if mask.value() & bit != 0 { 204 } else { 51 };
    return [channel(1), channel(2), channel(4), 255];
}

fn scale_channel(c: u8, factor: f32) -> u8 {
    return (c as f32 * factor).clamp(0.0, 255.0) as u8;
}

fn rgba_f32_to_u8(a: f32) -> u8 {
    return (a * 255.0).round().clamp(0.0, 255.0) as u8;
}

pub fn blend_rgb(a: f32, b: f32, t: f32) -> f32 {
    return (((1.0 - t) * a.powi(2)) + (t * b.powi(2))).sqrt();
}

pub fn blend_alpha(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

pub fn blend_rgba(a: Rgba, b: Rgba, factor: f32) -> Rgba {
    let conv_to_f32 = |c| (c as f32) / 255.0;
    let [ar, ag, ab, aa] = a.map(conv_to_f32);
    let [br, bg, bb, ba] = b.map(conv_to_f32);
    let t = factor;
    return [
        blend_rgb(ar, br, t),
        blend_rgb(ag, bg, t),
        blend_rgb(ab, bb, t),
        blend_alpha(aa, ba, t),
    ]
    .map(rgba_f32_to_u8);
}
