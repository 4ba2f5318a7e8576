use std::io::Cursor;

use crate::{
    assets::decode::Sprite,
    foundation::error::{TroopError, TroopResult},
};

/// Avatar canvas width in pixels (the base figure's bounding box).
pub const AVATAR_WIDTH: u32 = 91;
/// Avatar canvas height in pixels.
pub const AVATAR_HEIGHT: u32 = 139;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Off-screen premultiplied-RGBA8 raster surface.
///
/// A fresh surface is allocated per export and owned exclusively by that
/// export; surfaces are never reused across operations.
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    /// Allocate a fresh avatar-sized surface.
    pub fn avatar() -> Self {
        Self::new(AVATAR_WIDTH, AVATAR_HEIGHT)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Premultiplied RGBA8 value of one pixel.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` is outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Source-over draw of `sprite` with its top-left corner at `(x, y)`.
    ///
    /// Later draws occlude earlier ones at overlapping pixels. Pixels
    /// falling outside the surface are clipped; negative offsets are legal.
    pub fn draw_sprite(&mut self, sprite: &Sprite, x: i32, y: i32) {
        let (sw, sh) = (i64::from(sprite.width), i64::from(sprite.height));
        let (dw, dh) = (i64::from(self.width), i64::from(self.height));
        let (x, y) = (i64::from(x), i64::from(y));

        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + sw).min(dw);
        let y1 = (y + sh).min(dh);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let src = sprite.rgba8_premul.as_slice();
        for dy in y0..y1 {
            let sy = dy - y;
            for dx in x0..x1 {
                let sx = dx - x;
                let si = ((sy * sw + sx) * 4) as usize;
                let di = ((dy * dw + dx) * 4) as usize;
                let out = over(
                    [
                        self.data[di],
                        self.data[di + 1],
                        self.data[di + 2],
                        self.data[di + 3],
                    ],
                    [src[si], src[si + 1], src[si + 2], src[si + 3]],
                );
                self.data[di..di + 4].copy_from_slice(&out);
            }
        }
    }

    /// Convert to a straight-alpha [`image::RgbaImage`] for encoding.
    pub fn to_rgba_image(&self) -> TroopResult<image::RgbaImage> {
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            px[0] = unpremul(px[0], a);
            px[1] = unpremul(px[1], a);
            px[2] = unpremul(px[2], a);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| TroopError::export("surface buffer does not match its dimensions"))
    }

    /// Encode the surface as PNG bytes.
    pub fn encode_png(&self) -> TroopResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| TroopError::export(format!("encode png: {e}")))?;
        Ok(buf)
    }
}

/// Premultiplied source-over: `out = src + dst * (1 - src_alpha)`.
fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn unpremul(c: u8, a: u32) -> u8 {
    ((u32::from(c) * 255 + a / 2) / a).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/compose/surface.rs"]
mod tests;
