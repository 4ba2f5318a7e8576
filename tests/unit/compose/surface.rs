use std::sync::Arc;

use super::*;

fn solid(width: u32, height: u32, px: [u8; 4]) -> Sprite {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..width * height {
        data.extend_from_slice(&px);
    }
    Sprite {
        width,
        height,
        rgba8_premul: Arc::new(data),
    }
}

#[test]
fn new_surface_is_fully_transparent() {
    let s = Surface::new(4, 3);
    assert_eq!(s.width(), 4);
    assert_eq!(s.height(), 3);
    assert!(s.data().iter().all(|&b| b == 0));
}

#[test]
fn avatar_surface_has_fixed_dimensions() {
    let s = Surface::avatar();
    assert_eq!((s.width(), s.height()), (AVATAR_WIDTH, AVATAR_HEIGHT));
    assert_eq!((AVATAR_WIDTH, AVATAR_HEIGHT), (91, 139));
}

#[test]
fn opaque_draw_replaces_destination() {
    let mut s = Surface::new(2, 2);
    s.draw_sprite(&solid(2, 2, [0, 255, 0, 255]), 0, 0);
    s.draw_sprite(&solid(1, 1, [255, 0, 0, 255]), 1, 0);

    assert_eq!(s.pixel(0, 0), [0, 255, 0, 255]);
    assert_eq!(s.pixel(1, 0), [255, 0, 0, 255]);
    assert_eq!(s.pixel(0, 1), [0, 255, 0, 255]);
}

#[test]
fn transparent_source_pixels_are_noops() {
    let mut s = Surface::new(1, 1);
    s.draw_sprite(&solid(1, 1, [50, 60, 70, 255]), 0, 0);
    s.draw_sprite(&solid(1, 1, [0, 0, 0, 0]), 0, 0);
    assert_eq!(s.pixel(0, 0), [50, 60, 70, 255]);
}

#[test]
fn semi_transparent_draw_blends_source_over() {
    let mut s = Surface::new(1, 1);
    s.draw_sprite(&solid(1, 1, [0, 0, 255, 255]), 0, 0);
    // Premultiplied 50% white over opaque blue.
    s.draw_sprite(&solid(1, 1, [128, 128, 128, 128]), 0, 0);

    let px = s.pixel(0, 0);
    assert_eq!(px[3], 255);
    assert_eq!(px[0], 128);
    assert_eq!(px[1], 128);
    // src + dst * (1 - a): 128 + 255 * 127/255
    assert_eq!(px[2], 128u8.saturating_add(((255u32 * 127 + 127) / 255) as u8));
}

#[test]
fn draws_outside_the_surface_are_clipped() {
    let mut s = Surface::new(3, 3);
    s.draw_sprite(&solid(2, 2, [255, 0, 0, 255]), 2, 2);
    assert_eq!(s.pixel(2, 2), [255, 0, 0, 255]);
    assert_eq!(s.pixel(1, 1), [0, 0, 0, 0]);

    // Entirely off-surface draws touch nothing.
    s.draw_sprite(&solid(2, 2, [0, 255, 0, 255]), 5, 5);
    s.draw_sprite(&solid(2, 2, [0, 255, 0, 255]), -2, -2);
    assert_eq!(s.pixel(0, 0), [0, 0, 0, 0]);
}

#[test]
fn negative_offsets_draw_the_visible_remainder() {
    let mut s = Surface::new(3, 3);
    s.draw_sprite(&solid(2, 2, [255, 0, 0, 255]), -1, -1);
    assert_eq!(s.pixel(0, 0), [255, 0, 0, 255]);
    assert_eq!(s.pixel(1, 0), [0, 0, 0, 0]);
    assert_eq!(s.pixel(0, 1), [0, 0, 0, 0]);
}

#[test]
fn to_rgba_image_unpremultiplies() {
    let mut s = Surface::new(1, 1);
    s.draw_sprite(&solid(1, 1, [64, 32, 16, 128]), 0, 0);

    let img = s.to_rgba_image().unwrap();
    let px = img.get_pixel(0, 0).0;
    assert_eq!(px[3], 128);
    assert_eq!(px[0], ((64u32 * 255 + 64) / 128) as u8);
    assert_eq!(px[1], ((32u32 * 255 + 64) / 128) as u8);
    assert_eq!(px[2], ((16u32 * 255 + 64) / 128) as u8);
}

#[test]
fn encode_png_round_trips_dimensions_and_pixels() {
    let mut s = Surface::new(2, 1);
    s.draw_sprite(&solid(1, 1, [10, 200, 30, 255]), 1, 0);

    let png = s.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
    assert_eq!(decoded.get_pixel(1, 0).0, [10, 200, 30, 255]);
}
