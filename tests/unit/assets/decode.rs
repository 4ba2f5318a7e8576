use std::io::Cursor;

use super::*;

#[test]
fn decode_layer_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let sprite = decode_layer(&buf).unwrap();
    assert_eq!(sprite.width, 1);
    assert_eq!(sprite.height, 1);
    assert_eq!(
        sprite.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_layer_gif_round_trips() {
    let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([10, 20, 30, 255]));

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Gif)
        .unwrap();

    let sprite = decode_layer(&buf).unwrap();
    assert_eq!((sprite.width, sprite.height), (2, 3));
    assert_eq!(sprite.rgba8_premul.len(), 2 * 3 * 4);
}

#[test]
fn decode_layer_fully_transparent_zeroes_color() {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([200, 200, 200, 0]));

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let sprite = decode_layer(&buf).unwrap();
    assert_eq!(sprite.rgba8_premul.as_slice(), &[0, 0, 0, 0]);
}

#[test]
fn decode_layer_rejects_garbage() {
    assert!(decode_layer(b"definitely not an image").is_err());
}
