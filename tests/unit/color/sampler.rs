use std::sync::Arc;

use super::*;

fn red_blue_2x2() -> RasterImage {
    #[rustfmt::skip]
    let data = vec![
        255, 0, 0, 255,   0, 255, 0, 255,
        255, 255, 0, 255, 0, 0, 255, 255,
    ];
    RasterImage::from_rgba8(2, 2, data).unwrap()
}

#[test]
fn missing_image_is_white_everywhere() {
    for (u, v) in [(0.0, 0.0), (0.5, 0.5), (1.0, 1.0), (-4.0, 9.0)] {
        assert_eq!(sample_color(None, u, v), Rgb::WHITE);
    }
}

#[test]
fn malformed_image_is_white() {
    let broken = RasterImage {
        width: 3,
        height: 3,
        rgba8: Arc::new(vec![0; 4]),
    };
    assert_eq!(sample_color(Some(&broken), 0.5, 0.5), Rgb::WHITE);
}

#[test]
fn origin_is_top_left_pixel() {
    let img = red_blue_2x2();
    assert_eq!(sample_color(Some(&img), 0.0, 0.0), Rgb::new(1.0, 0.0, 0.0));
}

#[test]
fn nearest_neighbour_snaps_to_closest_pixel() {
    let img = red_blue_2x2();
    assert_eq!(sample_color(Some(&img), 0.49, 0.0), Rgb::new(1.0, 0.0, 0.0));
    assert_eq!(sample_color(Some(&img), 0.99, 0.99), Rgb::new(0.0, 0.0, 1.0));
    assert_eq!(sample_color(Some(&img), 0.2, 0.8), Rgb::new(1.0, 1.0, 0.0));
    assert_eq!(sample_color(Some(&img), 1.0, 1.0), Rgb::new(0.0, 0.0, 1.0));
    assert_eq!(sample_color(Some(&img), 1.0, 0.0), Rgb::new(0.0, 1.0, 0.0));
}

#[test]
fn out_of_range_and_nan_coordinates_clamp() {
    let img = red_blue_2x2();
    assert_eq!(sample_color(Some(&img), -3.0, -3.0), Rgb::new(1.0, 0.0, 0.0));
    assert_eq!(sample_color(Some(&img), 7.0, 7.0), Rgb::new(0.0, 0.0, 1.0));
    assert_eq!(
        sample_color(Some(&img), f64::NAN, f64::NAN),
        Rgb::new(1.0, 0.0, 0.0)
    );
}

#[test]
fn channels_stay_in_unit_range() {
    let data: Vec<u8> = (0..16u8).map(|i| i.wrapping_mul(17)).collect();
    let img = RasterImage::from_rgba8(2, 2, data).unwrap();
    for i in 0..=10 {
        let t = i as f64 / 10.0;
        let c = sample_color(Some(&img), t, 1.0 - t);
        for ch in [c.r, c.g, c.b] {
            assert!((0.0..=1.0).contains(&ch));
        }
    }
}
