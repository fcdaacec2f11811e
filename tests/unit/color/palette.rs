use super::*;

fn approx(a: Rgb, b: Rgb) -> bool {
    (a.r - b.r).abs() < 1e-9 && (a.g - b.g).abs() < 1e-9 && (a.b - b.b).abs() < 1e-9
}

#[test]
fn rgb_deserializes_from_hex_object_and_array() {
    let hex: Rgb = serde_json::from_str("\"#ff8800\"").unwrap();
    assert!(approx(hex, Rgb::new(1.0, 136.0 / 255.0, 0.0)));

    let obj: Rgb = serde_json::from_str(r#"{"r":0.25,"g":0.5,"b":1}"#).unwrap();
    assert_eq!(obj, Rgb::new(0.25, 0.5, 1.0));

    let arr: Rgb = serde_json::from_str("[0, 1, 1]").unwrap();
    assert_eq!(arr, Rgb::CYAN);
}

#[test]
fn rgb_rejects_bad_shapes() {
    assert!(serde_json::from_str::<Rgb>("\"#fff\"").is_err());
    assert!(serde_json::from_str::<Rgb>("\"#gg0000\"").is_err());
    assert!(serde_json::from_str::<Rgb>("[1, 0]").is_err());
    assert!(serde_json::from_str::<Rgb>("[1, 0, 0, 1]").is_err());
}

#[test]
fn hex_prefix_is_optional() {
    assert_eq!(parse_hex("00ffff").unwrap(), Rgb::CYAN);
    assert_eq!(parse_hex(" #FFFFFF ").unwrap(), Rgb::WHITE);
}

#[test]
fn pulse_starts_on_primary_and_peaks_on_secondary() {
    let p = PaletteEntry::new(Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.0, 0.0, 1.0));
    assert!(approx(p.pulse(0.0, 0.5), p.primary));
    assert!(approx(p.pulse(1.0, 0.5), p.secondary));
    assert!(approx(p.pulse(2.0, 0.5), p.primary));
}

#[test]
fn hue_of_primaries() {
    let (h, s) = hue_saturation(Rgb::new(1.0, 0.0, 0.0));
    assert!(h.abs() < 1e-9 && (s - 1.0).abs() < 1e-9);
    let (h, _) = hue_saturation(Rgb::new(1.0, 1.0, 0.0));
    assert!((h - 60.0).abs() < 1e-9);
    let (h, _) = hue_saturation(Rgb::new(0.0, 0.0, 1.0));
    assert!((h - 240.0).abs() < 1e-9);
    assert_eq!(hue_saturation(Rgb::new(0.4, 0.4, 0.4)), (0.0, 0.0));
}

#[test]
fn boost_yellow_only_touches_yellowish_colors() {
    let gold = Rgb::new(0.8, 0.7, 0.1);
    let boosted = boost_yellow(gold, 0.25);
    assert!(boosted.r > gold.r && boosted.g > gold.g);
    assert!(boosted.r <= 1.0 && boosted.g <= 1.0);

    let blue = Rgb::new(0.0, 0.2, 0.9);
    assert_eq!(boost_yellow(blue, 0.25), blue);
    assert_eq!(boost_yellow(Rgb::WHITE, 0.25), Rgb::WHITE);
    assert_eq!(boost_yellow(gold, 0.0), gold);
}

#[test]
fn sparkle_is_deterministic_and_bounded() {
    for i in 0..200 {
        let k = sparkle(i, 7, 0.1);
        assert!((1.1..1.2).contains(&k), "{k}");
        assert_eq!(k, sparkle(i, 7, 0.1));
    }
    assert_eq!(sparkle(3, 9, 0.0), 1.0);
}

#[test]
fn sparkle_changes_between_ticks() {
    let differs = (0..50).any(|i| sparkle(i, 1, 0.1) != sparkle(i, 2, 0.1));
    assert!(differs);
}
