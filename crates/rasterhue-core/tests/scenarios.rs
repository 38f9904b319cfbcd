//! End-to-end classification scenarios through the public API.

use rasterhue_core::{ColorScale, Rgba, Scaling, colorize};

fn check(cs: &ColorScale, value: f64, expected: [u8; 4]) {
    assert_eq!(
        cs.lookup(value),
        Some(Rgba::from(expected)),
        "lookup({value}) should be {expected:?}"
    );
}

/// Absolute ramp from red (alpha 0) to blue with stops at `values`.
fn red_to_blue(values: [f64; 5], interpolate: bool, force: bool) -> ColorScale {
    let mut cs = ColorScale::empty();
    cs.set_interpolate(interpolate);
    cs.set_force_values_into_range(force);
    cs.set_scaling(Scaling::Absolute);
    cs.set_transparent_value(-1.0);
    cs.put_rgba(values[0], 255, 0, 0, 0);
    cs.put_rgb(values[1], 172, 0, 64);
    cs.put_rgb(values[2], 128, 0, 128);
    cs.put_rgb(values[3], 64, 0, 172);
    cs.put_rgb(values[4], 0, 0, 255);
    cs
}

fn quantile_scale(colors: &[[u8; 4]], quantiles: Option<&[f64]>) -> ColorScale {
    let mut cs = ColorScale::empty();
    cs.set_interpolate(true);
    cs.set_scaling(Scaling::Quantile);
    cs.set_transparent_value(-1.0);
    for (i, &c) in colors.iter().enumerate() {
        cs.put(i as f64 + 1.0, Rgba::from(c));
    }
    cs.set_scale_range_with_quantiles(0.0, 100.0, quantiles);
    cs
}

const RED: [u8; 4] = [255, 0, 0, 255];
const CLEAR_RED: [u8; 4] = [255, 0, 0, 0];
const PURPLE: [u8; 4] = [128, 0, 128, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const CLEAR: [u8; 4] = [0, 0, 0, 0];

const EVEN: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];
const UNEVEN: [f64; 5] = [0.0, 12.0, 50.0, 62.0, 100.0];

// ── Absolute ────────────────────────────────────────────────────

#[test]
fn test_absolute_no_interpolate() {
    let cs = red_to_blue(EVEN, false, false);
    check(&cs, -10.0, CLEAR);
    check(&cs, -1.0, CLEAR);
    check(&cs, 0.0, CLEAR_RED);
    check(&cs, 1e-7, CLEAR_RED);
    check(&cs, 24.0, CLEAR_RED);
    check(&cs, 25.0, [172, 0, 64, 255]);
    check(&cs, 60.0, PURPLE);
    check(&cs, 90.0, [64, 0, 172, 255]);
    check(&cs, 100.0, BLUE);
    check(&cs, 110.0, CLEAR);
}

#[test]
fn test_absolute_no_interpolate_force_into_range() {
    let cs = red_to_blue(EVEN, false, true);
    check(&cs, -10.0, CLEAR_RED);
    check(&cs, -1.0, CLEAR);
    check(&cs, 0.0, CLEAR_RED);
    check(&cs, 24.0, CLEAR_RED);
    check(&cs, 60.0, PURPLE);
    check(&cs, 100.0, BLUE);
    check(&cs, 110.0, BLUE);
}

#[test]
fn test_absolute_interpolate() {
    let cs = red_to_blue(UNEVEN, true, false);
    check(&cs, -10.0, CLEAR);
    check(&cs, -1.0, CLEAR);
    check(&cs, 0.0, CLEAR_RED);
    check(&cs, 1e-7, CLEAR_RED);
    check(&cs, 6.0, [214, 0, 32, 127]);
    check(&cs, 12.0, [172, 0, 64, 255]);
    check(&cs, 31.0, [150, 0, 96, 255]);
    check(&cs, 50.0, PURPLE);
    check(&cs, 56.0, [96, 0, 150, 255]);
    check(&cs, 62.0, [64, 0, 172, 255]);
    check(&cs, 81.0, [32, 0, 214, 255]);
    check(&cs, 100.0, BLUE);
    check(&cs, 110.0, CLEAR);
}

#[test]
fn test_absolute_interpolate_force_into_range() {
    let cs = red_to_blue(UNEVEN, true, true);
    check(&cs, -10.0, CLEAR_RED);
    check(&cs, -1.0, CLEAR);
    check(&cs, 6.0, [214, 0, 32, 127]);
    check(&cs, 81.0, [32, 0, 214, 255]);
    check(&cs, 110.0, BLUE);
}

// ── Quantile ────────────────────────────────────────────────────

#[test]
fn test_quantiles_fall_back_to_linear_stretch() {
    for quantiles in [None, Some(&[][..])] {
        let cs = quantile_scale(&[RED, BLUE], quantiles);
        check(&cs, 0.0, RED);
        check(&cs, 50.0, [127, 0, 128, 255]);
        check(&cs, 100.0, BLUE);
    }
}

#[test]
fn test_quantiles_one() {
    let cs = quantile_scale(&[RED, PURPLE, BLUE], Some(&[75.0]));
    check(&cs, 0.0, RED);
    check(&cs, 75.0, PURPLE);
    check(&cs, 100.0, BLUE);
}

#[test]
fn test_quantiles_two() {
    let cs = quantile_scale(&[RED, PURPLE, BLUE], Some(&[70.0, 90.0]));
    check(&cs, 0.0, RED);
    check(&cs, 70.0, PURPLE);
    check(&cs, 90.0, [64, 0, 191, 255]);
    check(&cs, 100.0, BLUE);
}

#[test]
fn test_quantiles_three() {
    let cs = quantile_scale(&[CLEAR_RED, PURPLE, BLUE], Some(&[60.0, 70.0, 90.0]));
    check(&cs, 0.0, CLEAR_RED);
    check(&cs, 70.0, PURPLE);
    check(&cs, 100.0, BLUE);
    check(&cs, 90.0, [64, 0, 191, 255]);
    // 75 is a quarter of the way from the 70 cut to the 90 cut.
    check(&cs, 75.0, [112, 0, 144, 255]);
}

#[test]
fn test_quantiles_four() {
    let cs = quantile_scale(&[CLEAR_RED, PURPLE, BLUE], Some(&[60.0, 65.0, 70.0, 90.0]));
    check(&cs, 0.0, CLEAR_RED);
    check(&cs, 65.0, PURPLE);
    check(&cs, 100.0, BLUE);
    check(&cs, 60.0, [192, 0, 64, 127]);
}

#[test]
fn test_quantiles_five() {
    let cs = quantile_scale(
        &[CLEAR_RED, PURPLE, BLUE],
        Some(&[60.0, 65.0, 70.0, 80.0, 90.0]),
    );
    check(&cs, 0.0, CLEAR_RED);
    check(&cs, 70.0, PURPLE);
    check(&cs, 100.0, BLUE);
    check(&cs, 60.0, [213, 0, 42, 85]);
    check(&cs, 65.0, [171, 0, 85, 170]);
    check(&cs, 80.0, [86, 0, 170, 255]);
    check(&cs, 90.0, [43, 0, 212, 255]);
    // Between cuts the synthesized colors are blended and rounded.
    check(&cs, 62.5, [192, 0, 64, 128]);
    check(&cs, 30.0, [234, 0, 21, 43]);
}

#[test]
fn test_more_colors_than_quantiles() {
    let odd = [RED, [170, 0, 60, 255], PURPLE, [120, 0, 140, 255], BLUE];
    let even = [
        RED,
        [170, 0, 60, 255],
        PURPLE,
        [120, 0, 140, 255],
        [80, 0, 180, 255],
        BLUE,
    ];

    for colors in [&odd[..], &even[..]] {
        let cs = quantile_scale(colors, Some(&[75.0]));
        check(&cs, 0.0, RED);
        check(&cs, 75.0, PURPLE);
        check(&cs, 100.0, BLUE);
    }

    let cs = quantile_scale(&odd, Some(&[75.0, 90.0]));
    check(&cs, 75.0, [170, 0, 60, 255]);
    check(&cs, 90.0, PURPLE);
    check(&cs, 100.0, BLUE);

    let cs = quantile_scale(&even, Some(&[75.0, 90.0]));
    check(&cs, 75.0, [170, 0, 60, 255]);
    check(&cs, 90.0, [120, 0, 140, 255]);
    check(&cs, 100.0, BLUE);
}

// ── Definitions ─────────────────────────────────────────────────

const GRAYSCALE_XML: &str = "<ColorMap name=\"Grayscale\">\
    <Scaling>MinMax</Scaling>\
    <Interpolate>1</Interpolate>\
    <ForceValuesIntoRange>0</ForceValuesIntoRange>\
    <NullColor color=\"0,0,0\" opacity=\"0\"/>\
    <Color value=\"0.0\" color=\"0,0,0\" opacity=\"255\"/>\
    <Color value=\"1.0\" color=\"255,255,255\"/>\
    </ColorMap>";

const GRAYSCALE_JSON: &str = r#"{"Scaling":"MinMax","Interpolate":"1","ForceValuesIntoRange":"0","NullColor":{"color":"0,0,0","opacity":"0"},"Colors":[{"color":"0,0,0","opacity":"255","value":"0.0"},{"color":"255,255,255","opacity":"255","value":"1.0"}]}"#;

#[test]
fn test_xml_and_json_definitions_are_equal() {
    let xml = ColorScale::from_xml_str(GRAYSCALE_XML).unwrap();
    let json = ColorScale::from_json_str(GRAYSCALE_JSON).unwrap();
    assert_eq!(xml, json);
}

#[test]
fn test_scale_range_breaks_equality() {
    let xml = ColorScale::from_xml_str(GRAYSCALE_XML).unwrap();
    let mut json = ColorScale::from_json_str(GRAYSCALE_JSON).unwrap();
    json.set_scale_range(0.0, 1000.0);
    assert_ne!(xml, json);
}

#[test]
fn test_grayscale_stretches_over_data_range() {
    let mut cs = ColorScale::from_xml_str(GRAYSCALE_XML).unwrap();
    cs.set_scale_range(0.0, 1000.0);
    check(&cs, 0.0, [0, 0, 0, 255]);
    check(&cs, 1000.0, [255, 255, 255, 255]);
    check(&cs, 1000.5, CLEAR);

    let pixels = colorize(&cs, &[-9999.0, 0.0, 1000.0], Some(-9999.0));
    assert_eq!(pixels[0], cs.null_color());
    assert_eq!(pixels[2], Rgba::rgb(255, 255, 255));
}
