use sl_core::{CURVE_ABSORBANCE, CURVE_CORRECTED, CURVE_TRANSMITTANCE};
use sl_pipeline::{PipelineError, ProcessingOptions, run};

const SAMPLE: &[u8] = b"500 10\n501 12\n";
const WATER: &[u8] = b"500 8\n501 8\n";
const DARK: &[u8] = b"500 2\n501 2\n";

#[test]
fn reference_scenario_end_to_end() {
    let bundle = run(SAMPLE, WATER, DARK, &ProcessingOptions::default()).unwrap();

    assert_eq!(bundle.wavelength(), &[500.0, 501.0]);
    assert_eq!(bundle.curve(CURVE_CORRECTED).unwrap(), &[8.0, 10.0]);

    let t = bundle.curve(CURVE_TRANSMITTANCE).unwrap();
    assert!((t[0] - 1.3333333333).abs() < 1e-9);
    assert!((t[1] - 1.6666666666).abs() < 1e-9);

    let a = bundle.curve(CURVE_ABSORBANCE).unwrap();
    assert!((a[0] + 0.1249387366).abs() < 1e-9);
    assert!((a[1] + 0.2218487496).abs() < 1e-9);
}

#[test]
fn every_curve_matches_axis_length() {
    let bundle = run(SAMPLE, WATER, DARK, &ProcessingOptions::default()).unwrap();
    for (_, values) in bundle.iter() {
        assert_eq!(values.len(), bundle.len());
    }
}

#[test]
fn zero_reference_surfaces_division_error() {
    // water == dark at the first wavelength
    let water = b"500 2\n501 8\n";
    let err = run(SAMPLE, water, DARK, &ProcessingOptions::default()).unwrap_err();
    assert!(matches!(err, PipelineError::DivisionByZero { index: 0, .. }));
}

#[test]
fn unparseable_capture_surfaces_format_error() {
    let err = run(b"not a capture at all, three fields\n", WATER, DARK, &ProcessingOptions::default())
        .unwrap_err();
    assert!(matches!(err, PipelineError::Capture(_)));
}

#[test]
fn smoothing_a_linear_corrected_curve_is_identity() {
    let mut sample = String::new();
    let mut water = String::new();
    let mut dark = String::new();
    for i in 0..32 {
        sample.push_str(&format!("{} {}\n", 500 + i, 10.0 + 0.25 * i as f64));
        water.push_str(&format!("{} 8\n", 500 + i));
        dark.push_str(&format!("{} 2\n", 500 + i));
    }

    let mut options = ProcessingOptions {
        emit_transmittance: false,
        emit_absorbance: false,
        ..Default::default()
    };
    options.smoothing.enabled = true;
    options.smoothing.window = 7;
    options.smoothing.order = 2;

    let bundle = run(sample.as_bytes(), water.as_bytes(), dark.as_bytes(), &options).unwrap();
    let corrected = bundle.curve(CURVE_CORRECTED).unwrap();
    for (i, v) in corrected.iter().enumerate() {
        let expected = 8.0 + 0.25 * i as f64;
        assert!((v - expected).abs() < 1e-8, "index {i}: {v} != {expected}");
    }
}

#[test]
fn window_longer_than_capture_is_rejected() {
    let mut options = ProcessingOptions::default();
    options.smoothing.enabled = true;
    options.smoothing.window = 11;
    options.smoothing.order = 2;

    let err = run(SAMPLE, WATER, DARK, &options).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidWindow { window: 11, .. }));
}
