// Tests for pause expression parsing and resolution

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use wikistats_core::error::CoreError;
use wikistats_core::pause::{PauseSpec, parse_duration_secs, pause_duration};

// ============================================================================
// Plain durations
// ============================================================================

#[test]
fn test_milliseconds_suffix() {
    assert_eq!(parse_duration_secs("500ms").unwrap(), 0.5);
}

#[test]
fn test_seconds_suffix() {
    assert_eq!(parse_duration_secs("2s").unwrap(), 2.0);
}

#[test]
fn test_bare_number_is_milliseconds() {
    assert_eq!(parse_duration_secs("2000").unwrap(), 2.0);
}

#[test]
fn test_fractional_values() {
    assert_eq!(parse_duration_secs("1.5s").unwrap(), 1.5);
    assert_eq!(parse_duration_secs("250.0ms").unwrap(), 0.25);
}

#[test]
fn test_garbage_duration_is_config_error() {
    assert!(matches!(parse_duration_secs("soon"), Err(CoreError::Config(_))));
    assert!(matches!(parse_duration_secs("ms"), Err(CoreError::Config(_))));
    assert!(matches!(parse_duration_secs("infs"), Err(CoreError::Config(_))));
}

#[test]
fn test_fixed_spec() {
    assert_eq!("2s".parse::<PauseSpec>().unwrap(), PauseSpec::Fixed(2.0));
    assert_eq!("'1ms'".parse::<PauseSpec>().unwrap(), PauseSpec::Fixed(0.001));
}

#[test]
fn test_default_pause_is_labelled() {
    let spec: PauseSpec = "3s".parse().unwrap();
    assert_eq!(spec.to_string(), "default");
    let spec: PauseSpec = "4s".parse().unwrap();
    assert_eq!(spec.to_string(), "fixed");
}

// ============================================================================
// Uniform ranges
// ============================================================================

#[test]
fn test_uniform_spec_mixes_units() {
    let spec: PauseSpec = "1s-10000ms".parse().unwrap();
    assert_eq!(spec, PauseSpec::Uniform { lo: 1.0, hi: 10.0 });
}

#[test]
fn test_uniform_resolves_within_bounds() {
    let spec: PauseSpec = "100ms-2s".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let secs = spec.resolve_with(&mut rng);
        assert!((0.1..=2.0).contains(&secs), "{} out of range", secs);
    }
}

#[test]
fn test_uniform_equal_bounds() {
    let spec: PauseSpec = "1s-1000".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(spec.resolve_with(&mut rng), 1.0);
}

#[test]
fn test_uniform_reversed_bounds_rejected() {
    let err = "5s-1s".parse::<PauseSpec>().unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
}

// ============================================================================
// Negative durations
// ============================================================================

#[test]
fn test_leading_dash_rejected() {
    assert!(matches!("-1s".parse::<PauseSpec>(), Err(CoreError::Config(_))));
}

#[test]
fn test_negative_range_rejected() {
    assert!(matches!("-1--2".parse::<PauseSpec>(), Err(CoreError::Config(_))));
    assert!(matches!("1s--2s".parse::<PauseSpec>(), Err(CoreError::Config(_))));
}

// ============================================================================
// Gaussian
// ============================================================================

#[test]
fn test_gauss_spec() {
    let spec: PauseSpec = "gauss:1000s/2ms".parse().unwrap();
    assert_eq!(
        spec,
        PauseSpec::Gauss {
            mean: 1000.0,
            sigma: 0.002
        }
    );
}

#[test]
fn test_gauss_negative_sigma_rejected() {
    let err = "gauss:1s/-2s".parse::<PauseSpec>().unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
    assert!(err.to_string().contains("sigma"));
}

#[test]
fn test_gauss_missing_sigma_rejected() {
    assert!(matches!("gauss:1s".parse::<PauseSpec>(), Err(CoreError::Config(_))));
}

#[test]
fn test_gauss_never_negative() {
    // A negative mean with a wide sigma would go below zero without abs.
    let spec: PauseSpec = "gauss:-1s/3s".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        assert!(spec.resolve_with(&mut rng) >= 0.0);
    }
}

#[test]
fn test_gauss_zero_sigma_is_mean() {
    let spec: PauseSpec = "gauss:2s/0".parse().unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(spec.resolve_with(&mut rng), 2.0);
}

// ============================================================================
// Misc
// ============================================================================

#[test]
fn test_empty_expression_rejected() {
    assert!("".parse::<PauseSpec>().is_err());
    assert!("''".parse::<PauseSpec>().is_err());
}

#[test]
fn test_pause_duration() {
    assert_eq!(pause_duration(0.5).unwrap(), Duration::from_millis(500));
    assert_eq!(pause_duration(0.0).unwrap(), Duration::ZERO);
}

// ============================================================================
// Pauses too long to sleep for
// ============================================================================

#[test]
fn test_oversized_pause_rejected() {
    let err = "1e20s".parse::<PauseSpec>().unwrap_err();
    assert!(matches!(err, CoreError::Config(_)));
    assert!(err.to_string().contains("1e20s"));

    assert!(parse_duration_secs("1e23").is_err());
    assert!("1s-1e20s".parse::<PauseSpec>().is_err());
    assert!("gauss:1e20s/1s".parse::<PauseSpec>().is_err());
    assert!("gauss:1s/1e20s".parse::<PauseSpec>().is_err());
}

#[test]
fn test_oversized_draw_is_an_error_not_zero() {
    assert!(matches!(pause_duration(1e20), Err(CoreError::Config(_))));
    assert!(pause_duration(f64::NAN).is_err());
}
