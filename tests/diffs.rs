use approx::assert_relative_eq;
use trajectory_regression::compare::{
    BoundaryCorrectedScalarDiff, MaxTracker, RotationDiff, VectorDiff, boundary_corrected,
};
use trajectory_regression::series::Attitude;

#[test]
fn wrap_around_difference_is_shifted_by_one_period() {
    assert_relative_eq!(boundary_corrected(359.9, 0.1, 360.0), -0.2, epsilon = 1e-9);
    assert_relative_eq!(boundary_corrected(0.1, 359.9, 360.0), 0.2, epsilon = 1e-9);
    assert_relative_eq!(boundary_corrected(10.0, 5.0, 360.0), 5.0);
}

#[test]
fn zero_boundary_disables_correction() {
    assert_relative_eq!(boundary_corrected(359.9, 0.1, 0.0), 359.8, epsilon = 1e-9);
}

#[test]
fn correction_never_increases_the_difference() {
    for i in 0..72 {
        for j in 0..72 {
            let main = i as f64 * 5.0 + 0.25;
            let secondary = j as f64 * 5.0;
            let corrected = boundary_corrected(main, secondary, 360.0);
            assert!(corrected.abs() <= (main - secondary).abs());
            assert!(corrected.abs() <= 180.0 + 1e-9);
        }
    }
}

#[test]
fn scalar_diff_tracks_absolute_and_relative_maxima() {
    let mut diff = BoundaryCorrectedScalarDiff::new(0.0);
    assert_relative_eq!(diff.apply(10.0, 9.0), 1.0);
    assert_relative_eq!(diff.apply(0.0, -2.0), 2.0);
    assert_relative_eq!(diff.apply(4.0, 4.5), -0.5);

    let result = diff.result();
    assert_relative_eq!(result.max_absolute, 2.0);
    assert_relative_eq!(result.max_relative.expect("relative set"), 0.125);
}

#[test]
fn vector_diff_uses_reference_magnitude_for_relative() {
    let mut diff = VectorDiff::new();
    assert_relative_eq!(diff.apply(&[3.0, 4.0, 0.0], &[0.0, 0.0, 0.0]), 5.0);
    assert_relative_eq!(diff.apply(&[10.0, 0.0, 0.0], &[9.0, 0.0, 0.0]), 1.0);

    let result = diff.result();
    assert_relative_eq!(result.max_absolute, 5.0);
    assert_relative_eq!(result.max_relative.expect("relative set"), 1.0);
}

#[test]
fn vector_diff_leaves_relative_unset_for_zero_reference() {
    let mut diff = VectorDiff::new();
    diff.apply(&[0.0; 3], &[1.0, 0.0, 0.0]);
    diff.apply(&[0.0; 3], &[0.0, 2.0, 0.0]);
    let result = diff.result();
    assert_relative_eq!(result.max_absolute, 2.0);
    assert_eq!(result.max_relative, None);
}

#[test]
fn relative_is_set_once_a_reference_is_non_zero() {
    let mut diff = VectorDiff::new();
    diff.apply(&[0.0; 3], &[1.0, 0.0, 0.0]);
    assert_eq!(diff.result().max_relative, None);
    diff.apply(&[4.0, 0.0, 0.0], &[3.0, 0.0, 0.0]);
    assert_relative_eq!(diff.result().max_relative.expect("relative set"), 0.25);
}

#[test]
fn tracker_ignores_non_finite_ratios() {
    let mut tracker = MaxTracker::new();
    tracker.update_relative(f64::INFINITY);
    assert_eq!(tracker.result().max_relative, None);
    tracker.update_relative(-0.5);
    tracker.update_relative(0.25);
    assert_eq!(tracker.result().max_relative, Some(0.5));
}

#[test]
fn rotation_diff_reports_degrees() {
    let reference = Attitude::from_axis_angle([0.0, 0.0, 1.0], 90f64.to_radians());
    let other = Attitude::from_axis_angle([0.0, 0.0, 1.0], 80f64.to_radians());
    let mut diff = RotationDiff::new();
    assert_relative_eq!(diff.apply(&reference, &other), 10.0, epsilon = 1e-9);

    let result = diff.result();
    assert_relative_eq!(result.max_absolute, 10.0, epsilon = 1e-9);
    assert_relative_eq!(result.max_relative.expect("relative set"), 10.0 / 90.0, epsilon = 1e-9);
}

#[test]
fn rotation_diff_skips_relative_for_identity_reference() {
    let other = Attitude::from_axis_angle([1.0, 0.0, 0.0], 0.5);
    let mut diff = RotationDiff::new();
    diff.apply(&Attitude::identity(), &other);
    let result = diff.result();
    assert_relative_eq!(result.max_absolute, 0.5f64.to_degrees(), epsilon = 1e-9);
    assert_eq!(result.max_relative, None);
}
