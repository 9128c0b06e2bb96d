use trajectory_regression::compare::{DiffResult, Report, format_magnitude};

#[test]
fn small_values_use_scientific_notation() {
    assert_eq!(format_magnitude(1.234e-5), "1.234E-5");
    assert_eq!(format_magnitude(0.0), "0.000E0");
    assert_eq!(format_magnitude(0.000_999), "9.990E-4");
}

#[test]
fn larger_values_use_fixed_point() {
    assert_eq!(format_magnitude(0.001), "0.001");
    assert_eq!(format_magnitude(0.5), "0.500");
    assert_eq!(format_magnitude(1234.5678), "1234.568");
}

#[test]
fn report_lines_carry_units_and_percentages() {
    let mut report = Report::new("LEO [engine]");
    report.push(
        "position",
        "m",
        DiffResult {
            max_absolute: 12.5,
            max_relative: Some(2.0e-6),
        },
    );
    report.push(
        "Inclination",
        "°",
        DiffResult {
            max_absolute: 0.25,
            max_relative: Some(0.01),
        },
    );
    report.push(
        "occurrence",
        "s",
        DiffResult {
            max_absolute: 0.0,
            max_relative: None,
        },
    );

    let lines = report.lines();
    assert_eq!(
        lines,
        vec![
            "LEO [engine]: max position difference: 12.500 m",
            "LEO [engine]: max relative position difference: 2.000E-4%",
            "LEO [engine]: max Inclination difference: 0.250°",
            "LEO [engine]: max relative Inclination difference: 1.000%",
            "LEO [engine]: max occurrence difference: 0.000E0 s",
        ]
    );
    assert_eq!(report.entries().len(), 3);
}
