use std::fs;
use std::io::Cursor;

use approx::assert_relative_eq;
use trajectory_regression::series::{
    Channel, ReferenceData, ReferenceError, ReferenceLayout, parse_reference,
    read_reference_file,
};

fn full_line(time_s: f64, x_km: &str) -> String {
    format!(
        "{time_s} 7000.0 0.001 98.0 10.0 20.0 30.0 0.0 0.001 0.0 0.0 60.0 \
         {x_km} 0.0 0.0 0.0 7.5 0.0 \
         1.0 0.0 0.0 0.0 \
         0.001 0.0 0.0 0.0 0.0 1.0E-6"
    )
}

fn parse(text: &str, layout: ReferenceLayout) -> Result<ReferenceData, ReferenceError> {
    parse_reference(Cursor::new(text.to_string()), "test.dat", layout)
}

#[test]
fn full_layout_is_parsed_and_converted_to_metres() {
    let text = format!(
        "# legacy header\n{}\n\n{}\n",
        full_line(0.0, "7000.0"),
        full_line(60.0, "7.0001D+03")
    );
    let data = parse(&text, ReferenceLayout::Full).expect("valid file");
    assert_eq!(data.truncated_at, None);
    assert_eq!(data.series.len(), 2);

    let second = data.series.get(1).expect("second sample");
    assert_eq!(second.time_s(), 60.0);
    let state = second.value();
    assert_relative_eq!(state.position[0], 7_000_100.0, epsilon = 1e-6);
    assert_relative_eq!(state.velocity[1], 7_500.0);

    let elements = state.elements.expect("elements");
    assert_eq!(elements.semi_major_axis_km, 7000.0);
    assert_eq!(elements.inclination_deg, 98.0);
    assert_relative_eq!(elements.raan_plus_pa_plus_ma_deg(), 60.0);

    let rates = state.rates.expect("rates");
    assert_eq!(rates.rate, [0.001, 0.0, 0.0]);
    assert_eq!(rates.acceleration, [0.0, 0.0, 1.0e-6]);
    assert_eq!(Channel::Q0.value(state), Some(1.0));
}

#[test]
fn zero_quaternion_leaves_attitude_unset() {
    let line = full_line(0.0, "7000.0").replace(" 1.0 0.0 0.0 0.0 ", " 0.0 0.0 0.0 0.0 ");
    let data = parse(&line, ReferenceLayout::Full).expect("valid file");
    let state = data.series.first().expect("sample").value();
    assert!(state.attitude.is_none());
}

#[test]
fn local_frame_layout_reads_six_fields() {
    let text = "0.0 1.0 2.0 3.0 0.1 0.2 0.3\n10.0 1.5 2.0 3.0 0.1 0.2 0.3\n";
    let data = parse(text, ReferenceLayout::LocalFrame).expect("valid file");
    assert_eq!(data.series.len(), 2);
    let state = data.series.last().expect("sample").value();
    assert_relative_eq!(state.position[0], 1_500.0);
    assert_relative_eq!(state.velocity[2], 300.0);
    assert!(state.elements.is_none());
}

#[test]
fn wrong_token_count_is_reported_with_line_number() {
    let text = "0.0 1.0 2.0 3.0 0.1 0.2 0.3\n\n10.0 1.0 2.0\n";
    let err = parse(text, ReferenceLayout::LocalFrame).unwrap_err();
    match err {
        ReferenceError::MalformedLine {
            line,
            expected,
            found,
        } => {
            assert_eq!(line, 3);
            assert_eq!(expected, 7);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unparsable_token_is_reported() {
    let err = parse("0.0 1.0 2.0 abc 0.1 0.2 0.3\n", ReferenceLayout::LocalFrame).unwrap_err();
    assert!(matches!(
        err,
        ReferenceError::InvalidNumber { line: 1, ref token } if token == "abc"
    ));
}

#[test]
fn nan_stops_reading_and_keeps_the_prefix() {
    let text = "0.0 1.0 2.0 3.0 0.1 0.2 0.3\n\
                10.0 1.0 2.0 3.0 0.1 0.2 0.3\n\
                20.0 1.0 NaN 3.0 0.1 0.2 0.3\n\
                30.0 1.0 2.0 3.0 0.1 0.2 0.3\n";
    let data = parse(text, ReferenceLayout::LocalFrame).expect("data gap is not an error");
    assert_eq!(data.series.len(), 2);
    assert_eq!(data.truncated_at, Some(3));

    let lower = parse("0.0 1.0 2.0 3.0 nan 0.2 0.3\n", ReferenceLayout::LocalFrame)
        .expect("data gap is not an error");
    assert!(lower.series.is_empty());
    assert_eq!(lower.truncated_at, Some(1));
}

#[test]
fn decreasing_time_is_rejected() {
    let err = parse(
        "10.0 1.0 2.0 3.0 0.1 0.2 0.3\n5.0 1.0 2.0 3.0 0.1 0.2 0.3\n",
        ReferenceLayout::LocalFrame,
    )
    .unwrap_err();
    assert!(matches!(err, ReferenceError::OutOfOrder { line: 2, .. }));
}

#[test]
fn file_on_disk_is_read() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("reference.dat");
    fs::write(&path, format!("{}\n", full_line(0.0, "7000.0"))).expect("write reference");
    let data = read_reference_file(&path, ReferenceLayout::Full).expect("valid file");
    assert_eq!(data.series.len(), 1);

    let missing = read_reference_file(dir.path().join("missing.dat"), ReferenceLayout::Full);
    assert!(matches!(missing, Err(ReferenceError::Io(_))));
}
