use std::fs;
use std::path::Path;

use approx::assert_relative_eq;
use trajectory_regression::config::load_cases;
use trajectory_regression::run::{run_batch, run_case};

fn write_local_series(path: &Path, len: usize, x_offset_km: f64) {
    let mut text = String::from("# time x y z vx vy vz\n");
    for i in 0..len {
        let t = i as f64 * 60.0;
        text.push_str(&format!(
            "{t} {} 0.0 0.0 0.0 7.5 0.0\n",
            7000.0 + x_offset_km + i as f64
        ));
    }
    fs::write(path, text).expect("write series");
}

fn write_manifest(dir: &Path, name: &str, reference: &str, series: &str) {
    let text = format!(
        "name = \"{name}\"\n\n[reference]\nfile = \"{reference}\"\nlayout = \"local_frame\"\n\n\
         [[series]]\nfile = \"{series}\"\nlabel = \"engine\"\nlayout = \"local_frame\"\n"
    );
    fs::write(dir.join(format!("{name}.toml")), text).expect("write manifest");
}

#[test]
fn case_run_writes_diffs_and_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_local_series(&dir.path().join("ref.dat"), 10, 0.0);
    write_local_series(&dir.path().join("engine.dat"), 7, 0.002);
    write_manifest(dir.path(), "leo", "ref.dat", "engine.dat");

    let cases = load_cases(dir.path().join("leo.toml"), None).expect("manifest");
    let out = dir.path().join("out");
    let outcome = run_case(&cases[0], &out).expect("case runs");

    assert_eq!(outcome.series.len(), 1);
    let series = &outcome.series[0];
    assert_eq!(series.alignment.compared, 7);
    assert_eq!(series.alignment.dropped_reference, 3);
    assert_relative_eq!(series.alignment.position.max_absolute, 2.0, epsilon = 1e-6);

    let case_dir = out.join("leo");
    let diffs = fs::read_to_string(case_dir.join("engine_diffs.csv")).expect("diff csv");
    let mut lines = diffs.lines();
    assert_eq!(
        lines.next(),
        Some("index,time_s,time,time_offset_s,position_m,velocity_m_s,attitude_deg")
    );
    assert_eq!(lines.count(), 7);
    assert!(case_dir.join("engine_channels.csv").exists());

    let summary = fs::read_to_string(case_dir.join("summary.json")).expect("summary");
    assert!(summary.contains("\"case\": \"leo\""));
    assert!(summary.contains("\"dropped_reference\": 3"));
}

#[test]
fn failing_case_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_local_series(&dir.path().join("ref.dat"), 5, 0.0);
    write_local_series(&dir.path().join("engine.dat"), 5, 0.0);
    write_manifest(dir.path(), "a_missing", "does_not_exist.dat", "engine.dat");
    write_manifest(dir.path(), "b_good", "ref.dat", "engine.dat");

    let cases = load_cases(dir.path(), None).expect("manifests");
    assert_eq!(cases.len(), 2);
    let summary = run_batch(&cases, &dir.path().join("out"));

    assert!(!summary.is_success());
    assert_eq!(summary.total(), 2);
    assert_eq!(summary.succeeded, vec!["b_good".to_string()]);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "a_missing");
    assert!(dir.path().join("out/b_good/summary.json").exists());
}

#[test]
fn strict_case_fails_on_length_mismatch() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_local_series(&dir.path().join("ref.dat"), 5, 0.0);
    write_local_series(&dir.path().join("engine.dat"), 4, 0.0);
    write_manifest(dir.path(), "strict", "ref.dat", "engine.dat");
    let manifest = dir.path().join("strict.toml");
    let text = fs::read_to_string(&manifest).expect("manifest");
    fs::write(&manifest, format!("strict_length = true\n{text}")).expect("manifest");

    let cases = load_cases(&manifest, None).expect("manifest");
    let err = run_case(&cases[0], &dir.path().join("out")).unwrap_err();
    assert!(err.to_string().contains("engine"));
}

#[test]
fn data_gap_in_series_is_reported_not_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_local_series(&dir.path().join("ref.dat"), 5, 0.0);
    let mut text = String::new();
    text.push_str("0 7000.0 0.0 0.0 0.0 7.5 0.0\n");
    text.push_str("60 7001.0 0.0 0.0 0.0 7.5 0.0\n");
    text.push_str("120 NaN 0.0 0.0 0.0 7.5 0.0\n");
    fs::write(dir.path().join("engine.dat"), text).expect("write series");
    write_manifest(dir.path(), "gap", "ref.dat", "engine.dat");

    let cases = load_cases(dir.path().join("gap.toml"), None).expect("manifest");
    let outcome = run_case(&cases[0], &dir.path().join("out")).expect("case runs");
    assert_eq!(outcome.series[0].truncated_at, Some(3));
    assert_eq!(outcome.series[0].alignment.compared, 2);
}
