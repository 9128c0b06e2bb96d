use std::fs;

use regress_core::time::TimeAxis;
use trajectory_regression::config::{
    ConfigError, LayoutConfig, TimeAxisConfig, load_cases, load_manifest, manifest_files,
};

const TOML_CASE: &str = r#"
name = "leo"
time_axis = "hours"

[reference]
file = "reference.dat"
label = "legacy"

[[series]]
file = "engine.dat"
layout = "local_frame"
"#;

const YAML_CASES: &str = r#"
- name: geo
  reference:
    file: geo_ref.dat
  series:
    - file: geo_engine.dat
      label: engine
  charts: true
- name: gto
  reference:
    file: /abs/gto_ref.dat
  series:
    - file: gto_engine.dat
  channels: false
  strict_length: true
"#;

#[test]
fn toml_manifest_resolves_paths_and_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("leo.toml");
    fs::write(&path, TOML_CASE).expect("write manifest");

    let cases = load_cases(&path, None).expect("valid manifest");
    assert_eq!(cases.len(), 1);
    let case = &cases[0];
    assert_eq!(case.name, "leo");
    assert_eq!(case.time_axis, TimeAxisConfig::Hours);
    assert_eq!(TimeAxis::from(case.time_axis), TimeAxis::Hours);
    assert_eq!(case.reference.file, dir.path().join("reference.dat"));
    assert_eq!(case.reference.display_label(), "legacy");
    assert_eq!(case.series[0].file, dir.path().join("engine.dat"));
    assert_eq!(case.series[0].layout, LayoutConfig::LocalFrame);
    assert_eq!(case.series[0].display_label(), "engine");
    assert!(case.channels);
    assert!(!case.charts);
    assert!(!case.strict_length);
}

#[test]
fn yaml_list_and_reference_dir_override() {
    let dir = tempfile::tempdir().expect("tempdir");
    let refs = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cases.yaml");
    fs::write(&path, YAML_CASES).expect("write manifest");

    let cases = load_cases(&path, Some(refs.path())).expect("valid manifest");
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].reference.file, refs.path().join("geo_ref.dat"));
    assert_eq!(cases[0].series[0].file, dir.path().join("geo_engine.dat"));
    assert_eq!(cases[0].time_axis, TimeAxisConfig::Seconds);
    assert!(cases[0].charts);
    assert_eq!(cases[1].reference.file, std::path::Path::new("/abs/gto_ref.dat"));
    assert!(!cases[1].channels);
    assert!(cases[1].strict_length);
}

#[test]
fn directory_is_loaded_in_name_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("b_leo.toml"), TOML_CASE).expect("write manifest");
    fs::write(dir.path().join("a_cases.yml"), YAML_CASES).expect("write manifest");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write notes");

    let cases = load_cases(dir.path(), None).expect("valid manifests");
    let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["geo", "gto", "leo"]);
}

#[test]
fn case_without_series_is_invalid() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("empty.toml");
    fs::write(&path, "name = \"empty\"\n[reference]\nfile = \"ref.dat\"\n").expect("write");
    let err = load_cases(&path, None).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref case, .. } if case == "empty"));
}

#[test]
fn duplicate_labels_are_invalid() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("dup.toml");
    let text = "name = \"dup\"\n[reference]\nfile = \"ref.dat\"\n\
                [[series]]\nfile = \"a/engine.dat\"\n[[series]]\nfile = \"b/engine.dat\"\n";
    fs::write(&path, text).expect("write");
    assert!(matches!(
        load_cases(&path, None),
        Err(ConfigError::Invalid { .. })
    ));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "name = ").expect("write");
    assert!(matches!(load_cases(&path, None), Err(ConfigError::Toml(_))));
}

#[test]
fn broken_manifest_does_not_hide_its_siblings() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("a_broken.toml"), "name = \"bad\"\n[reference\n").expect("write");
    fs::write(dir.path().join("b_leo.toml"), TOML_CASE).expect("write manifest");

    let files = manifest_files(dir.path()).expect("listing");
    assert_eq!(files.len(), 2);

    let mut loaded = Vec::new();
    let mut failed = Vec::new();
    for file in &files {
        match load_manifest(file, None) {
            Ok(cases) => loaded.extend(cases),
            Err(err) => failed.push((file.clone(), err)),
        }
    }
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].name, "leo");
    assert_eq!(failed.len(), 1);
    assert!(failed[0].0.ends_with("a_broken.toml"));
    assert!(matches!(failed[0].1, ConfigError::Toml(_)));

    assert!(load_cases(dir.path(), None).is_err());
}

#[test]
fn manifest_files_passes_plain_files_through() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("single.yaml");
    fs::write(&path, YAML_CASES).expect("write manifest");
    assert_eq!(manifest_files(&path).expect("listing"), vec![path]);
}
