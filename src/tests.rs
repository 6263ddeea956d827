//! Whole-pipeline tests over on-disk fixtures.

use std::fs;
use std::path::Path;

use crate::decode::{HanYuLocation, PinyinEntry};
use crate::{process, Error, FieldValue, Manifest, Options};

fn write_readings(dir: &Path) {
    fs::write(
        dir.join("Unihan_Readings.txt"),
        "# Unihan_Readings.txt\n\
         #\tfixture excerpt\n\
         \n\
         U+3401\tkCantonese\ttim2\n\
         U+3401\tkDefinition\tto lick; to taste, a mat, bamboo bark\n\
         U+3401\tkHanyuPinyin\t10019.020:tiàn\n\
         U+3400\tkCantonese\tjau1\n",
    )
    .unwrap();
}

fn reading_fields() -> Option<Vec<String>> {
    Some(vec![
        "kCantonese".to_string(),
        "kDefinition".to_string(),
        "kHanyuPinyin".to_string(),
    ])
}

#[test]
fn test_end_to_end_expansion() {
    let dir = tempfile::tempdir().unwrap();
    write_readings(dir.path());

    let manifest = Manifest::load_default().unwrap();
    let mut options = Options::new(dir.path());
    options.fields = reading_fields();

    let records = process(&manifest, &options).unwrap();
    assert_eq!(records.len(), 2);

    let record = &records[0];
    assert_eq!(record.ucn, "U+3401");
    assert_eq!(record.character, '㐁');
    assert_eq!(
        record.get("kDefinition"),
        Some(&FieldValue::List(vec![
            "to lick".to_string(),
            "to taste, a mat, bamboo bark".to_string(),
        ]))
    );
    assert_eq!(
        record.get("kHanyuPinyin"),
        Some(&FieldValue::HanyuPinyin(vec![PinyinEntry {
            locations: vec![HanYuLocation {
                volume: 1,
                page: 19,
                character: 2,
                r#virtual: 0,
            }],
            readings: vec!["tiàn".to_string()],
        }]))
    );
}

#[test]
fn test_no_expand_keeps_raw_strings() {
    let dir = tempfile::tempdir().unwrap();
    write_readings(dir.path());

    let manifest = Manifest::load_default().unwrap();
    let mut options = Options::new(dir.path());
    options.fields = reading_fields();
    options.expand = false;

    let records = process(&manifest, &options).unwrap();
    assert_eq!(
        records[0].get("kHanyuPinyin"),
        Some(&FieldValue::Scalar("10019.020:tiàn".to_string()))
    );
}

#[test]
fn test_prune_removes_absent_fields() {
    let dir = tempfile::tempdir().unwrap();
    write_readings(dir.path());

    let manifest = Manifest::load_default().unwrap();
    let mut options = Options::new(dir.path());
    options.fields = reading_fields();
    options.prune = true;

    let records = process(&manifest, &options).unwrap();

    // U+3400 has only kCantonese in the fixture
    let record = records.iter().find(|r| r.ucn == "U+3400").unwrap();
    assert_eq!(record.fields.len(), 1);
    assert!(record.fields.contains_key("kCantonese"));
    assert_eq!(record.character, '㐀');

    for record in &records {
        for value in record.fields.values() {
            assert!(value.as_ref().is_some_and(|v| !v.is_empty()));
        }
    }
}

#[test]
fn test_unknown_field_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    write_readings(dir.path());

    let manifest = Manifest::load_default().unwrap();
    let mut options = Options::new(dir.path());
    options.fields = Some(vec!["kNoSuchField".to_string()]);

    let err = process(&manifest, &options).unwrap_err();
    assert!(matches!(err, Error::Manifest(_)));
}

#[test]
fn test_grammar_failure_aborts_batch() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Unihan_Readings.txt"),
        "U+3401\tkHanyuPinyin\tnot*a*location:tiàn\n",
    )
    .unwrap();

    let manifest = Manifest::load_default().unwrap();
    let mut options = Options::new(dir.path());
    options.fields = Some(vec!["kHanyuPinyin".to_string()]);

    let err = process(&manifest, &options).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn test_only_needed_files_are_read() {
    // Only Unihan_Readings.txt exists; requesting reading fields must not
    // touch the other manifest files.
    let dir = tempfile::tempdir().unwrap();
    write_readings(dir.path());

    let manifest = Manifest::load_default().unwrap();
    let files = manifest.files_for_fields(&["kCantonese".to_string()]);
    assert_eq!(files, vec!["Unihan_Readings.txt".to_string()]);

    let mut options = Options::new(dir.path());
    options.fields = Some(vec!["kCantonese".to_string()]);
    assert!(process(&manifest, &options).is_ok());
}
