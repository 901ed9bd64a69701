use assert_cmd::Command;
use predicates::prelude::*;

fn gridtag() -> Command {
    Command::cargo_bin("gridtag").expect("binary built")
}

#[test]
fn pattern_text_prints_eight_rows() {
    let assert = gridtag()
        .args(["pattern", "--id", "1234"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows.len(), 8);
    for row in rows {
        assert_eq!(row.len(), 8);
        assert!(row.chars().all(|c| c == '#' || c == '.'));
    }
}

#[test]
fn pattern_rejects_wide_ids() {
    gridtag()
        .args(["pattern", "--id", "70000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn pattern_bits_roundtrips_through_decode() {
    let assert = gridtag()
        .args(["pattern", "--id", "1234", "--format", "bits"])
        .assert()
        .success();
    let bits = String::from_utf8(assert.get_output().stdout.clone())
        .unwrap()
        .trim()
        .to_string();
    assert_eq!(bits.len(), 64);

    gridtag()
        .args(["decode", &bits])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\": 1234"))
        .stdout(predicate::str::contains("North"));
}

#[test]
fn decode_rejects_malformed_samples() {
    gridtag()
        .args(["decode", "0101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("64 sample characters"));
}

#[test]
fn decode_reports_missing_tag() {
    let zeros = "0".repeat(64);
    gridtag()
        .args(["decode", &zeros])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no tag decoded"));
}
