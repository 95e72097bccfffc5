//! Runs the built binaries against files in a scratch directory

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(bin: &str, home: &Path, args: &[&std::ffi::OsStr]) -> Output {
    Command::new(bin)
        .args(args)
        // Keep any real ~/.skin_config out of the test
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_png(path: &Path, color: [u8; 3]) {
    image::RgbImage::from_pixel(512, 512, image::Rgb(color))
        .save(path)
        .unwrap();
}

#[test]
fn test_skin_analyze_prints_report() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("face.png");
    write_png(&image, [230, 230, 230]);

    let output = run(
        env!("CARGO_BIN_EXE_skin_analyze"),
        temp_dir.path(),
        &[image.as_os_str()],
    );
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["skin_type"], "Normal");
    assert_eq!(report["recommendations"], serde_json::json!([]));
}

#[test]
fn test_skin_analyze_details_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("face.png");
    let out = temp_dir.path().join("report.json");
    write_png(&image, [128, 128, 128]);

    let output = run(
        env!("CARGO_BIN_EXE_skin_analyze"),
        temp_dir.path(),
        &[
            image.as_os_str(),
            "--details".as_ref(),
            "--pretty".as_ref(),
            "--output".as_ref(),
            out.as_os_str(),
        ],
    );
    assert!(output.status.success());

    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains('\n'));
    let analysis: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(analysis["working_size"]["width"], 512);
    assert_eq!(analysis["samples"]["nose"]["texture"], 0.0);
    assert_eq!(analysis["report"]["texture"], "0.00");
}

#[test]
fn test_skin_analyze_client_errors_exit_2() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.png");
    let garbage = temp_dir.path().join("garbage.png");
    std::fs::write(&garbage, b"\x89PNG but not really").unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_skin_analyze"),
        temp_dir.path(),
        &[missing.as_os_str()],
    );
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"error":"image required"}"#
    );

    let output = run(
        env!("CARGO_BIN_EXE_skin_analyze"),
        temp_dir.path(),
        &[garbage.as_os_str()],
    );
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"error":"failed to analyze"}"#
    );
}

#[test]
fn test_skin_analyze_bad_config_exits_1() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("face.png");
    let config = temp_dir.path().join("bad.json");
    write_png(&image, [128, 128, 128]);
    std::fs::write(&config, "{").unwrap();

    let output = run(
        env!("CARGO_BIN_EXE_skin_analyze"),
        temp_dir.path(),
        &[image.as_os_str(), "--config".as_ref(), config.as_os_str()],
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_skin_batch_writes_csv_and_jsonl() {
    let temp_dir = TempDir::new().unwrap();
    let photos = temp_dir.path().join("photos");
    std::fs::create_dir(&photos).unwrap();
    write_png(&photos.join("a.png"), [128, 128, 128]);
    write_png(&photos.join("b.png"), [230, 230, 230]);
    std::fs::write(photos.join("c.jpg"), b"broken").unwrap();

    let csv_path = temp_dir.path().join("summary.csv");
    let jsonl_path = temp_dir.path().join("reports.jsonl");

    let output = run(
        env!("CARGO_BIN_EXE_skin_batch"),
        temp_dir.path(),
        &[
            photos.as_os_str(),
            "--quiet".as_ref(),
            "--csv".as_ref(),
            csv_path.as_os_str(),
            "--jsonl".as_ref(),
            jsonl_path.as_os_str(),
        ],
    );
    // One input is undecodable, so the batch reports failure
    assert!(!output.status.success());

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    let headers = reader.headers().unwrap().clone();
    let ok_col = headers.iter().position(|h| h == "ok").unwrap();
    let oks: Vec<&str> = rows.iter().map(|row| &row[ok_col]).collect();
    assert_eq!(oks, vec!["true", "true", "false"]);

    let jsonl = std::fs::read_to_string(&jsonl_path).unwrap();
    let records: Vec<serde_json::Value> = jsonl
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert!(records[0]["path"].as_str().unwrap().ends_with("a.png"));
    assert_eq!(records[1]["report"]["skin_type"], "Normal");
}

#[test]
fn test_skin_batch_serial_all_ok() {
    let temp_dir = TempDir::new().unwrap();
    let image = temp_dir.path().join("only.png");
    let csv_path = temp_dir.path().join("out.csv");
    write_png(&image, [200, 160, 140]);

    let output = run(
        env!("CARGO_BIN_EXE_skin_batch"),
        temp_dir.path(),
        &[
            image.as_os_str(),
            "--serial".as_ref(),
            "--quiet".as_ref(),
            "--csv".as_ref(),
            csv_path.as_os_str(),
        ],
    );
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Successful: 1"));
}
