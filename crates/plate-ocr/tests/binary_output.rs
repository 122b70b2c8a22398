use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const PLATE_FIXTURE: &str = r#"[
    { "region": { "x": 12, "y": 40, "width": 180, "height": 48 }, "text": "AB12XYZ", "confidence": 0.9 },
    { "region": { "x": 200, "y": 44, "width": 12, "height": 6 }, "text": "--", "confidence": 0.1 },
    { "region": { "x": 20, "y": 90, "width": 60, "height": 20 }, "text": "CDE", "confidence": 0.3 }
]"#;

fn run_binary(dir: &Path, extra: &[&str]) -> Output {
    let image = dir.join("car3.png");
    image::RgbImage::from_pixel(64, 32, image::Rgb([255, 255, 255]))
        .save(&image)
        .unwrap();
    let fixture = dir.join("car3.json");
    fs::write(&fixture, PLATE_FIXTURE).unwrap();
    let config = dir.join("plate-ocr.toml");
    fs::write(&config, "").unwrap();

    Command::new(env!("CARGO_BIN_EXE_plate-ocr"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(&config)
        .arg("--replay")
        .arg(&fixture)
        .args(extra)
        .arg(&image)
        .output()
        .expect("plate-ocr binary runs")
}

#[test]
fn json_format_writes_a_single_object_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_binary(dir.path(), &["--format", "json"]);
    assert!(output.status.success(), "{output:?}");

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is one JSON document");
    assert_eq!(report["engine"], "replay");
    assert_eq!(report["joined"], "AB12XYZ");
    assert_eq!(report["accepted"], serde_json::json!(["AB12XYZ"]));
    assert_eq!(report["detections"].as_array().map(Vec::len), Some(3));
}

#[test]
fn text_format_prints_detections_then_joined_line() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_binary(dir.path(), &[]);
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "AB12XYZ");
}

#[test]
fn missing_image_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("plate-ocr.toml");
    fs::write(&config, "").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_plate-ocr"))
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--engine")
        .arg("noop")
        .arg(dir.path().join("missing.png"))
        .output()
        .expect("plate-ocr binary runs");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to load image"));
}
