use std::fs;
use std::path::Path;
use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wine-guide"))
}

fn output_dir() -> &'static Path {
    Path::new("tests/output")
}

fn setup() {
    fs::create_dir_all(output_dir()).expect("Failed to create output directory");
}

fn cleanup_file(name: &str) {
    let path = output_dir().join(name);
    if path.exists() {
        fs::remove_file(&path).ok();
    }
}

#[test]
fn test_render_demo_guide() {
    setup();
    let output_file = "test-demo-guide.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "render",
            "-e", "demos/event.json",
            "-c", "demos/content.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let path = output_dir().join(output_file);
    assert!(path.exists(), "PDF file was not created");

    let metadata = fs::metadata(&path).expect("Failed to get file metadata");
    assert!(metadata.len() > 1000, "PDF file is too small, likely empty or corrupt");

    let doc = lopdf::Document::load(&path).expect("Output is not a readable PDF");
    assert_eq!(doc.get_pages().len(), 8);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Pages: 8"));
    assert!(stdout.contains("Bottles: 105"));
}

#[test]
fn test_partial_content_is_rejected_by_default() {
    setup();
    let output_file = "test-partial-rejected.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "render",
            "-e", "demos/event.json",
            "-c", "demos/partial_content.json",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Partial content should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing wine categories"), "stderr: {}", stderr);
    assert!(!output_dir().join(output_file).exists());
}

#[test]
fn test_partial_content_allowed() {
    setup();
    let output_file = "test-partial-allowed.pdf";
    cleanup_file(output_file);

    let output = cargo_bin()
        .args([
            "render",
            "-e", "demos/event.json",
            "-c", "demos/partial_content.json",
            "--allow-missing",
            "-o", &format!("tests/output/{}", output_file),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let metadata = fs::metadata(output_dir().join(output_file)).expect("PDF file was not created");
    assert!(metadata.len() > 1000, "PDF file is too small");
}

#[test]
fn test_plan_quantities_only() {
    let output = cargo_bin()
        .args(["plan", "-e", "demos/event.json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let plan: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("plan output is not JSON");
    assert_eq!(plan["quantities"]["sparkling"], 23);
    assert_eq!(plan["quantities"]["white"], 26);
    assert_eq!(plan["quantities"]["red"], 39);
    assert_eq!(plan["quantities"]["rose"], 17);
    assert_eq!(plan["quantities"]["total"], 105);
    assert!(plan.get("budget").is_none());
}

#[test]
fn test_plan_with_budget() {
    let output = cargo_bin()
        .args(["plan", "-e", "demos/event.json", "-c", "demos/content.json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command failed: {:?}", output);

    let plan: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("plan output is not JSON");
    // 23*19 + 26*29 + 39*22 + 17*24 = 2457, tax 246
    assert_eq!(plan["budget"]["subtotal"], 2457.0);
    assert_eq!(plan["budget"]["tax"], 246.0);
    assert_eq!(plan["budget"]["total"], 2703.0);
}

#[test]
fn test_missing_event_file() {
    let output = cargo_bin()
        .args(["plan", "-e", "demos/does-not-exist.json"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Missing file should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "stderr: {}", stderr);
}

#[test]
fn test_event_without_names_fails() {
    setup();
    let event_path = output_dir().join("nameless-event.json");
    fs::write(&event_path, r#"{"guests": 50}"#).expect("Failed to write fixture");

    let output = cargo_bin()
        .args([
            "render",
            "-e", event_path.to_str().unwrap(),
            "-c", "demos/content.json",
            "-o", "tests/output/nameless.pdf",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Render without names should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Names are required"), "stderr: {}", stderr);
}
