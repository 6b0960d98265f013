use assert_cmd::Command;

fn empty_config_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("iaroute-cli-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn plan_lists_collections_and_indexes() {
    let output = Command::cargo_bin("iaroute-cli")
        .unwrap()
        .arg("--config-dir")
        .arg(empty_config_dir())
        .arg("plan")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "prompts\n  ia_model (Ascending)\nexecutions\n  prompt_id (Ascending)\n  timestamp (Ascending)\n"
    );
}

#[test]
fn plan_json_is_machine_readable() {
    let output = Command::cargo_bin("iaroute-cli")
        .unwrap()
        .args(["plan", "--json"])
        .arg("--config-dir")
        .arg(empty_config_dir())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"name\": \"executions\""));
    assert!(stdout.contains("\"field\": \"timestamp\""));
    assert!(stdout.contains("\"order\": \"ascending\""));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("iaroute-cli")
        .unwrap()
        .arg("migrate")
        .assert()
        .failure();
}
