use std::io::Write;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use tempfile::{NamedTempFile, TempDir};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

/// Create a config with database path
fn config_with_db(db_path: &Path, extra: &str) -> NamedTempFile {
    let content = format!(
        r#"
[database]
path = "{}"
{}
"#,
        db_path.display(),
        extra
    );

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

/// Run the binary with `script` on stdin and collect its output
async fn run_session(config_path: &Path, envs: &[(&str, &str)], script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_powerball"))
        .env("POWERBALL_CONFIG", config_path)
        .env("RUST_LOG", "error") // Quiet logs during tests
        .envs(envs.iter().copied())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn powerball");

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(script.as_bytes()).await.unwrap();
    drop(stdin);

    timeout(Duration::from_secs(60), child.wait_with_output())
        .await
        .expect("Session did not finish")
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn value_after<'a>(text: &'a str, prefix: &str) -> &'a str {
    text.lines()
        .find_map(|line| line.strip_prefix(prefix))
        .unwrap_or_else(|| panic!("no line starting with {:?} in:\n{}", prefix, text))
}

#[tokio::test]
async fn test_session_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("lottery.db");
    let config = config_with_db(&db_path, "");

    let first = run_session(config.path(), &[], "g\nr\n20\nl\n4\ne\n").await;
    assert!(first.status.success());
    let first_out = stdout(&first);
    let winning = value_after(&first_out, "A new winning ticket has been drawn: ").to_string();
    assert!(first_out.contains("The current number of tickets is: 20"));
    assert!(db_path.exists());

    let second = run_session(config.path(), &[], "w\nv\nl\n").await;
    assert!(second.status.success());
    let second_out = stdout(&second);
    assert_eq!(
        value_after(&second_out, "The current winning ticket is: "),
        winning
    );
    assert!(second_out.contains("The current number of tickets is: 20"));
    assert!(second_out.contains("The current recurrence limit is: 4"));
    assert!(second_out.ends_with("Exiting Powerball lottery simulator.\n"));
}

#[tokio::test]
async fn test_missing_config_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("absent.toml");
    let db_path = temp_dir.path().join("defaults.db");

    let output = run_session(
        &config_path,
        &[("POWERBALL_DATABASE__PATH", db_path.to_str().unwrap())],
        "w\nv\nl\n\ne\n",
    )
    .await;

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("A winning ticket has not been drawn yet!"));
    assert!(out.contains("No tickets generated yet!"));
    assert!(out.contains("The current recurrence limit is: 3"));
    assert!(out.contains("Returning to main menu."));
}

#[tokio::test]
async fn test_invalid_config_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("invalid.db");
    let config = config_with_db(&db_path, "[lottery]\nrecurrence_limit = 7\n");

    let output = run_session(config.path(), &[], "e\n").await;

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[tokio::test]
async fn test_unwritable_database_still_runs() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("missing-dir").join("lottery.db");
    let config = config_with_db(&db_path, "");

    let output = run_session(config.path(), &[], "r\n5\nv\ne\n").await;

    assert!(output.status.success());
    assert!(stdout(&output).contains("The current number of tickets is: 5"));
}
