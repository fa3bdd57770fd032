//! End-to-end tests for the envault binary

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PASSWORD: &str = "p@ss\n";

fn envault(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("envault").unwrap();
    cmd.current_dir(dir)
        .env("ENVAULT_CONFIG_DIR", dir.join("config"))
        .env_remove("ENVAULT_FILE")
        .env_remove("ENVAULT_LOG")
        .env_remove("ENVAULT_DEBUG");
    cmd
}

/// A temp dir holding `.env` and its vault
fn sealed(contents: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), contents).unwrap();

    envault(dir.path())
        .args([".env", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .success()
        .stdout(predicate::str::contains(".env.vaulted"));

    dir
}

#[test]
fn encrypt_then_dump_round_trips() {
    let dir = sealed("A=1\nB=two words\n");

    let vault = fs::read(dir.path().join(".env.vaulted")).unwrap();
    assert!(vault.starts_with(b"ENVAULT1"));
    assert!(!vault.windows(9).any(|w| w == b"two words"));

    envault(dir.path())
        .args(["dump", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .success()
        .stdout("A=1\nB=two words\n");
}

#[test]
fn encrypt_subcommand_with_explicit_output() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.env"), "TOKEN=abc\n").unwrap();

    envault(dir.path())
        .args(["encrypt", "app.env", "--password-stdin", "--file", "app.vault"])
        .write_stdin(PASSWORD)
        .assert()
        .success();

    assert!(dir.path().join("app.vault").exists());
    assert!(!dir.path().join(".env.vaulted").exists());
}

#[test]
fn existing_vault_needs_force() {
    let dir = sealed("A=1\n");
    fs::write(dir.path().join(".env"), "A=2\n").unwrap();

    envault(dir.path())
        .args([".env", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    envault(dir.path())
        .args([".env", "--password-stdin", "--force"])
        .write_stdin(PASSWORD)
        .assert()
        .success();

    envault(dir.path())
        .args(["dump", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .success()
        .stdout("A=2\n");
}

#[test]
fn export_script_only() {
    let dir = sealed("# database\nDB_URL=postgres://u:p@h/db\nGREETING=\"hello world\"\n");

    envault(dir.path())
        .args(["export", "--output-script-only", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .success()
        .stdout(
            "#!/bin/bash\n\nexport DB_URL=postgres://u:p@h/db\nexport GREETING=\"hello world\"\n",
        );
}

#[test]
fn unset_script_only() {
    let dir = sealed("A=1\nB=2\n");

    envault(dir.path())
        .args(["unset", "--output-script-only", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .success()
        .stdout("#!/bin/bash\n\nunset A\nunset B\n");
}

#[test]
fn export_writes_a_script_to_source() {
    let dir = sealed("A=1\n");
    let scripts = dir.path().join("scripts");
    fs::create_dir_all(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config").join("config.json"),
        format!(r#"{{"script_dir": {:?}}}"#, scripts.to_str().unwrap()),
    )
    .unwrap();

    let output = envault(dir.path())
        .args(["export", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .success()
        .stderr(predicate::str::contains("Exported 1"))
        .get_output()
        .stdout
        .clone();

    let line = String::from_utf8(output).unwrap();
    let path = line.trim().strip_prefix("source ").unwrap();
    assert!(path.starts_with(scripts.to_str().unwrap()));
    assert!(fs::read_to_string(path)
        .unwrap()
        .starts_with("#!/bin/bash\n\nexport A=1\n"));

    // Sourcing it applies the variables and leaves no plaintext behind
    #[cfg(unix)]
    {
        let sourced = std::process::Command::new("/bin/sh")
            .arg("-c")
            .arg(format!(". \"{}\"; printf %s \"$A\"", path))
            .output()
            .unwrap();
        assert_eq!(sourced.stdout, b"1");
        assert!(!Path::new(path).exists());
    }
}

#[test]
fn wrong_password_fails() {
    let dir = sealed("A=1\n");

    envault(dir.path())
        .args(["dump", "--password-stdin"])
        .write_stdin("wrong\n")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn not_a_vault_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env.vaulted"), "A=1\n").unwrap();

    envault(dir.path())
        .args(["dump", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid file format"));
}

#[test]
fn missing_vault_fails() {
    let dir = TempDir::new().unwrap();

    envault(dir.path())
        .args(["export", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn vault_path_from_environment() {
    let dir = sealed("A=1\n");
    fs::rename(
        dir.path().join(".env.vaulted"),
        dir.path().join("elsewhere.vaulted"),
    )
    .unwrap();

    envault(dir.path())
        .env("ENVAULT_FILE", "elsewhere.vaulted")
        .args(["dump", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .success()
        .stdout("A=1\n");
}

#[cfg(unix)]
#[test]
fn export_runs_a_command() {
    let dir = sealed("A=two words\n");

    envault(dir.path())
        .args(["export", "--password-stdin", "--", "sh", "-c", "printf %s \"$A\""])
        .write_stdin(PASSWORD)
        .assert()
        .success()
        .stdout("two words");
}

#[cfg(unix)]
#[test]
fn export_passes_the_exit_code_through() {
    let dir = sealed("A=1\n");

    envault(dir.path())
        .args(["export", "--password-stdin", "--", "sh", "-c", "exit 3"])
        .write_stdin(PASSWORD)
        .assert()
        .code(3);
}

#[test]
fn new_shell_and_command_conflict() {
    let dir = sealed("A=1\n");

    envault(dir.path())
        .args(["export", "--new-shell", "--password-stdin", "--", "echo", "hi"])
        .write_stdin(PASSWORD)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn config_save_writes_settings_file() {
    let dir = TempDir::new().unwrap();

    envault(dir.path())
        .args(["config", "--save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved settings"));

    let saved = fs::read_to_string(dir.path().join("config").join("config.json")).unwrap();
    assert!(saved.contains("\"vault_file_name\": \".env.vaulted\""));
}

#[test]
fn select_without_a_terminal_applies_everything() {
    let dir = sealed("A=1\nB=2\n");

    envault(dir.path())
        .args(["export", "--select", "--output-script-only", "--password-stdin"])
        .write_stdin(PASSWORD)
        .assert()
        .success()
        .stdout("#!/bin/bash\n\nexport A=1\nexport B=2\n");
}

#[test]
fn config_shows_paths() {
    let dir = TempDir::new().unwrap();

    envault(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains(".env.vaulted"));
}
