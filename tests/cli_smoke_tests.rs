use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("limpia_cli").unwrap();
    cmd.env("LIMPIA_CORE_HOME", home.path());
    cmd
}

fn last_token(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout)
        .split_whitespace()
        .last()
        .unwrap()
        .to_string()
}

#[test]
fn help_prints_usage() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: limpia_cli"));
}

#[test]
fn version_prints_crate_version() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("limpia_cli"));
}

#[test]
fn unknown_command_fails() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn commands_require_an_initialized_registry() {
    let home = TempDir::new().unwrap();
    cli(&home)
        .args(["properties", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn full_flow_from_init_to_invoice() {
    let home = TempDir::new().unwrap();

    cli(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created registry"));

    let out = cli(&home)
        .args(["properties", "add", "Villa Azul", "Acme Rentals", "20", "HOURLY_USD", "15"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let property_id = last_token(&out);

    let out = cli(&home)
        .args(["employees", "add", "Ana", "Perez", "2023-01-09"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let employee_id = last_token(&out);

    cli(&home)
        .args(["services", "add", &property_id, &employee_id, "2099-01-05", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("logged service"));

    cli(&home)
        .args(["services", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2h 00m"));

    cli(&home)
        .args(["invoice", &property_id, "2099-01-01", "2099-01-31", "--tax"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Subtotal: $ 40.00")
                .and(predicate::str::contains("Tax (7%): $ 2.80"))
                .and(predicate::str::contains("TOTAL PAYABLE: $ 42.80")),
        );
}

#[test]
fn employee_actor_cannot_generate_invoices() {
    let home = TempDir::new().unwrap();
    cli(&home).arg("init").assert().success();

    let out = cli(&home)
        .args(["properties", "add", "Villa", "Acme", "20", "HOURLY_USD", "15"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let property_id = last_token(&out);

    let out = cli(&home)
        .args(["employees", "add", "Ana", "Perez", "2023-01-09"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let employee_id = last_token(&out);

    cli(&home)
        .args([
            "--as",
            &employee_id,
            "invoice",
            &property_id,
            "2099-01-01",
            "2099-01-31",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Forbidden"));
}
