//! End-to-end tests against a fake marketplace CLI.
//!
//! Each test gets a temp directory holding a shell script that stands in for
//! the marketplace CLI, a settings file pointing at it, and a call log the
//! script appends its arguments to.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use sonm_common::{CloudInstance, InstanceStatus};
use tempfile::TempDir;

const FAKE_CLI: &str = r#"#!/bin/sh
dir=$(dirname "$0")
echo "$@" >> "$dir/calls.log"
case "$1 $2" in
"deals list")
    echo '{"deals":[{"id":"abc","status":2},{"id":"42","status":2},{"id":"7","status":2},{"id":"99","status":3}]}'
    ;;
"deals status")
    case "$3" in
    abc)
        echo '{"deal":{"SupplierID":"0xother"},"info":{"order":{"slot":{"resources":{"properties":{}}}},"running":{"statuses":{"t1":{"imageName":"sonm/deadline-worker:latest","status":3}}}}}'
        ;;
    42)
        echo '{"deal":{"SupplierID":"0xsupplier"},"info":{"order":{"slot":{"resources":{"properties":{"sonm_deadline":true}}}},"running":{"statuses":{"t1":{"imageName":"sonm/deadline-worker:latest","status":3}}}}}'
        ;;
    7)
        echo '{"deal":{"SupplierID":"0xsupplier"},"info":{"order":{"slot":{"resources":{"properties":{"sonm_deadline":true}}}},"running":{}}}'
        ;;
    *)
        echo "no such deal" >&2
        exit 1
        ;;
    esac
    ;;
"deals finish")
    echo '{}'
    ;;
"tasks start")
    echo '{"id":"task-new"}'
    ;;
"tasks stop")
    echo '{}'
    ;;
"market create")
    n=$(cat "$dir/orders" 2>/dev/null || echo 0)
    n=$((n + 1))
    echo "$n" > "$dir/orders"
    if [ $((n % 2)) -eq 0 ]; then
        echo '{"error":"insufficient funds","message":"balance too low"}'
    else
        echo "{\"id\":\"order-$n\"}"
    fi
    ;;
*)
    echo "unknown command" >&2
    exit 2
    ;;
esac
"#;

struct Market {
    dir: TempDir,
}

impl Market {
    fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let cli = dir.path().join("sonmcli");
        std::fs::write(&cli, FAKE_CLI).unwrap();
        std::fs::set_permissions(&cli, std::fs::Permissions::from_mode(0o755)).unwrap();
        std::fs::create_dir(dir.path().join("tmp")).unwrap();
        let market = Self { dir };
        market.write_settings("");
        market
    }

    fn write_settings(&self, extra: &str) {
        let settings = format!(
            "NodeConfig: 127.0.0.1:15030\nCliConfig: {}\nPrice: 0.5USD/h\nCifsShare: //repo/share\n{extra}",
            self.cli().display()
        );
        std::fs::write(self.config(), settings).unwrap();
    }

    fn cli(&self) -> PathBuf {
        self.dir.path().join("sonmcli")
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.yaml")
    }

    fn tmp(&self) -> PathBuf {
        self.dir.path().join("tmp")
    }

    fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(self.dir.path().join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sonm-cloud"));
        cmd.env("NO_COLOR", "1")
            .env("TMPDIR", self.tmp())
            .arg("--config")
            .arg(self.config());
        cmd
    }

    fn instances(&self, args: &[&str]) -> Vec<CloudInstance> {
        let output = self.cmd().args(args).arg("--json").output().expect("run");
        assert!(
            output.status.success(),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("instance json")
    }
}

fn descriptors(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| std::fs::read_to_string(e.path()).unwrap())
        .collect();
    files.sort();
    files
}

// --- list ---

#[test]
fn test_list_reports_only_managed_accepted_deals() {
    let market = Market::new();

    let instances = market.instances(&["list"]);

    assert_eq!(
        instances,
        vec![
            CloudInstance::sonm("42", InstanceStatus::Running),
            CloudInstance::sonm("7", InstanceStatus::Pending),
        ]
    );
    let calls = market.calls();
    assert!(calls.iter().all(|c| !c.starts_with("deals status 99")));
}

#[test]
fn test_list_starts_task_for_idle_deal() {
    let market = Market::new();

    market.instances(&["list"]);

    let starts: Vec<_> = market
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("tasks start"))
        .collect();
    assert_eq!(starts.len(), 1);
    assert!(starts[0].starts_with("tasks start 7 "), "got: {}", starts[0]);
    assert!(
        starts[0].ends_with("--timeout 600s --node 127.0.0.1:15030 --out json"),
        "got: {}",
        starts[0]
    );
    let written = descriptors(&market.tmp());
    assert_eq!(written.len(), 1);
    assert!(written[0].contains("share: //repo/share"));
}

#[test]
fn test_list_human_output_is_a_table() {
    let market = Market::new();
    market
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("SONM 42"))
        .stdout(predicate::str::contains("running"))
        .stdout(predicate::str::contains("abc").not());
}

#[test]
fn test_list_with_broken_cli_path_is_empty() {
    let market = Market::new();
    std::fs::write(
        market.config(),
        "NodeConfig: 127.0.0.1:15030\nCliConfig: /nonexistent/sonmcli\n",
    )
    .unwrap();

    assert!(market.instances(&["list"]).is_empty());
}

// --- create ---

#[test]
fn test_create_reports_partial_success() {
    let market = Market::new();

    let created = market.instances(&["create", "--count", "3"]);

    assert_eq!(
        created,
        vec![
            CloudInstance::sonm("order-1", InstanceStatus::Pending),
            CloudInstance::sonm("order-3", InstanceStatus::Pending),
        ]
    );
    let creates: Vec<_> = market
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("market create"))
        .collect();
    assert_eq!(creates.len(), 3);
    assert!(creates[0].starts_with("market create 0.5USD/h "));
    assert_eq!(descriptors(&market.tmp()).len(), 1);
}

#[test]
fn test_create_appends_configured_supplier() {
    let market = Market::new();
    market.write_settings("Supplier: 0xfeed\n");

    market.instances(&["create"]);

    let create = market
        .calls()
        .into_iter()
        .find(|c| c.starts_with("market create"))
        .expect("create call");
    assert!(
        create.ends_with(".yml 0xfeed --node 127.0.0.1:15030 --out json"),
        "got: {create}"
    );
}

#[test]
fn test_create_without_price_fails() {
    let market = Market::new();
    std::fs::write(
        market.config(),
        format!(
            "NodeConfig: 127.0.0.1:15030\nCliConfig: {}\n",
            market.cli().display()
        ),
    )
    .unwrap();

    market
        .cmd()
        .arg("create")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[SONM] Please fill price information (Price)."));
    assert!(market.calls().is_empty());
}

// --- terminate / stop / start ---

#[test]
fn test_terminate_finishes_each_deal() {
    let market = Market::new();
    let output = market
        .cmd()
        .args(["terminate", "42", "7", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let done: Vec<String> = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(done, ["42", "7"]);
    assert_eq!(
        market.calls(),
        [
            "deals finish 42 --node 127.0.0.1:15030 --out json",
            "deals finish 7 --node 127.0.0.1:15030 --out json",
        ]
    );
}

#[test]
fn test_stop_targets_supplier_and_task() {
    let market = Market::new();
    market
        .cmd()
        .args(["stop", "42", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped 42"))
        .stdout(predicate::str::contains("Not stopped abc"));

    let stops: Vec<_> = market
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("tasks stop"))
        .collect();
    assert_eq!(stops, ["tasks stop 0xsupplier t1 --node 127.0.0.1:15030 --out json"]);
}

#[test]
fn test_start_skips_deal_already_running() {
    let market = Market::new();
    market
        .cmd()
        .args(["start", "42"])
        .assert()
        .success();

    assert!(market.calls().iter().all(|c| !c.starts_with("tasks start")));
}

#[test]
fn test_start_launches_idle_deal() {
    let market = Market::new();
    let output = market
        .cmd()
        .args(["start", "7", "--json"])
        .output()
        .expect("run");
    assert!(output.status.success());
    let done: Vec<String> = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(done, ["7"]);
}

// --- ambient behaviour ---

#[test]
fn test_logs_stay_off_stdout() {
    let market = Market::new();
    let output = market
        .cmd()
        .args(["list", "--json", "--verbose"])
        .output()
        .expect("run");
    assert!(output.status.success());
    assert!(serde_json::from_slice::<serde_json::Value>(&output.stdout).is_ok());
    assert!(!output.stderr.is_empty(), "expected debug logs on stderr");
}

#[test]
fn test_env_override_supplies_missing_setting() {
    let market = Market::new();
    std::fs::write(
        market.config(),
        format!("CliConfig: {}\n", market.cli().display()),
    )
    .unwrap();

    let output = market
        .cmd()
        .env("SONM_CLOUD_NODECONFIG", "10.0.0.1:15030")
        .args(["terminate", "42", "--json"])
        .output()
        .expect("run");

    assert!(output.status.success());
    assert_eq!(
        market.calls(),
        ["deals finish 42 --node 10.0.0.1:15030 --out json"]
    );
}
