//! `CliMarketplace` driven by a scripted command runner, alone and under the
//! reconciler.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use sonm_cloud::application::Reconciler;
use sonm_cloud::application::ports::Marketplace;
use sonm_cloud::domain::{Endpoint, MarketError};
use sonm_cloud::infra::CliMarketplace;
use sonm_common::{CloudInstance, InstanceStatus};

use crate::helpers::{MemoryWriter, ScriptedRunner, configured, err_output, ok_output};

fn endpoint() -> Endpoint {
    Endpoint {
        node: "127.0.0.1:15030".to_string(),
        cli: "/opt/sonm/sonmcli".to_string(),
    }
}

#[tokio::test]
async fn deal_finish_passes_id_and_flags() {
    let runner = ScriptedRunner::new([ok_output(b"{}")]);
    let market = CliMarketplace::new(&runner);
    market.deal_finish(&endpoint(), "42").await.expect("finish");
    assert_eq!(
        runner.calls.borrow()[0],
        [
            "/opt/sonm/sonmcli",
            "deals",
            "finish",
            "42",
            "--node",
            "127.0.0.1:15030",
            "--out",
            "json"
        ]
    );
}

#[tokio::test]
async fn exit_failure_surfaces_stderr() {
    let market = CliMarketplace::new(ScriptedRunner::new([err_output(
        1,
        b"rpc error: deal not found",
    )]));
    let err = market.deal_status(&endpoint(), "9").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MarketError>(),
        Some(MarketError::Process { .. })
    ));
    assert!(err.to_string().contains("deal not found"), "got: {err}");
}

#[tokio::test]
async fn reconciler_lists_through_cli_adapter() {
    let status = br#"{
        "deal": { "SupplierID": "0xsupplier" },
        "info": {
            "order": { "slot": { "resources": { "properties": { "sonm_deadline": true } } } },
            "running": { "statuses": { "t1": { "imageName": "sonm/deadline-worker:latest", "status": "3" } } }
        }
    }"#;
    let runner = ScriptedRunner::new([
        ok_output(br#"{"deals":[{"id":"11","status":2}]}"#),
        ok_output(status),
    ]);
    let r = Reconciler::new(CliMarketplace::new(runner), configured(), MemoryWriter::default());

    let instances = r.list_instances().await.expect("list");

    assert_eq!(instances, vec![CloudInstance::sonm("11", InstanceStatus::Running)]);
}

#[tokio::test]
async fn reconciler_treats_garbage_output_as_failed_order() {
    let runner = ScriptedRunner::new([
        ok_output(b"Error: wallet locked"),
        ok_output(br#"{"id":"77"}"#),
    ]);
    let r = Reconciler::new(CliMarketplace::new(runner), configured(), MemoryWriter::default());

    let created = r.create_instances("SONM", "SONM", 2).await.expect("create");

    assert_eq!(created, vec![CloudInstance::sonm("77", InstanceStatus::Pending)]);
}
