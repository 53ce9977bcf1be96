#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]

mod common;

use certinfo::{Format, inspect};
use common::{config, pick_free_port, spawn_tls_server};
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(3);

async fn mixed_batch(port: u16) -> certinfo::Certificates {
    let hosts = [
        format!("127.0.0.1:{port}"),
        format!("127.0.0.1:{}", pick_free_port()),
    ];
    inspect(&hosts, &config(true, TIMEOUT)).await.unwrap()
}

#[tokio::test]
async fn test_render_plain_default_layout() {
    let server = spawn_tls_server().await;
    let certs = mixed_batch(server.port).await;

    let output = certs.render(Format::Plain, None).unwrap();
    let blocks: Vec<&str> = output.split("\n\n").filter(|b| !b.is_empty()).collect();
    assert_eq!(blocks.len(), 2);

    assert!(blocks[0].starts_with("DomainName: 127.0.0.1\n"));
    assert!(blocks[0].contains("CommonName: rcgen self signed cert"));
    assert!(blocks[0].contains("SANs:       [localhost]"));
    assert!(blocks[0].contains("Error:      \n") || blocks[0].ends_with("Error:      "));

    assert!(blocks[1].contains("SANs:       []"));
    assert!(blocks[1].contains("Error:      dial tcp"));
}

#[tokio::test]
async fn test_render_plain_user_template() {
    let server = spawn_tls_server().await;
    let certs = mixed_batch(server.port).await;

    let template = "{{#each this}}{{domainName}}|{{commonName}}|{{#if error}}down{{else}}up{{/if}}\n{{/each}}";
    let output = certs.render(Format::Plain, Some(template)).unwrap();
    assert_eq!(
        output,
        "127.0.0.1|rcgen self signed cert|up\n127.0.0.1||down\n"
    );
}

#[tokio::test]
async fn test_render_markdown_table() {
    let server = spawn_tls_server().await;
    let certs = mixed_batch(server.port).await;

    let output = certs.render(Format::Markdown, None).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("DomainName | IP | Issuer"));
    assert!(lines[2].starts_with("127.0.0.1 | 127.0.0.1 | rcgen self signed cert"));
    assert!(lines[2].contains("localhost<br/>"));
    assert!(lines[3].starts_with("127.0.0.1 |  | "));
    assert!(lines[3].contains("dial tcp"));
}

#[tokio::test]
async fn test_render_json_records() {
    let server = spawn_tls_server().await;
    let certs = mixed_batch(server.port).await;

    let output = certs.render(Format::Json, None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let records = value.as_array().expect("top level array");
    assert_eq!(records.len(), 2);

    assert_eq!(records[0]["domainName"], "127.0.0.1");
    assert_eq!(records[0]["commonName"], "rcgen self signed cert");
    assert_eq!(records[0]["sans"], serde_json::json!(["localhost"]));
    assert_eq!(records[0]["error"], "");
    assert!(records[0].get("chain").is_none());

    assert_eq!(records[1]["ip"], "");
    assert!(
        records[1]["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("dial tcp"))
    );
}
