use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rmcp::{model::ErrorCode, service::ServiceError};
use serde_json::{json, Value};

use testagent_mcp_server::server::config::{ServerConfig, ToolsSection};

use crate::common::{call, empty_arguments, start_in_process, text_payload};

#[tokio::test]
async fn health_check_reports_healthy_with_fresh_timestamp() -> Result<()> {
    let (client, server_task) = start_in_process(ServerConfig::default()).await?;

    let started = Utc::now();
    let call_result = call(&client, "health_check", empty_arguments()).await;
    let finished = Utc::now();

    let _ = client.cancel().await;
    let _ = server_task.await;

    let response = call_result.expect("health_check should succeed");
    let payload = text_payload(&response)?;
    assert_eq!(payload["status"], "healthy");
    assert_eq!(payload["server"], "testagent-mcp-server");
    assert_eq!(payload["version"], "1.0.0");

    let timestamp = payload["timestamp"]
        .as_str()
        .expect("timestamp should be a string");
    let parsed = DateTime::parse_from_rfc3339(timestamp)?.with_timezone(&Utc);
    // Millisecond precision truncates the sub-millisecond part of the call start.
    assert!(
        parsed >= started - Duration::milliseconds(1) && parsed <= finished,
        "timestamp {parsed} outside [{started}, {finished}]"
    );
    assert!(timestamp.ends_with('Z'), "timestamp should be UTC: {timestamp}");
    Ok(())
}

#[tokio::test]
async fn health_check_accepts_missing_arguments() -> Result<()> {
    let (client, server_task) = start_in_process(ServerConfig::default()).await?;
    let call_result = call(&client, "health_check", None).await;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let payload = text_payload(&call_result.expect("health_check should succeed"))?;
    assert_eq!(payload["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn server_info_without_verbose_has_no_capabilities() -> Result<()> {
    let (client, server_task) = start_in_process(ServerConfig::default()).await?;

    let omitted = call(&client, "get_server_info", empty_arguments()).await;
    let explicit_false = call(&client, "get_server_info", Some(json!({ "verbose": false }))).await;

    let _ = client.cancel().await;
    let _ = server_task.await;

    for response in [omitted, explicit_false] {
        let payload = text_payload(&response.expect("get_server_info should succeed"))?;
        assert!(
            payload.get("capabilities").is_none(),
            "capabilities must be absent: {payload}"
        );
        assert_eq!(payload["name"], "testagent-mcp-server");
        assert_eq!(payload["version"], "1.0.0");
        assert_eq!(
            payload["description"],
            "TestAgent MCP Server - 浏览器自动化与自定义工具"
        );
    }
    Ok(())
}

#[tokio::test]
async fn verbose_server_info_reports_static_capabilities() -> Result<()> {
    let (client, server_task) = start_in_process(ServerConfig::default()).await?;
    let call_result = call(&client, "get_server_info", Some(json!({ "verbose": true }))).await;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let payload = text_payload(&call_result.expect("get_server_info should succeed"))?;
    assert_eq!(
        payload["capabilities"],
        json!({ "tools": true, "resources": false, "prompts": false })
    );
    assert_eq!(
        payload["toolGroups"],
        json!(["health", "playwright (via @playwright/mcp)"])
    );
    Ok(())
}

#[tokio::test]
async fn tool_groups_are_stable_across_calls() -> Result<()> {
    let (client, server_task) = start_in_process(ServerConfig::default()).await?;
    let mut seen: Vec<Value> = Vec::new();
    for verbose in [false, true, false] {
        let response = call(&client, "get_server_info", Some(json!({ "verbose": verbose })))
            .await
            .expect("get_server_info should succeed");
        seen.push(text_payload(&response)?["toolGroups"].clone());
    }
    let _ = client.cancel().await;
    let _ = server_task.await;

    let first = seen.first().expect("three calls were made");
    assert!(
        first.as_array().is_some_and(|groups| !groups.is_empty()),
        "toolGroups must be a non-empty array: {first}"
    );
    assert!(seen.iter().all(|groups| groups == first), "{seen:?}");
    Ok(())
}

#[tokio::test]
async fn configured_external_groups_follow_registered_groups() -> Result<()> {
    let config = ServerConfig {
        tools: ToolsSection {
            external_groups: vec!["playwright".into(), "filesystem".into()],
        },
        ..ServerConfig::default()
    };
    let (client, server_task) = start_in_process(config).await?;
    let call_result = call(&client, "get_server_info", empty_arguments()).await;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let payload = text_payload(&call_result.expect("get_server_info should succeed"))?;
    assert_eq!(
        payload["toolGroups"],
        json!(["health", "playwright", "filesystem"])
    );
    Ok(())
}

#[tokio::test]
async fn non_boolean_verbose_is_rejected_and_server_keeps_running() -> Result<()> {
    let (client, server_task) = start_in_process(ServerConfig::default()).await?;

    let rejected = call(&client, "get_server_info", Some(json!({ "verbose": "yes" }))).await;
    let follow_up = call(&client, "health_check", empty_arguments()).await;

    let _ = client.cancel().await;
    let _ = server_task.await;

    match rejected.expect_err("string verbose must be rejected") {
        ServiceError::McpError(error) => assert_eq!(error.code, ErrorCode::INVALID_PARAMS),
        other => anyhow::bail!("unexpected error: {other:?}"),
    }
    let payload = text_payload(&follow_up.expect("server should still answer"))?;
    assert_eq!(payload["status"], "healthy");
    Ok(())
}

#[tokio::test]
async fn unknown_tool_is_an_error() -> Result<()> {
    let (client, server_task) = start_in_process(ServerConfig::default()).await?;
    let call_result = call(&client, "browser_navigate", empty_arguments()).await;
    let _ = client.cancel().await;
    let _ = server_task.await;

    assert!(
        matches!(call_result, Err(ServiceError::McpError(_))),
        "tools served by other providers are not routed here: {call_result:?}"
    );
    Ok(())
}

#[tokio::test]
async fn list_tools_exposes_schemas() -> Result<()> {
    let (client, server_task) = start_in_process(ServerConfig::default()).await?;
    let list = client.list_tools(None).await;
    let _ = client.cancel().await;
    let _ = server_task.await;

    let list = list?;
    let mut names: Vec<&str> = list.tools.iter().map(|tool| tool.name.as_ref()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["get_server_info", "health_check"]);

    let info_tool = list
        .tools
        .iter()
        .find(|tool| tool.name.as_ref() == "get_server_info")
        .expect("get_server_info listed");
    assert!(
        info_tool
            .input_schema
            .get("properties")
            .and_then(|props| props.get("verbose"))
            .is_some(),
        "verbose should be described in the schema: {:?}",
        info_tool.input_schema
    );
    Ok(())
}

#[tokio::test]
async fn handshake_reports_server_identity() -> Result<()> {
    let (client, server_task) = start_in_process(ServerConfig::default()).await?;
    let info = client.peer_info().cloned();
    let _ = client.cancel().await;
    let _ = server_task.await;

    let info = info.expect("server info is available after initialize");
    assert_eq!(info.server_info.name, "testagent-mcp-server");
    assert_eq!(info.server_info.version, "1.0.0");
    assert!(info.capabilities.tools.is_some());
    Ok(())
}
