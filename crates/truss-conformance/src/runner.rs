//! Runs the seed scenarios against a live fixture server with a plain
//! [`reqwest::Client`] — the same HTTP surface an external client proxy
//! would hit, so this crate never depends on `truss_client` itself.

use serde_json::json;

use crate::protocol::{Scenario, ScenarioOutcome, ScenarioReport};

/// The six end-to-end seed scenarios.
pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "default_routing".into(),
            method: "POST".into(),
            path: "/CalculatorService.Add".into(),
            header: None,
            body: Some(json!({"a": 5, "b": 2})),
            expect_status: 200,
            expect_fields: vec![("result".into(), json!(7))],
        },
        Scenario {
            name: "restful_path_with_doc_option".into(),
            method: "GET".into(),
            path: "/addition/5/2".into(),
            header: None,
            body: None,
            expect_status: 200,
            expect_fields: vec![("result".into(), json!(7))],
        },
        Scenario {
            name: "custom_success_status".into(),
            method: "POST".into(),
            path: "/CalculatorService.Queue".into(),
            header: None,
            body: Some(json!({})),
            expect_status: 202,
            expect_fields: vec![("queued".into(), json!(true))],
        },
        Scenario {
            name: "path_prefix_present".into(),
            method: "POST".into(),
            path: "/v2/CalculatorService.AddV2".into(),
            header: None,
            body: Some(json!({"a": 1, "b": 1})),
            expect_status: 200,
            expect_fields: vec![("result".into(), json!(2))],
        },
        Scenario {
            name: "path_prefix_absent_is_404".into(),
            method: "POST".into(),
            path: "/CalculatorService.AddV2".into(),
            header: None,
            body: Some(json!({"a": 1, "b": 1})),
            expect_status: 404,
            expect_fields: vec![],
        },
        Scenario {
            name: "nested_query_string_binding".into(),
            method: "GET".into(),
            path: "/search?page.limit=42&page.offset=3&page.order=desc".into(),
            header: None,
            body: None,
            expect_status: 200,
            expect_fields: vec![
                ("limit".into(), json!(42)),
                ("offset".into(), json!(3)),
                ("order".into(), json!("desc")),
            ],
        },
        Scenario {
            name: "metadata_across_one_hop".into(),
            method: "POST".into(),
            path: "/PingService.Ping".into(),
            header: Some(("X-RPC-Values".into(), r#"{"DontPanic":{"v":42}}"#.into())),
            body: Some(json!({})),
            expect_status: 200,
            expect_fields: vec![("dont_panic".into(), json!(42))],
        },
    ]
}

/// Run every scenario against `base_url` and report pass/fail per one.
pub async fn run_all(base_url: &str) -> ScenarioReport {
    let client = reqwest::Client::new();
    let mut report = ScenarioReport::default();

    for scenario in scenarios() {
        let outcome = run_one(&client, base_url, &scenario).await;
        report.push(outcome);
    }

    report
}

async fn run_one(client: &reqwest::Client, base_url: &str, scenario: &Scenario) -> ScenarioOutcome {
    let url = format!("{base_url}{}", scenario.path);
    let method = match scenario.method.as_str() {
        "GET" => reqwest::Method::GET,
        "POST" => reqwest::Method::POST,
        "PUT" => reqwest::Method::PUT,
        "PATCH" => reqwest::Method::PATCH,
        "DELETE" => reqwest::Method::DELETE,
        other => {
            return ScenarioOutcome {
                scenario: scenario.name.clone(),
                passed: false,
                detail: format!("unsupported method {other}"),
            }
        }
    };

    let mut request = client.request(method, url);
    if let Some((name, value)) = &scenario.header {
        request = request.header(name, value);
    }
    if let Some(body) = &scenario.body {
        request = request.json(body);
    }

    let response = match request.send().await {
        Ok(r) => r,
        Err(err) => {
            return ScenarioOutcome {
                scenario: scenario.name.clone(),
                passed: false,
                detail: format!("request failed: {err}"),
            }
        }
    };

    let status = response.status().as_u16();
    if status != scenario.expect_status {
        return ScenarioOutcome {
            scenario: scenario.name.clone(),
            passed: false,
            detail: format!("expected status {}, got {status}", scenario.expect_status),
        };
    }

    let body: serde_json::Value = match response.json().await {
        Ok(v) => v,
        Err(_) if scenario.expect_fields.is_empty() => serde_json::Value::Null,
        Err(err) => {
            return ScenarioOutcome {
                scenario: scenario.name.clone(),
                passed: false,
                detail: format!("response body was not JSON: {err}"),
            }
        }
    };

    for (key, expected) in &scenario.expect_fields {
        if body.get(key) != Some(expected) {
            return ScenarioOutcome {
                scenario: scenario.name.clone(),
                passed: false,
                detail: format!("field '{key}' was {:?}, expected {expected:?}", body.get(key)),
            };
        }
    }

    ScenarioOutcome {
        scenario: scenario.name.clone(),
        passed: true,
        detail: "ok".into(),
    }
}
