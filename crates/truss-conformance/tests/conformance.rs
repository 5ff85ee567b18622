//! End-to-end conformance run against a real socket: every seed
//! scenario, plus one check the scenario list itself can't express
//! (OPTIONS over the wire on a known path).

use truss_conformance::{run_all, serve};

#[tokio::test]
async fn all_seed_scenarios_pass() {
    let server = serve().await.expect("fixture server binds");
    let base_url = server.base_url();

    let report = run_all(&base_url).await;

    for outcome in &report.outcomes {
        assert!(outcome.passed, "scenario '{}' failed: {}", outcome.scenario, outcome.detail);
    }
    assert!(report.all_passed());

    server.shutdown();
}

#[tokio::test]
async fn options_on_a_known_path_is_405_over_a_real_socket() {
    let server = serve().await.expect("fixture server binds");
    let base_url = server.base_url();

    let client = reqwest::Client::new();
    let response = client
        .request(reqwest::Method::OPTIONS, format!("{base_url}/CalculatorService.Add"))
        .send()
        .await
        .expect("request completes");

    assert_eq!(response.status().as_u16(), 405);

    server.shutdown();
}
