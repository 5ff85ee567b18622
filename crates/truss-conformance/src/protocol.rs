//! The scenario protocol itself: a `Scenario` is a plain, serializable
//! description of one request/response pair, so a conformance run can be
//! driven identically whether the caller is this crate's own
//! [`crate::runner`] or an external client proxy replaying the same
//! fixtures against the same server.

use serde_json::Value;

/// One request to issue against the fixture server and the response it
/// must produce.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    /// Short, stable name identifying the scenario.
    pub name: String,
    pub method: String,
    pub path: String,
    /// Extra header to send, e.g. the metadata bag for scenario 6.
    pub header: Option<(String, String)>,
    pub body: Option<Value>,
    pub expect_status: u16,
    /// Key/value pairs the decoded JSON response must contain. Checked
    /// as a subset, not an exact match, so a fixture can carry fields a
    /// scenario doesn't care about.
    pub expect_fields: Vec<(String, Value)>,
}

/// The observed outcome of running one [`Scenario`].
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub scenario: String,
    pub passed: bool,
    pub detail: String,
}

/// The result of running every scenario in a conformance pass.
#[derive(Debug, Clone, Default)]
pub struct ScenarioReport {
    pub outcomes: Vec<ScenarioOutcome>,
}

impl ScenarioReport {
    pub fn push(&mut self, outcome: ScenarioOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failures(&self) -> Vec<&ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed).collect()
    }
}
