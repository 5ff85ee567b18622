//! A reference gateway fixture plus a data-driven scenario protocol for
//! exercising the six end-to-end seed scenarios against a real TCP
//! listener.
//!
//! Existing in-process gateway tests dispatch through
//! `tower::ServiceExt::oneshot`, which never opens a socket. A generated
//! client proxy in another language needs an actual port to connect to,
//! so this crate spawns the same kind of `Registry`-built gateway behind
//! a loopback listener and exposes a scenario list any HTTP client —
//! Rust's own [`truss_client`](https://docs.rs/truss-client), or a
//! generated TypeScript/Python proxy driven from outside the process —
//! can be checked against.

mod fixture;
mod protocol;
mod runner;
mod server;

pub use fixture::build_gateway;
pub use protocol::{Scenario, ScenarioOutcome, ScenarioReport};
pub use runner::{run_all, scenarios};
pub use server::{serve, ServerHandle};
