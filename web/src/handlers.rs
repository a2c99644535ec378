//! HTTP handlers for the bridge endpoint.
//!
//! The wire contract is a single form POST carrying `action`, `ip`,
//! `port` and, for sends, `message` and `hexMode`. Address validation
//! runs first and blocks every action; the reply is a JSON object with
//! absent fields omitted.

use axum::Json;
use axum::extract::{Form, State};
use axum::response::Html;
use serde::{Deserialize, Serialize};

use tcpoke_common::network::target::Target;
use tcpoke_core::bridge::{Action, Bridge, Outcome};
use tcpoke_core::codec::Payload;

/// The form fields a browser action submits.
#[derive(Debug, Deserialize)]
pub struct BridgeForm {
    #[serde(default)]
    action: String,
    #[serde(default)]
    ip: String,
    #[serde(default)]
    port: String,
    /// Present only for `send`.
    #[serde(default)]
    message: String,
    /// Boolean-ish; present only for `send`.
    #[serde(default, rename = "hexMode")]
    hex_mode: String,
}

/// The JSON shape handed back to the page.
#[derive(Debug, Serialize)]
pub struct BridgeReply {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<String>,
}

impl From<Outcome> for BridgeReply {
    fn from(outcome: Outcome) -> Self {
        Self {
            success: outcome.success,
            message: outcome.message,
            response: outcome.response,
        }
    }
}

/// POST / - one bridge action per request.
pub async fn bridge_request(
    State(bridge): State<Bridge>,
    Form(form): Form<BridgeForm>,
) -> Json<BridgeReply> {
    Json(run_action(&bridge, form).await.into())
}

async fn run_action(bridge: &Bridge, form: BridgeForm) -> Outcome {
    // Validation first: an invalid target blocks every action.
    let target = match Target::from_parts(&form.ip, &form.port) {
        Ok(target) => target,
        Err(_) => return Outcome::rejected("Invalid IP or port number"),
    };

    let action = match form.action.as_str() {
        "connect" => Action::Probe,
        "disconnect" => Action::Acknowledge,
        "send" => Action::Transact(Payload::from_form(form.message, truthy(&form.hex_mode))),
        _ => return Outcome::rejected("Invalid operation"),
    };

    bridge.handle(target, action).await
}

/// Boolean-ish form values, the way browsers actually submit them.
fn truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "1" | "on" | "yes"
    )
}

/// GET / - the embedded operator page.
pub async fn operator_page() -> Html<&'static str> {
    Html(include_str!("demo.html"))
}

/// GET /health
pub async fn health(State(bridge): State<Bridge>) -> Json<serde_json::Value> {
    let timeouts = bridge.timeouts();
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "probe_timeout_secs": timeouts.probe.as_secs(),
        "connect_timeout_secs": timeouts.connect.as_secs(),
        "read_timeout_secs": timeouts.read.as_secs(),
    }))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
