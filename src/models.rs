use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /networth`. All three fields are opaque JSON blobs owned by
/// the valuation engine's contract; nothing here inspects their shape, and an
/// absent field stays absent when the payload is forwarded.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworthRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<Value>,
    #[serde(default, rename = "museumData", skip_serializing_if = "Option::is_none")]
    pub museum_data: Option<Value>,
}

/// Options for a net-worth computation. No flag is exercised yet, so the
/// default serializes as `{}`; new knobs (valuation mode, currency) get added
/// here and flow through to the engine unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NetworthOptions {}

#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}
