use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckAvailabilityArgs {
    #[serde(default, deserialize_with = "loose_text")]
    pub check_in: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub check_out: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBookingArgs {
    #[serde(default, deserialize_with = "loose_text")]
    pub name: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub check_in: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub check_out: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub guests: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub room_type: String,
    #[serde(default, deserialize_with = "loose_text")]
    pub contact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResponse {
    pub result: String,
}

/// LLM tool calls are loosely typed: accept `null`, strings, numbers and
/// booleans, and keep everything as text for the engine to interpret.
fn loose_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}
