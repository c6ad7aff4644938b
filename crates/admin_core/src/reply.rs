use serde::Deserialize;
use serde_json::Value;

/// JSON body the admin endpoints answer mutations with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ServerReply {
    /// Absent counts as a rejection.
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<String>>,
    #[serde(default)]
    pub data: Option<ReplyData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ReplyData {
    #[serde(default)]
    pub deleted: Option<u64>,
}

impl ServerReply {
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn succeeded(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn rejected(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors: Some(errors),
            ..Self::default()
        }
    }
}

/// What became of a mutation request once the transport is done with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// A 2xx answer carrying a well-formed reply.
    Replied(ServerReply),
    /// Non-2xx status, unreadable body or no answer at all.
    Failed { status: Option<u16>, body: String },
}

/// Message wording of one kind of mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureWording {
    pub fallback: &'static str,
    pub separator: &'static str,
}

pub const DELETE_WORDING: FailureWording = FailureWording {
    fallback: "Failed to delete item",
    separator: ", ",
};

pub const BULK_DELETE_WORDING: FailureWording = FailureWording {
    fallback: "Failed to delete items",
    separator: "\n",
};

pub(crate) const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Text for a reply with `success: false`.
pub fn rejection_message(reply: &ServerReply, wording: FailureWording) -> String {
    let detail = match reply.errors.as_deref() {
        Some(errors) if !errors.is_empty() => errors.join(wording.separator),
        _ => UNKNOWN_ERROR.to_string(),
    };
    format!("Error: {detail}")
}

/// Text for a failed request: the body's `errors` or `message` when it is
/// JSON, the raw body when it is not, the fallback when it is empty.
pub fn failure_message(body: &str, wording: FailureWording) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            extract_errors(&value, wording.separator)
                .or_else(|| {
                    value
                        .get("message")
                        .and_then(Value::as_str)
                        .map(ToOwned::to_owned)
                })
                .unwrap_or_else(|| wording.fallback.to_string())
        }
        Err(_) if body.is_empty() => wording.fallback.to_string(),
        Err(_) => body.to_string(),
    }
}

fn extract_errors(value: &Value, separator: &str) -> Option<String> {
    let errors = value.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }
    let parts: Vec<String> = errors
        .iter()
        .map(|item| match item {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect();
    Some(parts.join(separator))
}
