use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Request parameters keyed by name.
///
/// Backed by a `BTreeMap` so that every serialization of the same mapping is
/// key-ordered, whatever order the entries were inserted in.
pub type Params = BTreeMap<String, Value>;

/// Whether an operation needs a signed request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
        }
    }
}

/// Request signing strategies understood by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SigningScheme {
    /// `Authorization: amx key:signature:nonce`, MD5 content digest and
    /// HMAC-SHA256 over the lowercased URL. Nonce is Unix seconds.
    #[default]
    Amx,
    /// `API-Key`/`API-Sign` header pair, SHA256 of nonce + form body and
    /// HMAC-SHA512 over path + digest. Nonce is Unix microseconds and travels
    /// inside the body.
    MessageSignature,
}

impl fmt::Display for SigningScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amx => write!(f, "amx"),
            Self::MessageSignature => write!(f, "message-signature"),
        }
    }
}

impl FromStr for SigningScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "amx" | "a" => Ok(Self::Amx),
            "message-signature" | "message_signature" | "b" => Ok(Self::MessageSignature),
            other => Err(format!("unknown signing scheme '{}'", other)),
        }
    }
}

/// Render a parameter value the way it appears in a query string or form body
pub fn param_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Flatten parameters into ordered string pairs for URL or form encoding
pub fn params_to_pairs(params: &Params) -> Vec<(String, String)> {
    params
        .iter()
        .map(|(k, v)| (k.clone(), param_to_string(v)))
        .collect()
}
