use serde_json::Value;

/// Parsed JSON body with named field access.
///
/// A missing key is an ordinary `None`, never a lookup panic; the
/// serialized length is captured once for payload-size aggregation.
#[derive(Debug, Clone)]
pub struct ResponseBody {
    value: Value,
    serialized_len: usize,
}

impl ResponseBody {
    #[must_use]
    pub fn new(value: Value) -> Self {
        let serialized_len = value.to_string().len();
        Self {
            value,
            serialized_len,
        }
    }

    /// Top-level object keys; empty when the body is not an object.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.value
            .as_object()
            .map(|object| object.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.value.as_object().and_then(|object| object.get(name))
    }

    #[must_use]
    pub fn id(&self) -> Option<&Value> {
        self.field("id")
    }

    /// The `type` field (named `kind` here to dodge the keyword).
    #[must_use]
    pub fn kind(&self) -> Option<&Value> {
        self.field("type")
    }

    #[must_use]
    pub fn setup(&self) -> Option<&Value> {
        self.field("setup")
    }

    #[must_use]
    pub fn punchline(&self) -> Option<&Value> {
        self.field("punchline")
    }

    /// Byte length of the compact JSON representation.
    #[must_use]
    pub const fn serialized_len(&self) -> usize {
        self.serialized_len
    }
}
