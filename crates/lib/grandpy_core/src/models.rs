//! Wire models exchanged with the `/question` endpoint.

use serde::{Deserialize, Serialize};

/// Name of the form field carrying the user's question.
pub const QUESTION_FIELD: &str = "question";

/// Answer returned by the `/question` endpoint.
///
/// Positive answers carry the location and article fields; negative answers
/// only carry `found: false` and the answer text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub found: bool,
    /// The question as the server received it. Negative payloads may omit it.
    #[serde(default)]
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    /// Article title, used as the link tooltip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AnswerResponse {
    /// Coordinates when both are present and within GPS ranges.
    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat.abs() <= 90.0 && lng.abs() <= 180.0 => Some((lat, lng)),
            _ => None,
        }
    }

    /// Parse a JSON body.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Fields serialized from the chat form, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionForm {
    fields: Vec<(String, String)>,
}

impl QuestionForm {
    /// Form with only the `question` field.
    pub fn with_question(question: impl Into<String>) -> Self {
        Self {
            fields: vec![(QUESTION_FIELD.to_string(), question.into())],
        }
    }

    /// Append a field. Repeated names are kept, as `FormData` does.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value of the `question` field, if any.
    pub fn question(&self) -> Option<&str> {
        self.get(QUESTION_FIELD)
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

impl<K, V> FromIterator<(K, V)> for QuestionForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
