use serde::Deserialize;
use tracing::debug;

/// What the completion service is asked to return.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub analysis: String,
    #[serde(default)]
    pub movies: Vec<String>,
}

/// Parse completion text into a `Recommendation`.
///
/// Never fails: output that does not decode into the expected object becomes
/// a recommendation whose analysis is the raw text and whose title list is empty.
pub fn parse_recommendation(raw: &str) -> Recommendation {
    let text = raw.trim();
    let body = strip_code_fence(text);

    match decode(body) {
        Ok(rec) => rec,
        Err(e) => {
            debug!("Completion output is not structured ({}), using raw text", e);
            Recommendation {
                analysis: text.to_string(),
                movies: Vec::new(),
            }
        }
    }
}

// Only a JSON object counts; serde would otherwise accept a positional array.
fn decode(body: &str) -> Result<Recommendation, serde_json::Error> {
    match serde_json::from_str::<serde_json::Value>(body)? {
        value @ serde_json::Value::Object(_) => serde_json::from_value(value),
        _ => Err(serde::de::Error::custom("expected a JSON object")),
    }
}

/// Best-effort removal of a surrounding markdown code fence, with an optional
/// language tag after the opening fence. A missing closing fence is tolerated.
pub fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Language tag runs up to the first newline, or up to the JSON itself.
    let tag_end = rest
        .find(|c: char| c == '\n' || c == '{' || c == '[')
        .unwrap_or(rest.len());
    let rest = if rest[..tag_end].trim().chars().all(|c| c.is_ascii_alphanumeric()) {
        &rest[tag_end..]
    } else {
        rest
    };

    let rest = match rest.find("```") {
        Some(end) => &rest[..end],
        None => rest,
    };
    rest.trim()
}
