use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// One token and the point its arrow ends at.
///
/// The arrow starts at the previous record's `destination`, or the origin for
/// the first record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub token: String,
    pub destination: Vec3,
    pub is_input: bool,
}

impl TokenRecord {
    pub fn new(token: impl Into<String>, destination: Vec3, is_input: bool) -> Self {
        Self {
            token: token.into(),
            destination,
            is_input,
        }
    }
}

/// Body of the visualize request.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VisualizeRequest {
    pub input_text: String,
}

/// Body of the visualize response.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VisualizeResponse {
    pub tokens: Vec<TokenRecord>,
}

impl VisualizeResponse {
    pub fn from_json(body: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// An immutable loaded sequence, split once into its input and output runs.
#[derive(Clone, Debug, Default)]
pub struct TokenSequence {
    inputs: Vec<TokenRecord>,
    outputs: Vec<TokenRecord>,
}

impl TokenSequence {
    pub fn new(records: Vec<TokenRecord>) -> Self {
        let (inputs, outputs) = records.into_iter().partition(|r| r.is_input);
        Self { inputs, outputs }
    }

    pub fn inputs(&self) -> &[TokenRecord] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TokenRecord] {
        &self.outputs
    }

    /// Number of playback steps, one per output token.
    pub fn total_steps(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty() && self.outputs.is_empty()
    }
}

#[inline]
fn is_allowed_input_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '\'' | '"' | '(' | ')' | '-')
}

/// Drop everything except English letters, digits, whitespace and basic punctuation.
pub fn sanitize_input(text: &str) -> String {
    text.chars().filter(|c| is_allowed_input_char(*c)).collect()
}

/// Sanitize and trim user text into a request, rejecting blank input.
pub fn prepare_request(text: &str) -> Result<VisualizeRequest, LoadError> {
    let cleaned = sanitize_input(text);
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return Err(LoadError::EmptyInput);
    }
    Ok(VisualizeRequest {
        input_text: trimmed.to_string(),
    })
}

/// Text of the output tokens revealed so far.
///
/// Tokens carry their own spacing, so they are concatenated as-is; only the
/// first token's leading whitespace is dropped.
pub fn output_text(outputs: &[TokenRecord], step: usize) -> String {
    let revealed = &outputs[..step.min(outputs.len())];
    let mut text = String::new();
    for (i, record) in revealed.iter().enumerate() {
        if i == 0 {
            text.push_str(record.token.trim_start());
        } else {
            text.push_str(&record.token);
        }
    }
    text
}

/// Controller readout, e.g. `"2 / 5"`.
pub fn step_label(step: usize, total_steps: usize) -> String {
    format!("{step} / {total_steps}")
}
