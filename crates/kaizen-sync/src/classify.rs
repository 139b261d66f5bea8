//! Waste classification through the Gemini `generateContent` REST API.
//!
//! The model is asked for a JSON object `{wasteType, shortAnalysis}` via a
//! response schema. Anything short of a known waste label and a non-empty
//! analysis counts as "no verdict".

use kaizen_core::{
  classify::{Classifier, NoClassifier},
  config::ClassifierConfig,
  submission::{Classification, WasteCategory},
};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{Error, Result};

/// Classifies ideas into one of the eight wastes.
#[derive(Clone)]
pub struct GeminiClassifier {
  client: Client,
  config: ClassifierConfig,
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
  content: Content,
}

#[derive(Deserialize)]
struct Content {
  #[serde(default)]
  parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
  #[serde(default)]
  text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Verdict {
  waste_type:     String,
  short_analysis: String,
}

// ─── Client ──────────────────────────────────────────────────────────────────

fn prompt(problem: &str, idea: &str) -> String {
  let labels = WasteCategory::all()
    .iter()
    .map(|w| w.to_string())
    .collect::<Vec<_>>()
    .join(", ");
  format!(
    "Analyze this Kaizen idea. Problem: \"{problem}\". Idea: \"{idea}\". Categorize it into \
     one of the 8 Lean Wastes ({labels}) and provide a very brief (1 sentence) encouraging \
     benefit analysis."
  )
}

fn request_body(problem: &str, idea: &str) -> Value {
  json!({
    "contents": [{ "parts": [{ "text": prompt(problem, idea) }] }],
    "generationConfig": {
      "responseMimeType": "application/json",
      "responseSchema": {
        "type": "OBJECT",
        "properties": {
          "wasteType": {
            "type": "STRING",
            "description": "The most relevant Lean waste category."
          },
          "shortAnalysis": {
            "type": "STRING",
            "description": "A 1-sentence encouraging benefit analysis."
          }
        },
        "required": ["wasteType", "shortAnalysis"]
      }
    }
  })
}

/// Pull the verdict out of a `generateContent` response body.
fn parse_verdict(resp: GenerateResponse) -> Result<Classification> {
  let text = resp
    .candidates
    .into_iter()
    .flat_map(|c| c.content.parts)
    .find_map(|p| p.text)
    .ok_or_else(|| Error::Verdict("empty response".into()))?;

  let verdict: Verdict = serde_json::from_str(&text)?;
  let waste_type = WasteCategory::lookup(&verdict.waste_type)
    .ok_or_else(|| Error::Verdict(format!("unknown waste label {:?}", verdict.waste_type)))?;
  let analysis = verdict.short_analysis.trim().to_string();
  if analysis.is_empty() {
    return Err(Error::Verdict("empty analysis".into()));
  }

  Ok(Classification {
    waste_type,
    analysis,
  })
}

impl GeminiClassifier {
  pub fn new(client: Client, config: ClassifierConfig) -> Self { Self { client, config } }

  fn url(&self) -> String {
    format!(
      "{}/models/{}:generateContent",
      self.config.endpoint.trim_end_matches('/'),
      self.config.model
    )
  }

  /// Classify, reporting why it failed.
  pub async fn try_classify(&self, problem: &str, idea: &str) -> Result<Classification> {
    let url = self.url();
    let resp = self
      .client
      .post(&url)
      .query(&[("key", self.config.api_key.as_str())])
      .json(&request_body(problem, idea))
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status {
        method: "POST",
        url,
        status: resp.status(),
      });
    }
    parse_verdict(resp.json().await?)
  }
}

impl Classifier for GeminiClassifier {
  async fn classify(&self, problem: &str, idea: &str) -> Option<Classification> {
    match self.try_classify(problem, idea).await {
      Ok(c) => {
        tracing::debug!(waste = %c.waste_type, "idea classified");
        Some(c)
      }
      Err(e) => {
        tracing::warn!(error = %e, "classification failed; continuing without it");
        None
      }
    }
  }
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// The classifier picked from [`PortalConfig`](kaizen_core::config::PortalConfig).
#[derive(Clone)]
pub enum ConfiguredClassifier {
  Gemini(GeminiClassifier),
  Disabled(NoClassifier),
}

impl ConfiguredClassifier {
  /// Gemini when `config` is present, otherwise disabled.
  pub fn new(client: Client, config: Option<&ClassifierConfig>) -> Self {
    match config {
      Some(c) => Self::Gemini(GeminiClassifier::new(client, c.clone())),
      None => Self::Disabled(NoClassifier),
    }
  }
}

impl Classifier for ConfiguredClassifier {
  async fn classify(&self, problem: &str, idea: &str) -> Option<Classification> {
    match self {
      Self::Gemini(c) => c.classify(problem, idea).await,
      Self::Disabled(c) => c.classify(problem, idea).await,
    }
  }
}
