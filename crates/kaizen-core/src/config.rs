//! Portal configuration: where the sheet lives and who classifies ideas.
//!
//! Every URL is optional. An absent (or blank) URL disables that data source;
//! the portal then runs on its fallbacks.

use serde::Deserialize;

/// Default Gemini REST endpoint.
pub const DEFAULT_CLASSIFIER_ENDPOINT: &str =
  "https://generativelanguage.googleapis.com/v1beta";

/// Default model used for waste classification.
pub const DEFAULT_CLASSIFIER_MODEL: &str = "gemini-3-flash-preview";

/// External data sources for one portal instance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PortalConfig {
  /// Published CSV export of the employee directory.
  #[serde(default)]
  pub directory_url:         Option<String>,
  /// Published CSV export of the submissions sheet.
  #[serde(default)]
  pub submissions_read_url:  Option<String>,
  /// Webhook (e.g. an Apps Script deployment) that appends a submission.
  #[serde(default)]
  pub submissions_write_url: Option<String>,
  #[serde(default)]
  pub classifier:            Option<ClassifierConfig>,
}

/// Credentials and model selection for the classification endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
  pub api_key:  String,
  #[serde(default = "default_model")]
  pub model:    String,
  #[serde(default = "default_endpoint")]
  pub endpoint: String,
}

fn default_model() -> String { DEFAULT_CLASSIFIER_MODEL.to_string() }

fn default_endpoint() -> String { DEFAULT_CLASSIFIER_ENDPOINT.to_string() }

fn configured(url: &Option<String>) -> Option<&str> {
  url.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl PortalConfig {
  pub fn directory_url(&self) -> Option<&str> { configured(&self.directory_url) }

  pub fn submissions_read_url(&self) -> Option<&str> {
    configured(&self.submissions_read_url)
  }

  pub fn submissions_write_url(&self) -> Option<&str> {
    configured(&self.submissions_write_url)
  }

  /// The classifier settings, if an API key is present.
  pub fn classifier(&self) -> Option<&ClassifierConfig> {
    self
      .classifier
      .as_ref()
      .filter(|c| !c.api_key.trim().is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_urls_count_as_unconfigured() {
    let cfg = PortalConfig {
      directory_url: Some("  ".into()),
      submissions_read_url: Some("https://example.com/sheet.csv".into()),
      ..Default::default()
    };
    assert_eq!(cfg.directory_url(), None);
    assert_eq!(
      cfg.submissions_read_url(),
      Some("https://example.com/sheet.csv")
    );
    assert_eq!(cfg.submissions_write_url(), None);
  }

  #[test]
  fn classifier_defaults_fill_in() {
    let cfg: PortalConfig =
      serde_json::from_str(r#"{"classifier": {"api_key": "k"}}"#).unwrap();
    let c = cfg.classifier().unwrap();
    assert_eq!(c.model, DEFAULT_CLASSIFIER_MODEL);
    assert_eq!(c.endpoint, DEFAULT_CLASSIFIER_ENDPOINT);
  }

  #[test]
  fn empty_api_key_disables_classifier() {
    let cfg: PortalConfig =
      serde_json::from_str(r#"{"classifier": {"api_key": ""}}"#).unwrap();
    assert!(cfg.classifier().is_none());
  }
}
