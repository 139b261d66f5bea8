//! The `Classifier` trait: tags an idea with one of the eight wastes.
//!
//! Classification is advisory. An implementation reports every failure as
//! `None` and the submission goes ahead without a tag.

use std::future::Future;

use crate::submission::Classification;

/// Suggests a waste category and a one-line analysis for an idea.
pub trait Classifier: Send + Sync {
  fn classify<'a>(
    &'a self,
    problem: &'a str,
    idea: &'a str,
  ) -> impl Future<Output = Option<Classification>> + Send + 'a;
}

/// Used when no classifier is configured. Never returns a verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClassifier;

impl Classifier for NoClassifier {
  async fn classify(&self, _problem: &str, _idea: &str) -> Option<Classification> { None }
}
