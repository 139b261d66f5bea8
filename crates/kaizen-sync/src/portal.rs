//! [`Portal`]: the directory, the reconciled submissions, and the clients
//! that keep them in step with the sheet.

use std::sync::Arc;

use kaizen_core::{
  classify::Classifier,
  config::PortalConfig,
  employee::{self, Employee},
  location::Location,
  reconcile::Reconciler,
  session::Session,
  store::KeyValueStore,
  submission::{Classification, NewSubmission, SubmissionRecord},
};
use kaizen_sheet::{decode_directory, decode_submissions};

use crate::{
  Result, classify::ConfiguredClassifier, http_client, sheet::SheetClient, webhook::WebhookSink,
};

/// One kiosk's view of the Kaizen sheet.
pub struct Portal<S, C = ConfiguredClassifier> {
  config:     PortalConfig,
  sheets:     SheetClient,
  webhook:    Option<WebhookSink>,
  classifier: C,
  store:      Arc<S>,
  directory:  Vec<Employee>,
  reconciler: Reconciler<S>,
}

/// A [`NewSubmission`] that passed validation against the directory.
#[derive(Debug, Clone)]
pub struct Draft {
  pub location: Location,
  pub employee: Employee,
  pub problem:  String,
  pub idea:     String,
}

impl<S: KeyValueStore> Portal<S> {
  /// Build a portal with the classifier named in `config`. Nothing is
  /// fetched until [`load`](Self::load).
  pub fn new(config: PortalConfig, store: Arc<S>) -> Result<Self> {
    let classifier = ConfiguredClassifier::new(http_client()?, config.classifier());
    Self::with_classifier(config, store, classifier)
  }
}

impl<S: KeyValueStore, C: Classifier> Portal<S, C> {
  /// Build a portal around an explicit classifier.
  ///
  /// The directory starts as the built-in fallback.
  pub fn with_classifier(config: PortalConfig, store: Arc<S>, classifier: C) -> Result<Self> {
    let client = http_client()?;
    let webhook = config
      .submissions_write_url()
      .map(|url| WebhookSink::new(client.clone(), url));

    Ok(Self {
      sheets: SheetClient::new(client),
      webhook,
      classifier,
      reconciler: Reconciler::new(store.clone()),
      store,
      directory: employee::fallback_directory(),
      config,
    })
  }

  pub fn config(&self) -> &PortalConfig { &self.config }

  pub fn store(&self) -> &S { &self.store }

  pub fn classifier(&self) -> &C { &self.classifier }

  pub fn directory(&self) -> &[Employee] { &self.directory }

  /// Submissions in wall order as last reconciled.
  pub fn submissions(&self) -> &[SubmissionRecord] { self.reconciler.submissions() }

  pub fn submission(&self, id: &str) -> Option<&SubmissionRecord> { self.reconciler.get(id) }

  // ── Loading ───────────────────────────────────────────────────────────────

  /// Refresh the directory, then the submissions.
  ///
  /// Remote failures fall back silently; only a local storage failure is
  /// an error.
  pub async fn load(&mut self) -> Result<()> {
    self.directory = self.fetch_directory().await;
    let remote = self.fetch_submissions().await;
    self.reconciler.reconcile(remote).await?;
    Ok(())
  }

  async fn fetch_directory(&self) -> Vec<Employee> {
    let Some(url) = self.config.directory_url() else {
      tracing::info!("no directory source configured; using built-in directory");
      return employee::fallback_directory();
    };

    let text = match self.sheets.fetch_csv(url).await {
      Ok(text) => text,
      Err(e) => {
        tracing::warn!(error = %e, "directory fetch failed; using built-in directory");
        return employee::fallback_directory();
      }
    };

    let decoded = match decode_directory(&text) {
      Ok(decoded) => decoded,
      Err(e) => {
        tracing::warn!(error = %e, "directory is not a sheet export; using built-in directory");
        return employee::fallback_directory();
      }
    };
    if decoded.records.is_empty() {
      tracing::warn!(
        discarded = decoded.discarded.len(),
        "directory has no usable rows; using built-in directory"
      );
      return employee::fallback_directory();
    }
    tracing::info!(
      employees = decoded.records.len(),
      discarded = decoded.discarded.len(),
      "directory loaded"
    );
    decoded.records
  }

  /// `None` means "no usable remote list"; the reconciler then keeps local
  /// data as it is.
  async fn fetch_submissions(&self) -> Option<Vec<SubmissionRecord>> {
    let url = self.config.submissions_read_url()?;

    let text = match self.sheets.fetch_csv(url).await {
      Ok(text) => text,
      Err(e) => {
        tracing::warn!(error = %e, "submissions fetch failed; using local data");
        return None;
      }
    };

    let decoded = match decode_submissions(&text, &self.directory) {
      Ok(decoded) => decoded,
      Err(e) => {
        tracing::warn!(error = %e, "submissions sheet is not a sheet export; using local data");
        return None;
      }
    };
    if decoded.records.is_empty() && !decoded.discarded.is_empty() {
      tracing::warn!(
        discarded = decoded.discarded.len(),
        "submissions sheet has no usable rows; using local data"
      );
      return None;
    }
    Some(decoded.records)
  }

  // ── Sessions ──────────────────────────────────────────────────────────────

  /// Start a kiosk session against the current directory.
  pub async fn start_session(&self, location_param: Option<&str>) -> Result<Session> {
    Ok(Session::start(self.store.as_ref(), &self.directory, location_param).await?)
  }

  // ── Submitting ────────────────────────────────────────────────────────────

  /// Check `input` against the location list and the current directory.
  /// Problem and idea are trimmed and must not be empty.
  pub fn validate(&self, input: NewSubmission) -> Result<Draft> {
    let location = Location::lookup(&input.location)
      .ok_or_else(|| kaizen_core::Error::UnknownLocation(input.location.clone()))?;
    let employee = employee::find(&self.directory, &input.employee_id)
      .ok_or_else(|| kaizen_core::Error::UnknownEmployee(input.employee_id.clone()))?
      .clone();
    Ok(Draft {
      location,
      employee,
      problem: required(input.problem, "problem")?,
      idea: required(input.idea, "idea")?,
    })
  }

  /// Put a validated draft at the top of the local list and hand it to the
  /// webhook in the background. The returned record is already persisted
  /// locally.
  pub async fn record(
    &mut self,
    draft: Draft,
    classification: Option<Classification>,
  ) -> Result<SubmissionRecord> {
    let Draft {
      location,
      employee,
      problem,
      idea,
    } = draft;
    let record = SubmissionRecord::create(location, &employee, problem, idea, classification);
    let record = self.reconciler.append(record).await?.clone();
    tracing::info!(id = %record.id, %location, employee = %employee.id, "idea submitted");

    match &self.webhook {
      Some(sink) => {
        let _ = sink.dispatch(record.clone());
      }
      None => tracing::debug!("no write webhook configured; kept locally only"),
    }

    Ok(record)
  }

  /// Validate, classify, then [`record`](Self::record) a new idea.
  pub async fn submit(&mut self, input: NewSubmission) -> Result<SubmissionRecord> {
    let draft = self.validate(input)?;
    let classification = self.classifier.classify(&draft.problem, &draft.idea).await;
    self.record(draft, classification).await
  }
}

fn required(value: String, field: &'static str) -> Result<String, kaizen_core::Error> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(kaizen_core::Error::MissingField(field));
  }
  Ok(trimmed.to_string())
}
