//! Merging remote and local submission lists.
//!
//! The persisted list is always written as a full snapshot under
//! [`keys::SUBMISSIONS`]; there is no incremental persistence.

use std::{collections::HashSet, sync::Arc};

use crate::{
  Error, Result,
  store::{KeyValueStore, keys},
  submission::SubmissionRecord,
};

/// Union `remote ++ local`, keeping the first record seen for each id.
///
/// Remote entries therefore win over local ones with the same id, and
/// local-only entries follow all remote entries in their original order.
pub fn merge(
  remote: Vec<SubmissionRecord>,
  local: Vec<SubmissionRecord>,
) -> Vec<SubmissionRecord> {
  let mut seen = HashSet::new();
  remote
    .into_iter()
    .chain(local)
    .filter(|r| seen.insert(r.id.clone()))
    .collect()
}

/// Owns the in-memory submission list and its persisted mirror.
pub struct Reconciler<S> {
  store:       Arc<S>,
  submissions: Vec<SubmissionRecord>,
}

impl<S: KeyValueStore> Reconciler<S> {
  /// A reconciler with an empty in-memory list. Call
  /// [`reconcile`](Self::reconcile) to populate it.
  pub fn new(store: Arc<S>) -> Self {
    Self {
      store,
      submissions: Vec::new(),
    }
  }

  /// The current merged list.
  pub fn submissions(&self) -> &[SubmissionRecord] { &self.submissions }

  /// Look up a submission by id.
  pub fn get(&self, id: &str) -> Option<&SubmissionRecord> {
    self.submissions.iter().find(|r| r.id == id)
  }

  /// Read the persisted snapshot. A missing key is an empty list; an
  /// unreadable value is logged and also treated as empty.
  pub async fn load_local(&self) -> Result<Vec<SubmissionRecord>> {
    let raw = self
      .store
      .get(keys::SUBMISSIONS)
      .await
      .map_err(Error::store)?;

    let Some(raw) = raw else {
      return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
      Ok(list) => Ok(list),
      Err(e) => {
        tracing::warn!(error = %e, "persisted submissions are unreadable; ignoring");
        Ok(Vec::new())
      }
    }
  }

  /// Rebuild the in-memory list.
  ///
  /// With `Some(remote)`, merge it with the persisted list and write the
  /// result back. With `None` (no remote source, or it failed), adopt the
  /// persisted list unchanged.
  pub async fn reconcile(
    &mut self,
    remote: Option<Vec<SubmissionRecord>>,
  ) -> Result<&[SubmissionRecord]> {
    let local = self.load_local().await?;

    match remote {
      Some(remote) => {
        let remote_count = remote.len();
        let local_count = local.len();
        let merged = merge(remote, local);
        self.persist(&merged).await?;
        tracing::info!(
          remote = remote_count,
          local = local_count,
          merged = merged.len(),
          "reconciled submissions"
        );
        self.submissions = merged;
      }
      None => {
        tracing::debug!(count = local.len(), "using persisted submissions only");
        self.submissions = local;
      }
    }

    Ok(&self.submissions)
  }

  /// Prepend `record`, persist the new snapshot, then publish it in memory.
  ///
  /// If persisting fails the in-memory list is left as it was.
  pub async fn append(&mut self, record: SubmissionRecord) -> Result<&SubmissionRecord> {
    let mut updated = Vec::with_capacity(self.submissions.len() + 1);
    updated.push(record);
    updated.extend(self.submissions.iter().cloned());

    self.persist(&updated).await?;
    self.submissions = updated;
    Ok(&self.submissions[0])
  }

  async fn persist(&self, list: &[SubmissionRecord]) -> Result<()> {
    let json = serde_json::to_string(list)?;
    self
      .store
      .set(keys::SUBMISSIONS, json)
      .await
      .map_err(Error::store)
  }
}
