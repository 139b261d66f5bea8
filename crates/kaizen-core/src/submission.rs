//! Submission records: the unit that travels between kiosk, local storage
//! and the sheet.
//!
//! A record is created once, on the kiosk that received it, and never
//! changes afterwards. Its `id` is the only identity; two records with the
//! same id are the same submission.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use uuid::Uuid;

use crate::{employee::Employee, location::Location};

// ─── Waste taxonomy ──────────────────────────────────────────────────────────

/// The eight Lean wastes.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum WasteCategory {
  Defects,
  Overproduction,
  Waiting,
  #[serde(rename = "Non-Utilized Talent")]
  #[strum(serialize = "Non-Utilized Talent")]
  NonUtilizedTalent,
  Transportation,
  Inventory,
  Motion,
  #[serde(rename = "Extra-Processing")]
  #[strum(serialize = "Extra-Processing")]
  ExtraProcessing,
}

impl WasteCategory {
  pub fn all() -> Vec<WasteCategory> { WasteCategory::iter().collect() }

  /// Parse a label from the sheet or the classifier. Unknown or empty labels
  /// are `None`.
  pub fn lookup(value: &str) -> Option<WasteCategory> { value.trim().parse().ok() }
}

/// The classifier's verdict on a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
  pub waste_type: WasteCategory,
  /// One encouraging sentence about the expected benefit.
  pub analysis:   String,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// Constant carried in the `impact` column of every record.
pub const DEFAULT_IMPACT: &str = "Improvement project";

fn default_impact() -> String { DEFAULT_IMPACT.to_string() }

/// A Kaizen submission as stored locally and posted to the sheet.
///
/// Serialised with camelCase keys; this is the webhook payload and the
/// persisted snapshot format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
  pub id:             String,
  pub location:       String,
  pub employee_id:    String,
  pub employee_name:  String,
  /// Resolved from the directory at read time; not authoritative.
  #[serde(default, with = "crate::serde_util::empty_as_none")]
  pub employee_photo: Option<String>,
  pub problem:        String,
  #[serde(default = "default_impact")]
  pub impact:         String,
  pub idea:           String,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none",
    deserialize_with = "crate::serde_util::lenient_waste::deserialize"
  )]
  pub waste_type:     Option<WasteCategory>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ai_analysis:    Option<String>,
  /// ISO 8601 creation time.
  pub submitted_at:   String,
}

/// Sheet exports sometimes reformat timestamps into locale forms.
const SHEET_TIMESTAMP_FORMATS: &[&str] = &["%m/%d/%Y %H:%M:%S", "%Y-%m-%d %H:%M:%S"];

impl SubmissionRecord {
  /// Build a fresh record with a new UUID and the current time.
  pub fn create(
    location: Location,
    employee: &Employee,
    problem: String,
    idea: String,
    classification: Option<Classification>,
  ) -> Self {
    let (waste_type, ai_analysis) = match classification {
      Some(c) => (Some(c.waste_type), Some(c.analysis)),
      None => (None, None),
    };
    Self {
      id: Uuid::new_v4().to_string(),
      location: location.to_string(),
      employee_id: employee.id.clone(),
      employee_name: employee.name.clone(),
      employee_photo: employee.photo_url.clone(),
      problem,
      impact: default_impact(),
      idea,
      waste_type,
      ai_analysis,
      submitted_at: now_iso(),
    }
  }

  /// Parse `submitted_at`; `None` if it is in no recognised format.
  pub fn submitted_at_utc(&self) -> Option<DateTime<Utc>> {
    let raw = self.submitted_at.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
      return Some(dt.with_timezone(&Utc));
    }
    SHEET_TIMESTAMP_FORMATS
      .iter()
      .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
      .map(|n| n.and_utc())
  }
}

/// Current time as `YYYY-MM-DDTHH:MM:SS.sssZ`.
pub fn now_iso() -> String { Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true) }

// ─── Input ───────────────────────────────────────────────────────────────────

/// What the kiosk collects before a record is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
  pub location:    String,
  pub employee_id: String,
  pub problem:     String,
  pub idea:        String,
}
