//! Huddle wall queries over the merged submission list.

use std::cmp::Reverse;

use serde::Serialize;

use crate::submission::{SubmissionRecord, WasteCategory};

/// Filter and sort submissions for the wall.
///
/// `term` matches case-insensitively against employee name, idea and
/// problem; an empty term matches everything. `location`, when given, must
/// equal the record's location exactly. Results are newest first; records
/// whose timestamp cannot be parsed sort last, keeping their relative order.
pub fn search<'a>(
  submissions: &'a [SubmissionRecord],
  term: &str,
  location: Option<&str>,
) -> Vec<&'a SubmissionRecord> {
  let needle = term.trim().to_lowercase();

  let mut hits: Vec<&SubmissionRecord> = submissions
    .iter()
    .filter(|s| location.is_none_or(|loc| s.location == loc))
    .filter(|s| {
      needle.is_empty()
        || s.employee_name.to_lowercase().contains(&needle)
        || s.idea.to_lowercase().contains(&needle)
        || s.problem.to_lowercase().contains(&needle)
    })
    .collect();

  hits.sort_by_key(|s| Reverse(s.submitted_at_utc()));
  hits
}

/// Count of submissions in one waste category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteCount {
  pub waste_type: WasteCategory,
  pub count:      usize,
}

/// Totals shown above the wall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WallStats {
  pub total:        usize,
  pub unclassified: usize,
  /// One entry per category, in taxonomy order, including zero counts.
  pub by_waste:     Vec<WasteCount>,
}

pub fn waste_breakdown<'a, I>(submissions: I) -> WallStats
where
  I: IntoIterator<Item = &'a SubmissionRecord>,
{
  let mut by_waste: Vec<WasteCount> = WasteCategory::all()
    .into_iter()
    .map(|waste_type| WasteCount {
      waste_type,
      count: 0,
    })
    .collect();
  let mut total = 0;
  let mut unclassified = 0;

  for s in submissions {
    total += 1;
    match s.waste_type {
      Some(w) => {
        if let Some(entry) = by_waste.iter_mut().find(|c| c.waste_type == w) {
          entry.count += 1;
        }
      }
      None => unclassified += 1,
    }
  }

  WallStats {
    total,
    unclassified,
    by_waste,
  }
}
