//! Column layouts for the two published sheets.
//!
//! Each layout is an enum whose declaration order is the sheet's column
//! order. A [`Row`] is only constructed once every required column is
//! non-empty, so mappers can read fields without re-checking.

use std::marker::PhantomData;

use crate::error::{Error, Result};

/// A fixed sheet layout.
pub trait Columns: Copy + 'static {
  /// Every column, in sheet order.
  const ALL: &'static [Self];

  /// Zero-based position in the row.
  fn index(self) -> usize;

  /// Header label, used in discard reasons.
  fn header(self) -> &'static str;

  fn required(self) -> bool;
}

// ─── Layouts ─────────────────────────────────────────────────────────────────

/// `id, name, department, location, photoUrl`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryColumn {
  Id,
  Name,
  Department,
  Location,
  PhotoUrl,
}

impl Columns for DirectoryColumn {
  const ALL: &'static [Self] = &[
    Self::Id,
    Self::Name,
    Self::Department,
    Self::Location,
    Self::PhotoUrl,
  ];

  fn index(self) -> usize { self as usize }

  fn header(self) -> &'static str {
    match self {
      Self::Id => "id",
      Self::Name => "name",
      Self::Department => "department",
      Self::Location => "location",
      Self::PhotoUrl => "photoUrl",
    }
  }

  fn required(self) -> bool { matches!(self, Self::Id | Self::Name) }
}

/// `id, submittedAt, location, employeeName, employeeId, problem, idea,
/// wasteType, aiAnalysis`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionColumn {
  Id,
  SubmittedAt,
  Location,
  EmployeeName,
  EmployeeId,
  Problem,
  Idea,
  WasteType,
  AiAnalysis,
}

impl Columns for SubmissionColumn {
  const ALL: &'static [Self] = &[
    Self::Id,
    Self::SubmittedAt,
    Self::Location,
    Self::EmployeeName,
    Self::EmployeeId,
    Self::Problem,
    Self::Idea,
    Self::WasteType,
    Self::AiAnalysis,
  ];

  fn index(self) -> usize { self as usize }

  fn header(self) -> &'static str {
    match self {
      Self::Id => "id",
      Self::SubmittedAt => "submittedAt",
      Self::Location => "location",
      Self::EmployeeName => "employeeName",
      Self::EmployeeId => "employeeId",
      Self::Problem => "problem",
      Self::Idea => "idea",
      Self::WasteType => "wasteType",
      Self::AiAnalysis => "aiAnalysis",
    }
  }

  fn required(self) -> bool {
    matches!(
      self,
      Self::Id | Self::SubmittedAt | Self::EmployeeId | Self::Problem | Self::Idea
    )
  }
}

/// Check a header row against layout `C`.
///
/// Labels compare ASCII case-insensitively and extra trailing columns are
/// allowed. Anything else (an HTML sign-in page, a reordered sheet) is
/// rejected as a whole.
pub fn check_header<C: Columns>(fields: &[String]) -> Result<()> {
  for col in C::ALL {
    let found = fields.get(col.index()).map(String::as_str).unwrap_or_default();
    if !found.eq_ignore_ascii_case(col.header()) {
      return Err(Error::UnexpectedHeader {
        expected: col.header(),
        found:    found.to_string(),
      });
    }
  }
  Ok(())
}

// ─── Row ─────────────────────────────────────────────────────────────────────

/// Decoded fields checked against layout `C`.
#[derive(Debug)]
pub struct Row<C> {
  fields: Vec<String>,
  layout: PhantomData<C>,
}

impl<C: Columns> Row<C> {
  /// Fit `fields` to the layout. Missing trailing fields read as empty and
  /// extra fields are dropped. Fails on the first empty required column.
  pub fn check(mut fields: Vec<String>) -> Result<Self> {
    fields.resize(C::ALL.len(), String::new());
    if let Some(col) = C::ALL
      .iter()
      .find(|c| c.required() && fields[c.index()].is_empty())
    {
      return Err(Error::MissingField(col.header()));
    }
    Ok(Self {
      fields,
      layout: PhantomData,
    })
  }

  pub fn get(&self, col: C) -> &str { &self.fields[col.index()] }

  /// Move a field out, leaving it empty.
  pub fn take(&mut self, col: C) -> String { std::mem::take(&mut self.fields[col.index()]) }

  /// Like [`take`](Self::take), with empty as `None`.
  pub fn take_opt(&mut self, col: C) -> Option<String> {
    Some(self.take(col)).filter(|s| !s.is_empty())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fields(v: &[&str]) -> Vec<String> { v.iter().map(|s| s.to_string()).collect() }

  #[test]
  fn indices_follow_declaration_order() {
    for (i, c) in DirectoryColumn::ALL.iter().enumerate() {
      assert_eq!(c.index(), i);
    }
    for (i, c) in SubmissionColumn::ALL.iter().enumerate() {
      assert_eq!(c.index(), i);
    }
  }

  #[test]
  fn short_rows_are_padded() {
    let row = Row::<DirectoryColumn>::check(fields(&["emp1", "Jane"])).unwrap();
    assert_eq!(row.get(DirectoryColumn::PhotoUrl), "");
  }

  #[test]
  fn missing_required_field_is_named() {
    let err = Row::<DirectoryColumn>::check(fields(&["emp1", "", "Ops"])).unwrap_err();
    assert_eq!(err, Error::MissingField("name"));

    let err = Row::<SubmissionColumn>::check(fields(&[""])).unwrap_err();
    assert_eq!(err, Error::MissingField("id"));
  }

  #[test]
  fn submissions_need_timestamp_author_and_text() {
    let err = Row::<SubmissionColumn>::check(fields(&["s1", "", "Bend"])).unwrap_err();
    assert_eq!(err, Error::MissingField("submittedAt"));

    let err = Row::<SubmissionColumn>::check(fields(&[
      "s1", "2024-01-01", "Bend", "Jane", "emp1", "Dusty",
    ]))
    .unwrap_err();
    assert_eq!(err, Error::MissingField("idea"));
  }

  #[test]
  fn take_opt_treats_empty_as_none() {
    let mut row = Row::<SubmissionColumn>::check(fields(&[
      "s1", "2024-01-01", "Bend", "Jane", "emp1", "Dusty", "Sweep",
    ]))
    .unwrap();
    assert_eq!(row.take_opt(SubmissionColumn::AiAnalysis), None);
    assert_eq!(row.take_opt(SubmissionColumn::Location).as_deref(), Some("Bend"));
    assert_eq!(row.get(SubmissionColumn::Location), "");
  }

  #[test]
  fn header_must_match_layout() {
    check_header::<DirectoryColumn>(&fields(&["id", "name", "department", "location", "photoUrl"]))
      .unwrap();
    check_header::<DirectoryColumn>(&fields(&[
      "ID", "Name", "Department", "Location", "PhotoURL", "notes",
    ]))
    .unwrap();

    let err = check_header::<SubmissionColumn>(&fields(&["<!DOCTYPE html>"])).unwrap_err();
    assert_eq!(
      err,
      Error::UnexpectedHeader {
        expected: "id",
        found:    "<!DOCTYPE html>".into(),
      }
    );

    let err = check_header::<DirectoryColumn>(&fields(&["id", "name"])).unwrap_err();
    assert!(matches!(err, Error::UnexpectedHeader { expected: "department", .. }));
  }
}
