//! Row → record mapping for the directory and submission sheets.

use kaizen_core::{
  employee::{self, Employee},
  submission::{DEFAULT_IMPACT, SubmissionRecord, WasteCategory},
};

use crate::{
  Decoded,
  columns::{Columns, DirectoryColumn as D, Row, SubmissionColumn as S, check_header},
  drive::direct_photo_url,
  error::{Error, Result},
  row::{decode_row, numbered_lines},
};

/// Map one decoded directory row.
pub fn map_employee(fields: Vec<String>) -> Result<Employee> {
  let mut row = Row::<D>::check(fields)?;
  Ok(Employee {
    id:         row.take(D::Id),
    name:       row.take(D::Name),
    department: row.take(D::Department),
    location:   row.take(D::Location),
    photo_url:  direct_photo_url(row.get(D::PhotoUrl)),
  })
}

/// Map one decoded submission row, resolving the photo from `directory`.
pub fn map_submission(fields: Vec<String>, directory: &[Employee]) -> Result<SubmissionRecord> {
  let mut row = Row::<S>::check(fields)?;
  let employee_id = row.take(S::EmployeeId);
  let employee_photo = employee::find(directory, &employee_id).and_then(|e| e.photo_url.clone());

  Ok(SubmissionRecord {
    id: row.take(S::Id),
    location: row.take(S::Location),
    employee_name: row.take(S::EmployeeName),
    employee_id,
    employee_photo,
    problem: row.take(S::Problem),
    impact: DEFAULT_IMPACT.to_string(),
    idea: row.take(S::Idea),
    waste_type: WasteCategory::lookup(row.get(S::WasteType)),
    ai_analysis: row.take_opt(S::AiAnalysis),
    submitted_at: row.take(S::SubmittedAt),
  })
}

fn decode_with<C, T, F>(text: &str, what: &str, mut map: F) -> Result<Decoded<T>>
where
  C: Columns,
  F: FnMut(Vec<String>) -> Result<T>,
{
  let mut lines = numbered_lines(text);
  let (_, header) = lines.next().ok_or(Error::Empty)?;
  check_header::<C>(&decode_row(header))?;

  let mut decoded = Decoded::default();
  for (line_no, line) in lines {
    match map(decode_row(line)) {
      Ok(record) => decoded.records.push(record),
      Err(e) => {
        tracing::debug!(line = line_no, reason = %e, "discarding {what} row");
        decoded.discarded.push((line_no, e));
      }
    }
  }
  Ok(decoded)
}

/// Decode the whole directory export.
///
/// Fails only when the export as a whole is unusable: no header, or a
/// header that does not match the directory layout.
pub fn decode_directory(text: &str) -> Result<Decoded<Employee>> {
  decode_with::<D, _, _>(text, "directory", map_employee)
}

/// Decode the whole submissions export against an already-decoded
/// directory. Fails like [`decode_directory`].
pub fn decode_submissions(
  text: &str,
  directory: &[Employee],
) -> Result<Decoded<SubmissionRecord>> {
  decode_with::<S, _, _>(text, "submission", |fields| map_submission(fields, directory))
}

#[cfg(test)]
mod tests {
  use super::*;

  const DIRECTORY_CSV: &str = "\
id,name,department,location,photoUrl
emp1,Jane Doe,Assembly,Plant A,https://drive.google.com/file/d/ABCDEFGHIJKLMNOPQRSTUVWXY/view
emp2,\"Poe, Sam\",Shipping,Bend,https://example.com/sam.png

,Nameless,Ops,Bend,
emp4,,Ops,Bend,
emp5,Short Row
";

  #[test]
  fn directory_row_with_drive_link() {
    let csv = "id,name,department,location,photoUrl\n\
               emp1,Jane Doe,Assembly,Plant A,https://drive.google.com/file/d/ABCDEFGHIJKLMNOPQRSTUVWXY/view\n";
    let decoded = decode_directory(csv).unwrap();
    assert_eq!(decoded.records.len(), 1);
    let e = &decoded.records[0];
    assert_eq!(e.id, "emp1");
    assert_eq!(e.name, "Jane Doe");
    assert_eq!(e.department, "Assembly");
    assert_eq!(e.location, "Plant A");
    let photo = e.photo_url.as_deref().unwrap();
    assert!(photo.contains("ABCDEFGHIJKLMNOPQRSTUVWXY"));
    assert_eq!(photo, "https://drive.google.com/uc?id=ABCDEFGHIJKLMNOPQRSTUVWXY");
  }

  #[test]
  fn directory_discards_rows_missing_id_or_name() {
    let decoded = decode_directory(DIRECTORY_CSV).unwrap();
    let ids: Vec<_> = decoded.records.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["emp1", "emp2", "emp5"]);
    assert_eq!(decoded.records[1].name, "Poe, Sam");
    assert_eq!(decoded.records[2].photo_url, None);

    assert_eq!(
      decoded.discarded,
      [(5, Error::MissingField("id")), (6, Error::MissingField("name"))]
    );
  }

  #[test]
  fn header_only_directory_is_empty() {
    let decoded = decode_directory("id,name,department,location,photoUrl\n").unwrap();
    assert!(decoded.records.is_empty());
    assert!(decoded.discarded.is_empty());
  }

  #[test]
  fn html_page_is_not_an_export() {
    let html = "<!DOCTYPE html>\n<html lang=\"en\">\n<body>Please sign in</body>\n</html>\n";
    assert!(matches!(
      decode_submissions(html, &[]),
      Err(Error::UnexpectedHeader { expected: "id", .. })
    ));
    assert!(matches!(
      decode_directory(html),
      Err(Error::UnexpectedHeader { .. })
    ));
  }

  #[test]
  fn empty_body_is_not_an_export() {
    assert_eq!(decode_directory("").unwrap_err(), Error::Empty);
    assert_eq!(decode_submissions("\n\n", &[]).unwrap_err(), Error::Empty);
  }

  #[test]
  fn submissions_resolve_photo_from_directory() {
    let directory = decode_directory(DIRECTORY_CSV).unwrap().records;
    let csv = "\
id,submittedAt,location,employeeName,employeeId,problem,idea,wasteType,aiAnalysis
s1,2024-01-01T00:00:00.000Z,Eugene,Jane Doe,emp1,\"Slow, really slow\",Go faster,Waiting,Less idle time.
s2,2024-01-02T00:00:00.000Z,Bend,Ghost,emp9,Dusty,Sweep,,
,2024-01-03T00:00:00.000Z,Bend,Nobody,emp1,x,y,,
s4,2024-01-04T00:00:00.000Z,Bend,Nobody,emp1
";
    let decoded = decode_submissions(csv, &directory).unwrap();
    assert_eq!(decoded.records.len(), 2);
    assert_eq!(
      decoded.discarded,
      [(4, Error::MissingField("id")), (5, Error::MissingField("problem"))]
    );

    let s1 = &decoded.records[0];
    assert_eq!(s1.id, "s1");
    assert_eq!(s1.problem, "Slow, really slow");
    assert_eq!(s1.waste_type, Some(WasteCategory::Waiting));
    assert_eq!(s1.ai_analysis.as_deref(), Some("Less idle time."));
    assert_eq!(
      s1.employee_photo.as_deref(),
      Some("https://drive.google.com/uc?id=ABCDEFGHIJKLMNOPQRSTUVWXY")
    );

    let s2 = &decoded.records[1];
    assert_eq!(s2.employee_photo, None);
    assert_eq!(s2.waste_type, None);
    assert_eq!(s2.ai_analysis, None);
    assert_eq!(s2.impact, DEFAULT_IMPACT);
  }
}
