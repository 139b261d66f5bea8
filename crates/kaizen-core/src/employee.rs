//! Employee directory records.
//!
//! The directory is rebuilt from the published sheet on every load and is
//! never mutated in place.

use serde::{Deserialize, Serialize};

/// One row of the employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
  pub id:         String,
  pub name:       String,
  pub department: String,
  /// Home site as written in the sheet. Usually one of the
  /// [`Location`](crate::location::Location) labels, but not enforced.
  pub location:   String,
  /// Direct-fetch photo URL, already rewritten from a share link.
  #[serde(default, with = "crate::serde_util::empty_as_none")]
  pub photo_url:  Option<String>,
}

const FALLBACK_PHOTO: &str =
  "https://images.unsplash.com/photo-1454165833767-027ffea9e77b?w=200&h=200&fit=crop";

impl Employee {
  /// The placeholder shown when no directory could be loaded.
  pub fn fallback() -> Self {
    Self {
      id:         "demo1".to_string(),
      name:       "Setup Required".to_string(),
      department: "Admin".to_string(),
      location:   "Main Office HQ".to_string(),
      photo_url:  Some(FALLBACK_PHOTO.to_string()),
    }
  }
}

/// The built-in single-entry directory.
pub fn fallback_directory() -> Vec<Employee> { vec![Employee::fallback()] }

/// Find an employee by id.
pub fn find<'a>(directory: &'a [Employee], id: &str) -> Option<&'a Employee> {
  directory.iter().find(|e| e.id == id)
}

/// Employees whose home site is exactly `location`, in directory order.
pub fn at_location<'a>(
  directory: &'a [Employee],
  location: &str,
) -> impl Iterator<Item = &'a Employee> {
  directory.iter().filter(move |e| e.location == location)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fallback_is_demo1() {
    let dir = fallback_directory();
    assert_eq!(dir.len(), 1);
    assert_eq!(dir[0].id, "demo1");
    assert_eq!(dir[0].name, "Setup Required");
  }

  #[test]
  fn missing_photo_serialises_as_empty_string() {
    let e = Employee {
      photo_url: None,
      ..Employee::fallback()
    };
    let json = serde_json::to_value(&e).unwrap();
    assert_eq!(json["photoUrl"], "");

    let back: Employee = serde_json::from_value(json).unwrap();
    assert_eq!(back.photo_url, None);
  }

  #[test]
  fn find_by_id() {
    let dir = fallback_directory();
    assert!(find(&dir, "demo1").is_some());
    assert!(find(&dir, "nobody").is_none());
  }

  #[test]
  fn at_location_matches_home_site_exactly() {
    let dir = vec![
      Employee {
        id: "emp1".into(),
        location: "Bend".into(),
        ..Employee::fallback()
      },
      Employee::fallback(),
      Employee {
        id: "emp3".into(),
        location: "Bend".into(),
        ..Employee::fallback()
      },
    ];
    let ids: Vec<_> = at_location(&dir, "Bend").map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["emp1", "emp3"]);
    assert_eq!(at_location(&dir, "bend").count(), 0);
    assert_eq!(at_location(&dir, "Main Office HQ").next(), Some(&dir[1]));
  }
}
