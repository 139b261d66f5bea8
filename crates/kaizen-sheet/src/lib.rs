//! CSV decoding for the published Kaizen sheets.
//!
//! Converts the CSV exports of the employee directory and the submissions
//! sheet into [`kaizen_core`] records. Pure synchronous; no HTTP or storage
//! dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use kaizen_sheet::{decode_directory, decode_submissions};
//!
//! let directory_csv = "id,name,department,location,photoUrl\nemp1,Jane,Ops,Bend,\n";
//! let directory = decode_directory(directory_csv)?.records;
//! let submissions = decode_submissions(
//!   "id,submittedAt,location,employeeName,employeeId,problem,idea,wasteType,aiAnalysis\n",
//!   &directory,
//! )?;
//! println!("{} employees, {} submissions", directory.len(), submissions.records.len());
//! # Ok::<(), kaizen_sheet::Error>(())
//! ```

pub mod columns;
pub mod drive;
pub mod error;
mod map;
pub mod row;

pub use error::{Error, Result};
pub use map::{decode_directory, decode_submissions, map_employee, map_submission};

/// The outcome of decoding one export.
#[derive(Debug)]
pub struct Decoded<T> {
  /// Rows that mapped cleanly, in sheet order.
  pub records:   Vec<T>,
  /// `(1-based source line, reason)` for every dropped row.
  pub discarded: Vec<(usize, Error)>,
}

impl<T> Default for Decoded<T> {
  fn default() -> Self {
    Self {
      records:   Vec::new(),
      discarded: Vec::new(),
    }
  }
}
