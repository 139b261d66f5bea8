//! The kiosk's three-step wizard: pick a location, pick yourself, write the
//! idea.
//!
//! A kiosk remembers the last location and employee so a returning user lands
//! straight on the idea form. A location handed in at startup (from a site
//! QR code) pre-selects that location.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  employee::{self, Employee},
  location::Location,
  store::{KeyValueStore, keys},
};

/// Wizard position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
  Location,
  Profile,
  Idea,
}

/// Selections made so far on this kiosk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
  pub step:     WizardStep,
  pub location: Option<Location>,
  pub employee: Option<Employee>,
}

impl Default for Session {
  fn default() -> Self {
    Self {
      step:     WizardStep::Location,
      location: None,
      employee: None,
    }
  }
}

impl Session {
  /// Start a session.
  ///
  /// 1. A `location_param` naming a known location is selected, remembered,
  ///    and the wizard moves to the profile step.
  /// 2. If a remembered employee (present in `directory`) and a remembered
  ///    location both exist, the wizard resumes at the idea step.
  /// 3. Otherwise it starts at the location step.
  pub async fn start<S: KeyValueStore>(
    store: &S,
    directory: &[Employee],
    location_param: Option<&str>,
  ) -> Result<Self> {
    let mut session = Session::default();

    if let Some(loc) = location_param.and_then(Location::lookup) {
      store
        .set(keys::LOCATION, loc.to_string())
        .await
        .map_err(Error::store)?;
      session.location = Some(loc);
      session.step = WizardStep::Profile;
      tracing::debug!(location = %loc, "location preselected");
    }

    let saved_user = store.get(keys::USER_ID).await.map_err(Error::store)?;
    let saved_location = store.get(keys::LOCATION).await.map_err(Error::store)?;

    if let (Some(user_id), Some(saved_location)) = (saved_user, saved_location) {
      let employee = employee::find(directory, &user_id);
      let location = Location::lookup(&saved_location);
      if let (Some(employee), Some(location)) = (employee, location) {
        tracing::debug!(employee = %employee.id, %location, "resuming session");
        session.employee = Some(employee.clone());
        session.location = Some(location);
        session.step = WizardStep::Idea;
      }
    }

    Ok(session)
  }

  /// Choose a location, remember it, and move to the profile step.
  pub async fn select_location<S: KeyValueStore>(
    &mut self,
    store: &S,
    location: &str,
  ) -> Result<()> {
    let loc =
      Location::lookup(location).ok_or_else(|| Error::UnknownLocation(location.to_string()))?;
    store
      .set(keys::LOCATION, loc.to_string())
      .await
      .map_err(Error::store)?;
    self.location = Some(loc);
    self.step = WizardStep::Profile;
    Ok(())
  }

  /// Choose an employee from `directory`, remember them, and move to the idea
  /// step. A location must already be selected.
  pub async fn select_employee<S: KeyValueStore>(
    &mut self,
    store: &S,
    directory: &[Employee],
    employee_id: &str,
  ) -> Result<()> {
    if self.location.is_none() {
      return Err(Error::NoLocationSelected);
    }
    let employee = employee::find(directory, employee_id)
      .ok_or_else(|| Error::UnknownEmployee(employee_id.to_string()))?;
    store
      .set(keys::USER_ID, employee.id.clone())
      .await
      .map_err(Error::store)?;
    self.employee = Some(employee.clone());
    self.step = WizardStep::Idea;
    Ok(())
  }

  /// Step back one screen. Selections are kept.
  pub fn back(&mut self) {
    self.step = match self.step {
      WizardStep::Location | WizardStep::Profile => WizardStep::Location,
      WizardStep::Idea => WizardStep::Profile,
    };
  }

  /// Reset after a successful submission: returning users go straight back
  /// to the idea form.
  pub fn finish(&mut self) {
    self.step = if self.employee.is_some() {
      WizardStep::Idea
    } else {
      WizardStep::Location
    };
  }

  /// Forget remembered selections on this kiosk.
  pub async fn forget<S: KeyValueStore>(store: &S) -> Result<()> {
    store.remove(keys::USER_ID).await.map_err(Error::store)?;
    store.remove(keys::LOCATION).await.map_err(Error::store)?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryStore;

  fn directory() -> Vec<Employee> {
    vec![Employee {
      id:         "emp1".into(),
      name:       "Jane Doe".into(),
      department: "Assembly".into(),
      location:   "Eugene".into(),
      photo_url:  None,
    }]
  }

  #[tokio::test]
  async fn fresh_kiosk_starts_at_location() {
    let store = MemoryStore::new();
    let s = Session::start(&store, &directory(), None).await.unwrap();
    assert_eq!(s, Session::default());
  }

  #[tokio::test]
  async fn location_param_preselects_and_remembers() {
    let store = MemoryStore::new();
    let s = Session::start(&store, &directory(), Some("Eugene"))
      .await
      .unwrap();
    assert_eq!(s.step, WizardStep::Profile);
    assert_eq!(s.location, Some(Location::Eugene));
    assert_eq!(
      store.get(keys::LOCATION).await.unwrap().as_deref(),
      Some("Eugene")
    );
  }

  #[tokio::test]
  async fn unknown_location_param_is_ignored() {
    let store = MemoryStore::new();
    let s = Session::start(&store, &directory(), Some("Narnia"))
      .await
      .unwrap();
    assert_eq!(s.step, WizardStep::Location);
    assert_eq!(store.get(keys::LOCATION).await.unwrap(), None);
  }

  #[tokio::test]
  async fn remembered_user_resumes_at_idea() {
    let store = MemoryStore::new();
    store.set(keys::USER_ID, "emp1".into()).await.unwrap();
    store.set(keys::LOCATION, "Salem".into()).await.unwrap();

    let s = Session::start(&store, &directory(), None).await.unwrap();
    assert_eq!(s.step, WizardStep::Idea);
    assert_eq!(s.location, Some(Location::Salem));
    assert_eq!(s.employee.unwrap().id, "emp1");
  }

  #[tokio::test]
  async fn preselect_then_resume_uses_param_location() {
    let store = MemoryStore::new();
    store.set(keys::USER_ID, "emp1".into()).await.unwrap();
    store.set(keys::LOCATION, "Salem".into()).await.unwrap();

    let s = Session::start(&store, &directory(), Some("Bend"))
      .await
      .unwrap();
    assert_eq!(s.step, WizardStep::Idea);
    assert_eq!(s.location, Some(Location::Bend));
  }

  #[tokio::test]
  async fn remembered_user_missing_from_directory_does_not_resume() {
    let store = MemoryStore::new();
    store.set(keys::USER_ID, "gone".into()).await.unwrap();
    store.set(keys::LOCATION, "Salem".into()).await.unwrap();

    let s = Session::start(&store, &directory(), None).await.unwrap();
    assert_eq!(s.step, WizardStep::Location);
  }

  #[tokio::test]
  async fn select_flow_and_finish() {
    let store = MemoryStore::new();
    let dir = directory();
    let mut s = Session::default();

    assert!(matches!(
      s.select_employee(&store, &dir, "emp1").await,
      Err(Error::NoLocationSelected)
    ));

    s.select_location(&store, "Eugene").await.unwrap();
    assert_eq!(s.step, WizardStep::Profile);

    assert!(matches!(
      s.select_employee(&store, &dir, "nobody").await,
      Err(Error::UnknownEmployee(_))
    ));
    s.select_employee(&store, &dir, "emp1").await.unwrap();
    assert_eq!(s.step, WizardStep::Idea);
    assert_eq!(
      store.get(keys::USER_ID).await.unwrap().as_deref(),
      Some("emp1")
    );

    s.back();
    assert_eq!(s.step, WizardStep::Profile);
    s.finish();
    assert_eq!(s.step, WizardStep::Idea);
  }

  #[tokio::test]
  async fn select_unknown_location_fails() {
    let store = MemoryStore::new();
    let mut s = Session::default();
    assert!(matches!(
      s.select_location(&store, "Atlantis").await,
      Err(Error::UnknownLocation(_))
    ));
    assert_eq!(s.step, WizardStep::Location);
  }

  #[tokio::test]
  async fn forget_clears_resume() {
    let store = MemoryStore::new();
    store.set(keys::USER_ID, "emp1".into()).await.unwrap();
    store.set(keys::LOCATION, "Salem".into()).await.unwrap();

    Session::forget(&store).await.unwrap();
    let s = Session::start(&store, &directory(), None).await.unwrap();
    assert_eq!(s.step, WizardStep::Location);
  }
}
