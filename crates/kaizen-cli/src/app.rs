//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use kaizen_core::{
  employee::{self, Employee},
  location::Location,
  session::{Session, WizardStep},
  submission::{NewSubmission, SubmissionRecord},
};

use crate::client::ApiClient;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Pick the site this kiosk stands at.
  Location,
  /// Pick yourself from the directory.
  Profile,
  /// Write the problem and the idea.
  Idea,
  /// The printed card for the idea just submitted.
  Success,
  /// Everyone's ideas, newest first.
  Wall,
}

impl Screen {
  fn for_step(step: WizardStep) -> Self {
    match step {
      WizardStep::Location => Screen::Location,
      WizardStep::Profile => Screen::Profile,
      WizardStep::Idea => Screen::Idea,
    }
  }
}

/// Which text box on the idea form receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Problem,
  Idea,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Wizard state as last reported by the server.
  pub session: Session,

  pub locations: Vec<Location>,

  /// Directory as returned by the API.
  pub employees: Vec<Employee>,

  /// Current fuzzy-filter string (only active when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the visible (filtered) list.
  pub list_cursor: usize,

  pub problem: String,
  pub idea:    String,
  pub focus:   Field,

  /// Card text for the last submission, or the wall selection.
  pub card: Option<String>,

  /// Wall entries for the current `filter`.
  pub wall: Vec<SubmissionRecord>,

  /// Screen to return to when leaving the wall.
  pub wall_return: Screen,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::Location,
      session: Session::default(),
      locations: Location::all(),
      employees: Vec::new(),
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      problem: String::new(),
      idea: String::new(),
      focus: Field::Problem,
      card: None,
      wall: Vec::new(),
      wall_return: Screen::Location,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Load reference data and start a session, optionally preselecting
  /// `location`.
  pub async fn start(&mut self, location: Option<&str>) -> anyhow::Result<()> {
    self.status_msg = "Loading…".into();
    self.locations = self
      .client
      .locations()
      .await?
      .into_iter()
      .map(|l| l.name)
      .collect();
    self.employees = self.client.employees().await?;
    let session = self.client.start_session(location).await?;
    tracing::info!(step = ?session.step, employees = self.employees.len(), "kiosk started");
    self.apply_session(session);
    self.status_msg = String::new();
    Ok(())
  }

  /// Adopt `session` and jump to the matching screen.
  fn apply_session(&mut self, session: Session) {
    self.screen = Screen::for_step(session.step);
    self.session = session;
    self.filter.clear();
    self.filter_active = false;
    self.list_cursor = 0;
  }

  /// Report `result` in the status bar instead of failing the UI.
  fn report<T>(&mut self, result: anyhow::Result<T>) -> Option<T> {
    match result {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!(error = %e, "request failed");
        self.status_msg = format!("Error: {e}");
        None
      }
    }
  }

  // ── Filtered lists ────────────────────────────────────────────────────────

  /// Employees based at the selected location; everyone when no location
  /// is selected yet.
  pub fn site_employees(&self) -> Vec<&Employee> {
    match &self.session.location {
      Some(loc) => employee::at_location(&self.employees, loc.as_ref()).collect(),
      None => self.employees.iter().collect(),
    }
  }

  /// [`site_employees`](Self::site_employees) matching the current filter by
  /// name or department.
  pub fn filtered_employees(&self) -> Vec<&Employee> {
    let site = self.site_employees();
    if self.filter.is_empty() {
      return site;
    }
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &Employee)> = site
      .into_iter()
      .filter_map(|e| {
        let haystack = format!("{} {}", e.name, e.department);
        matcher.fuzzy_match(&haystack, &self.filter).map(|s| (s, e))
      })
      .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, e)| e).collect()
  }

  fn list_len(&self) -> usize {
    match self.screen {
      Screen::Location => self.locations.len(),
      Screen::Profile => self.filtered_employees().len(),
      Screen::Wall => self.wall.len(),
      Screen::Idea | Screen::Success => 0,
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }
    // Global: F2 toggles the huddle wall.
    if key.code == KeyCode::F(2) {
      if self.screen == Screen::Wall {
        self.leave_wall();
      } else {
        self.open_wall().await;
      }
      return Ok(true);
    }

    if self.filter_active {
      return self.handle_filter_key(key).await;
    }

    match self.screen {
      Screen::Location => self.handle_location_key(key).await,
      Screen::Profile => self.handle_profile_key(key).await,
      Screen::Idea => self.handle_idea_key(key).await,
      Screen::Success => self.handle_success_key(key),
      Screen::Wall => self.handle_wall_key(key).await,
    }
  }

  fn move_cursor(&mut self, key: KeyCode) -> bool {
    let len = self.list_len();
    match key {
      KeyCode::Down | KeyCode::Char('j') => {
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
        true
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
        true
      }
      _ => false,
    }
  }

  async fn handle_filter_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
        if self.screen == Screen::Wall {
          self.refresh_wall().await;
        }
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        if self.screen == Screen::Wall {
          self.refresh_wall().await;
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_location_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if self.move_cursor(key.code) {
      return Ok(true);
    }
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(&loc) = self.locations.get(self.list_cursor) {
          let result = self.client.select_location(loc).await;
          if let Some(session) = self.report(result) {
            self.apply_session(session);
          }
        }
      }
      KeyCode::Char('x') => {
        let result = self.client.forget().await;
        if self.report(result).is_some() {
          self.status_msg = "Remembered selections cleared.".into();
        }
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_profile_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if self.move_cursor(key.code) {
      return Ok(true);
    }
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.go_back().await,
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        let id = self
          .filtered_employees()
          .get(self.list_cursor)
          .map(|e| e.id.clone());
        if let Some(id) = id {
          let result = self.client.select_employee(&id).await;
          if let Some(session) = self.report(result) {
            self.apply_session(session);
            self.focus = Field::Problem;
          }
        }
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_idea_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let submit = key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s');
    if submit {
      self.submit().await;
      return Ok(true);
    }
    match key.code {
      KeyCode::Esc => self.go_back().await,
      KeyCode::Tab | KeyCode::BackTab => {
        self.focus = match self.focus {
          Field::Problem => Field::Idea,
          Field::Idea => Field::Problem,
        };
      }
      KeyCode::Enter => match self.focus {
        Field::Problem => self.focus = Field::Idea,
        Field::Idea => self.submit().await,
      },
      KeyCode::Backspace => {
        self.field_mut().pop();
      }
      KeyCode::Char(c) => self.field_mut().push(c),
      _ => {}
    }
    Ok(true)
  }

  fn field_mut(&mut self) -> &mut String {
    match self.focus {
      Field::Problem => &mut self.problem,
      Field::Idea => &mut self.idea,
    }
  }

  /// The submission the form would send, or why it cannot be sent yet.
  pub fn draft(&self) -> Result<NewSubmission, &'static str> {
    let location = self.session.location.ok_or("no location selected")?;
    let employee = self.session.employee.as_ref().ok_or("no employee selected")?;
    if self.problem.trim().is_empty() {
      return Err("describe the problem first");
    }
    if self.idea.trim().is_empty() {
      return Err("describe your idea first");
    }
    Ok(NewSubmission {
      location:    location.to_string(),
      employee_id: employee.id.clone(),
      problem:     self.problem.trim().to_string(),
      idea:        self.idea.trim().to_string(),
    })
  }

  async fn submit(&mut self) {
    let draft = match self.draft() {
      Ok(d) => d,
      Err(why) => {
        self.status_msg = why.to_string();
        return;
      }
    };
    self.status_msg = "Submitting…".into();
    let result = self.client.submit(&draft).await;
    let Some(record) = self.report(result) else {
      return;
    };
    tracing::info!(id = %record.id, "idea submitted");
    let result = self.client.card(&record.id).await;
    self.card = self.report(result);
    self.problem.clear();
    self.idea.clear();
    self.focus = Field::Problem;
    self.screen = Screen::Success;
    self.status_msg = match record.waste_type {
      Some(w) => format!("Thank you! Classified as {w}."),
      None => "Thank you! Your idea was recorded.".into(),
    };
  }

  fn handle_success_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Enter | KeyCode::Esc => {
        self.session.finish();
        self.screen = Screen::for_step(self.session.step);
        self.card = None;
        self.status_msg.clear();
      }
      _ => {}
    }
    Ok(true)
  }

  async fn go_back(&mut self) {
    let result = self.client.back().await;
    if let Some(session) = self.report(result) {
      self.apply_session(session);
    }
  }

  // ── Wall ──────────────────────────────────────────────────────────────────

  async fn open_wall(&mut self) {
    self.wall_return = self.screen;
    self.screen = Screen::Wall;
    self.filter.clear();
    self.filter_active = false;
    self.list_cursor = 0;
    self.refresh_wall().await;
  }

  fn leave_wall(&mut self) {
    self.screen = self.wall_return;
    self.filter.clear();
    self.filter_active = false;
    self.list_cursor = 0;
    self.card = None;
  }

  async fn refresh_wall(&mut self) {
    let result = self.client.submissions(&self.filter).await;
    if let Some(list) = self.report(result) {
      self.wall = list;
      self.status_msg = format!("{} ideas", self.wall.len());
    }
    self.load_wall_card().await;
  }

  async fn load_wall_card(&mut self) {
    let Some(id) = self.wall.get(self.list_cursor).map(|r| r.id.clone()) else {
      self.card = None;
      return;
    };
    let result = self.client.card(&id).await;
    self.card = self.report(result);
  }

  async fn handle_wall_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if self.move_cursor(key.code) {
      self.load_wall_card().await;
      return Ok(true);
    }
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Esc => self.leave_wall(),
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Char('r') => self.refresh_wall().await,
      _ => {}
    }
    Ok(true)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::client::ApiConfig;

  fn app() -> App {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://127.0.0.1:9".into(),
    })
    .unwrap();
    let mut app = App::new(client);
    app.employees = vec![
      Employee {
        id:         "emp1".into(),
        name:       "Jane Doe".into(),
        department: "Assembly".into(),
        location:   "Eugene".into(),
        photo_url:  None,
      },
      Employee {
        id:         "emp2".into(),
        name:       "Raj Patel".into(),
        department: "Shipping".into(),
        location:   "Bend".into(),
        photo_url:  None,
      },
    ];
    app
  }

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  #[test]
  fn fuzzy_filter_matches_name_or_department() {
    let mut app = app();
    app.filter = "raj".into();
    let hits: Vec<_> = app.filtered_employees().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(hits, ["emp2"]);

    app.filter = "assmb".into();
    let hits: Vec<_> = app.filtered_employees().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(hits, ["emp1"]);
  }

  #[test]
  fn profile_list_shows_only_the_selected_site() {
    let mut app = app();
    app.session.location = Some(Location::Bend);
    let hits: Vec<_> = app.filtered_employees().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(hits, ["emp2"]);

    app.filter = "jane".into();
    assert!(app.filtered_employees().is_empty());

    app.session.location = Some(Location::Salem);
    app.filter.clear();
    assert!(app.site_employees().is_empty());
  }

  #[tokio::test]
  async fn profile_enter_picks_from_the_site_list() {
    let mut app = app();
    app.session.location = Some(Location::Bend);
    app.screen = Screen::Profile;
    app.handle_key(key(KeyCode::Down)).await.unwrap();
    assert_eq!(app.list_cursor, 0);
    assert_eq!(app.filtered_employees()[app.list_cursor].id, "emp2");
  }

  #[tokio::test]
  async fn typing_fills_the_focused_field() {
    let mut app = app();
    app.screen = Screen::Idea;

    for c in "Carts".chars() {
      app.handle_key(key(KeyCode::Char(c))).await.unwrap();
    }
    app.handle_key(key(KeyCode::Tab)).await.unwrap();
    for c in "Corral".chars() {
      app.handle_key(key(KeyCode::Char(c))).await.unwrap();
    }
    app.handle_key(key(KeyCode::Backspace)).await.unwrap();

    assert_eq!(app.problem, "Carts");
    assert_eq!(app.idea, "Corra");
    assert_eq!(app.focus, Field::Idea);
  }

  #[test]
  fn draft_needs_selections_and_text() {
    let mut app = app();
    assert_eq!(app.draft().unwrap_err(), "no location selected");

    app.session.location = Some(Location::Eugene);
    app.session.employee = Some(app.employees[0].clone());
    assert_eq!(app.draft().unwrap_err(), "describe the problem first");

    app.problem = "  Carts everywhere ".into();
    app.idea = "Corral".into();
    let draft = app.draft().unwrap();
    assert_eq!(draft.location, "Eugene");
    assert_eq!(draft.employee_id, "emp1");
    assert_eq!(draft.problem, "Carts everywhere");
  }

  #[tokio::test]
  async fn incomplete_submit_stays_on_form() {
    let mut app = app();
    app.screen = Screen::Idea;
    app.focus = Field::Idea;
    app.handle_key(key(KeyCode::Enter)).await.unwrap();
    assert_eq!(app.screen, Screen::Idea);
    assert_eq!(app.status_msg, "no location selected");
  }

  #[tokio::test]
  async fn cursor_stays_in_bounds() {
    let mut app = app();
    app.screen = Screen::Profile;
    for _ in 0..5 {
      app.handle_key(key(KeyCode::Down)).await.unwrap();
    }
    assert_eq!(app.list_cursor, 1);
    app.handle_key(key(KeyCode::Up)).await.unwrap();
    app.handle_key(key(KeyCode::Up)).await.unwrap();
    assert_eq!(app.list_cursor, 0);
  }

  #[test]
  fn success_returns_to_idea_for_known_user() {
    let mut app = app();
    app.session.employee = Some(app.employees[0].clone());
    app.session.step = WizardStep::Idea;
    app.screen = Screen::Success;
    app.card = Some("card".into());
    app.handle_success_key(key(KeyCode::Enter)).unwrap();
    assert_eq!(app.screen, Screen::Idea);
    assert!(app.card.is_none());
  }
}
