//! Selection lists for the first two wizard steps.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

fn cursor_style() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

fn frame(title: String) -> Block<'static> {
  Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray))
}

fn render_list(f: &mut Frame, area: Rect, items: Vec<ListItem>, cursor: usize) {
  let mut state = ListState::default();
  state.select(if items.is_empty() { None } else { Some(cursor) });
  f.render_stateful_widget(
    List::new(items).highlight_style(cursor_style()),
    area,
    &mut state,
  );
}

/// Step 1: the site list.
pub fn draw_locations(f: &mut Frame, area: Rect, app: &App) {
  let block = frame(" Where are you? ".into());
  let inner = block.inner(area);
  f.render_widget(block, area);

  let items = app
    .locations
    .iter()
    .map(|loc| {
      let marker = if app.session.location == Some(*loc) { "● " } else { "  " };
      ListItem::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(Color::Green)),
        Span::raw(loc.to_string().to_uppercase()),
      ]))
    })
    .collect();
  render_list(f, inner, items, app.list_cursor);
}

/// Step 2: the people at the selected site, with an optional fuzzy filter
/// bar.
pub fn draw_employees(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_employees();
  let total = app.site_employees().len();

  // Title with count.
  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Who are you? ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Who are you? ({}) ", total)
  };

  let block = frame(title);
  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar at the bottom of the inner area.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let items = filtered
    .iter()
    .map(|e| {
      ListItem::new(Line::from(vec![
        Span::styled(
          format!("{:<28}", e.name),
          Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
          format!("{}  ·  {}", e.department, e.location),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();
  render_list(f, inner_area, items, app.list_cursor);
}
