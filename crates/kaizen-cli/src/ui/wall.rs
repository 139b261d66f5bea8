//! Huddle wall: submission list on the left, the selected card on the right.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the wall into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
    .split(area);

  draw_list(f, cols[0], app);
  draw_card(f, cols[1], app);
}

fn draw_list(f: &mut Frame, area: Rect, app: &App) {
  let title = if app.filter.is_empty() {
    format!(" Huddle wall ({}) ", app.wall.len())
  } else {
    format!(" Huddle wall: \"{}\" ({}) ", app.filter, app.wall.len())
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let mut inner = block.inner(area);
  f.render_widget(block, area);

  if app.filter_active && inner.height > 2 {
    let filter_area = Rect {
      y: inner.y + inner.height - 1,
      height: 1,
      ..inner
    };
    inner.height -= 1;
    f.render_widget(
      Paragraph::new(format!("/{}_", app.filter)).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if app.wall.is_empty() {
    f.render_widget(
      Paragraph::new("No ideas yet.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = app
    .wall
    .iter()
    .map(|r| {
      let tag = r
        .waste_type
        .map(|w| format!(" [{w}]"))
        .unwrap_or_default();
      ListItem::new(vec![
        Line::from(vec![
          Span::styled(
            r.employee_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
          ),
          Span::styled(
            format!("  {}{tag}", r.location),
            Style::default().fg(Color::DarkGray),
          ),
        ]),
        Line::from(format!("  {}", r.idea)),
      ])
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.list_cursor));
  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner,
    &mut state,
  );
}

fn draw_card(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Card ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let lines: Vec<Line> = match &app.card {
    Some(card) => card.lines().map(Line::from).collect(),
    None => vec![Line::styled(
      "Select an idea to see its card.",
      Style::default().fg(Color::DarkGray),
    )],
  };
  f.render_widget(Paragraph::new(lines).block(block), area);
}
