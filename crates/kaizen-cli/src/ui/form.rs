//! Step 3: the idea form, and the card shown after submitting.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{App, Field};

fn text_box(f: &mut Frame, area: Rect, title: &str, text: &str, focused: bool) {
  let border = if focused {
    Style::default().fg(Color::Cyan)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let body = if focused {
    format!("{text}_")
  } else {
    text.to_string()
  };
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(border);
  f.render_widget(
    Paragraph::new(body).block(block).wrap(Wrap { trim: false }),
    area,
  );
}

/// Render the problem and idea boxes.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
    .split(area);

  text_box(
    f,
    rows[0],
    "What is the problem?",
    &app.problem,
    app.focus == Field::Problem,
  );
  text_box(
    f,
    rows[1],
    "What is your Kaizen idea?",
    &app.idea,
    app.focus == Field::Idea,
  );
}

/// Render the card for the idea just submitted.
pub fn draw_success(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Idea submitted ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Green));

  let lines: Vec<Line> = match &app.card {
    Some(card) => card.lines().map(Line::from).collect(),
    None => vec![Line::styled(
      "Your idea was recorded.",
      Style::default().add_modifier(Modifier::BOLD),
    )],
  };
  f.render_widget(Paragraph::new(lines).block(block), area);
}
