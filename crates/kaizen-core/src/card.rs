//! Printable plain-text Kaizen cards.

use crate::submission::SubmissionRecord;

/// Inner text width of a card, in characters.
pub const CARD_WIDTH: usize = 56;

/// Render `record` as a boxed, fixed-width card suitable for a receipt or
/// label printer.
pub fn render(record: &SubmissionRecord) -> String {
  let date = record
    .submitted_at_utc()
    .map(|dt| dt.format("%Y-%m-%d").to_string())
    .unwrap_or_else(|| record.submitted_at.clone());

  let mut body: Vec<String> = Vec::new();
  body.push(heading_line(&record.employee_name, "KAIZEN"));
  body.extend(wrap(&format!("{} | {}", record.location, date), CARD_WIDTH));
  body.push(String::new());

  section(&mut body, "THE PROBLEM", &format!("\"{}\"", record.problem));
  section(&mut body, "EXPECTED IMPACT", &record.impact);
  section(&mut body, "THE KAIZEN IDEA", &record.idea);

  if let Some(waste) = record.waste_type {
    body.push(format!("Waste: {waste}"));
  }
  if let Some(analysis) = &record.ai_analysis {
    body.extend(wrap(analysis, CARD_WIDTH));
  }

  let border = format!("+{}+", "-".repeat(CARD_WIDTH + 2));
  let mut out = String::new();
  out.push_str(&border);
  out.push('\n');
  for line in body {
    out.push_str(&format!("| {line:<CARD_WIDTH$} |\n"));
  }
  out.push_str(&border);
  out.push('\n');
  out
}

fn heading_line(left: &str, right: &str) -> String {
  let room = CARD_WIDTH.saturating_sub(right.len() + 1);
  let left: String = left.chars().take(room).collect();
  let pad = CARD_WIDTH - left.chars().count() - right.len();
  format!("{left}{}{right}", " ".repeat(pad))
}

fn section(body: &mut Vec<String>, title: &str, text: &str) {
  body.push(title.to_string());
  body.extend(wrap(text, CARD_WIDTH));
  body.push(String::new());
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
  let mut lines = Vec::new();
  let mut current = String::new();

  for word in text.split_whitespace() {
    let mut word: Vec<char> = word.chars().collect();
    while word.len() > width {
      if !current.is_empty() {
        lines.push(std::mem::take(&mut current));
      }
      let rest = word.split_off(width);
      lines.push(word.into_iter().collect());
      word = rest;
    }
    let word: String = word.into_iter().collect();

    let needed = if current.is_empty() {
      word.chars().count()
    } else {
      current.chars().count() + 1 + word.chars().count()
    };
    if needed > width && !current.is_empty() {
      lines.push(std::mem::take(&mut current));
    }
    if !current.is_empty() {
      current.push(' ');
    }
    current.push_str(&word);
  }

  if !current.is_empty() || lines.is_empty() {
    lines.push(current);
  }
  lines
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::submission::WasteCategory;

  fn record() -> SubmissionRecord {
    SubmissionRecord {
      id:             "a".into(),
      location:       "Eugene".into(),
      employee_id:    "emp1".into(),
      employee_name:  "Jane Doe".into(),
      employee_photo: None,
      problem:        "Pallets block the aisle every morning during receiving".into(),
      impact:         "Improvement project".into(),
      idea:           "Paint a staging zone".into(),
      waste_type:     Some(WasteCategory::Motion),
      ai_analysis:    Some("Clearer aisles save steps.".into()),
      submitted_at:   "2024-05-02T08:30:00.000Z".into(),
    }
  }

  #[test]
  fn card_lines_have_fixed_width() {
    let card = render(&record());
    for line in card.lines() {
      assert_eq!(line.chars().count(), CARD_WIDTH + 4, "line: {line:?}");
    }
  }

  #[test]
  fn card_contains_fields() {
    let card = render(&record());
    assert!(card.contains("Jane Doe"));
    assert!(card.contains("KAIZEN"));
    assert!(card.contains("Eugene | 2024-05-02"));
    assert!(card.contains("Paint a staging zone"));
    assert!(card.contains("Waste: Motion"));
  }

  #[test]
  fn unparseable_date_is_wrapped_inside_the_border() {
    let rec = SubmissionRecord {
      location: "Prep and Receiving".into(),
      submitted_at: "sometime during the second shift on the first Tuesday of the month".into(),
      ..record()
    };
    let card = render(&rec);
    for line in card.lines() {
      assert_eq!(line.chars().count(), CARD_WIDTH + 4, "line: {line:?}");
    }
    assert!(card.contains("Prep and Receiving | sometime"));
    assert!(card.contains("of the month"));
  }

  #[test]
  fn wrap_splits_long_words() {
    let lines = wrap(&"x".repeat(10), 4);
    assert_eq!(lines, ["xxxx", "xxxx", "xx"]);
    assert_eq!(wrap("", 4), [""]);
    assert_eq!(wrap("ab cd ef", 5), ["ab cd", "ef"]);
  }
}
