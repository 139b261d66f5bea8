//! Line-level CSV decoding.
//!
//! Records are line-delimited: a quoted field that contains a line break is
//! not supported and will be split across two rows.

/// Iterate the non-blank lines of a CSV export with their 1-based line
/// numbers. The header is the first item.
pub fn numbered_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
  text
    .split('\n')
    .enumerate()
    .map(|(n, line)| (n + 1, line))
    .filter(|(_, line)| !line.trim().is_empty())
}

/// Split one CSV line into trimmed field values.
///
/// Commas inside double quotes do not separate fields. Wrapping quotes are
/// removed and a doubled quote (`""`) inside a quoted field yields a literal
/// `"`. A trailing `\r` is ignored.
pub fn decode_row(line: &str) -> Vec<String> {
  let line = line.strip_suffix('\r').unwrap_or(line);

  let mut fields = Vec::new();
  let mut field = String::new();
  let mut in_quotes = false;
  let mut chars = line.chars().peekable();

  while let Some(c) = chars.next() {
    match c {
      '"' if in_quotes && chars.peek() == Some(&'"') => {
        field.push('"');
        chars.next();
      }
      '"' => in_quotes = !in_quotes,
      ',' if !in_quotes => fields.push(finish(&mut field)),
      _ => field.push(c),
    }
  }
  fields.push(finish(&mut field));
  fields
}

fn finish(field: &mut String) -> String { std::mem::take(field).trim().to_string() }
