//! Rewriting Google Drive share links into direct image URLs.

use std::sync::LazyLock;

use regex::Regex;

/// Direct-fetch template; the file id is appended.
const DIRECT_URL_PREFIX: &str = "https://drive.google.com/uc?id=";

/// A Drive file id (25+ url-safe characters) after one of the known path
/// markers: `/file/d/`, `/d/`, or an `id=` query parameter (`open?id=`,
/// `uc?export=view&id=`).
static SHARE_LINK: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?:/file/d/|/d/|[?&]id=)([A-Za-z0-9_-]{25,})")
    .expect("share-link pattern is valid")
});

/// Extract the Drive file id from a share link.
pub fn drive_file_id(url: &str) -> Option<&str> {
  SHARE_LINK
    .captures(url)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str())
}

/// Normalise a photo cell: empty is `None`, Drive share links become direct
/// URLs, anything else is kept verbatim.
pub fn direct_photo_url(raw: &str) -> Option<String> {
  let raw = raw.trim();
  if raw.is_empty() {
    return None;
  }
  Some(match drive_file_id(raw) {
    Some(id) => format!("{DIRECT_URL_PREFIX}{id}"),
    None => raw.to_string(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  const ID: &str = "ABCDEFGHIJKLMNOPQRSTUVWXY";

  #[test]
  fn file_view_link_is_rewritten() {
    let url = format!("https://drive.google.com/file/d/{ID}/view?usp=sharing");
    assert_eq!(
      direct_photo_url(&url).as_deref(),
      Some("https://drive.google.com/uc?id=ABCDEFGHIJKLMNOPQRSTUVWXY")
    );
  }

  #[test]
  fn open_id_link_is_rewritten() {
    let url = format!("https://drive.google.com/open?id={ID}");
    assert_eq!(drive_file_id(&url), Some(ID));
  }

  #[test]
  fn uc_export_link_keeps_its_id() {
    let url = format!("https://drive.google.com/uc?export=view&id={ID}-_x");
    assert_eq!(drive_file_id(&url), Some("ABCDEFGHIJKLMNOPQRSTUVWXY-_x"));
  }

  #[test]
  fn short_ids_are_not_drive_links() {
    let url = "https://drive.google.com/file/d/short/view";
    assert_eq!(direct_photo_url(url).as_deref(), Some(url));
  }

  #[test]
  fn other_urls_and_blanks() {
    assert_eq!(
      direct_photo_url(" https://example.com/me.jpg ").as_deref(),
      Some("https://example.com/me.jpg")
    );
    assert_eq!(direct_photo_url("   "), None);
  }
}
