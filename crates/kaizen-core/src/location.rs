//! The fixed set of sites a kiosk can be assigned to.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// A site that accepts Kaizen submissions.
///
/// String forms match the labels printed on the site QR codes; parsing is
/// exact, so `"eugene"` is not a location.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  AsRefStr,
)]
pub enum Location {
  #[serde(rename = "Prep and Receiving")]
  #[strum(serialize = "Prep and Receiving")]
  PrepAndReceiving,
  #[serde(rename = "Main Office HQ")]
  #[strum(serialize = "Main Office HQ")]
  MainOfficeHq,
  #[serde(rename = "Delta Park")]
  #[strum(serialize = "Delta Park")]
  DeltaPark,
  Tualatin,
  #[serde(rename = "Happy Valley")]
  #[strum(serialize = "Happy Valley")]
  HappyValley,
  Tanasbourne,
  Salem,
  Eugene,
  Bend,
  Medford,
  Delivery,
  Service,
}

impl Location {
  /// All locations in display order.
  pub fn all() -> Vec<Location> { Location::iter().collect() }

  /// Parse a free-form value; `None` when it names no known location.
  pub fn lookup(value: &str) -> Option<Location> { value.trim().parse().ok() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn labels_round_trip_through_display() {
    for loc in Location::all() {
      assert_eq!(Location::lookup(&loc.to_string()), Some(loc));
    }
  }

  #[test]
  fn twelve_locations_in_order() {
    let all = Location::all();
    assert_eq!(all.len(), 12);
    assert_eq!(all[0].as_ref(), "Prep and Receiving");
    assert_eq!(all[11], Location::Service);
  }

  #[test]
  fn lookup_is_exact() {
    assert_eq!(Location::lookup("Main Office HQ"), Some(Location::MainOfficeHq));
    assert_eq!(Location::lookup("eugene"), None);
    assert_eq!(Location::lookup("North Plant"), None);
  }

  #[test]
  fn serde_uses_labels() {
    let json = serde_json::to_string(&Location::HappyValley).unwrap();
    assert_eq!(json, "\"Happy Valley\"");
  }
}
