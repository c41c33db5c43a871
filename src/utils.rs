use super::*;

pub(crate) fn decode_entities(text: &str) -> String {
  html_escape::decode_html_entities(text).into_owned()
}

/// Reddit encodes a comment with no replies as `replies: ""` instead of
/// omitting the field, so the default `Option` handling cannot be used.
pub(crate) fn deserialize_replies<'de, D>(
  deserializer: D,
) -> Result<Option<Thing<Listing>>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<Value>::deserialize(deserializer)?;

  match value {
    None | Some(Value::Null | Value::String(_)) => Ok(None),
    Some(value) => serde_json::from_value(value)
      .map(Some)
      .map_err(de::Error::custom),
  }
}

pub(crate) fn format_age(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
  let seconds = now.signed_duration_since(created).num_seconds().max(0);

  let (count, unit) = if seconds < 60 {
    return "just now".to_string();
  } else if seconds < 3_600 {
    (seconds / 60, "minute")
  } else if seconds < 86_400 {
    (seconds / 3_600, "hour")
  } else if seconds < 2_592_000 {
    (seconds / 86_400, "day")
  } else if seconds < 31_536_000 {
    (seconds / 2_592_000, "month")
  } else {
    (seconds / 31_536_000, "year")
  };

  if count == 1 {
    format!("1 {unit} ago")
  } else {
    format!("{count} {unit}s ago")
  }
}

/// Abbreviates large counts the way Reddit's own frontend does: `15.4k`,
/// `1.5m`, sign preserved.
pub(crate) fn format_count(count: i64) -> String {
  let magnitude = count.abs();

  if magnitude < 1_000 {
    return count.to_string();
  }

  let (scale, suffix) = if magnitude < 1_000_000 {
    (1_000.0, "k")
  } else {
    (1_000_000.0, "m")
  };

  let tenths = (count as f64 / scale * 10.0).round() as i64;

  if tenths % 10 == 0 {
    format!("{}{suffix}", tenths / 10)
  } else {
    format!("{}.{}{suffix}", tenths / 10, (tenths % 10).abs())
  }
}

pub(crate) fn format_points(score: i64) -> String {
  match score {
    1 => "1 point".to_string(),
    _ => format!("{score} points"),
  }
}

/// Strips markup, decodes entities, and collapses all whitespace so a
/// comment body occupies exactly one transcript line.
pub(crate) fn sanitize_body(text: &str) -> String {
  let mut cleaned = String::with_capacity(text.len());
  let mut inside_tag = false;

  for ch in text.chars() {
    match ch {
      '<' => {
        cleaned.push(' ');
        inside_tag = true;
      }
      '>' => {
        inside_tag = false;
      }
      _ if inside_tag => {}
      _ => {
        cleaned.push(ch);
      }
    }
  }

  let decoded = decode_entities(&cleaned);

  decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Deserialize)]
  struct RepliesWrapper {
    #[serde(default, deserialize_with = "deserialize_replies")]
    replies: Option<Thing<Listing>>,
  }

  fn parse_replies(input: &str) -> Option<Thing<Listing>> {
    serde_json::from_str::<RepliesWrapper>(input)
      .unwrap()
      .replies
  }

  #[test]
  fn deserialize_replies_treats_the_empty_string_as_none() {
    assert!(parse_replies(r#"{"replies": ""}"#).is_none());
    assert!(parse_replies(r#"{"replies": null}"#).is_none());
    assert!(parse_replies("{}").is_none());
  }

  #[test]
  fn deserialize_replies_parses_a_listing() {
    let replies = parse_replies(
      r#"{"replies": {"kind": "Listing", "data": {"children": []}}}"#,
    )
    .unwrap();

    assert_eq!(replies.kind, "Listing");
    assert!(replies.data.children.is_empty());
  }

  #[test]
  fn deserialize_replies_rejects_malformed_listings() {
    assert!(
      serde_json::from_str::<RepliesWrapper>(r#"{"replies": 17}"#).is_err()
    );
  }

  #[test]
  fn format_age_scales_through_the_units() {
    let created = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

    let at = |offset: i64| {
      DateTime::from_timestamp(1_700_000_000 + offset, 0).unwrap()
    };

    assert_eq!(format_age(created, at(30)), "just now");
    assert_eq!(format_age(created, at(90)), "1 minute ago");
    assert_eq!(format_age(created, at(7_200)), "2 hours ago");
    assert_eq!(format_age(created, at(86_400)), "1 day ago");
    assert_eq!(format_age(created, at(5_184_000)), "2 months ago");
    assert_eq!(format_age(created, at(63_072_000)), "2 years ago");
  }

  #[test]
  fn format_age_clamps_future_timestamps() {
    let created = DateTime::from_timestamp(1_700_000_500, 0).unwrap();
    let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();

    assert_eq!(format_age(created, now), "just now");
  }

  #[test]
  fn format_count_abbreviates_thousands_and_millions() {
    assert_eq!(format_count(999), "999");
    assert_eq!(format_count(1_000), "1k");
    assert_eq!(format_count(1_234), "1.2k");
    assert_eq!(format_count(15_449), "15.4k");
    assert_eq!(format_count(124_000), "124k");
    assert_eq!(format_count(1_500_000), "1.5m");
  }

  #[test]
  fn format_count_preserves_the_sign() {
    assert_eq!(format_count(-42), "-42");
    assert_eq!(format_count(-1_234), "-1.2k");
  }

  #[test]
  fn format_points_handles_singular_and_plural() {
    assert_eq!(format_points(1), "1 point");
    assert_eq!(format_points(2), "2 points");
    assert_eq!(format_points(0), "0 points");
    assert_eq!(format_points(-5), "-5 points");
  }

  #[test]
  fn sanitize_body_strips_tags_and_decodes_entities() {
    assert_eq!(
      sanitize_body("<p>Hello &amp; <i>goodbye</i></p>"),
      "Hello & goodbye"
    );
  }

  #[test]
  fn sanitize_body_collapses_whitespace() {
    assert_eq!(
      sanitize_body("Multiple   spaces\nand\n\nnewlines"),
      "Multiple spaces and newlines"
    );
  }

  #[test]
  fn sanitize_body_keeps_literal_angle_entities() {
    assert_eq!(sanitize_body("x &lt; y &gt; z"), "x < y > z");
  }

  #[test]
  fn decode_entities_preserves_newlines() {
    assert_eq!(decode_entities("a &amp; b\n\nc"), "a & b\n\nc");
  }
}
