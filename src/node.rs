use super::*;

/// One element of a listing's `children`, discriminated by its `kind` tag.
/// Kinds with no bearing on extraction deserialize as `Unknown` instead of
/// failing the whole listing.
#[derive(Debug)]
pub(crate) enum Node {
  Comment(Comment),
  More(More),
  Post(Box<Post>),
  Unknown,
}

/// Hand-rolled because a derived `#[serde(other)]` variant cannot absorb
/// the `data` payload unfamiliar kinds still carry.
impl<'de> Deserialize<'de> for Node {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    #[derive(Deserialize)]
    struct Envelope {
      #[serde(default)]
      data: Value,
      kind: String,
    }

    let envelope = Envelope::deserialize(deserializer)?;

    match envelope.kind.as_str() {
      "t1" => serde_json::from_value(envelope.data)
        .map(Self::Comment)
        .map_err(de::Error::custom),
      "more" => serde_json::from_value(envelope.data)
        .map(Self::More)
        .map_err(de::Error::custom),
      "t3" => serde_json::from_value(envelope.data)
        .map(Self::Post)
        .map_err(de::Error::custom),
      _ => Ok(Self::Unknown),
    }
  }
}
