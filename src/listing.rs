use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct Listing {
  #[serde(default)]
  pub(crate) children: Vec<Node>,
}

/// Reddit's universal envelope: a `kind` tag next to a `data` payload.
#[derive(Debug, Deserialize)]
pub(crate) struct Thing<T> {
  pub(crate) data: T,
  #[serde(default)]
  pub(crate) kind: String,
}
