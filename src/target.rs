use super::*;

/// A caller URL normalized into the path and query to request from the
/// JSON API, plus enough classification to map errors sensibly.
#[derive(Clone, Debug)]
pub(crate) struct Target {
  pub(crate) is_post: bool,
  pub(crate) path_and_query: String,
  pub(crate) subreddit: Option<String>,
}

impl Target {
  pub(crate) fn parse(input: &str) -> Result<Self> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
      return Err(Error::InvalidUrl("empty URL".into()));
    }

    let url = Url::parse(trimmed)
      .or_else(|_| Url::parse(&format!("https://{trimmed}")))
      .map_err(|error| Error::InvalidUrl(error.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
      return Err(Error::InvalidUrl(format!(
        "unsupported scheme `{}`",
        url.scheme()
      )));
    }

    let mut path = url.path().trim_end_matches('/').to_string();

    if path.is_empty() {
      path.push_str("/hot");
    }

    if !path.ends_with(".json") {
      path.push_str(".json");
    }

    let is_post = path.contains("/comments/");

    let subreddit = {
      let mut segments = path.trim_start_matches('/').split('/');

      (segments.next() == Some("r"))
        .then(|| segments.next())
        .flatten()
        .map(|name| name.trim_end_matches(".json").to_string())
        .filter(|name| !name.is_empty())
    };

    let path_and_query = match (url.query(), is_post) {
      (Some(query), true) => format!("{path}?{query}&limit=1000"),
      (Some(query), false) => format!("{path}?{query}"),
      (None, true) => format!("{path}?limit=1000"),
      (None, false) => path,
    };

    Ok(Self {
      is_post,
      path_and_query,
      subreddit,
    })
  }
}
