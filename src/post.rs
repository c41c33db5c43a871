use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct Post {
  #[serde(default)]
  pub(crate) author: String,
  #[serde(default)]
  pub(crate) created_utc: f64,
  #[serde(default)]
  pub(crate) id: String,
  #[serde(default)]
  pub(crate) num_comments: u64,
  #[serde(default)]
  pub(crate) over_18: bool,
  #[serde(default)]
  pub(crate) permalink: String,
  #[serde(default)]
  pub(crate) removed_by_category: Option<String>,
  #[serde(default)]
  pub(crate) score: i64,
  #[serde(default)]
  pub(crate) selftext: String,
  #[serde(default)]
  pub(crate) subreddit: String,
  #[serde(default)]
  pub(crate) title: String,
}

impl Post {
  pub(crate) fn created(&self) -> DateTime<Utc> {
    DateTime::from_timestamp(self.created_utc as i64, 0).unwrap_or_default()
  }

  /// The metadata block that opens a post transcript.
  pub(crate) fn header(&self, now: DateTime<Utc>) -> String {
    let mut meta = format!(
      "{} points • {} comments",
      format_count(self.score),
      format_count(self.num_comments as i64)
    );

    if self.over_18 {
      meta.push_str(" • NSFW");
    }

    format!(
      "Title: {}\nPosted by u/{} in r/{} {}\n{meta}",
      sanitize_body(&self.title),
      self.author,
      self.subreddit,
      format_age(self.created(), now)
    )
  }

  pub(crate) fn is_removed(&self) -> bool {
    self
      .removed_by_category
      .as_deref()
      .is_some_and(|category| !category.is_empty())
  }

  /// Fullname used as `link_id` in morechildren requests.
  pub(crate) fn link_id(&self) -> String {
    format!("t3_{}", self.id)
  }

  /// One block of a subreddit listing.
  pub(crate) fn listing_entry(&self) -> String {
    format!(
      "{}\n  u/{} • {} points • {} comments\n  https://www.reddit.com{}",
      sanitize_body(&self.title),
      self.author,
      format_count(self.score),
      format_count(self.num_comments as i64),
      self.permalink
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_post() -> Post {
    Post {
      author: "poster".into(),
      created_utc: 1_700_000_000.0,
      id: "abc123".into(),
      num_comments: 2_345,
      over_18: false,
      permalink: "/r/rust/comments/abc123/hello/".into(),
      removed_by_category: None,
      score: 15_400,
      selftext: String::new(),
      subreddit: "rust".into(),
      title: "Hello &amp; welcome".into(),
    }
  }

  #[test]
  fn header_abbreviates_counts_and_decodes_the_title() {
    let now = DateTime::from_timestamp(1_700_086_400, 0).unwrap();

    assert_eq!(
      make_post().header(now),
      "Title: Hello & welcome\nPosted by u/poster in r/rust 1 day ago\n15.4k points • 2.3k comments"
    );
  }

  #[test]
  fn header_tags_mature_posts() {
    let mut post = make_post();
    post.over_18 = true;

    let now = DateTime::from_timestamp(1_700_086_400, 0).unwrap();

    assert!(post.header(now).ends_with("• NSFW"));
  }

  #[test]
  fn link_id_uses_the_t3_prefix() {
    assert_eq!(make_post().link_id(), "t3_abc123");
  }

  #[test]
  fn removal_requires_a_nonempty_category() {
    let mut post = make_post();

    assert!(!post.is_removed());

    post.removed_by_category = Some(String::new());
    assert!(!post.is_removed());

    post.removed_by_category = Some("moderator".into());
    assert!(post.is_removed());
  }

  #[test]
  fn listing_entry_links_the_permalink() {
    assert!(
      make_post()
        .listing_entry()
        .contains("https://www.reddit.com/r/rust/comments/abc123/hello/")
    );
  }
}
