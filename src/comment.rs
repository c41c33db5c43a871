use super::*;

#[derive(Debug, Deserialize)]
pub(crate) struct Comment {
  #[serde(default)]
  pub(crate) author: String,
  #[serde(default)]
  pub(crate) body: String,
  #[serde(default, deserialize_with = "deserialize_replies")]
  pub(crate) replies: Option<Thing<Listing>>,
  #[serde(default)]
  pub(crate) score: i64,
  #[serde(default)]
  pub(crate) score_hidden: bool,
}

impl Comment {
  /// One transcript line, indented two spaces per nesting level.
  pub(crate) fn render(&self, depth: usize) -> String {
    let indent = "  ".repeat(depth);

    let body = sanitize_body(&self.body);

    if self.score_hidden {
      format!("{indent}u/{}: {body} [score hidden]", self.author)
    } else {
      format!(
        "{indent}u/{}: {body} [{}]",
        self.author,
        format_points(self.score)
      )
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_comment(author: &str, body: &str, score: i64) -> Comment {
    Comment {
      author: author.into(),
      body: body.into(),
      replies: None,
      score,
      score_hidden: false,
    }
  }

  #[test]
  fn render_prefixes_author_and_appends_score() {
    assert_eq!(
      make_comment("alice", "hello there", 42).render(0),
      "u/alice: hello there [42 points]"
    );
  }

  #[test]
  fn render_indents_two_spaces_per_level() {
    assert_eq!(
      make_comment("bob", "nested", 1).render(3),
      "      u/bob: nested [1 point]"
    );
  }

  #[test]
  fn render_masks_hidden_scores() {
    let mut comment = make_comment("carol", "fresh", 1);
    comment.score_hidden = true;

    assert_eq!(comment.render(0), "u/carol: fresh [score hidden]");
  }

  #[test]
  fn render_flattens_markup_onto_one_line() {
    assert_eq!(
      make_comment("dave", "first line\n\nsecond &amp; third", 2).render(1),
      "  u/dave: first line second & third [2 points]"
    );
  }

  #[test]
  fn replies_accept_reddits_empty_string() {
    let comment: Comment = serde_json::from_str(
      r#"{"author": "erin", "body": "leaf", "replies": "", "score": 3}"#,
    )
    .unwrap();

    assert!(comment.replies.is_none());
  }

  #[test]
  fn replies_accept_a_nested_listing() {
    let comment: Comment = serde_json::from_str(
      r#"{
        "author": "erin",
        "body": "parent",
        "replies": {
          "kind": "Listing",
          "data": {
            "children": [
              {"kind": "t1", "data": {"author": "frank", "body": "child", "replies": "", "score": 1}}
            ]
          }
        },
        "score": 3
      }"#,
    )
    .unwrap();

    assert_eq!(comment.replies.unwrap().data.children.len(), 1);
  }
}
