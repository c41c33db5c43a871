use super::*;

/// Wire payload of a `more` placeholder: the comment ids Reddit elided
/// from the listing.
#[derive(Debug, Deserialize)]
pub(crate) struct More {
  #[serde(default)]
  pub(crate) children: Vec<String>,
}

/// A pending unit of placeholder resolution: the ids still to fetch and
/// the depth their comments belong at. Never holds an empty id list.
#[derive(Debug)]
pub(crate) struct MoreItem {
  pub(crate) depth: usize,
  pub(crate) ids: Vec<String>,
}

impl MoreItem {
  pub(crate) fn chunks(&self) -> impl Iterator<Item = &[String]> {
    self.ids.chunks(CHUNK_SIZE)
  }

  pub(crate) fn from_placeholder(more: More, depth: usize) -> Option<Self> {
    let ids: Vec<String> = more
      .children
      .into_iter()
      .filter(|id| !id.is_empty())
      .collect();

    (!ids.is_empty()).then_some(Self { depth, ids })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn make_more(ids: &[&str]) -> More {
    More {
      children: ids.iter().map(ToString::to_string).collect(),
    }
  }

  #[test]
  fn placeholders_without_ids_produce_no_work() {
    assert!(MoreItem::from_placeholder(make_more(&[]), 0).is_none());
    assert!(MoreItem::from_placeholder(make_more(&["", ""]), 0).is_none());
  }

  #[test]
  fn blank_ids_are_filtered_out() {
    let item =
      MoreItem::from_placeholder(make_more(&["a", "", "b"]), 2).unwrap();

    assert_eq!(item.depth, 2);
    assert_eq!(item.ids, vec!["a", "b"]);
  }

  #[test]
  fn chunks_never_exceed_the_request_limit() {
    let ids: Vec<String> = (0..250).map(|i| format!("c{i}")).collect();

    let item = MoreItem { depth: 0, ids };

    let sizes: Vec<usize> = item.chunks().map(<[String]>::len).collect();

    assert_eq!(sizes, vec![100, 100, 50]);
  }
}
