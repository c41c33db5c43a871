use super::*;

/// Accumulator for the comment walk: transcript lines in depth-first
/// order, the placeholders encountered along the way, and the number of
/// comments actually rendered.
#[derive(Debug, Default)]
pub(crate) struct Harvest {
  pub(crate) count: usize,
  pub(crate) lines: Vec<String>,
  pub(crate) mores: Vec<MoreItem>,
}

impl Harvest {
  /// Renders every comment in `children` at `depth`, recursing into reply
  /// listings so a parent always precedes its subtree. Placeholders are
  /// collected for later resolution, never resolved inline.
  pub(crate) fn absorb(&mut self, children: Vec<Node>, depth: usize) {
    for node in children {
      match node {
        Node::Comment(comment) => {
          self.lines.push(comment.render(depth));
          self.count += 1;

          if let Some(replies) = comment.replies {
            self.absorb(replies.data.children, depth + 1);
          }
        }
        Node::More(more) => {
          if let Some(item) = MoreItem::from_placeholder(more, depth) {
            self.mores.push(item);
          }
        }
        Node::Post(_) | Node::Unknown => {}
      }
    }
  }
}
