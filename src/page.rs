use super::*;

/// What the initial request turned out to address.
#[derive(Debug)]
pub(crate) enum Page {
  /// A post plus its first page of comments.
  Post {
    comments: Listing,
    post: Box<Post>,
  },
  /// A subreddit or front-page listing of posts.
  Subreddit { posts: Vec<Post> },
}

impl Page {
  /// Post pages arrive as a two-element array of listings; everything else
  /// arrives as a single listing of posts.
  pub(crate) fn classify(value: Value) -> Result<Self> {
    match value {
      Value::Array(elements) => {
        let Ok([posts, comments]) = <[Value; 2]>::try_from(elements) else {
          return Err(Error::Parse(
            "expected a two-element post response".into(),
          ));
        };

        let posts: Thing<Listing> = serde_json::from_value(posts)
          .map_err(|error| Error::Parse(error.to_string()))?;

        let Some(Node::Post(post)) = posts.data.children.into_iter().next()
        else {
          return Err(Error::Parse("post response without a t3 node".into()));
        };

        let comments: Thing<Listing> = serde_json::from_value(comments)
          .map_err(|_| Error::CommentsUnavailable)?;

        if comments.kind != "Listing" {
          return Err(Error::CommentsUnavailable);
        }

        Ok(Self::Post {
          comments: comments.data,
          post,
        })
      }
      value => {
        let listing: Thing<Listing> = serde_json::from_value(value)
          .map_err(|error| Error::Parse(error.to_string()))?;

        if listing.kind != "Listing" {
          return Err(Error::Parse(format!(
            "unexpected response kind `{}`",
            listing.kind
          )));
        }

        let posts = listing
          .data
          .children
          .into_iter()
          .filter_map(|node| match node {
            Node::Post(post) => Some(*post),
            _ => None,
          })
          .collect();

        Ok(Self::Subreddit { posts })
      }
    }
  }
}
