/// The outcome of one extraction: a flattened plain-text rendition of the
/// page and, for post pages, the number of comments actually recovered.
#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
  /// `None` for subreddit listings, where no comments are fetched. For
  /// posts this counts extracted comments, which may trail the post's
  /// advertised total when placeholder resolution is truncated.
  pub comment_count: Option<usize>,
  pub content: String,
}
