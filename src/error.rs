use {super::*, thiserror::Error as ErrorTrait};

/// Everything that can go wrong while extracting content. Failures of the
/// initial page fetch surface through here; failures of individual
/// `morechildren` chunks are contained by the resolver and never abort an
/// extraction.
#[derive(Debug, ErrorTrait)]
pub enum Error {
  #[error("Reddit API quota exceeded")]
  ApiQuotaExceeded,
  #[error("comments are unavailable for this post")]
  CommentsUnavailable,
  #[error("this content was removed ({0})")]
  ContentDeleted(String),
  #[error("access denied: {0}")]
  Forbidden(String),
  #[error("Reddit returned HTTP {status}: {message}")]
  Http { message: String, status: u16 },
  #[error("invalid URL: {0}")]
  InvalidUrl(String),
  #[error("network error: {0}")]
  Network(#[from] reqwest::Error),
  #[error("could not parse Reddit's response: {0}")]
  Parse(String),
  #[error("post not found")]
  PostNotFound,
  #[error("this subreddit is private")]
  PrivateSubreddit,
  #[error("rate limited by Reddit")]
  RateLimited(Option<u64>),
  #[error("subreddit not found")]
  SubredditNotFound,
  #[error("you are banned from this subreddit")]
  UserBanned,
}

impl Error {
  /// Whether waiting and reissuing the same request could succeed.
  pub(crate) fn is_retryable(&self) -> bool {
    match self {
      Self::Network(_) | Self::RateLimited(_) => true,
      Self::Http { status, .. } => *status >= 500,
      _ => false,
    }
  }

  /// A short suggestion a caller can show next to the error message.
  pub fn recovery_hint(&self) -> Option<&'static str> {
    match self {
      Self::ApiQuotaExceeded | Self::RateLimited(_) => {
        Some("wait a few minutes before trying again")
      }
      Self::CommentsUnavailable
      | Self::ContentDeleted(_)
      | Self::PostNotFound => Some("try a different post"),
      Self::Forbidden(_) | Self::UserBanned => {
        Some("this account cannot view the content")
      }
      Self::InvalidUrl(_) => Some("check the URL for typos"),
      Self::Network(_) => Some("check your connection and try again"),
      Self::PrivateSubreddit | Self::SubredditNotFound => {
        Some("try a different subreddit")
      }
      Self::Http { .. } | Self::Parse(_) => None,
    }
  }
}

/// Maps a non-success HTTP status onto the taxonomy, sniffing the response
/// body for the cases Reddit only distinguishes in prose.
pub(crate) fn classify(
  status: StatusCode,
  retry_after: Option<u64>,
  body: &str,
  is_post: bool,
  subreddit: Option<&str>,
) -> Error {
  let body = body.to_lowercase();

  match status {
    StatusCode::FORBIDDEN => {
      if body.contains("banned") {
        Error::UserBanned
      } else if !is_post && subreddit.is_some() {
        Error::PrivateSubreddit
      } else {
        Error::Forbidden("Reddit refused the request".into())
      }
    }
    StatusCode::NOT_FOUND => {
      if is_post {
        Error::PostNotFound
      } else {
        Error::SubredditNotFound
      }
    }
    StatusCode::TOO_MANY_REQUESTS => {
      if body.contains("quota") {
        Error::ApiQuotaExceeded
      } else {
        Error::RateLimited(retry_after)
      }
    }
    status => Error::Http {
      message: status
        .canonical_reason()
        .unwrap_or("unexpected response")
        .to_string(),
      status: status.as_u16(),
    },
  }
}
