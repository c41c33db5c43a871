use super::*;

// Shared by every extraction in the process, so concurrent calls cannot
// multiply the request pressure on the API.
static LIMITER: Semaphore = Semaphore::const_new(MAX_CONCURRENT_REQUESTS);

/// HTTP client for Reddit's public JSON endpoints.
#[derive(Clone, Debug)]
pub struct Client {
  base: String,
  client: reqwest::Client,
}

impl Default for Client {
  fn default() -> Self {
    Self::with_base_url(Self::BASE_URL)
  }
}

impl Client {
  const BASE_URL: &str = "https://www.reddit.com";

  const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.6 Safari/605.1.15";

  async fn extract_post(
    &self,
    post: Post,
    comments: Listing,
    include_all_comments: bool,
  ) -> Result<Extraction> {
    if post.is_removed() {
      return Err(Error::ContentDeleted(
        post.removed_by_category.unwrap_or_default(),
      ));
    }

    let mut harvest = Harvest::default();

    harvest.absorb(comments.children, 0);

    if include_all_comments && !harvest.mores.is_empty() {
      let pending = mem::take(&mut harvest.mores);

      Resolver::new(self, post.link_id())
        .resolve(pending, &mut harvest)
        .await;
    }

    info!(
      "extracted {} of {} advertised comments from r/{}",
      harvest.count, post.num_comments, post.subreddit
    );

    let mut sections = vec![post.header(Utc::now())];

    if !post.selftext.is_empty() {
      sections.push(decode_entities(&post.selftext));
    }

    if harvest.lines.is_empty() {
      sections.push("No comments yet.".to_string());
    } else {
      sections.push(format!("Comments:\n{}", harvest.lines.join("\n")));
    }

    Ok(Extraction {
      comment_count: Some(harvest.count),
      content: sections.join("\n\n"),
    })
  }

  async fn fetch_page(&self, target: &Target) -> Result<Value> {
    let url = format!("{}{}", self.base, target.path_and_query);

    let _permit = LIMITER
      .acquire()
      .await
      .expect("the request limiter is never closed");

    debug!("GET {url}");

    let response = self.client.get(url).send().await?;

    Self::read_json(response, target.is_post, target.subreddit.as_deref())
      .await
  }

  /// Fetches the content behind `url` and flattens it into a transcript.
  ///
  /// Post URLs yield the post's metadata, its selftext, and one line per
  /// comment; with `include_all_comments` the client also resolves every
  /// `more` placeholder Reddit elided from the first page. Subreddit URLs
  /// yield a listing of posts and no comment count. Dropping the returned
  /// future cancels the extraction, in-flight requests included.
  pub async fn get_content(
    &self,
    url: &str,
    include_all_comments: bool,
  ) -> Result<Extraction> {
    let target = Target::parse(url)?;

    debug!("extracting {}", target.path_and_query);

    let value = self.fetch_page(&target).await?;

    match Page::classify(value)? {
      Page::Post { comments, post } => {
        self
          .extract_post(*post, comments, include_all_comments)
          .await
      }
      Page::Subreddit { posts } => render_listing(posts, &target),
    }
  }

  /// One `morechildren` request. A rate-limited attempt is retried once
  /// inline after a short pause, holding its limiter permit so the slot
  /// is not re-filled while the API is pushing back.
  pub(crate) async fn more_children(
    &self,
    link_id: &str,
    ids: &[String],
  ) -> Result<Value> {
    let url = format!(
      "{}/api/morechildren.json?api_type=json&link_id={link_id}&children={}&sort=confidence&limit_children=false&depth=10",
      self.base,
      ids.join(",")
    );

    let _permit = LIMITER
      .acquire()
      .await
      .expect("the request limiter is never closed");

    debug!("GET {url}");

    let mut response = self.client.get(&url).send().await?;

    if response.status() == StatusCode::TOO_MANY_REQUESTS {
      debug!("rate limited; retrying once in {RATE_LIMIT_RETRY_DELAY:?}");

      sleep(RATE_LIMIT_RETRY_DELAY).await;

      response = self.client.get(&url).send().await?;
    }

    Self::read_json(response, true, None).await
  }

  /// Maps non-success statuses onto the error taxonomy before any JSON
  /// parsing is attempted.
  async fn read_json(
    response: reqwest::Response,
    is_post: bool,
    subreddit: Option<&str>,
  ) -> Result<Value> {
    let status = response.status();

    if !status.is_success() {
      let retry_after = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok());

      let body = response.text().await.unwrap_or_default();

      return Err(error::classify(
        status,
        retry_after,
        &body,
        is_post,
        subreddit,
      ));
    }

    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|error| Error::Parse(error.to_string()))
  }

  /// Points the client at a different host, for example a proxy. `base`
  /// is prepended to request paths verbatim, so it must not end with a
  /// slash.
  pub fn with_base_url(base: impl Into<String>) -> Self {
    let mut headers = header::HeaderMap::new();

    headers.insert(
      header::ACCEPT,
      header::HeaderValue::from_static("application/json"),
    );

    Self {
      base: base.into(),
      client: reqwest::Client::builder()
        .user_agent(Self::USER_AGENT)
        .default_headers(headers)
        .build()
        .expect("the HTTP client configuration is static"),
    }
  }
}

fn render_listing(posts: Vec<Post>, target: &Target) -> Result<Extraction> {
  if posts.is_empty() {
    if let Some(subreddit) = &target.subreddit {
      warn!("r/{subreddit} returned an empty listing; treating it as private");

      return Err(Error::PrivateSubreddit);
    }

    return Ok(Extraction {
      comment_count: None,
      content: "No posts found here.".to_string(),
    });
  }

  let entries: Vec<String> = posts.iter().map(Post::listing_entry).collect();

  Ok(Extraction {
    comment_count: None,
    content: entries.join("\n\n"),
  })
}
