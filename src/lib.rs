//! Reddit content extraction for summarization pipelines.
//!
//! Given a post or subreddit URL, [`Client::get_content`] fetches the
//! public JSON rendition, walks the comment forest depth-first, resolves
//! `more` placeholders through the `morechildren` endpoint, and flattens
//! everything into an indented plain-text transcript along with the number
//! of comments actually recovered.

use {
  chrono::{DateTime, Utc},
  comment::Comment,
  futures::{StreamExt, stream::FuturesUnordered},
  harvest::Harvest,
  listing::{Listing, Thing},
  more::{More, MoreItem},
  node::Node,
  page::Page,
  post::Post,
  reqwest::{StatusCode, Url, header},
  resolver::Resolver,
  serde::{Deserialize, Deserializer, de},
  serde_json::Value,
  std::{
    collections::{HashSet, VecDeque},
    mem,
    time::Duration,
  },
  target::Target,
  tokio::{sync::Semaphore, time::sleep},
  tracing::{debug, info, warn},
  utils::{
    decode_entities, deserialize_replies, format_age, format_count,
    format_points, sanitize_body,
  },
};

pub use {client::Client, error::Error, extraction::Extraction};

mod client;
mod comment;
mod error;
mod extraction;
mod harvest;
mod listing;
mod more;
mod node;
mod page;
mod post;
mod resolver;
mod target;
mod utils;

// Upstream refuses morechildren batches past one hundred ids.
const CHUNK_SIZE: usize = 100;

const INTER_CHUNK_DELAY: Duration = Duration::from_millis(500);

const MAX_CONCURRENT_REQUESTS: usize = 3;

const MAX_MORE_REQUESTS: usize = 50;

const MAX_PARSE_FAILURES: usize = 5;

const MAX_RETRY_COUNT: u32 = 5;

const RATE_LIMIT_RETRY_DELAY: Duration = Duration::from_secs(1);

const RETRY_BACKOFF_FACTOR: u32 = 2;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
