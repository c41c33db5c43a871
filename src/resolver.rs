use super::*;

/// One placeholder admitted for resolution, split into request-sized
/// chunks. Chunks of a single group run sequentially with a pause between
/// them; distinct groups run concurrently under the request limiter.
struct Group {
  chunks: Vec<Vec<String>>,
  depth: usize,
}

/// Call-scoped state for resolving `more` placeholders: the post's
/// fullname, the ids already requested, and the remaining request budget.
/// One value per extraction, shared with nothing else.
pub(crate) struct Resolver<'a> {
  client: &'a Client,
  link_id: String,
  requests: usize,
  seen: HashSet<String>,
}

impl<'a> Resolver<'a> {
  /// Drops ids this extraction has already requested. Placeholders reduced
  /// to nothing yield no work at all.
  fn admit(&mut self, item: MoreItem) -> Option<MoreItem> {
    let ids: Vec<String> = item
      .ids
      .into_iter()
      .filter(|id| self.seen.insert(id.clone()))
      .collect();

    (!ids.is_empty()).then_some(MoreItem {
      depth: item.depth,
      ids,
    })
  }

  async fn fetch_chunk(
    client: &Client,
    link_id: &str,
    ids: &[String],
  ) -> Result<Vec<Node>> {
    let mut attempt = 0;

    let value = loop {
      match client.more_children(link_id, ids).await {
        Ok(value) => break value,
        Err(error) if error.is_retryable() && attempt + 1 < MAX_RETRY_COUNT => {
          attempt += 1;

          let delay =
            Duration::from_secs(u64::from(RETRY_BACKOFF_FACTOR.pow(attempt)));

          debug!(
            "retrying a chunk of {} ids in {:?} after: {}",
            ids.len(),
            delay,
            error
          );

          sleep(delay).await;
        }
        Err(error) => return Err(error),
      }
    };

    parse_more_children(value)
  }

  /// Resolves one group's chunks in order, pausing between them. Failed
  /// chunks are logged and skipped; a run of unparseable responses
  /// abandons the rest of the group without touching any other group.
  async fn fetch_group(
    client: &'a Client,
    link_id: String,
    group: Group,
  ) -> Vec<(Vec<Node>, usize)> {
    let mut harvested = Vec::new();
    let mut parse_failures = 0;

    for (index, chunk) in group.chunks.iter().enumerate() {
      if index > 0 {
        sleep(INTER_CHUNK_DELAY).await;
      }

      match Self::fetch_chunk(client, &link_id, chunk).await {
        Ok(children) => {
          parse_failures = 0;
          harvested.push((children, group.depth));
        }
        Err(Error::Parse(reason)) => {
          parse_failures += 1;

          warn!("discarding an unparseable morechildren response: {reason}");

          if parse_failures >= MAX_PARSE_FAILURES {
            warn!("abandoning a branch after {parse_failures} parse failures");

            break;
          }
        }
        Err(error) => {
          warn!("skipping a chunk of {} ids: {}", chunk.len(), error);
        }
      }
    }

    harvested
  }

  pub(crate) fn new(client: &'a Client, link_id: String) -> Self {
    Self {
      client,
      link_id,
      requests: 0,
      seen: HashSet::new(),
    }
  }

  /// Charges an item's chunks against the per-extraction request budget,
  /// truncating the item if the budget cannot cover all of it. Returns
  /// `None` once the budget is spent.
  fn reserve(&mut self, item: MoreItem) -> Option<Group> {
    let remaining = MAX_MORE_REQUESTS - self.requests;

    if remaining == 0 {
      return None;
    }

    let chunks: Vec<Vec<String>> =
      item.chunks().take(remaining).map(<[String]>::to_vec).collect();

    if chunks.len() < item.ids.len().div_ceil(CHUNK_SIZE) {
      warn!(
        "request budget truncates a placeholder of {} ids",
        item.ids.len()
      );
    }

    self.requests += chunks.len();

    Some(Group {
      chunks,
      depth: item.depth,
    })
  }

  /// Drains `pending` and every placeholder discovered inside resolved
  /// batches, absorbing recovered comments into `harvest`. Returns once
  /// no admissible work remains or the request budget is spent.
  pub(crate) async fn resolve(
    &mut self,
    pending: Vec<MoreItem>,
    harvest: &mut Harvest,
  ) {
    let mut queue: VecDeque<MoreItem> = pending
      .into_iter()
      .filter_map(|item| self.admit(item))
      .collect();

    debug!("resolving {} placeholder groups", queue.len());

    let mut in_flight = FuturesUnordered::new();
    let mut capped = false;

    loop {
      while let Some(item) = queue.pop_front() {
        if let Some(group) = self.reserve(item) {
          in_flight.push(Self::fetch_group(
            self.client,
            self.link_id.clone(),
            group,
          ));
        } else {
          capped = true;
          queue.clear();

          warn!("placeholder budget of {MAX_MORE_REQUESTS} requests spent");
        }
      }

      let Some(harvested) = in_flight.next().await else {
        break;
      };

      for (children, depth) in harvested {
        harvest.absorb(children, depth);
      }

      if capped {
        harvest.mores.clear();
      } else {
        for item in harvest.mores.drain(..) {
          if let Some(item) = self.admit(item) {
            queue.push_back(item);
          }
        }
      }
    }
  }
}

/// Accepts both shapes Reddit uses for `morechildren` payloads: an object
/// whose `json.data.things` is the node array, or `json` as an array of
/// listings.
fn parse_more_children(mut value: Value) -> Result<Vec<Node>> {
  let Some(json) = value.get_mut("json") else {
    return Err(Error::Parse("morechildren response without `json`".into()));
  };

  if let Some(things) = json.pointer_mut("/data/things") {
    return serde_json::from_value(things.take())
      .map_err(|error| Error::Parse(error.to_string()));
  }

  if let Value::Array(listings) = json.take() {
    let mut children = Vec::new();

    for listing in listings {
      let thing: Thing<Listing> = serde_json::from_value(listing)
        .map_err(|error| Error::Parse(error.to_string()))?;

      children.extend(thing.data.children);
    }

    return Ok(children);
  }

  Err(Error::Parse("unrecognized morechildren shape".into()))
}
