// Pagination over `{count, next, previous, results}` listings
//
// The API pages by absolute `next` links. Callers either step manually with
// `fetch_next` or consume `pages`, which only requests a page when polled.

use std::num::NonZeroU32;

use futures_util::{Stream, TryStreamExt, stream};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::client::OctopusClient;
use crate::error::Error;

/// Typed view of a paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode a raw listing, keeping the original body on failure.
    pub fn from_value(value: &Value) -> Result<Self, Error> {
        Self::deserialize(value).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: value.to_string(),
        })
    }
}

/// The `next` link of a listing, if there is one.
pub fn next_link(value: &Value) -> Option<&str> {
    value.get("next")?.as_str()
}

/// Number of pages needed to hold `count` results.
pub fn page_count(count: u64, page_size: NonZeroU32) -> u64 {
    count.div_ceil(u64::from(page_size.get()))
}

enum Cursor {
    First(Value),
    Next(Option<String>),
}

impl OctopusClient {
    /// Follow the `next` link of a previous listing.
    ///
    /// Returns `Ok(None)` when `next` is null or missing, which ends the
    /// iteration.
    pub async fn fetch_next(&self, previous: &Value) -> Result<Option<Value>, Error> {
        let Some(next) = next_link(previous) else {
            trace!("no next page");
            return Ok(None);
        };
        trace!(next, "following next link");
        self.fetch_str(next).await.map(Some)
    }

    /// Stream `first` followed by every page reachable through `next` links.
    ///
    /// The stream ends after the first error.
    pub fn pages(&self, first: Value) -> impl Stream<Item = Result<Value, Error>> + '_ {
        stream::try_unfold(Cursor::First(first), move |cursor| async move {
            let page = match cursor {
                Cursor::First(page) => page,
                Cursor::Next(Some(next)) => {
                    trace!(next = %next, "following next link");
                    self.fetch_str(&next).await?
                }
                Cursor::Next(None) => return Ok::<_, Error>(None),
            };
            let next = next_link(&page).map(str::to_owned);
            Ok(Some((page, Cursor::Next(next))))
        })
    }

    /// Gather the `results` of `first` and every following page.
    ///
    /// Every page must decode as a listing. An error body met part way
    /// through (an expired key, a 404) fails the whole call rather than
    /// returning the results gathered so far.
    pub async fn collect_results(&self, first: Value) -> Result<Vec<Value>, Error> {
        let mut results = Vec::new();
        let mut pages = std::pin::pin!(self.pages(first));
        while let Some(page) = pages.try_next().await? {
            let page = Page::<Value>::from_value(&page)?;
            results.extend(page.results);
        }
        Ok(results)
    }
}
