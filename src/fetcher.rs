//! Fetch a random quote and publish it to the store.
//!
//! [`fetch_random_quote`] is the linear flow: request, decode, keep the first
//! record. [`QuoteFetcher`] runs the same flow with the network leg on a
//! worker thread and hands the outcome back to the UI thread over a channel.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::client::QuoteSource;
use crate::error::{QuotelyError, Result};
use crate::models::{CurrentQuote, Quote};
use crate::preferences::save_current_quote;
use crate::store::Store;

/// Fetch one batch for `tag` and store its first quote.
///
/// Returns `Ok(None)` when the API answered with an empty array; the store
/// then keeps its previous quote. Errors leave the store untouched.
pub fn fetch_random_quote<S>(source: &S, store: &mut Store, tag: &str) -> Result<Option<CurrentQuote>>
where
    S: QuoteSource + ?Sized,
{
    let quotes = source.random(tag)?;
    publish_first(store, quotes)
}

fn publish_first(store: &mut Store, quotes: Vec<Quote>) -> Result<Option<CurrentQuote>> {
    let Some(first) = quotes.into_iter().next() else {
        debug!("API returned no quotes; keeping the current one");
        return Ok(None);
    };
    let current = CurrentQuote::from(first);
    save_current_quote(store, &current)?;
    info!("new quote by {}", current.author);
    Ok(Some(current))
}

// ---------------------------------------------------------------------------
// Background fetcher
// ---------------------------------------------------------------------------

/// Result of one background request, sent from the worker thread.
#[derive(Debug)]
pub struct FetchOutcome {
    pub token: u64,
    pub tag: String,
    pub result: Result<Vec<Quote>>,
}

/// What happened when an outcome was applied on the UI thread.
#[derive(Debug)]
pub enum Delivery {
    /// The store now holds this quote.
    Updated(CurrentQuote),
    /// The API returned no quotes; the store is unchanged.
    Empty,
    /// The request failed; the store is unchanged.
    Failed(QuotelyError),
    /// A newer request was issued after this one; the outcome was ignored.
    Stale { token: u64 },
}

/// Runs quote requests off the UI thread.
///
/// Each request gets a token from an increasing counter. Only the outcome
/// carrying the latest token is applied, so a slow response can never
/// overwrite a newer quote.
pub struct QuoteFetcher<S> {
    source: Arc<S>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    latest: u64,
    pending: bool,
}

impl<S> QuoteFetcher<S> {
    /// True while the latest request has not been answered.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Token of the most recent request (0 before the first one).
    pub fn latest_token(&self) -> u64 {
        self.latest
    }
}

impl<S> QuoteFetcher<S>
where
    S: QuoteSource + Send + Sync + 'static,
{
    pub fn new(source: S) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source: Arc::new(source),
            tx,
            rx,
            latest: 0,
            pending: false,
        }
    }

    /// Start a request for `tag` on a worker thread and return its token.
    pub fn request(&mut self, tag: &str) -> u64 {
        self.latest += 1;
        let token = self.latest;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let tag = tag.to_string();

        debug!("request #{token} for tag '{tag}'");
        thread::spawn(move || {
            let result = source.random(&tag);
            // The receiver lives as long as the fetcher; a send error only
            // means the app is shutting down.
            let _ = tx.send(FetchOutcome { token, tag, result });
        });

        self.pending = true;
        token
    }

    /// Apply every outcome that has already arrived. Never blocks.
    pub fn poll(&mut self, store: &mut Store) -> Vec<Delivery> {
        let mut deliveries = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            deliveries.push(self.deliver(store, outcome));
        }
        deliveries
    }

    /// Block until the latest request is answered or `timeout` elapses.
    ///
    /// Stale outcomes received meanwhile are discarded.
    pub fn wait(&mut self, store: &mut Store, timeout: Duration) -> Option<Delivery> {
        let deadline = Instant::now() + timeout;
        while self.pending {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(left) {
                Ok(outcome) => match self.deliver(store, outcome) {
                    Delivery::Stale { .. } => continue,
                    delivery => return Some(delivery),
                },
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return None
                }
            }
        }
        None
    }

    fn deliver(&mut self, store: &mut Store, outcome: FetchOutcome) -> Delivery {
        if outcome.token != self.latest {
            debug!(
                "dropping stale response #{} (latest is #{})",
                outcome.token, self.latest
            );
            return Delivery::Stale {
                token: outcome.token,
            };
        }
        self.pending = false;

        let applied = outcome
            .result
            .and_then(|quotes| publish_first(store, quotes));
        match applied {
            Ok(Some(current)) => Delivery::Updated(current),
            Ok(None) => Delivery::Empty,
            Err(e) => {
                warn!("Error fetching quote for tag '{}': {e}", outcome.tag);
                Delivery::Failed(e)
            }
        }
    }
}
