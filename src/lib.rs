//! Quotely: random quotes by category, with local favorites.
//!
//! The library holds everything except screen layout: the category table,
//! a blocking client for the quote API, the fetch flow, and a small
//! key-value store with typed accessors for preferences and favorites.
//!
//! # Quick Start
//!
//! ```no_run
//! use quotely::{fetch_random_quote, Preferences, QuoteClient, Store};
//!
//! let client = QuoteClient::new("https://api.quotable.io").unwrap();
//! let mut store = Store::in_memory();
//! let prefs = Preferences::load(&store);
//!
//! if let Some(current) = fetch_random_quote(&client, &mut store, prefs.tag()).unwrap() {
//!     println!("{}", current.share_text());
//! }
//! ```

pub mod category;
pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod fetcher;
pub mod logger;
pub mod models;
pub mod preferences;
pub mod store;
pub mod tui;

// Re-export the main public types at the crate root for convenience.
pub use category::{tag_for_preference, Category};
pub use client::{QuoteClient, QuoteSource, DEFAULT_API_URL};
pub use config::Config;
pub use error::{QuotelyError, Result};
pub use favorites::{decode_favorites, encode_favorites, Favorites};
pub use fetcher::{fetch_random_quote, Delivery, FetchOutcome, QuoteFetcher};
pub use models::{share_text, CurrentQuote, Favorite, Quote};
pub use preferences::{current_quote, save_current_quote, FontColor, Preferences};
pub use store::{keys, Store, Value};
