//! Auto-complete selection over a paginated REST listing.
//!
//! The component loads options lazily from an endpoint answering
//! `{"results": [...], "next": "<url>"}` (or a bare array), merges every page
//! into a duplicate-free option pool, and keeps a single or multiple
//! selection in sync with its owner.
//!
//! ## Architecture Overview
//!
//! - **Option pool** (`pool`): loaded records in arrival order, unique by
//!   identifier. Selected identifiers that have not been fetched yet are held
//!   by placeholders that the real record replaces in place.
//! - **Query context** (`model`): caller parameters plus the search term a
//!   page sequence was requested with. Its [`LoadState`] guards against
//!   overlapping requests and its epoch lets late responses from an abandoned
//!   context be dropped.
//! - **Paging** (`page`): the `limit`/`offset` of the server's `next` URL are
//!   reused verbatim for the following request.
//! - **Rendering order** (`filtering`): exclude/include post-filter, then a
//!   case-insensitive substring match, starts-with matches first.
//!
//! ## Runtime integration
//!
//! Requests run as bubbletea commands. Hand the `Cmd` returned by
//! [`Component::focus`](crate::Component::focus), [`Model::on_search_input`]
//! or [`Model::load_more`] to the runtime and route messages back through
//! [`Model::update`]:
//!
//! ```rust,no_run
//! use bubbletea_autocomplete::autocomplete::{Event, FieldNames, HttpFetcher, Model as Autocomplete};
//! use bubbletea_autocomplete::Component;
//! use bubbletea_rs::{Cmd, Msg};
//! use std::sync::Arc;
//!
//! struct Form {
//!     supervisor: Autocomplete,
//! }
//!
//! impl Form {
//!     fn new() -> Self {
//!         let fetcher = HttpFetcher::new()
//!             .unwrap()
//!             .with_base_url("https://hr.example/api/v1/".parse().unwrap());
//!         Self {
//!             supervisor: Autocomplete::new("users/", FieldNames::new("id", "full_name"), Arc::new(fetcher)),
//!         }
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         let cmd = self.supervisor.update(msg);
//!         for event in self.supervisor.drain_events() {
//!             if let Event::Input(selection) = event {
//!                 println!("supervisor is now {:?}", selection);
//!             }
//!         }
//!         cmd
//!     }
//! }
//! ```
//!
//! ## Events
//!
//! Every change of the selection emits [`Event::Input`] with the identifiers
//! and [`Event::SelectedFullData`] with the records as far as they are
//! loaded. Explicit removal adds [`Event::Remove`]; losing focus emits
//! [`Event::Blur`].

pub mod config;
pub mod fetch;
pub mod keys;
pub mod messages;
pub mod page;
pub mod pool;
pub mod selection;
pub mod style;
pub mod types;

mod filtering;
mod model;
mod view;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use fetch::{FetchError, Fetcher, HttpFetcher};
pub use filtering::rank_by_search;
pub use keys::AutocompleteKeyMap;
pub use messages::{Event, PageLoadedMsg};
pub use model::Model;
pub use page::{params_changed, Page, PageCursor, PageRequest, Params};
pub use pool::{Insert, MergeSummary, OptionPool};
pub use selection::{FullData, Selection};
pub use style::AutocompleteStyles;
pub use types::{FieldNames, Identifier, LoadState, Record, ValueInput};
