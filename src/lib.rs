#![warn(missing_docs)]

//! # bubbletea-autocomplete
//!
//! A searchable, paginated selection widget for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications that pick records from a REST API: employees, branches,
//! departments, anything listed behind a `limit`/`offset` endpoint.
//!
//! ## Overview
//!
//! The [`autocomplete::Model`] follows the Elm Architecture like every
//! bubbletea component: requests leave as commands, their results come back
//! as messages through `update()`, and `view()` renders the current state.
//!
//! ## Features
//!
//! - **Lazy loading**: the first page is requested on focus, further pages on demand
//! - **Duplicate-free merging** of overlapping pages and externally set values
//! - **Single and multiple selection** with selection-order preservation
//! - **Search** that filters locally first and only asks the server when starved
//! - **Stale response detection** across parameter and search changes
//! - **Static option lists** that bypass the network entirely
//!
//! ## Focus Management
//!
//! ```rust
//! use bubbletea_autocomplete::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let statuses = vec![
//!     Record::from_value(json!({"id": 1, "name": "Active"})).unwrap(),
//!     Record::from_value(json!({"id": 2, "name": "Resigned"})).unwrap(),
//! ];
//! let mut picker = Autocomplete::new("", FieldNames::default(), Arc::new(HttpFetcher::new().unwrap()))
//!     .with_static_items(statuses);
//!
//! // Static lists never hit the network.
//! assert!(picker.focus().is_none());
//! assert!(picker.focused());
//! assert_eq!(picker.visible_items().len(), 2);
//!
//! picker.blur();
//! assert!(!picker.focused());
//! ```

pub mod autocomplete;
pub mod key;

use bubbletea_rs::Cmd;

/// Focus management shared by interactive components.
///
/// `focus()` may return a command, e.g. the first page request of an
/// auto-complete; `blur()` never does.
pub trait Component {
    /// Sets the component to focused state.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use autocomplete::Model as Autocomplete;
pub use autocomplete::{
    AutocompleteKeyMap, AutocompleteStyles, Event as AutocompleteEvent, FetchError, Fetcher,
    FieldNames, HttpFetcher, Identifier, LoadState, Record, Selection, ValueInput,
};
pub use key::{Binding, Help as KeyHelp, KeyMap, KeyPress};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_autocomplete::prelude::*;
/// ```
pub mod prelude {
    pub use crate::autocomplete::Model as Autocomplete;
    pub use crate::autocomplete::{
        AutocompleteKeyMap, AutocompleteStyles, Event as AutocompleteEvent, FetchError, Fetcher,
        FieldNames, FullData, HttpFetcher, Identifier, LoadState, Record, Selection, ValueInput,
    };
    pub use crate::key::{Binding, KeyMap};
    pub use crate::Component;
}
