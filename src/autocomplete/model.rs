//! The auto-complete model: option loading, selection and the query-context
//! state machine.
//!
//! A *query context* is the pair of caller parameters and the search term the
//! current page sequence was requested with. Each context walks through
//! [`LoadState`]:
//!
//! ```text
//! Empty --focus--> Loading --next--> Loaded --load_more--> Loading ...
//!                     \--no next--> Exhausted
//! (params change / uncovered search change) --> Empty
//! ```
//!
//! Switching context bumps the epoch. Requests remember the epoch they were
//! issued in, so a response arriving after a switch is recognised and dropped.

use super::fetch::Fetcher;
use super::keys::AutocompleteKeyMap;
use super::messages::{Event, PageLoadedMsg};
use super::page::{params_changed, Page, PageCursor, PageRequest, Params};
use super::pool::OptionPool;
use super::selection::Selection;
use super::style::AutocompleteStyles;
use super::types::{FieldNames, Identifier, LoadState, Record, ValueInput};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A searchable selection control over a paginated REST listing.
///
/// # Examples
///
/// ```rust,no_run
/// use bubbletea_autocomplete::autocomplete::{FieldNames, HttpFetcher, Model};
/// use bubbletea_autocomplete::Component;
/// use std::sync::Arc;
///
/// let fetcher = HttpFetcher::new()
///     .unwrap()
///     .with_base_url("https://hr.example/api/v1/".parse().unwrap());
///
/// let mut employees = Model::new(
///     "users/",
///     FieldNames::new("id", "full_name"),
///     Arc::new(fetcher),
/// )
/// .with_multiple(true);
///
/// // Focusing issues the first page request; hand the command to the runtime.
/// let _cmd = employees.focus();
/// ```
pub struct Model {
    pub(super) id: i64,
    pub(super) endpoint: String,
    pub(super) fields: FieldNames,
    pub(super) fetcher: Arc<dyn Fetcher>,
    pub(super) params: Params,
    pub(super) force_fetch: bool,
    pub(super) static_items: Vec<Record>,
    pub(super) items_to_exclude: Vec<Identifier>,
    pub(super) items_to_include: Option<Vec<Identifier>>,

    pub(super) pool: OptionPool,
    pub(super) selection: Selection,
    pub(super) search: String,

    // Query context
    pub(super) epoch: u64,
    pub(super) state: LoadState,
    pub(super) state_before_fetch: LoadState,
    pub(super) cursor: Option<PageCursor>,
    pub(super) context_search: Option<String>,
    pub(super) fully_loaded: bool,

    // UI
    pub(super) focused: bool,
    pub(super) highlight: usize,
    pub(super) keymap: AutocompleteKeyMap,
    pub(super) styles: AutocompleteStyles,

    pub(super) events: Vec<Event>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("endpoint", &self.endpoint)
            .field("state", &self.state)
            .field("epoch", &self.epoch)
            .field("pool_len", &self.pool.len())
            .field("selection", &self.selection)
            .field("search", &self.search)
            .finish()
    }
}

impl Model {
    /// Creates a single-select model loading options from `endpoint`.
    pub fn new(endpoint: impl Into<String>, fields: FieldNames, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            id: next_id(),
            endpoint: endpoint.into(),
            fields,
            fetcher,
            params: Params::new(),
            force_fetch: false,
            static_items: Vec::new(),
            items_to_exclude: Vec::new(),
            items_to_include: None,
            pool: OptionPool::new(),
            selection: Selection::new(false),
            search: String::new(),
            epoch: 0,
            state: LoadState::Empty,
            state_before_fetch: LoadState::Empty,
            cursor: None,
            context_search: None,
            fully_loaded: false,
            focused: false,
            highlight: 0,
            keymap: AutocompleteKeyMap::default(),
            styles: AutocompleteStyles::default(),
            events: Vec::new(),
        }
    }

    /// Sets the caller parameters sent with every request.
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Switches between single and multiple selection. Clears the selection.
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.selection = Selection::new(multiple);
        self
    }

    /// Fetch as soon as a value is set instead of waiting for focus.
    pub fn with_force_fetch(mut self, force_fetch: bool) -> Self {
        self.force_fetch = force_fetch;
        self
    }

    /// Serves options from a fixed list; no request is ever made while it is non-empty.
    pub fn with_static_items(mut self, items: Vec<Record>) -> Self {
        self.static_items = items;
        self
    }

    /// Hides options with these identifiers.
    pub fn with_items_to_exclude(mut self, ids: Vec<Identifier>) -> Self {
        self.items_to_exclude = ids;
        self
    }

    /// Only shows options with these identifiers.
    pub fn with_items_to_include(mut self, ids: Vec<Identifier>) -> Self {
        self.items_to_include = Some(ids);
        self
    }

    /// Replaces the key bindings.
    pub fn with_keymap(mut self, keymap: AutocompleteKeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Replaces the styles.
    pub fn with_styles(mut self, styles: AutocompleteStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Unique id of this instance.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The endpoint options are loaded from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Identifier and label field names.
    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }

    /// Current caller parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Loading state of the current query context.
    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Current query-context epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Cursor of the next page, when one was announced.
    pub fn cursor(&self) -> Option<&PageCursor> {
        self.cursor.as_ref()
    }

    /// All loaded options.
    pub fn pool(&self) -> &OptionPool {
        &self.pool
    }

    /// The current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The current search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Whether the unfiltered listing has been loaded completely.
    pub fn fully_loaded(&self) -> bool {
        self.fully_loaded
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Whether a fixed option list replaces remote loading.
    pub fn has_static_items(&self) -> bool {
        !self.static_items.is_empty()
    }

    /// Whether [`load_more`](Self::load_more) would issue a request.
    pub fn has_more(&self) -> bool {
        !self.has_static_items() && self.state == LoadState::Loaded
    }

    /// Index of the highlighted option within [`visible_items`](Self::visible_items).
    pub fn highlight(&self) -> usize {
        self.highlight
    }

    /// Key bindings in use.
    pub fn keymap(&self) -> &AutocompleteKeyMap {
        &self.keymap
    }

    /// Takes the events emitted since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Replaces the caller parameters.
    ///
    /// Parameters equal in content to the current ones change nothing. A real
    /// change empties the pool, forgets the cursor and starts a new query
    /// context; when the control is focused the first page is requested
    /// right away.
    pub fn set_params(&mut self, params: Params) -> Option<Cmd> {
        if !params_changed(&self.params, &params) {
            return None;
        }
        self.params = params;
        self.reset_context(true);
        if self.focused {
            self.on_focus()
        } else {
            None
        }
    }

    /// Replaces the static option list. Starts a new query context; when
    /// focused the new list (or, if it is empty, the first remote page) is
    /// loaded right away.
    pub fn set_static_items(&mut self, items: Vec<Record>) -> Option<Cmd> {
        self.static_items = items;
        self.reset_context(true);
        if self.focused {
            self.on_focus_inner()
        } else {
            None
        }
    }

    /// Replaces the excluded identifiers.
    pub fn set_items_to_exclude(&mut self, ids: Vec<Identifier>) {
        self.items_to_exclude = ids;
        self.clamp_highlight();
    }

    /// Replaces the included identifiers; `None` shows everything.
    pub fn set_items_to_include(&mut self, ids: Option<Vec<Identifier>>) {
        self.items_to_include = ids;
        self.clamp_highlight();
    }

    /// Sets the selection from outside.
    ///
    /// Identifiers missing from the pool get a placeholder so they can be
    /// shown immediately; full records are added as they are, replacing such a
    /// placeholder, and both are overwritten once the real record is fetched.
    /// Other pool entries are left alone. The new selection is emitted right
    /// away. With force-fetch enabled this also requests the first page if
    /// nothing was requested yet.
    pub fn set_value(&mut self, value: impl Into<ValueInput>) -> Option<Cmd> {
        let ids = match value.into() {
            ValueInput::Empty => Vec::new(),
            ValueInput::Id(id) => {
                self.pool.insert_placeholder(&self.fields, &id);
                vec![id]
            }
            ValueInput::Ids(ids) => {
                for id in &ids {
                    self.pool.insert_placeholder(&self.fields, id);
                }
                ids
            }
            ValueInput::Record(record) => self.adopt_records(vec![record]),
            ValueInput::Records(records) => self.adopt_records(records),
        };

        if ids.is_empty() {
            self.selection.clear();
        } else {
            self.selection.replace(ids);
        }
        self.emit_selection();

        if self.force_fetch && !self.selection.is_empty() {
            return self.on_focus_inner();
        }
        None
    }

    /// Called when the options are about to be shown.
    ///
    /// Issues the first request of the query context, once. With a static
    /// list the pool is filled from it and nothing is requested.
    pub fn on_focus(&mut self) -> Option<Cmd> {
        self.on_focus_inner()
    }

    /// Updates the search term.
    ///
    /// Options are filtered locally first. A request filtered by the term is
    /// only made when nothing visible matches and the unfiltered listing is
    /// not completely loaded. Clearing the term after such a request reopens
    /// the unfiltered context. While blurred the new context is only opened;
    /// its first page is requested on the next focus.
    pub fn on_search_input(&mut self, term: &str) -> Option<Cmd> {
        if term == self.search {
            return None;
        }
        self.search = term.to_string();
        self.highlight = 0;

        if self.has_static_items() {
            return None;
        }

        if self.search.is_empty() {
            if self.context_search.is_none() {
                return None;
            }
            self.reset_context(false);
            return if self.focused { self.fetch_first_page() } else { None };
        }

        if self.fully_loaded || self.search_satisfied_locally() {
            return None;
        }

        debug!(id = self.id, term = %self.search, "search starved the option list");
        self.reset_context(false);
        if self.focused {
            self.fetch_first_page()
        } else {
            None
        }
    }

    /// Requests the next page of the current query context.
    ///
    /// Does nothing unless a page was loaded and the server announced another.
    pub fn load_more(&mut self) -> Option<Cmd> {
        if !self.has_more() {
            debug!(id = self.id, state = ?self.state, "load more ignored");
            return None;
        }
        let request = PageRequest {
            endpoint: self.endpoint.clone(),
            params: self.params.clone(),
            search: self.context_search.clone(),
            cursor: self.cursor.clone(),
        };
        Some(self.issue(request))
    }

    /// Selects `id`. Single mode replaces the selection, multiple mode appends.
    /// The pool is left as it is.
    pub fn select(&mut self, id: Identifier) -> bool {
        let changed = self.selection.select(id);
        if changed {
            self.emit_selection();
        }
        changed
    }

    /// Deselects `id`. The option stays in the pool.
    pub fn deselect(&mut self, id: &Identifier) -> bool {
        let changed = self.selection.deselect(id);
        if changed {
            self.emit_selection();
        }
        changed
    }

    /// Selects or deselects `id` depending on its current state.
    pub fn toggle(&mut self, id: Identifier) -> bool {
        let changed = self.selection.toggle(id);
        if changed {
            self.emit_selection();
        }
        changed
    }

    /// Removes `id` from the selection on the user's behalf, emitting
    /// [`Event::Remove`] with the removed record.
    pub fn remove(&mut self, id: &Identifier) -> Option<Record> {
        if !self.deselect(id) {
            return None;
        }
        let record = self
            .pool
            .get(id)
            .cloned()
            .unwrap_or_else(|| Record::placeholder(&self.fields, id));
        self.events.push(Event::Remove(record.clone()));
        Some(record)
    }

    /// Handles a finished page request.
    ///
    /// Messages for another instance or an outdated context are ignored. A
    /// failed request leaves pool and cursor as they were and returns to the
    /// state before the request. A successful one appends the page.
    pub fn on_page_loaded(&mut self, msg: PageLoadedMsg) {
        if msg.id != self.id {
            return;
        }
        if msg.epoch != self.epoch {
            debug!(
                id = self.id,
                stale = msg.epoch,
                current = self.epoch,
                "discarding page from an outdated query context"
            );
            return;
        }
        if self.state != LoadState::Loading {
            return;
        }

        let payload = match msg.outcome {
            Ok(payload) => payload,
            Err(err) => {
                warn!(id = self.id, endpoint = %msg.request.endpoint, error = %err, "failed to load options");
                self.state = self.state_before_fetch;
                return;
            }
        };

        let page = Page::from_payload(payload);
        let cursor = page.next_cursor();
        let records = page.results.into_iter().filter_map(Record::from_value);
        let summary = self.pool.extend(&self.fields, records);
        debug!(
            id = self.id,
            added = summary.added,
            resolved = summary.replaced.len(),
            skipped = summary.skipped,
            more = cursor.is_some(),
            "options page merged"
        );

        match cursor {
            Some(cursor) => {
                self.cursor = Some(cursor);
                self.state = LoadState::Loaded;
            }
            None => {
                self.cursor = None;
                self.state = LoadState::Exhausted;
                if !msg.request.is_filtered() {
                    self.fully_loaded = true;
                }
            }
        }

        if summary.replaced.iter().any(|id| self.selection.contains(id)) {
            self.events.push(Event::SelectedFullData(
                self.selection.resolve(&self.pool),
            ));
        }
        self.clamp_highlight();
    }

    /// Processes runtime messages: finished page requests and, while
    /// focused, key presses.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<PageLoadedMsg>() {
            Ok(loaded) => {
                self.on_page_loaded(*loaded);
                return None;
            }
            Err(other) => other,
        };

        if !self.focused {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        match key_msg {
            k if self.keymap.up.matches(k) => {
                self.highlight = self.highlight.saturating_sub(1);
                None
            }
            k if self.keymap.down.matches(k) => {
                if self.highlight + 1 < self.visible_items().len() {
                    self.highlight += 1;
                }
                None
            }
            k if self.keymap.select.matches(k) => {
                let id = self
                    .visible_items()
                    .get(self.highlight)
                    .and_then(|r| r.identifier(&self.fields));
                if let Some(id) = id {
                    self.toggle(id);
                }
                None
            }
            k if self.keymap.load_more.matches(k) => self.load_more(),
            k if self.keymap.remove_last.matches(k) => {
                if let Some(id) = self.selection.ids().last().map(|id| (*id).clone()) {
                    self.remove(&id);
                }
                None
            }
            k if self.keymap.clear_search.matches(k) => self.on_search_input(""),
            k if self.keymap.delete_char.matches(k) => {
                let mut term = self.search.clone();
                term.pop();
                self.on_search_input(&term)
            }
            KeyMsg {
                key: KeyCode::Char(c),
                modifiers,
                ..
            } if modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
                let term = format!("{}{}", self.search, c);
                self.on_search_input(&term)
            }
            _ => None,
        }
    }

    fn on_focus_inner(&mut self) -> Option<Cmd> {
        if self.has_static_items() {
            self.populate_static();
            return None;
        }
        if self.state != LoadState::Empty {
            return None;
        }
        self.fetch_first_page()
    }

    fn fetch_first_page(&mut self) -> Option<Cmd> {
        if self.state == LoadState::Loading {
            return None;
        }
        let search = (!self.search.is_empty()).then(|| self.search.clone());
        self.context_search = search.clone();
        let request = PageRequest {
            endpoint: self.endpoint.clone(),
            params: self.params.clone(),
            search,
            cursor: None,
        };
        Some(self.issue(request))
    }

    fn issue(&mut self, request: PageRequest) -> Cmd {
        self.state_before_fetch = self.state;
        self.state = LoadState::Loading;

        let fetcher = Arc::clone(&self.fetcher);
        let id = self.id;
        let epoch = self.epoch;
        debug!(id, epoch, search = ?request.search, cursor = ?request.cursor, "requesting options page");

        Box::pin(async move {
            let outcome = fetcher.get(&request).await;
            Some(Box::new(PageLoadedMsg {
                id,
                epoch,
                request,
                outcome,
            }) as Msg)
        })
    }

    fn populate_static(&mut self) {
        self.pool
            .replace_all(&self.fields, self.static_items.iter().cloned());
        self.cursor = None;
        self.state = LoadState::Exhausted;
        self.clamp_highlight();
    }

    /// Starts a new query context. With `clear_pool` the loaded options are
    /// dropped too, except the selected ones which stay as provisional
    /// entries.
    fn reset_context(&mut self, clear_pool: bool) {
        self.epoch = self.epoch.wrapping_add(1);
        self.state = LoadState::Empty;
        self.state_before_fetch = LoadState::Empty;
        self.cursor = None;
        self.context_search = None;
        debug!(id = self.id, epoch = self.epoch, clear_pool, "query context reset");

        if clear_pool {
            let kept: Vec<Record> = self
                .selection
                .ids()
                .into_iter()
                .map(|id| {
                    self.pool
                        .get(id)
                        .cloned()
                        .unwrap_or_else(|| Record::placeholder(&self.fields, id))
                })
                .collect();
            self.pool.clear();
            for record in kept {
                self.pool.insert_provisional(&self.fields, record);
            }
            self.fully_loaded = false;
            self.highlight = 0;
        }
    }

    fn adopt_records(&mut self, records: Vec<Record>) -> Vec<Identifier> {
        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            match record.identifier(&self.fields) {
                Some(id) => {
                    // Fills a placeholder; a fetched record stays.
                    self.pool.insert_provisional(&self.fields, record);
                    ids.push(id);
                }
                None => warn!(
                    id = self.id,
                    field = %self.fields.value,
                    "ignoring value record without an identifier"
                ),
            }
        }
        ids
    }

    fn emit_selection(&mut self) {
        self.events.push(Event::Input(self.selection.clone()));
        self.events
            .push(Event::SelectedFullData(self.selection.resolve(&self.pool)));
    }
}

impl Component for Model {
    /// Focuses the control and issues the first request of the context if
    /// none was made yet.
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        self.on_focus_inner()
    }

    /// Blurs the control, clears the search term and emits [`Event::Blur`].
    fn blur(&mut self) {
        self.focused = false;
        // Unfocused, so clearing the term never issues a request.
        let _ = self.on_search_input("");
        self.events.push(Event::Blur);
    }

    fn focused(&self) -> bool {
        self.focused
    }
}
