//! Messages the component receives and events it emits.

use super::fetch::FetchError;
use super::page::PageRequest;
use super::selection::{FullData, Selection};
use super::types::Record;
use serde_json::Value;

/// Result of a page fetch, delivered back through the bubbletea runtime.
///
/// `id` routes the message to the component that issued the request and
/// `epoch` identifies the query context it was issued in. A message whose
/// epoch is behind the component's is stale and gets dropped.
#[derive(Debug)]
pub struct PageLoadedMsg {
    /// Id of the issuing component.
    pub id: i64,
    /// Query-context epoch at the time of the request.
    pub epoch: u64,
    /// The request that was sent.
    pub request: PageRequest,
    /// Raw payload or the failure.
    pub outcome: Result<Value, FetchError>,
}

/// Notifications for the component's owner, collected until drained with
/// [`Model::drain_events`](super::Model::drain_events).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The selection changed (or was set from outside).
    Input(Selection),
    /// Best-effort full records for the selection.
    SelectedFullData(FullData),
    /// A selected option was explicitly removed.
    Remove(Record),
    /// The component lost focus.
    Blur,
}
