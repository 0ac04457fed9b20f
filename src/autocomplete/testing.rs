//! Test doubles shared by the component's tests.

use super::fetch::{FetchError, Fetcher};
use super::page::PageRequest;
use super::Model;
use async_trait::async_trait;
use bubbletea_rs::Cmd;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&PageRequest) -> Result<Value, FetchError> + Send + Sync>;

/// A fetcher answering from a closure and recording every request.
pub(crate) struct ScriptedFetcher {
    responder: Responder,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedFetcher {
    pub(crate) fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&PageRequest) -> Result<Value, FetchError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Always answers with an empty listing.
    pub(crate) fn empty() -> Arc<Self> {
        Self::new(|_| Ok(json!([])))
    }

    /// Always fails with a 500.
    pub(crate) fn failing() -> Arc<Self> {
        Self::new(|_| Err(FetchError::Status { status: 500 }))
    }

    /// Serves `names` as `{id, name}` records in pages of `page_size`,
    /// filtering by `search` (case-insensitive substring) and honouring
    /// `limit`/`offset`.
    pub(crate) fn paged(names: &[&str], page_size: usize) -> Arc<Self> {
        let records: Vec<(i64, String)> = names
            .iter()
            .enumerate()
            .map(|(i, n)| (i as i64 + 1, n.to_string()))
            .collect();
        Self::new(move |req| {
            let term = req.search.clone().unwrap_or_default().to_lowercase();
            let matching: Vec<&(i64, String)> = records
                .iter()
                .filter(|(_, n)| n.to_lowercase().contains(&term))
                .collect();
            let cursor = req.cursor.clone().unwrap_or_default();
            let limit = cursor
                .limit
                .and_then(|l| l.parse().ok())
                .unwrap_or(page_size);
            let offset: usize = cursor.offset.and_then(|o| o.parse().ok()).unwrap_or(0);
            let page: Vec<Value> = matching
                .iter()
                .skip(offset)
                .take(limit)
                .map(|(id, name)| json!({"id": id, "name": name}))
                .collect();
            let next = if offset + limit < matching.len() {
                Value::from(format!(
                    "http://test.local/items/?limit={}&offset={}",
                    limit,
                    offset + limit
                ))
            } else {
                Value::Null
            };
            Ok(json!({"count": matching.len(), "results": page, "next": next}))
        })
    }

    pub(crate) fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn get(&self, request: &PageRequest) -> Result<Value, FetchError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}

/// Runs `cmd` to completion and feeds the resulting message back.
pub(crate) async fn settle(model: &mut Model, cmd: Option<Cmd>) {
    if let Some(cmd) = cmd {
        if let Some(msg) = cmd.await {
            model.update(msg);
        }
    }
}

/// Display labels of the visible options.
pub(crate) fn visible_names(model: &Model) -> Vec<String> {
    model
        .visible_items()
        .iter()
        .map(|r| r.display(model.fields()))
        .collect()
}
