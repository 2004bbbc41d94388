//! Cursor-driven page collection.
//!
//! Pages are fetched strictly in order, since every request needs the cursor
//! returned by the previous response. Collection is best-effort: a transport
//! or upstream failure stops the run but keeps every record already collected.
//!
//! ```text
//! Idle -> Fetching -> HasMore -> (delay) -> Fetching -> ...
//!                  \-> Done
//!                  \-> Failed
//! ```

use super::record::RawRecord;
use crate::rpc::{normalize_page, Fetch};
use crate::utils::config::{
    CONTRACT_PARAM, DEFAULT_DELAY_MS, DEFAULT_PAGE_SIZE, END_TOKEN_PARAM, MAX_PAGE_SIZE,
    PAGE_KEY_PARAM, PAGE_SIZE_PARAM, START_TOKEN_PARAM,
};
use log::{debug, warn};
use std::time::Duration;

/// Collector lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    Idle,
    Fetching,
    HasMore,
    Done,
    Failed,
}

impl CollectorState {
    pub fn is_terminal(self) -> bool {
        matches!(self, CollectorState::Done | CollectorState::Failed)
    }
}

/// Progress notifications emitted while collecting
#[derive(Debug, Clone, PartialEq)]
pub enum CollectorEvent {
    /// A page was fetched and parsed
    PageFetched {
        page: usize,
        records: usize,
        total_records: usize,
        has_more: bool,
    },
    /// Pagination ended normally
    Finished { pages: usize, total_records: usize },
    /// A request failed; collection stops with partial results
    Failed {
        page: usize,
        total_records: usize,
        error: String,
    },
}

/// Collection settings
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub endpoint: String,
    pub fixed_params: Vec<(String, String)>,
    pub page_size: usize,
    pub inter_page_delay: Duration,
    /// Cursor to resume from (first request omits the cursor when `None`)
    pub start_cursor: Option<String>,
}

impl CollectorConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            fixed_params: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            inter_page_delay: Duration::from_millis(DEFAULT_DELAY_MS),
            start_cursor: None,
        }
    }

    /// Query parameters for an NFT collection, with an optional token id range
    pub fn for_collection(
        endpoint: impl Into<String>,
        contract_address: &str,
        start_token_id: Option<&str>,
        end_token_id: Option<&str>,
    ) -> Self {
        let mut config = Self::new(endpoint).with_param(CONTRACT_PARAM, contract_address);

        if let Some(start) = start_token_id {
            config = config.with_param(START_TOKEN_PARAM, start);
        }
        if let Some(end) = end_token_id {
            config = config.with_param(END_TOKEN_PARAM, end);
        }

        config
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fixed_params.push((name.into(), value.into()));
        self
    }

    /// Set the page size, clamped to `MAX_PAGE_SIZE`
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = clamp_page_size(page_size);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.inter_page_delay = delay;
        self
    }

    pub fn with_start_cursor(mut self, cursor: Option<String>) -> Self {
        self.start_cursor = cursor.filter(|c| !c.is_empty());
        self
    }
}

/// Clamp a requested page size to the API's upper bound
pub fn clamp_page_size(page_size: usize) -> usize {
    if page_size > MAX_PAGE_SIZE {
        warn!(
            "page size cannot exceed {}, using {}",
            MAX_PAGE_SIZE, MAX_PAGE_SIZE
        );
        MAX_PAGE_SIZE
    } else {
        page_size
    }
}

/// Everything a finished collection run produced
#[derive(Debug, Clone)]
pub struct CollectionOutcome {
    pub records: Vec<RawRecord>,
    pub state: CollectorState,
    pub pages: usize,
    /// Failure message when `state` is `Failed`
    pub diagnostic: Option<String>,
    /// Cursor to resume from after a failure
    pub resume_cursor: Option<String>,
}

impl CollectionOutcome {
    pub fn is_complete(&self) -> bool {
        self.state == CollectorState::Done
    }
}

/// Drives the fetch collaborator page by page.
///
/// Implements `Iterator`, yielding the records of each page as it arrives;
/// dropping the iterator early keeps whatever was already yielded.
pub struct PaginatedCollector<'a, F: Fetch> {
    fetcher: F,
    config: CollectorConfig,
    state: CollectorState,
    cursor: Option<String>,
    pages: usize,
    total_records: usize,
    diagnostic: Option<String>,
    observer: Option<Box<dyn FnMut(&CollectorEvent) + 'a>>,
}

impl<'a, F: Fetch> PaginatedCollector<'a, F> {
    pub fn new(fetcher: F, config: CollectorConfig) -> Self {
        // Clamp here too in case the config was built by hand
        let mut config = config;
        config.page_size = clamp_page_size(config.page_size);
        let cursor = config.start_cursor.clone();

        Self {
            fetcher,
            config,
            state: CollectorState::Idle,
            cursor,
            pages: 0,
            total_records: 0,
            diagnostic: None,
            observer: None,
        }
    }

    /// Subscribe to progress events
    pub fn on_event(mut self, observer: impl FnMut(&CollectorEvent) + 'a) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> CollectorState {
        self.state
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    /// Cursor of the next page to request
    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Fetch the next page
    ///
    /// Returns `None` once the collector reached `Done` or `Failed`.
    pub fn next_page(&mut self) -> Option<Vec<RawRecord>> {
        match self.state {
            CollectorState::Done | CollectorState::Failed => return None,
            CollectorState::HasMore => {
                if !self.config.inter_page_delay.is_zero() {
                    std::thread::sleep(self.config.inter_page_delay);
                }
            }
            CollectorState::Idle | CollectorState::Fetching => {}
        }

        self.state = CollectorState::Fetching;
        let query = self.build_query();
        let page_number = self.pages + 1;

        debug!("Fetching page {} (cursor: {:?})", page_number, self.cursor);

        let page = match self
            .fetcher
            .fetch(&self.config.endpoint, &query)
            .and_then(normalize_page)
        {
            Ok(page) => page,
            Err(e) => {
                self.fail(page_number, e.to_string());
                return None;
            }
        };

        let records: Vec<RawRecord> = page.nfts.iter().map(RawRecord::from_json).collect();
        self.pages = page_number;
        self.total_records += records.len();

        let has_more = match page.next_page_key {
            Some(next) if !records.is_empty() => {
                self.cursor = Some(next);
                true
            }
            _ => false,
        };

        self.state = if has_more {
            CollectorState::HasMore
        } else {
            CollectorState::Done
        };

        self.emit(CollectorEvent::PageFetched {
            page: page_number,
            records: records.len(),
            total_records: self.total_records,
            has_more,
        });

        if !has_more {
            self.emit(CollectorEvent::Finished {
                pages: self.pages,
                total_records: self.total_records,
            });
        }

        if records.is_empty() {
            None
        } else {
            Some(records)
        }
    }

    /// Drain every page and return the accumulated records
    pub fn collect_all(mut self) -> CollectionOutcome {
        let mut records = Vec::new();
        while let Some(page) = self.next_page() {
            records.extend(page);
        }

        CollectionOutcome {
            records,
            state: self.state,
            pages: self.pages,
            resume_cursor: if self.state == CollectorState::Failed {
                self.cursor.clone()
            } else {
                None
            },
            diagnostic: self.diagnostic,
        }
    }

    fn build_query(&self) -> Vec<(String, String)> {
        let mut query = self.config.fixed_params.clone();
        query.push((PAGE_SIZE_PARAM.to_string(), self.config.page_size.to_string()));

        if let Some(cursor) = &self.cursor {
            query.push((PAGE_KEY_PARAM.to_string(), cursor.clone()));
        }

        query
    }

    fn fail(&mut self, page: usize, error: String) {
        warn!("Page {} failed: {}", page, error);

        self.state = CollectorState::Failed;
        self.diagnostic = Some(error.clone());
        self.emit(CollectorEvent::Failed {
            page,
            total_records: self.total_records,
            error,
        });
    }

    fn emit(&mut self, event: CollectorEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&event);
        }
    }
}

impl<F: Fetch> Iterator for PaginatedCollector<'_, F> {
    type Item = Vec<RawRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_page()
    }
}
