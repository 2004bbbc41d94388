//! Paginated collection of NFT ownership records.

pub mod paginator;
pub mod record;

pub use paginator::{
    clamp_page_size, CollectionOutcome, CollectorConfig, CollectorEvent, CollectorState,
    PaginatedCollector,
};
pub use record::{lookup_field, RawRecord};
