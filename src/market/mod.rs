//! Marketplace operations
//!
//! - `ops`: the seven operations over a [`MarketStore`](crate::storage::MarketStore)
//! - `outcome`: their typed results
//! - `render`: plain-text rendering of results and failures

pub mod ops;
pub mod outcome;
pub mod render;

pub use ops::{Marketplace, DEFAULT_BROWSE_LIMIT, SEARCH_LIMIT, TOP_SERVICES};
pub use outcome::{BrowsePage, JobPosting, MarketStats, ProfileView, ProviderSearch, Registration};
