//! Typed response models, one per API function.
//!
//! - `quote` — `GLOBAL_QUOTE` payload.
//! - `movers` — `TOP_GAINERS_LOSERS` payload.
//! - `news` — `NEWS_SENTIMENT` payload.
//! - `commodity` — `COPPER` series payload.
pub mod commodity;
pub mod movers;
pub mod news;
pub mod quote;
