//! Terminal and file renderers.
//!
//! - `table` — movers and news tables.
//! - `chart` — commodity price line chart.
pub mod chart;
pub mod table;
