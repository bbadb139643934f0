//! # strata-text — Text storage for strata
//!
//! The buffer-side collaborators of the display engine:
//!
//! - **[`buffer`]** — `Buffer` wrapping a rope, addressed by char offsets
//! - **[`selection`]** — `Selection` half-open char ranges
//!
//! Display atoms refer to text by absolute char offset; line numbers only
//! appear where a filter needs line arithmetic (gutters, tab columns).

pub mod buffer;
pub mod selection;

pub use buffer::Buffer;
pub use selection::Selection;
