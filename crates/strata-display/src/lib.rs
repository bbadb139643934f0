//! # strata-display — Display atoms and highlight filters
//!
//! The in-memory model a renderer consumes: a [`DisplayBuffer`] partitions a
//! range of a text [`Buffer`](strata_text::Buffer) into styled
//! [`DisplayAtom`]s, and filters refine that partition in place.
//!
//! # Architecture
//!
//! ```text
//! Buffer range
//!     │
//!     ▼
//! DisplayBuffer::new    one unstyled atom
//!     │
//!     ▼
//! FilterPipeline        hlcpp → expand_tabs → number_lines → ...
//!     │                 (split / insert / replace_atom_content)
//!     ▼
//! atoms                 ordered, gap-free, non-overlapping
//! ```
//!
//! - **[`atom`]** — `DisplayAtom`, one styled range or synthetic insert
//! - **[`display_buffer`]** — the atom sequence and its primitives
//! - **[`filter`]** — `Filter` trait, `FilterRegistry`, `FilterContext`
//! - **[`pipeline`]** — ordered filter list
//! - **[`filters`]** — the built-in filters
//! - **[`syntax`]** — regex rule tables
//! - **[`params`]** — `key=value` filter settings
//! - **[`style`]** — colors and attributes

pub mod atom;
pub mod display_buffer;
pub mod error;
pub mod filter;
pub mod filters;
pub mod params;
pub mod pipeline;
pub mod style;
pub mod syntax;

pub use atom::DisplayAtom;
pub use display_buffer::DisplayBuffer;
pub use error::{Error, Result};
pub use filter::{Filter, FilterContext, FilterRegistry, SharedSelections};
pub use params::FilterParameters;
pub use pipeline::FilterPipeline;
pub use style::{Attr, Color};
