//! The recipe import pipeline.
//!
//! One [`Importer`] serves the three inbound paths — recipe web pages,
//! pasted text, and photographs — and funnels all of them into a single
//! canonical recipe shape. Page imports run the structured-data
//! (JSON-LD) extractor first and fall through to the generative model
//! when the page has no usable structured recipe.
//!
//! Each invocation is an independent unit of async work: no shared
//! mutable state, nothing persisted mid-flight, so callers may run many
//! imports concurrently and cancel freely at any await point.

pub mod error;
pub mod pipeline;

pub use error::ImportError;
pub use pipeline::{ImportOutcome, Importer};
