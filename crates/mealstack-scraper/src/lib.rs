//! Structured-data (JSON-LD) recipe extraction.
//!
//! Given raw HTML, locates embedded `application/ld+json` script blocks,
//! frames the parsed linked data against a fixed Recipe shape, and builds
//! a [`mealstack_core::CanonicalRecipe`] from the framed node. Pages that
//! carry a Recipe node with no usable ingredient/step content ("hollow
//! shells") surface the raw framed node instead, so callers can fall
//! through to the generative path.

pub mod builder;
pub mod client;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod frame;
pub mod jsonld;
pub mod types;

pub use builder::{build_recipe, Extracted};
pub use client::PageClient;
pub use context::{ContextLoader, HttpContextLoader, StaticContextLoader};
pub use diagnostics::DiagnosticLog;
pub use error::ScrapeError;
pub use extract::extract_structured;
pub use types::{FramedNode, RawPage};
