//! URL handling for catalog pages
//!
//! This module joins discovered hrefs onto the page they were found on,
//! derives course identity from detail page paths, and computes the origin
//! key used for request pacing.

mod join;
mod origin;
mod segments;

pub use join::join;
pub use origin::extract_origin;
pub use segments::{last_segment, UrlIdentity};
