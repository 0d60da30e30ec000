//! Text normalization and line classification.
//!
//! Both layout builders call into these free functions, so the heading
//! decision for a line is made in exactly one place.

mod classify;
mod normalize;

pub use classify::{classify, lines, Classification, ClassifierProfile, Line, HEADING_MAX_CHARS};
pub use normalize::{normalize, normalize_str};
