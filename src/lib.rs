//! `versecheck` - verse reference parsing, speech transcript repair and
//! recitation grading for scripture memorization.
//!
//! The pipeline a front end drives for one recitation:
//! [`transcript`] repairs the recognizer output against the reference,
//! [`content`] flattens the verse markup into plain text and [`grading`]
//! diffs the two and assigns a grade. [`services::recitation`] wires the
//! three together. [`bible`] parses, validates and orders references.

pub mod bible;
pub mod config;
pub mod constants;
pub mod content;
pub mod error;
pub mod grading;
pub mod services;
pub mod transcript;

pub use bible::{parse, validate, VerseReference};
pub use error::{Error, ParseError, Result};
pub use services::recitation::{RecitationChecker, RecitationReport};
