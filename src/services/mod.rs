//! Service modules tying the text-processing stages together.
//!
//! These sit between the pure parsing/normalizing/grading modules and a
//! front end (the CLI here, a web UI elsewhere).

pub mod recitation;
pub mod scripture;
