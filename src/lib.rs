//! CYOA Engine: a narrative-graph runtime for branching stories.
//!
//! Stories are graphs of text nodes produced on demand by a resolver.
//! The engine tracks navigation history and story state, filters
//! choices through their predicates, formats text with style markup and
//! gender-aware pronouns, and drives a pluggable view. Stories can be
//! written in code or loaded from RON game disks.

pub mod core;
pub mod disk;
pub mod schema;
