//! Assessment core: profile normalization, skill rating, and job matching.
//! Everything here is pure and synchronous; the handlers are the only glue.

pub mod handlers;
pub mod matching;
pub mod profile;
pub mod rating;
