//! Chat with a single web page.
//!
//! A page is fetched, chunked and embedded into a per-session vector index;
//! questions are answered by a language model that only sees the chunks most
//! similar to the question.

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod testing;
