//! Markdown format tests
//!
//! Markdown → canonical tree, through the public entry points and the format
//! registry.

mod blocks;
mod inline;
