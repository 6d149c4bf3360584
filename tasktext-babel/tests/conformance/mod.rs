//! Cross-cutting properties: schema conformance, determinism, robustness.

mod properties;
mod schema;
