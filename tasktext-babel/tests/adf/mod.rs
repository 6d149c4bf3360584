//! ADF format tests
//!
//! ADF JSON → canonical tree, including the drop and pass-through policies.

mod convert;
mod policies;
