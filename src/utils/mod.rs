// src/utils/mod.rs

//! Shared utilities.

pub mod text;
pub mod url;
