// src/lib.rs

//! uksc-feeds Library
//!
//! Fetches the UK Supreme Court judgment listing pages and publishes them
//! as RSS 2.0 feeds.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod services;
pub mod storage;
pub mod utils;
