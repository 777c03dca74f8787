// src/io/mod.rs

pub mod catalog;
pub mod export;
pub mod reporting;
