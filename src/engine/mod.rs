// src/engine/mod.rs

pub mod config;
pub mod forecaster;
pub mod report;
