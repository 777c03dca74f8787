// src/model/mod.rs

pub mod forecast;
pub mod recommendation;
pub mod record;
pub mod seasonal;
