// src/strategy/mod.rs

pub mod classifier;
pub mod implementations;
pub mod replenishment;
pub mod traits;
