// src/services/mod.rs

pub mod presentation;
pub mod quiz;
