// src/handlers/mod.rs

pub mod admin;
pub mod performance;
pub mod quiz;
