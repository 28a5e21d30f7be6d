// src/system/mod.rs

pub mod runtime;
