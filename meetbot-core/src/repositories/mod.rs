// File: meetbot-core/src/repositories/mod.rs
pub mod memory;
