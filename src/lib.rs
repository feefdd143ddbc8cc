//! Language quiz generator.
//!
//! Turns a listening script, a reading passage or an audio recording into a
//! multiple-choice quiz with the generative API, then exports it as a
//! self-contained HTML page plus a plain-text answer key.

pub mod audio;
pub mod config;
pub mod export;
pub mod genai;
pub mod pipeline;
pub mod quiz;
pub mod speech;
