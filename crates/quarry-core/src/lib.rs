//! Configuration loading and construction of loader, splitter and transcript
//! handles.

pub mod bootstrap;
pub mod config;
