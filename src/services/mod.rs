// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod library_service;

pub use library_service::{LibraryService, LibrarySection};
