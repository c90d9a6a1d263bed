//! Command handlers

pub mod backup;
pub mod book;
pub mod circulation;
pub mod config;
pub mod dashboard;
pub mod student;
