// Utility functions
pub mod document;
pub mod error;
