pub mod classify;
pub mod manifest;
