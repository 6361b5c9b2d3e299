//! Infrastructure adapters: persistence, blob storage and credentials.

pub mod auth;
pub mod blob;
pub mod storage;
