//! Durable storage backend: one JSON file per slot under a root directory.
//! Slots survive process restarts. Two processes sharing a directory race
//! read-modify-write exactly as two browser tabs sharing localStorage
//! would; that race is an accepted limitation, not a bug.

mod backend;

pub use backend::FileBackend;
