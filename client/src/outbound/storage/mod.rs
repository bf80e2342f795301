//! Durable session storage adapters.

mod atomic_io;
mod file_storage;

pub use file_storage::FileSessionStorage;
