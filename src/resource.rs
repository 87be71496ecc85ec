//! Resource Contexts
//!
//! Concrete values that conform to [`ResourceContext`](crate::scope::ResourceContext):
//! a read-only file handle, a one-shot settings writer, and the sled store
//! types themselves.

pub mod file_reader;
pub mod settings_store;
pub mod settings_writer;

pub use file_reader::FileReader;
pub use settings_store::SettingsExt;
pub use settings_writer::SettingsWriter;
