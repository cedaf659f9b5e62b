pub mod directory;
/// Loading and saving the directory.
pub mod store;

pub use directory::Directory;
pub use store::{load_or_empty, JsonStore, Store, StoreError};
