//! A plain-file directory of people
//!
//! People are stored by name with an email address, phone number and age,
//! and edited through an interactive terminal menu.

pub mod domain;
pub use domain::{Age, Config, Person, ValidationError};

/// In-memory storage and file persistence for the directory.
pub mod storage;
pub use storage::{Directory, JsonStore, Store, StoreError};

pub mod editor;
pub use editor::{EditError, Editor, Updated};

pub mod menu;

pub mod terminal;
