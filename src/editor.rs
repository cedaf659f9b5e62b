//! Interactive create, update, delete and view workflows.
//!
//! The [`Editor`] owns the [`Directory`] for the whole session and writes it
//! back to its [`Store`] after every successful change. Operations that act
//! on an existing person first resolve a typed name fragment to exactly one
//! stored name (see [`Editor::resolve`]).

use std::io;

use tracing::instrument;

use crate::{
    domain::{
        validate::{self, normalize_name},
        Age, Person,
    },
    storage::{Directory, Store, StoreError},
    terminal::{Colorize, Console, Table},
};

mod prompt;

/// Errors that end a single editor operation.
///
/// None of these are fatal to the session.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// Another person already has this name.
    #[error("a person named '{0}' already exists")]
    DuplicateName(String),

    /// The search term matched nobody.
    #[error("no one matches '{0}'")]
    NotFound(String),

    /// There is nobody to act on.
    #[error("no people registered")]
    EmptyDirectory,

    /// The change was applied in memory but could not be saved.
    #[error(transparent)]
    Persistence(#[from] StoreError),

    /// Reading from or writing to the terminal failed.
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),

    /// The input ran out before the operation could finish.
    #[error("input ended before the operation finished")]
    EndOfInput,
}

/// The result of a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Updated {
    /// The name the person was stored under before the update.
    pub previous: String,
    /// The name the person is stored under now.
    pub name: String,
}

impl Updated {
    /// Whether the update changed the stored name.
    #[must_use]
    pub fn renamed(&self) -> bool {
        self.previous != self.name
    }
}

/// Orchestrates validation and the directory to edit records.
#[derive(Debug)]
pub struct Editor<S> {
    directory: Directory,
    store: S,
}

impl<S: Store> Editor<S> {
    /// Creates an editor over an already loaded directory.
    #[must_use]
    pub const fn new(directory: Directory, store: S) -> Self {
        Self { directory, store }
    }

    /// The current in-memory directory.
    #[must_use]
    pub const fn directory(&self) -> &Directory {
        &self.directory
    }

    /// The store changes are written to.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Creates a new person.
    ///
    /// The name must not already exist. Email, phone and age are asked for
    /// again until they are valid.
    ///
    /// # Errors
    ///
    /// - [`EditError::DuplicateName`] if the name is taken (nothing is created)
    /// - [`EditError::Persistence`] if the record was added but not saved
    #[instrument(skip_all)]
    pub fn create(&mut self, console: &mut impl Console) -> Result<String, EditError> {
        let name = prompt::required(console, "Name: ")?;
        if self.directory.exists(&name) {
            return Err(EditError::DuplicateName(name));
        }

        let email = prompt::until_valid(console, "Email: ", validate::email)?;
        let phone = prompt::until_valid(console, "Phone: ", validate::phone)?;
        let age = prompt::until_valid(console, "Age: ", |s| s.parse::<Age>())?;

        self.directory
            .upsert(name.clone(), Person::new(email, phone, age));
        tracing::info!("Created {name}");

        self.persist()?;
        Ok(name)
    }

    /// Updates an existing person.
    ///
    /// A blank answer keeps a field as it is. An invalid answer also keeps it,
    /// with a warning, and the update carries on. A new name is refused if it
    /// belongs to someone else. The directory is saved even if nothing changed.
    ///
    /// # Errors
    ///
    /// - [`EditError::EmptyDirectory`] or [`EditError::NotFound`] if there is
    ///   no one to update
    /// - [`EditError::Persistence`] if the change was applied but not saved
    #[instrument(skip_all)]
    pub fn update(&mut self, console: &mut impl Console) -> Result<Updated, EditError> {
        self.ensure_not_empty()?;
        let target = self.resolve(console)?;
        let mut person = self
            .directory
            .get(&target)
            .cloned()
            .ok_or_else(|| EditError::NotFound(target.clone()))?;

        console.print(&"\nCurrent details:".info())?;
        show(console, [(target.as_str(), &person)])?;
        console.print(&"\nLeave a field blank to keep its current value.".dim())?;

        let mut name = target.clone();
        let input = prompt::line(console, "New name: ")?;
        if !input.is_empty() {
            let collides = self.directory.exists(&input)
                && normalize_name(&input) != normalize_name(&target);
            if collides {
                console.print(
                    &format!("✗ '{input}' already exists. Keeping '{target}'.").warning(),
                )?;
            } else {
                name = input;
            }
        }

        if let Some(email) = prompt::optional(console, "New email: ", validate::email)? {
            person.set_email(email);
        }
        if let Some(phone) = prompt::optional(console, "New phone: ", validate::phone)? {
            person.set_phone(phone);
        }
        if let Some(age) = prompt::optional(console, "New age: ", |s| s.parse::<Age>())? {
            person.set_age(age);
        }

        if name != target {
            self.directory.remove(&target);
        }
        self.directory.upsert(name.clone(), person);
        tracing::info!("Updated {target} (now {name})");

        self.persist()?;
        Ok(Updated {
            previous: target,
            name,
        })
    }

    /// Deletes an existing person after confirmation.
    ///
    /// Returns the removed name, or `None` if the operator declined.
    ///
    /// # Errors
    ///
    /// - [`EditError::EmptyDirectory`] or [`EditError::NotFound`] if there is
    ///   no one to delete
    /// - [`EditError::Persistence`] if the record was removed but the removal
    ///   was not saved
    #[instrument(skip_all)]
    pub fn delete(&mut self, console: &mut impl Console) -> Result<Option<String>, EditError> {
        self.ensure_not_empty()?;
        let target = self.resolve(console)?;

        if !prompt::confirm(console, &format!("Delete '{target}'? (S/N): "))? {
            tracing::debug!("Deletion of {target} declined");
            return Ok(None);
        }

        self.directory.remove(&target);
        tracing::info!("Deleted {target}");

        self.persist()?;
        Ok(Some(target))
    }

    /// Shows one person's details. Never modifies or saves anything.
    ///
    /// # Errors
    ///
    /// [`EditError::EmptyDirectory`] or [`EditError::NotFound`] if there is no
    /// one to show.
    #[instrument(skip_all)]
    pub fn view_one(&self, console: &mut impl Console) -> Result<String, EditError> {
        self.ensure_not_empty()?;
        let target = self.resolve(console)?;

        if let Some(person) = self.directory.get(&target) {
            console.print("")?;
            show(console, [(target.as_str(), person)])?;
        }
        Ok(target)
    }

    /// Lists everyone, sorted by name, and returns how many were listed.
    ///
    /// # Errors
    ///
    /// Returns an error only if the output cannot be written.
    #[instrument(skip_all)]
    pub fn view_all(&self, console: &mut impl Console) -> Result<usize, EditError> {
        if self.directory.is_empty() {
            console.print(&"No people registered.".warning())?;
            return Ok(0);
        }

        let total = self.directory.len();
        console.print(&format!("Total: {total} person(s)\n").info())?;
        show(console, self.directory.all())?;
        Ok(total)
    }

    /// Resolves a typed name fragment to a single stored name.
    ///
    /// 1. Every name containing the fragment is a match.
    /// 2. No match aborts with [`EditError::NotFound`].
    /// 3. A single match is used directly.
    /// 4. Several matches are listed in name order and the operator picks one
    ///    by number, being asked again until the number is in range.
    ///
    /// # Errors
    ///
    /// [`EditError::NotFound`] if nothing matches, or [`EditError::EndOfInput`]
    /// if the input runs out first.
    pub fn resolve(&self, console: &mut impl Console) -> Result<String, EditError> {
        let term = prompt::line(console, "Name (or part of it): ")?;
        let mut matches = self.directory.search_fragment(&term);
        tracing::debug!("'{term}' matched {} name(s)", matches.len());

        match matches.len() {
            0 => Err(EditError::NotFound(term)),
            1 => Ok(matches.remove(0)),
            count => {
                console.print(&format!("\nFound {count} matches:\n").warning())?;
                show(
                    console,
                    matches.iter().filter_map(|name| {
                        self.directory
                            .get(name)
                            .map(|person| (name.as_str(), person))
                    }),
                )?;
                let index = prompt::choose(console, count)?;
                Ok(matches.swap_remove(index))
            }
        }
    }

    fn ensure_not_empty(&self) -> Result<(), EditError> {
        if self.directory.is_empty() {
            Err(EditError::EmptyDirectory)
        } else {
            Ok(())
        }
    }

    fn persist(&self) -> Result<(), EditError> {
        self.store.save(&self.directory).map_err(|e| {
            tracing::warn!("{e}");
            EditError::from(e)
        })
    }
}

fn show<'a>(
    console: &mut impl Console,
    rows: impl IntoIterator<Item = (&'a str, &'a Person)>,
) -> io::Result<()> {
    for line in Table::new(rows).lines() {
        console.print(&line)?;
    }
    Ok(())
}
