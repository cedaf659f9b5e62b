//! The interactive main menu.

use std::{fmt, io, str::FromStr};

use crate::{
    editor::{EditError, Editor},
    storage::Store,
    terminal::{Colorize, Console},
};

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Register a new person.
    Create,
    /// Change a person's details.
    Update,
    /// Remove a person.
    Delete,
    /// Show one person.
    ViewOne,
    /// Show everyone.
    ViewAll,
    /// Leave the program.
    Exit,
}

impl Action {
    const ALL: [Self; 6] = [
        Self::Create,
        Self::Update,
        Self::Delete,
        Self::ViewOne,
        Self::ViewAll,
        Self::Exit,
    ];

    /// The key the operator types to pick this action.
    #[must_use]
    pub const fn key(self) -> char {
        match self {
            Self::Create => '1',
            Self::Update => '2',
            Self::Delete => '3',
            Self::ViewOne => '4',
            Self::ViewAll => '5',
            Self::Exit => '0',
        }
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Create => "Register a new person",
            Self::Update => "Update a person",
            Self::Delete => "Delete a person",
            Self::ViewOne => "Show a person",
            Self::ViewAll => "Show everyone",
            Self::Exit => "Exit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Error returned when menu input is not one of the listed keys.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid option '{0}'")]
pub struct InvalidOption(String);

impl FromStr for Action {
    type Err = InvalidOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => Self::ALL
                .into_iter()
                .find(|action| action.key() == key)
                .ok_or_else(|| InvalidOption(s.to_string())),
            _ => Err(InvalidOption(s.to_string())),
        }
    }
}

/// Runs the menu until the operator exits or the input ends.
///
/// Every operation outcome, including errors, is reported and control returns
/// to the menu. When `pause` is set, the operator presses ENTER before the
/// menu is shown again.
///
/// # Errors
///
/// Returns an error only if the terminal itself fails.
pub fn run<S: Store>(
    editor: &mut Editor<S>,
    console: &mut impl Console,
    pause: bool,
) -> io::Result<()> {
    loop {
        show_menu(console)?;
        let Some(choice) = console.read_line("Choose an option: ")? else {
            break;
        };

        let action = match choice.parse::<Action>() {
            Ok(Action::Exit) => break,
            Ok(action) => action,
            Err(e) => {
                tracing::debug!("{e}");
                console.print(&"\n✗ Invalid option!".error())?;
                if pause && !wait_for_enter(console)? {
                    break;
                }
                continue;
            }
        };

        console.print("")?;
        console.print(&format!("=== {action} ===").heading())?;
        console.print("")?;

        match dispatch(editor, console, action) {
            Ok(message) => console.print(&message)?,
            Err(EditError::EndOfInput) => break,
            Err(EditError::Io(e)) => return Err(e),
            Err(EditError::Persistence(e)) => console.print(
                &format!("✗ {e}. Changes are kept for this session only.").error(),
            )?,
            Err(e) => console.print(&format!("\n✗ {}", capitalise(&e.to_string())).error())?,
        }

        if pause && !wait_for_enter(console)? {
            break;
        }
    }

    console.print(&"Goodbye!".success())
}

fn dispatch<S: Store>(
    editor: &mut Editor<S>,
    console: &mut impl Console,
    action: Action,
) -> Result<String, EditError> {
    let message = match action {
        Action::Create => {
            let name = editor.create(console)?;
            format!("\n✓ Registered {name}.").success()
        }
        Action::Update => {
            let updated = editor.update(console)?;
            if updated.renamed() {
                format!("\n✓ Updated {} (now {}).", updated.previous, updated.name).success()
            } else {
                format!("\n✓ Updated {}.", updated.name).success()
            }
        }
        Action::Delete => match editor.delete(console)? {
            Some(name) => format!("\n✓ Deleted {name}.").success(),
            None => "\nCancelled.".warning(),
        },
        Action::ViewOne => {
            editor.view_one(console)?;
            String::new()
        }
        Action::ViewAll => {
            editor.view_all(console)?;
            String::new()
        }
        Action::Exit => String::new(),
    };
    Ok(message)
}

fn show_menu(console: &mut impl Console) -> io::Result<()> {
    console.print("")?;
    console.print(&"PEOPLE DIRECTORY".heading())?;
    console.print(&"----------------".dim())?;
    for action in Action::ALL {
        console.print(&format!("  {} | {action}", action.key()))?;
    }
    console.print("")
}

/// Returns `false` if the input ended instead.
fn wait_for_enter(console: &mut impl Console) -> io::Result<bool> {
    Ok(console
        .read_line(&"\nPress ENTER to continue...".dim())?
        .is_some())
}

fn capitalise(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
