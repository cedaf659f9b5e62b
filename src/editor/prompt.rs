//! Re-prompting input helpers.
//!
//! Each loop runs until the operator supplies an acceptable line or the
//! input runs out, in which case [`EditError::EndOfInput`] is returned.

use crate::{
    domain::ValidationError,
    editor::EditError,
    terminal::{Colorize, Console},
};

/// Reads one line, treating end of input as an error.
pub fn line(console: &mut impl Console, prompt: &str) -> Result<String, EditError> {
    console.read_line(prompt)?.ok_or(EditError::EndOfInput)
}

/// Reads lines until a non-empty one arrives.
pub fn required(console: &mut impl Console, prompt: &str) -> Result<String, EditError> {
    loop {
        let input = line(console, prompt)?;
        if !input.is_empty() {
            return Ok(input);
        }
        console.print(&"✗ A value is required. Try again.".error())?;
    }
}

/// Reads non-empty lines until `parse` accepts one.
pub fn until_valid<T>(
    console: &mut impl Console,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, ValidationError>,
) -> Result<T, EditError> {
    loop {
        let input = required(console, prompt)?;
        match parse(&input) {
            Ok(value) => return Ok(value),
            Err(e) => console.print(&format!("✗ {e}").error())?,
        }
    }
}

/// Reads a single optional replacement value.
///
/// A blank line keeps the current value. An invalid value also keeps it,
/// after a warning; there is no second attempt.
pub fn optional<T>(
    console: &mut impl Console,
    prompt: &str,
    parse: impl Fn(&str) -> Result<T, ValidationError>,
) -> Result<Option<T>, EditError> {
    let input = line(console, prompt)?;
    if input.is_empty() {
        return Ok(None);
    }
    match parse(&input) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::debug!("Rejected replacement value: {e}");
            console.print(&format!("✗ {e}. Keeping the current value.").warning())?;
            Ok(None)
        }
    }
}

/// Asks a yes/no question, accepting only `S` or `N` in either case.
pub fn confirm(console: &mut impl Console, prompt: &str) -> Result<bool, EditError> {
    loop {
        match line(console, prompt)?.to_uppercase().as_str() {
            "S" => return Ok(true),
            "N" => return Ok(false),
            _ => console.print("Type 'S' for yes or 'N' for no.")?,
        }
    }
}

/// Asks for a 1-based position in a list of `count` entries.
///
/// Returns the matching 0-based index.
pub fn choose(console: &mut impl Console, count: usize) -> Result<usize, EditError> {
    loop {
        let input = line(console, "Choose a number: ")?;
        match input.parse::<usize>() {
            Ok(choice) if (1..=count).contains(&choice) => return Ok(choice - 1),
            _ => console.print(&format!("✗ Invalid choice, enter 1 to {count}.").error())?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::{domain::validate, terminal::Terminal};

    fn terminal(script: &str) -> Terminal<Cursor<String>, Vec<u8>> {
        Terminal::new(Cursor::new(script.to_string()), Vec::new())
    }

    fn output(terminal: Terminal<Cursor<String>, Vec<u8>>) -> String {
        String::from_utf8(terminal.into_output()).unwrap()
    }

    #[test]
    fn required_skips_blank_lines() {
        let mut console = terminal("\n   \nAna\n");
        assert_eq!(required(&mut console, "Name: ").unwrap(), "Ana");
        assert_eq!(output(console).matches("A value is required").count(), 2);
    }

    #[test]
    fn until_valid_retries_without_limit() {
        let mut console = terminal("a@b\nnope\nstill no\na@b.com\n");
        let email = until_valid(&mut console, "Email: ", validate::email).unwrap();
        assert_eq!(email, "a@b.com");
        assert_eq!(output(console).matches("invalid email").count(), 3);
    }

    #[test]
    fn until_valid_stops_at_end_of_input() {
        let mut console = terminal("bad\n");
        let result = until_valid(&mut console, "Email: ", validate::email);
        assert!(matches!(result, Err(EditError::EndOfInput)));
    }

    #[test]
    fn optional_blank_keeps_value() {
        let mut console = terminal("\n");
        assert_eq!(
            optional(&mut console, "New email: ", validate::email).unwrap(),
            None
        );
    }

    #[test]
    fn optional_invalid_warns_once_and_moves_on() {
        let mut console = terminal("bad\nnext@example.com\n");
        assert_eq!(
            optional(&mut console, "New email: ", validate::email).unwrap(),
            None
        );
        assert!(output(console).contains("Keeping the current value"));
    }

    #[test]
    fn optional_valid_replaces() {
        let mut console = terminal("(11) 98765-4321\n");
        assert_eq!(
            optional(&mut console, "New phone: ", validate::phone).unwrap(),
            Some("11987654321".to_string())
        );
    }

    #[test]
    fn confirm_accepts_either_case_and_reprompts_otherwise() {
        let mut console = terminal("yes\ny\ns\n");
        assert!(confirm(&mut console, "Sure? ").unwrap());
        assert_eq!(output(console).matches("Type 'S'").count(), 2);

        let mut console = terminal("N\n");
        assert!(!confirm(&mut console, "Sure? ").unwrap());
    }

    #[test]
    fn choose_rejects_out_of_range_and_non_numeric() {
        let mut console = terminal("0\n3\ntwo\n-1\n2\n");
        assert_eq!(choose(&mut console, 2).unwrap(), 1);
        assert_eq!(output(console).matches("Invalid choice").count(), 4);
    }
}
