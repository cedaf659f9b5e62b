use crate::domain::Person;

const HEADERS: [&str; 5] = ["#", "Name", "Email", "Phone", "Age"];
const MIN_WIDTHS: [usize; 5] = [1, 15, 25, 15, 5];

/// A fixed-width table of people.
///
/// Rows are numbered from 1 in the order given; those numbers are what the
/// operator types to pick one entry out of several.
#[derive(Debug, Default)]
pub struct Table<'a> {
    rows: Vec<(&'a str, &'a Person)>,
}

impl<'a> Table<'a> {
    /// Creates a table of the given entries, in order.
    #[must_use]
    pub fn new(rows: impl IntoIterator<Item = (&'a str, &'a Person)>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    /// Renders the header, underline and one line per row.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let data: Vec<[String; 5]> = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, (name, person))| {
                [
                    (idx + 1).to_string(),
                    (*name).to_string(),
                    person.email().to_string(),
                    person.phone().to_string(),
                    person.age().to_string(),
                ]
            })
            .collect();

        // Determine column widths for alignment.
        let mut widths = MIN_WIDTHS;
        for (idx, width) in widths.iter_mut().enumerate() {
            let widest = data
                .iter()
                .map(|row| row[idx].chars().count())
                .chain([HEADERS[idx].len()])
                .max()
                .unwrap_or(0);
            *width = (*width).max(widest);
        }

        let mut lines = Vec::with_capacity(data.len() + 2);
        lines.push(render_line(HEADERS.iter().copied(), &widths));
        lines.push(render_line(widths.iter().map(|w| "-".repeat(*w)), &widths));
        for row in &data {
            lines.push(render_line(row.iter().map(String::as_str), &widths));
        }
        lines
    }
}

fn render_line<S: AsRef<str>>(cells: impl Iterator<Item = S>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell.as_ref()))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
