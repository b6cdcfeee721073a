//! Interactive record picker.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the picker provides the "run `titr` and choose a titration" UX

use std::io::{self, BufRead, Write};

use crate::catalog::Catalog;
use crate::error::AppError;

/// Outcome of one line of picker input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Record(String),
    Quit,
    Invalid(String),
}

/// Prompt the user to select a record from the catalog.
///
/// Behavior:
/// - list every record with its label
/// - accept either a number (from the list) or a record id
/// - `q` cancels
pub fn prompt_for_record(catalog: &Catalog) -> Result<String, AppError> {
    let stdin = io::stdin();
    prompt_with(catalog, &mut stdin.lock(), &mut io::stdout())
}

fn prompt_with<R: BufRead, W: Write>(catalog: &Catalog, input: &mut R, out: &mut W) -> Result<String, AppError> {
    let records = catalog.records();
    if records.is_empty() {
        return Err(AppError::new(2, "Catalog has no records."));
    }

    let write_err = |e: io::Error| AppError::new(2, format!("Failed to write prompt: {e}"));

    writeln!(out, "Available titrations:").map_err(write_err)?;
    for (idx, record) in records.iter().enumerate() {
        writeln!(out, "{:>3}) {:<16} {}", idx + 1, record.id(), record.label()).map_err(write_err)?;
    }

    loop {
        write!(out, "Select a record by number (1-{}) or id (q to quit): ", records.len()).map_err(write_err)?;
        out.flush().map_err(write_err)?;

        let mut line = String::new();
        let bytes = input
            .read_line(&mut line)
            .map_err(|e| AppError::new(2, format!("Failed to read input: {e}")))?;
        if bytes == 0 {
            return Err(AppError::new(
                2,
                "No input received. Provide a record with `titr curve -r <id>`.",
            ));
        }

        match resolve_choice(catalog, &line) {
            Choice::Record(id) => return Ok(id),
            Choice::Quit => return Err(AppError::new(2, "Canceled.")),
            Choice::Invalid(msg) => writeln!(out, "{msg}").map_err(write_err)?,
        }
    }
}

/// Interpret one line of picker input against the catalog.
pub fn resolve_choice(catalog: &Catalog, input: &str) -> Choice {
    let input = input.trim();
    let records = catalog.records();

    if input.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }

    if let Ok(n) = input.parse::<usize>() {
        if (1..=records.len()).contains(&n) {
            return Choice::Record(records[n - 1].id().to_string());
        }
        return Choice::Invalid(format!(
            "Invalid choice: {n}. Enter a number between 1 and {}.",
            records.len()
        ));
    }

    match catalog.record(input) {
        Ok(record) => Choice::Record(record.id().to_string()),
        Err(err) => Choice::Invalid(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn numbers_and_ids_resolve() {
        let catalog = catalog();
        let first = catalog.records()[0].id().to_string();
        assert_eq!(resolve_choice(&catalog, "1\n"), Choice::Record(first));
        assert_eq!(
            resolve_choice(&catalog, " nh3-hcl "),
            Choice::Record("nh3-hcl".to_string())
        );
        assert_eq!(resolve_choice(&catalog, "Q"), Choice::Quit);
    }

    #[test]
    fn out_of_range_and_unknown_are_invalid() {
        let catalog = catalog();
        assert!(matches!(resolve_choice(&catalog, "0"), Choice::Invalid(_)));
        assert!(matches!(resolve_choice(&catalog, "99"), Choice::Invalid(_)));
        assert!(matches!(resolve_choice(&catalog, "vinegar"), Choice::Invalid(_)));
    }

    #[test]
    fn prompt_retries_until_valid() {
        let catalog = catalog();
        let mut input = io::Cursor::new("banana\n3\n");
        let mut out = Vec::new();
        let id = prompt_with(&catalog, &mut input, &mut out).unwrap();
        assert_eq!(id, catalog.records()[2].id());
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("banana"));
    }

    #[test]
    fn eof_is_an_error() {
        let catalog = catalog();
        let mut input = io::Cursor::new("");
        let mut out = Vec::new();
        let err = prompt_with(&catalog, &mut input, &mut out).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
