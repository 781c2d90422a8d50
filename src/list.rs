//! Identifier lists.
//!
//! A list is a plain text file beside the program with one workshop item id
//! per line. The user picks one of the `*.txt` files found in the root
//! directory unless one is given on the command line.

use crate::error::{Error, Result};

use inquire::Select;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;
use wax::{CandidatePath, Glob, Pattern};

/// Pattern list files must match.
pub const LIST_PATTERN: &str = "*.txt";

/// Opaque token naming one workshop item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parse identifiers from a line-oriented reader.
///
/// Lines are trimmed; blank lines are dropped. Order is preserved.
pub fn parse_identifiers(reader: impl BufRead) -> std::io::Result<Vec<Identifier>> {
    let mut identifiers = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let id = line.trim();
        if !id.is_empty() {
            identifiers.push(Identifier::new(id));
        }
    }
    Ok(identifiers)
}

/// Read every identifier from the list file at `path`.
pub fn read_identifiers(path: &Path) -> Result<Vec<Identifier>> {
    let file = File::open(path).map_err(|e| Error::List {
        path: path.to_path_buf(),
        source: e,
    })?;
    let identifiers = parse_identifiers(BufReader::new(file)).map_err(|e| Error::List {
        path: path.to_path_buf(),
        source: e,
    })?;
    debug!("Read {} identifiers from {:?}", identifiers.len(), path);
    Ok(identifiers)
}

/// List files in `dir` (not recursive) matching [`LIST_PATTERN`], sorted by name.
pub fn discover_lists(dir: &Path) -> Result<Vec<PathBuf>> {
    let glob = Glob::new(LIST_PATTERN)
        .map_err(|e| Error::Environment(format!("invalid list pattern {LIST_PATTERN}: {e}")))?;

    let mut lists = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::List {
        path: dir.to_path_buf(),
        source: e,
    })? {
        let entry = entry.map_err(|e| Error::List {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if is_file && glob.matched(&CandidatePath::from(name.as_ref())).is_some() {
            lists.push(entry.path());
        }
    }
    lists.sort();
    Ok(lists)
}

/// Ask the user which list to install.
///
/// A single candidate is chosen without prompting. Returns `None` when the
/// prompt is cancelled.
pub fn select_list(candidates: Vec<PathBuf>, root: &Path) -> Result<Option<PathBuf>> {
    match candidates.len() {
        0 => return Err(Error::NoListFiles(root.to_path_buf())),
        1 => return Ok(candidates.into_iter().next()),
        _ => {}
    }

    let names: Vec<String> = candidates
        .iter()
        .map(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        })
        .collect();

    let Some(choice) = Select::new("Choose mods id text file", names.clone())
        .with_starting_cursor(0)
        .with_page_size(10)
        .with_help_message("↑↓ to move, ENTER to select, ESC to cancel")
        .prompt_skippable()?
    else {
        return Ok(None);
    };

    Ok(names
        .iter()
        .position(|name| *name == choice)
        .map(|index| candidates[index].clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers_skips_blank_lines() {
        let input = "2169435993\r\n\n  2392709985  \n\n2478247379";
        let ids = parse_identifiers(input.as_bytes()).unwrap();
        assert_eq!(
            ids,
            vec![
                Identifier::from("2169435993"),
                Identifier::from("2392709985"),
                Identifier::from("2478247379"),
            ]
        );
    }

    #[test]
    fn test_parse_identifiers_keeps_order_and_duplicates() {
        let ids = parse_identifiers("b\na\nb\n".as_bytes()).unwrap();
        let ids: Vec<_> = ids.iter().map(Identifier::as_str).collect();
        assert_eq!(ids, ["b", "a", "b"]);
    }

    #[test]
    fn test_discover_lists_matches_txt_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("server.txt"), "1\n").unwrap();
        fs::write(dir.path().join("coop.txt"), "2\n").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::create_dir(dir.path().join("dir.txt")).unwrap();

        let lists = discover_lists(dir.path()).unwrap();
        let names: Vec<_> = lists
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["coop.txt", "server.txt"]);
    }

    #[test]
    fn test_select_list_without_candidates() {
        let err = select_list(Vec::new(), Path::new("/pz")).unwrap_err();
        assert!(matches!(err, Error::NoListFiles(_)));
    }

    #[test]
    fn test_select_list_single_candidate_skips_prompt() {
        let only = PathBuf::from("/pz/server.txt");
        let chosen = select_list(vec![only.clone()], Path::new("/pz")).unwrap();
        assert_eq!(chosen, Some(only));
    }

    #[test]
    fn test_read_identifiers_missing_file() {
        let err = read_identifiers(Path::new("/definitely/missing.txt")).unwrap_err();
        assert_eq!(err.exit_code(), 6);
    }
}
