// file_utils.rs
use crate::error::{Result, UtilsError};
use std::env;
use std::fs;
use std::io::{Error as IoError, ErrorKind};
use std::path::Path;

/// Returns true if `file_name` is hidden under the Unix convention, i.e.
/// starts with a dot.
///
/// ```
/// use dautils::file_utils::is_hidden;
///
/// assert!(is_hidden(".bashrc"));
/// assert!(!is_hidden("bashrc"));
/// ```
pub fn is_hidden(file_name: &str) -> bool {
    file_name.starts_with('.')
}

/// Returns the names of the directories directly under `root_dir`, sorted.
pub fn extract_directories(root_dir: &str) -> Result<Vec<String>> {
    list_entries(root_dir, true)
}

/// Returns the names of the files directly under `root_dir`, sorted.
pub fn extract_files(root_dir: &str) -> Result<Vec<String>> {
    list_entries(root_dir, false)
}

fn list_entries(root_dir: &str, directories: bool) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(root_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() == directories {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Expands a relative path prefix and returns a case-normalized path string.
///
/// A `~` or `~/` prefix expands to the current user's home directory (a
/// `~user` form names somebody else's home and is passed through unchanged),
/// a `..` prefix resolves against the absolute parent of the current
/// directory, and a `.` prefix against the absolute current directory. Any
/// other path is returned unchanged. Case normalization lowercases and
/// backslashes the result on Windows and is the identity elsewhere.
///
/// ```
/// use dautils::file_utils::expand_relative_path;
///
/// let home = dirs::home_dir().unwrap();
/// let expanded = expand_relative_path("~/data").unwrap();
/// assert_eq!(expanded, home.join("data").to_string_lossy());
///
/// assert_eq!(expand_relative_path("/var/log").unwrap(), "/var/log");
/// ```
pub fn expand_relative_path(path: &str) -> Result<String> {
    // joining an empty remainder would leave a trailing separator
    fn join_rest(base: &Path, rest: &str) -> String {
        let rest = rest.trim_start_matches('/');
        let joined = if rest.is_empty() {
            base.to_path_buf()
        } else {
            base.join(rest)
        };
        joined.to_string_lossy().to_string()
    }

    let expanded = if path == "~" || path.starts_with("~/") {
        let home = dirs::home_dir().ok_or_else(|| {
            UtilsError::Io(IoError::new(
                ErrorKind::NotFound,
                "could not find home directory",
            ))
        })?;
        join_rest(&home, &path[1..])
    } else if let Some(rest) = path.strip_prefix("..") {
        let current = env::current_dir()?;
        let parent = current.parent().ok_or_else(|| {
            UtilsError::Io(IoError::new(
                ErrorKind::NotFound,
                "current directory has no parent",
            ))
        })?;
        join_rest(parent, rest)
    } else if let Some(rest) = path.strip_prefix('.') {
        join_rest(&env::current_dir()?, rest)
    } else {
        path.to_string()
    };

    Ok(normcase(&expanded))
}

#[cfg(windows)]
fn normcase(path: &str) -> String {
    path.to_lowercase().replace('/', "\\")
}

#[cfg(not(windows))]
fn normcase(path: &str) -> String {
    path.to_string()
}

/// One extension pattern or many, so callers can pass either form at the
/// boundary.
#[derive(Debug, Clone)]
pub enum ExtSpec {
    One(String),
    Many(Vec<String>),
}

impl ExtSpec {
    /// Normalizes to a list of patterns.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ExtSpec::One(ext) => vec![ext],
            ExtSpec::Many(exts) => exts,
        }
    }
}

impl From<&str> for ExtSpec {
    fn from(ext: &str) -> Self {
        ExtSpec::One(ext.to_string())
    }
}

impl From<String> for ExtSpec {
    fn from(ext: String) -> Self {
        ExtSpec::One(ext)
    }
}

impl From<Vec<&str>> for ExtSpec {
    fn from(exts: Vec<&str>) -> Self {
        ExtSpec::Many(exts.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for ExtSpec {
    fn from(exts: Vec<String>) -> Self {
        ExtSpec::Many(exts)
    }
}

/// Returns true if `file_path` ends with `.` + one of the given extensions,
/// case-insensitively. Patterns carry no leading dot.
///
/// ```
/// use dautils::file_utils::check_file_extension;
///
/// assert!(check_file_extension("report.XLSX", "xlsx"));
/// assert!(check_file_extension("data.csv", vec!["csv", "tsv"]));
/// assert!(!check_file_extension("notes.txt", vec!["csv", "tsv"]));
/// ```
pub fn check_file_extension(file_path: &str, extensions: impl Into<ExtSpec>) -> bool {
    let lowered = file_path.to_lowercase();
    extensions
        .into()
        .into_vec()
        .iter()
        .any(|ext| lowered.ends_with(&format!(".{}", ext.to_lowercase())))
}

/// Recursively deletes `path`. A missing path is not an error: it is logged
/// and treated as success. Every other I/O failure propagates.
pub fn safe_remove_tree(path: &str) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("folder not found: {}", path);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Creates `path` (and any missing parents) if it does not already exist.
pub fn create_dir_if_absent(path: &str) -> Result<()> {
    if !Path::new(path).exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
