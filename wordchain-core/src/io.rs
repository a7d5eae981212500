use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WordChainError};

/// Where training text comes from.
///
/// - `Text`: raw text, passed through unchanged
/// - `File`: a single text file
/// - `Directory`: every regular file directly inside a directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextSource {
	Text(String),
	File(PathBuf),
	Directory(PathBuf),
}

impl TextSource {
	/// Resolves the source into one in-memory string.
	///
	/// Directory files are joined with a single space.
	///
	/// # Errors
	/// Returns `MalformedSource` if any file or the directory cannot be read.
	pub fn resolve(&self) -> Result<String> {
		match self {
			TextSource::Text(text) => Ok(text.clone()),
			TextSource::File(path) => read_file(path),
			TextSource::Directory(path) => read_directory(path),
		}
	}
}

impl From<&str> for TextSource {
	fn from(text: &str) -> Self {
		TextSource::Text(text.to_owned())
	}
}

impl From<String> for TextSource {
	fn from(text: String) -> Self {
		TextSource::Text(text)
	}
}

fn malformed(path: &Path, source: std::io::Error) -> WordChainError {
	WordChainError::MalformedSource { path: path.to_path_buf(), source }
}

/// Reads a whole text file.
pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
	let path = path.as_ref();
	fs::read_to_string(path).map_err(|e| malformed(path, e))
}

/// Lists the regular files directly inside `dir`, sorted by name.
///
/// Subdirectories are ignored. Sorting keeps training runs reproducible
/// regardless of the platform's listing order.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
	let dir = dir.as_ref();
	let mut files = Vec::new();

	for entry in fs::read_dir(dir).map_err(|e| malformed(dir, e))? {
		let path = entry.map_err(|e| malformed(dir, e))?.path();
		if path.is_file() {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}

/// Concatenates all files of a directory, separated by one space.
pub(crate) fn read_directory<P: AsRef<Path>>(dir: P) -> Result<String> {
	let contents = list_files(dir)?
		.iter()
		.map(read_file)
		.collect::<Result<Vec<_>>>()?;
	Ok(contents.join(" "))
}
