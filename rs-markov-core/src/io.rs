use std::fs;
use std::path::{Path, PathBuf};
use std::{env, io};

use log::info;

use crate::error::{MarkovError, Result};

fn io_error<P: AsRef<Path>>(path: P) -> impl FnOnce(io::Error) -> MarkovError {
	let path = path.as_ref().to_path_buf();
	move |source| MarkovError::Io { path, source }
}

/// Reads a whole UTF-8 text file.
pub fn read_file<P: AsRef<Path>>(filename: P) -> Result<String> {
	fs::read_to_string(&filename).map_err(io_error(&filename))
}

/// Writes `content` followed by a newline, replacing the file if it exists.
pub fn write_file<P: AsRef<Path>>(filename: P, content: &str) -> Result<()> {
	let path = filename.as_ref();
	let mut data = String::with_capacity(content.len() + 1);
	data.push_str(content);
	data.push('\n');
	fs::write(path, data).map_err(io_error(path))?;
	info!("wrote {} bytes to {}", content.len() + 1, path.display());
	Ok(())
}

/// Extracts the base filename without extension.
///
/// Examples:
/// - `"./data/moby.txt"` → `"moby"`
/// - `"moby.txt"` → `"moby"`
pub fn get_filename<P: AsRef<Path>>(input_path: P) -> Result<String> {
	let path = input_path.as_ref();
	let stem = path.file_stem().ok_or_else(|| MarkovError::Io {
		path: path.to_path_buf(),
		source: io::Error::new(io::ErrorKind::InvalidInput, "path has no filename"),
	})?;

	Ok(stem.to_string_lossy().to_string())
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub fn normalize_folder(input: &str) -> PathBuf {
	if input == "." || input == "./" {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		PathBuf::from(input)
	}
}

/// Lists all files with a given extension in a directory.
///
/// Returns file names only (no paths), sorted.
pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<String>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(&dir).map_err(io_error(&dir))? {
		let path = entry.map_err(io_error(&dir))?.path();

		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			if let Some(name) = path.file_name() {
				files.push(name.to_string_lossy().to_string());
			}
		}
	}

	files.sort();
	Ok(files)
}
