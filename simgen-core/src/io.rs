use std::fs;
use std::path::Path;

use crate::error::GenerateError;
use crate::model::generator::GeneratorConfig;

/// Reads a corpus file and returns its lines as a `Vec<String>`.
///
/// The corpus format is a JSON array of strings, UTF-8 encoded, with
/// non-ASCII characters written literally.
///
/// # Errors
/// - `GenerateError::Io` if the file cannot be read.
/// - `GenerateError::Corpus` if the content is not a JSON array of strings.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<String>, GenerateError> {
	let contents = fs::read_to_string(path)?;
	let corpus = serde_json::from_str(&contents)?;
	Ok(corpus)
}

/// Writes a corpus as a pretty-printed JSON array of strings.
///
/// Non-ASCII characters are written literally (no `\u` escaping).
pub fn write_corpus<P: AsRef<Path>>(path: P, lines: &[String]) -> Result<(), GenerateError> {
	let json = serde_json::to_string_pretty(lines)?;
	fs::write(path, json)?;
	Ok(())
}

/// Reads a generator configuration file (JSON object; absent fields take
/// their defaults).
///
/// # Errors
/// - `GenerateError::Io` if the file cannot be read.
/// - `GenerateError::Config` if the content is not a valid configuration object.
pub fn read_config<P: AsRef<Path>>(path: P) -> Result<GeneratorConfig, GenerateError> {
	let contents = fs::read_to_string(path)?;
	let config = serde_json::from_str(&contents).map_err(GenerateError::Config)?;
	Ok(config)
}
