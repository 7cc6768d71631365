use std::io;

/// Errors surfaced by corpus loading and generation.
///
/// Local filtering failures (a token with no viable candidate pool) are
/// not errors: they are absorbed as absent replacers. Only systemic
/// failures end up here.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("malformed corpus file: {0}")]
	Corpus(#[from] serde_json::Error),

	#[error("malformed config file: {0}")]
	Config(serde_json::Error),

	#[error("tagging failed: {0}")]
	Tagging(String),

	#[error("no novel output after {trials} trials")]
	Exhausted { trials: usize },

	#[error("no template bases to generate from")]
	EmptyCorpus,

	#[error("quantile must be between 0.0 and 1.0, got {0}")]
	InvalidQuantile(f64),
}
