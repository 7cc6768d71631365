//! Corpus-driven similar-word sentence generation library.
//!
//! This crate provides a word-substitution template engine including:
//! - Tag-set-keyed candidate pools mined from sampled context lines
//! - Corpus-wide word-frequency statistics with quantile thresholds
//! - Interchangeable replacement selection policies
//! - A bounded-retry generator that rejects outputs already in the corpus
//!
//! The part-of-speech tagger is a pluggable collaborator behind the
//! `PosTagger` trait; a file-backed lexicon tagger is provided.

/// Core generation logic: containers, statistics, tagging boundary,
/// candidate pools, selection policies and the template generator.
pub mod model;

/// Corpus I/O (JSON array-of-strings serialization).
pub mod io;

/// Error model shared across the crate.
pub mod error;
