//! Top-level module for the word-substitution generation system.
//!
//! This module provides the full substitution pipeline, including:
//! - An insertion-ordered string multiset (`Bag`) with exclusion views
//! - A corpus word-frequency index (`WordCounter`)
//! - Token substitution primitives (`Replacer`, `Replacers`)
//! - The part-of-speech tagging boundary (`PosTagger`, `LexiconTagger`)
//! - Tag-set-keyed candidate pools (`ContextWordIndex`)
//! - Replacement selection policies (`ReplacementPicker`)
//! - The orchestrating `TemplateGenerator`

/// Insertion-ordered string multiset with duplicate counting, indexed
/// retrieval and O(1) read-only exclusion views.
pub mod bag;

/// Corpus-wide word occurrence counts and frequency quantiles.
pub mod word_counter;

/// A single token substitution and batch application over a string.
pub mod replacer;

/// The tagging collaborator boundary and a lexicon-backed implementation.
pub mod tagger;

/// Selection policies resolving a candidate pool to one concrete word.
pub mod picker;

/// Context lines mined into per-tag-set candidate pools.
pub mod context_index;

/// High-level template generator: context sampling, candidate filtering
/// and the bounded duplicate-rejecting retry loop.
pub mod generator;
