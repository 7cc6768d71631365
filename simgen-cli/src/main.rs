use std::process;

use clap::Parser;

use simgen_core::error::GenerateError;
use simgen_core::io::{read_config, read_corpus, write_corpus};
use simgen_core::model::context_index::TokenFilter;
use simgen_core::model::generator::{GeneratorConfig, TemplateGenerator};
use simgen_core::model::tagger::LexiconTagger;

/// Batch driver: rewrites every corpus line into a novel variant.
#[derive(Parser)]
#[command(name = "simgen", about = "Corpus-driven similar-word sentence generator")]
struct Cli {
    /// Input corpus (JSON array of strings)
    input: String,

    /// Output file for the generated corpus (same format)
    output: String,

    /// Number of input lines to process (default: all)
    line_count: Option<usize>,

    /// Retry ceiling per line
    max_trials: Option<usize>,

    /// Tagger lexicon file (one `word<TAB>tag,tag` entry per line)
    #[arg(long)]
    lexicon: String,

    /// Generator configuration file (JSON), overridden by MAX_TRIALS
    #[arg(long)]
    config: Option<String>,
}

fn run(cli: &Cli) -> Result<(), GenerateError> {
    let corpus = read_corpus(&cli.input)?;
    let tagger = LexiconTagger::from_file(&cli.lexicon)?;

    let mut config = match &cli.config {
        Some(path) => read_config(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(max_trials) = cli.max_trials {
        config.max_trials = max_trials;
    }

    // The corpus serves both as template bases and as context
    let mut generator = TemplateGenerator::new(
        corpus.clone(),
        corpus.clone(),
        tagger,
        TokenFilter::dutch(),
        config,
    );

    let count = cli.line_count.unwrap_or(corpus.len()).min(corpus.len());
    let mut output = Vec::with_capacity(count);
    for (i, line) in corpus.iter().take(count).enumerate() {
        println!("{}: {}", i, line);
        // One output per input line: any failure aborts the batch
        output.push(generator.generate(line)?);
    }

    write_corpus(&cli.output, &output)
}

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(&cli) {
        eprintln!("simgen: {error}");
        process::exit(1);
    }
}
