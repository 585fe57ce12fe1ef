//! # Judgment Pipeline Driver
//!
//! ## Purpose
//! Command-line entry point for the normalization and summarization
//! pipeline. Three commands are exposed:
//!
//! - `summarize`: run one summarization method over text supplied inline or
//!   from a file, emitting JSON (with length/compression stats) or plain text
//! - `parse`: map an already-fetched judgment page through a court adapter
//!   into a raw document
//! - `normalize`: turn a JSON file of raw documents into normalized records,
//!   printing them or writing them into the sled-backed store with a chosen
//!   dedup policy
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Dispatch to the requested command

use clap::{Arg, ArgAction, Command};
use std::sync::Arc;
use tracing::info;

use judgment_pipeline::{
    config::Config,
    ingest::{BhcAdapter, CourtAdapter, IngestionPipeline, ScAdapter},
    normalize::Normalizer,
    ranking, scoring, segment,
    store::{DedupPolicy, SledStore},
    summary::Summarizer,
    RawDocument, StatisticalMethod,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("judgment-pipeline")
        .version("0.1.0")
        .author("Legal Search Team")
        .about("Normalization and extractive summarization pipeline for Indian court judgments")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml")
                .global(true),
        )
        .subcommand(
            Command::new("summarize")
                .about("Summarize judgment text")
                .arg(
                    Arg::new("text")
                        .short('t')
                        .long("text")
                        .value_name("TEXT")
                        .help("Text to summarize"),
                )
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("Read the text to summarize from a file"),
                )
                .arg(
                    Arg::new("title")
                        .short('n')
                        .long("title")
                        .value_name("TITLE")
                        .help("Case title to prepend to the summary"),
                )
                .arg(
                    Arg::new("method")
                        .short('m')
                        .long("method")
                        .value_name("METHOD")
                        .help("hybrid, heuristic, topic-projection, lexical-graph-centrality, or cooccurrence-graph-rank")
                        .default_value("hybrid"),
                )
                .arg(
                    Arg::new("max-sentences")
                        .short('s')
                        .long("max-sentences")
                        .value_name("N")
                        .help("Maximum number of sentences in the summary")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FORMAT")
                        .help("json or text")
                        .default_value("json"),
                ),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a fetched judgment page into a raw document")
                .arg(
                    Arg::new("court")
                        .long("court")
                        .value_name("COURT")
                        .help("Court adapter to use: sc or bhc")
                        .required(true),
                )
                .arg(
                    Arg::new("page")
                        .long("page")
                        .value_name("FILE")
                        .help("File containing the judgment page HTML")
                        .required(true),
                )
                .arg(
                    Arg::new("body")
                        .long("body")
                        .value_name("FILE")
                        .help("File containing the extracted PDF text, if any"),
                )
                .arg(
                    Arg::new("source-url")
                        .long("source-url")
                        .value_name("URL")
                        .help("URL the page was fetched from"),
                ),
        )
        .subcommand(
            Command::new("normalize")
                .about("Normalize raw documents from a JSON file")
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .value_name("FILE")
                        .help("JSON file containing a RawDocument or an array of them")
                        .required(true),
                )
                .arg(
                    Arg::new("store")
                        .long("store")
                        .help("Write records into the configured sled store instead of printing them")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .value_name("POLICY")
                        .help("Dedup policy when storing: skip or upsert"),
                ),
        )
        .subcommand_required(true)
        .get_matches();

    let config_path = matches.get_one::<String>("config").unwrap();
    let config = Config::from_file(config_path)?;
    init_logging(&config);

    match matches.subcommand() {
        Some(("summarize", sub)) => run_summarize(&config, sub),
        Some(("parse", sub)) => run_parse(sub),
        Some(("normalize", sub)) => run_normalize(&config, sub).await,
        _ => unreachable!("subcommand is required"),
    }
}

fn run_parse(matches: &clap::ArgMatches) -> anyhow::Result<()> {
    let adapter: Box<dyn CourtAdapter> = match matches.get_one::<String>("court").unwrap().as_str()
    {
        "sc" => Box::new(ScAdapter::new()),
        "bhc" => Box::new(BhcAdapter::new()),
        other => anyhow::bail!("no adapter for court: {}", other),
    };

    let page_html = std::fs::read_to_string(matches.get_one::<String>("page").unwrap())?;
    let body_text = match matches.get_one::<String>("body") {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::new(),
    };
    let source_url = matches.get_one::<String>("source-url").map(String::as_str);

    let document = adapter.parse_judgment(&page_html, &body_text, source_url)?;
    println!("{}", serde_json::to_string_pretty(&document)?);

    Ok(())
}

/// Initialize logging and tracing
fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_summarize(config: &Config, matches: &clap::ArgMatches) -> anyhow::Result<()> {
    let text = match (
        matches.get_one::<String>("text"),
        matches.get_one::<String>("file"),
    ) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => anyhow::bail!("either --text or --file is required"),
    };

    let mut summary_config = config.summary.clone();
    if let Some(max) = matches.get_one::<usize>("max-sentences") {
        summary_config.target_length = *max;
    }
    let target = summary_config.target_length;
    let title = matches.get_one::<String>("title").map(String::as_str);
    let method = matches.get_one::<String>("method").unwrap();

    let summary = match method.as_str() {
        "hybrid" => {
            let summarizer = Summarizer::new(summary_config.clone())?;
            summarizer.summarize(&text, title)
        }
        "heuristic" => {
            // Mirror the hybrid chain's first stage only
            let sentences = if text.trim().chars().count() < 100 {
                Vec::new()
            } else {
                scoring::score_sentences(segment::segment(
                    text.trim(),
                    summary_config.min_heuristic_sentence_len,
                ))
                .into_iter()
                .take(target)
                .map(|scored| scored.sentence.text)
                .collect()
            };
            join_sentences(&sentences)
        }
        statistical => {
            let method: StatisticalMethod = statistical.parse()?;
            let sentences: Vec<String> =
                ranking::rank_text(&text, target, method, &summary_config)
                    .into_iter()
                    .map(|s| s.text)
                    .collect();
            join_sentences(&sentences)
        }
    };

    match matches.get_one::<String>("output").unwrap().as_str() {
        "text" => println!("{}", summary),
        _ => {
            let original_length = text.chars().count();
            let summary_length = summary.chars().count();
            let result = serde_json::json!({
                "status": "success",
                "summary": summary,
                "method": method,
                "max_sentences": target,
                "original_length": original_length,
                "summary_length": summary_length,
                "compression_ratio": format!(
                    "{:.2}%",
                    summary_length as f64 / original_length.max(1) as f64 * 100.0
                ),
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn join_sentences(sentences: &[String]) -> String {
    if sentences.is_empty() {
        return String::new();
    }
    let mut joined = sentences.join(". ");
    if !joined.ends_with('.') {
        joined.push('.');
    }
    joined
}

async fn run_normalize(config: &Config, matches: &clap::ArgMatches) -> anyhow::Result<()> {
    let input_path = matches.get_one::<String>("input").unwrap();
    let content = std::fs::read_to_string(input_path)?;

    // Accept either one document or an array
    let documents: Vec<RawDocument> = match serde_json::from_str::<Vec<RawDocument>>(&content) {
        Ok(documents) => documents,
        Err(_) => vec![serde_json::from_str(&content)?],
    };
    info!(documents = documents.len(), input = %input_path, "loaded raw documents");

    if matches.get_flag("store") {
        let mut config = config.clone();
        if let Some(policy) = matches.get_one::<String>("policy") {
            config.ingestion.dedup_policy = match policy.as_str() {
                "skip" => DedupPolicy::Skip,
                "upsert" => DedupPolicy::Upsert,
                other => anyhow::bail!("unknown dedup policy: {}", other),
            };
        }

        let store = Arc::new(SledStore::open(config.storage.clone())?);
        let pipeline = IngestionPipeline::new(&config, store)?;
        let stats = pipeline.run(documents).await?;
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let normalizer = Normalizer::new(config.summary.clone())?;
        let records: Vec<_> = documents.iter().map(|doc| normalizer.normalize(doc)).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    }

    Ok(())
}
