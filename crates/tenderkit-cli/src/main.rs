//! TenderKit — parse tender files, match company capabilities, score
//! suitability. JSON reports on stdout; diagnostics on stderr via tracing.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tenderkit_core::DataPaths;
use tenderkit_evaluate::{summary, CompanyCapabilities, TenderEvaluator, TenderProfile};
use tenderkit_parse::{TenderInfo, TenderParser};
use tenderkit_store::{Case, CompanyStore, Product, Qualification};

fn resolve_data_dir() -> PathBuf {
    std::env::var("TENDERKIT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");

    match command {
        "parse" => cmd_parse(&file_args(&args)),
        "match" => cmd_match(&file_args(&args)),
        "evaluate" => cmd_evaluate(&file_args(&args)),
        "stats" => cmd_stats(),
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}. Use 'tenderkit help' for usage.");
            std::process::exit(1);
        }
    }
}

fn file_args(args: &[String]) -> Vec<PathBuf> {
    args.iter().skip(2).map(PathBuf::from).collect()
}

fn print_help() {
    println!("TenderKit — tender parsing and capability matching");
    println!();
    println!("Usage: tenderkit <command> [files...]");
    println!();
    println!("Commands:");
    println!("  parse <files...>     Parse tender files into a merged record");
    println!("  match <files...>     Parse, then match the company database");
    println!("  evaluate <files...>  Parse, match, and score suitability");
    println!("  stats                Show company database counts");
    println!("  help                 Show this help message");
    println!();
    println!("Environment:");
    println!("  TENDERKIT_DATA_DIR   Company data directory (default: data)");
}

#[derive(Serialize)]
struct ParseReport {
    tender: TenderInfo,
    per_file_confidence: Vec<FileConfidence>,
}

#[derive(Serialize)]
struct FileConfidence {
    file: String,
    confidence_score: f64,
    confidence_level: String,
    suggestions: Vec<String>,
}

fn parse_with_confidence(paths: &[PathBuf]) -> anyhow::Result<ParseReport> {
    if paths.is_empty() {
        anyhow::bail!("no input files given");
    }
    let parser = TenderParser::new();
    let mut results = Vec::new();
    let mut per_file = Vec::new();
    for path in paths {
        let result = parser.parse_file(path)?;
        per_file.push(FileConfidence {
            file: path.display().to_string(),
            confidence_score: result.confidence_score,
            confidence_level: result.confidence_level().to_string(),
            suggestions: result.suggestions(),
        });
        results.push(result);
    }
    let tender = tenderkit_parse::merge::merge(results)?;
    Ok(ParseReport {
        tender,
        per_file_confidence: per_file,
    })
}

fn cmd_parse(paths: &[PathBuf]) -> anyhow::Result<()> {
    let report = parse_with_confidence(paths)?;
    info!(
        "parsed {} file(s), {} requirements",
        report.per_file_confidence.len(),
        report.tender.requirements.len()
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[derive(Serialize)]
struct MatchReport {
    tender: TenderInfo,
    qualifications: Vec<Qualification>,
    cases: Vec<Case>,
    products: Vec<Product>,
}

fn cmd_match(paths: &[PathBuf]) -> anyhow::Result<()> {
    let report = parse_with_confidence(paths)?;
    let store = open_store()?;

    let tender = report.tender;
    let product_keywords =
        tenderkit_evaluate::keywords::extract_product_keywords(&tender.requirements);
    let qualifications = store.match_qualifications(&tender.requirements);
    let cases = store.match_cases(
        None,
        product_keywords.first().map(String::as_str),
        0.0,
        5,
    );
    let products = store.match_products(&product_keywords);

    info!(
        "matched {} qualifications, {} cases, {} products",
        qualifications.len(),
        cases.len(),
        products.len()
    );
    let report = MatchReport {
        tender,
        qualifications,
        cases,
        products,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[derive(Serialize)]
struct EvaluationReport {
    result: tenderkit_evaluate::EvaluationResult,
    summary: String,
}

fn cmd_evaluate(paths: &[PathBuf]) -> anyhow::Result<()> {
    let report = parse_with_confidence(paths)?;
    let store = open_store()?;

    let mut industries: Vec<String> = Vec::new();
    for case in store.get_cases() {
        if !case.industry.is_empty() && !industries.contains(&case.industry) {
            industries.push(case.industry);
        }
    }
    let capabilities = CompanyCapabilities {
        products: store.get_products(),
        certifications: store.get_valid_qualifications(),
        cases: store.get_cases(),
        industries,
    };
    let evaluator = TenderEvaluator::new(capabilities);
    let profile = TenderProfile::from(&report.tender);
    let result = evaluator.evaluate(&profile);
    let summary = summary(&result);

    info!("total score {:.2} ({})", result.total_score, summary);
    let report = EvaluationReport { result, summary };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[derive(Serialize)]
struct StatsReport {
    qualifications: usize,
    valid_qualifications: usize,
    cases: usize,
    products: usize,
    personnel: usize,
}

fn cmd_stats() -> anyhow::Result<()> {
    let store = open_store()?;
    let report = StatsReport {
        qualifications: store.get_qualifications().len(),
        valid_qualifications: store.get_valid_qualifications().len(),
        cases: store.get_cases().len(),
        products: store.get_products().len(),
        personnel: store.get_personnel(None).len(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn open_store() -> anyhow::Result<CompanyStore> {
    let data_dir = resolve_data_dir();
    info!("data directory: {}", data_dir.display());
    let paths = DataPaths::new(&data_dir)?;
    Ok(CompanyStore::open(paths)?)
}
