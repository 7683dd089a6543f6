//! Inspector for simulator data dumps.
//!
//! Reads one data file, runs a query against it and prints JSON to stdout.
//! Logs go to stderr; see [`logging::init_tracing`].
//!
//! ```text
//! dex-inspect [--config dex.toml] <command> <file> [keys...]
//!
//! commands:
//!   keys       entity keys with their national numbers
//!   species    decoded species records
//!   moves      decoded move records
//!   learnsets  learnsets grouped by learn method
//!   chain      evolution forests
//!   names      canonical names and sprite candidates for every numbered key
//! ```

mod logging;

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use dex_extract::{
    EvolutionContext, ExtractConfig, Learnset, Move, SourceAccess, SourceText, Species,
    canonicalize, decode, entities_by_number, list_entity_keys, locate, schema,
    sprite_candidates, validate_species,
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, warn};

const USAGE: &str = "usage: dex-inspect [--config <path>] <keys|species|moves|learnsets|chain|names> <file> [keys...]";

// =============================================================================
// ARGUMENTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Keys,
    Species,
    Moves,
    Learnsets,
    Chain,
    Names,
}

impl Command {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "keys" => Some(Command::Keys),
            "species" => Some(Command::Species),
            "moves" => Some(Command::Moves),
            "learnsets" => Some(Command::Learnsets),
            "chain" => Some(Command::Chain),
            "names" => Some(Command::Names),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    config: Option<PathBuf>,
    command: Command,
    file: PathBuf,
    keys: Vec<String>,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut config = None;
    let mut positional = Vec::new();
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = raw.next().ok_or("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--help" | "-h" => return Err(USAGE.to_string()),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = positional.next().ok_or(USAGE)?;
    let command = Command::parse(&command).ok_or_else(|| format!("unknown command {command:?}\n{USAGE}"))?;
    let file = positional.next().map(PathBuf::from).ok_or(USAGE)?;
    Ok(Args {
        config,
        command,
        file,
        keys: positional.collect(),
    })
}

// =============================================================================
// COMMANDS
// =============================================================================

/// Every entity key, or just the ones asked for.
fn selected_keys(source: &str, config: &ExtractConfig, keys: &[String]) -> Vec<String> {
    if keys.is_empty() {
        list_entity_keys(source, &config.key_filter()).into_iter().collect()
    } else {
        keys.to_vec()
    }
}

/// Decodes each key with `project`, logging and skipping keys that fail.
fn decode_each<T, F>(source: &str, keys: &[String], project: F) -> Vec<T>
where
    F: Fn(&dex_extract::EntitySpan<'_>) -> T,
{
    keys.iter()
        .filter_map(|key| match locate(source, key) {
            Ok(span) => Some(project(&span)),
            Err(err) => {
                warn!(key = %key, code = err.code().code(), "skipping: {err}");
                None
            }
        })
        .collect()
}

fn species_json(source: &str, config: &ExtractConfig, keys: &[String]) -> Value {
    let keys = selected_keys(source, config, keys);
    let records = decode_each(source, &keys, |span| {
        let species = Species::from_record(span.key.clone(), &decode(span, schema::species_fields()));
        let problem = validate_species(&species).err().map(|e| e.to_string());
        json!({ "species": species, "problem": problem })
    });
    Value::Array(records)
}

fn moves_json(source: &str, config: &ExtractConfig, keys: &[String]) -> Value {
    let keys = selected_keys(source, config, keys);
    to_json(&decode_each(source, &keys, |span| {
        Move::from_record(span.key.clone(), &decode(span, schema::move_fields()))
    }))
}

fn learnsets_json(source: &str, config: &ExtractConfig, keys: &[String]) -> Value {
    let keys = selected_keys(source, config, keys);
    let records = decode_each(source, &keys, |span| {
        let learnset = Learnset::from_record(span.key.clone(), &decode(span, schema::learnset_fields()));
        let methods = learnset.categorize();
        json!({ "key": learnset.key, "methods": methods })
    });
    Value::Array(records)
}

fn chain_json(source: &SourceText, config: &ExtractConfig, keys: &[String]) -> Value {
    let ctx = EvolutionContext::new(SourceAccess::with_filter(source.clone(), config.key_filter()))
        .with_max_depth(config.graph.max_chain_depth);
    let keys = selected_keys(source.as_str(), config, keys);

    let forests: Vec<Value> = keys
        .iter()
        .map(|key| {
            let forest = ctx.build_chain_forest(key);
            let interruptions: Vec<String> = forest.interruptions.iter().map(|i| i.to_string()).collect();
            json!({
                "species": key,
                "forest": forest,
                "lineage": forest.members(),
                "interruptions": interruptions,
            })
        })
        .collect();
    Value::Array(forests)
}

fn keys_json(source: &str, config: &ExtractConfig) -> Value {
    let keys = list_entity_keys(source, &config.key_filter());
    let numbered = entities_by_number(source, &keys);
    info!(keys = keys.len(), numbered = numbered.len(), "listed keys");
    to_json(&numbered)
}

fn names_json(source: &str, config: &ExtractConfig) -> Value {
    let keys = list_entity_keys(source, &config.key_filter());
    let numbered = entities_by_number(source, &keys);
    let names = canonicalize(numbered.iter().map(|n| &n.key), &config.suffix_set());

    let entries: Vec<Value> = numbered
        .iter()
        .filter_map(|n| {
            let name = names.get(&n.key)?;
            Some(json!({
                "key": n.key,
                "number": n.number,
                "canonical": name,
                "sprites": sprite_candidates(&config.resources, n.number, name),
            }))
        })
        .collect();
    Value::Array(entries)
}

fn to_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or_else(|e| json!({ "error": e.to_string() }))
}

// =============================================================================
// MAIN
// =============================================================================

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = match &args.config {
        Some(path) => ExtractConfig::load(path)?,
        None => ExtractConfig::from_env()?,
    };

    let text = fs::read_to_string(&args.file)
        .map_err(|e| format!("failed to read {}: {e}", args.file.display()))?;
    let source = SourceText::from(text);
    info!(file = %args.file.display(), bytes = source.len(), command = ?args.command, "loaded source");

    let output = match args.command {
        Command::Keys => keys_json(source.as_str(), &config),
        Command::Species => species_json(source.as_str(), &config, &args.keys),
        Command::Moves => moves_json(source.as_str(), &config, &args.keys),
        Command::Learnsets => learnsets_json(source.as_str(), &config, &args.keys),
        Command::Chain => chain_json(&source, &config, &args.keys),
        Command::Names => names_json(source.as_str(), &config),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> ExitCode {
    logging::init_tracing();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["chain", "dex.js", "eevee", "pichu"]).unwrap();
        assert_eq!(parsed.command, Command::Chain);
        assert_eq!(parsed.file, PathBuf::from("dex.js"));
        assert_eq!(parsed.keys, vec!["eevee", "pichu"]);
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_parse_config_anywhere() {
        let parsed = args(&["names", "--config", "dex.toml", "dex.js"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("dex.toml")));
        assert_eq!(parsed.command, Command::Names);
        assert!(parsed.keys.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(args(&[]).is_err());
        assert!(args(&["evolve", "dex.js"]).is_err());
        assert!(args(&["keys"]).is_err());
        assert!(args(&["keys", "dex.js", "--config"]).is_err());
    }

    #[test]
    fn test_chain_json_reports_missing_species() {
        let source = SourceText::from("a: {evos: [\"B\"]}, b: {evoLevel: 10}");
        let output = chain_json(&source, &ExtractConfig::default(), &["b".to_string(), "z".to_string()]);
        assert_eq!(output[0]["lineage"], json!(["a", "b"]));
        assert_eq!(output[0]["forest"]["chains"][0][1]["trigger"]["kind"], "LevelUp");
        assert_eq!(output[1]["lineage"], json!([]));
    }
}
