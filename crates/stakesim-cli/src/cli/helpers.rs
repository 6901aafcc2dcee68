use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use stakesim_core::{Conversation, Grade, GradingError, Persona, Rubric};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let s = read(path)?;
    serde_yaml::from_str(&s).with_context(|| format!("invalid YAML in {}", path.display()))
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let s = read(path)?;
    serde_json::from_str(&s).with_context(|| format!("invalid JSON in {}", path.display()))
}

pub fn load_rubric(path: &Path) -> Result<Rubric> {
    load_yaml(path)
}

pub fn load_persona(path: &Path) -> Result<Persona> {
    load_yaml(path)
}

pub fn load_conversation(path: &Path) -> Result<Conversation> {
    load_json(path)
}

pub fn load_grade(path: &Path) -> Result<Grade> {
    load_json(path)
}

pub fn load_text(path: &Path) -> Result<String> {
    read(path)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s + "\n").with_context(|| format!("failed to write {}", path.display()))
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Parse repeated `name=value` flags into override scores.
pub fn parse_score_pairs(pairs: &[String]) -> Result<BTreeMap<String, Decimal>> {
    let mut scores = BTreeMap::new();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .with_context(|| format!("expected NAME=VALUE, got '{}'", pair))?;
        let value = Decimal::from_str(value.trim())
            .with_context(|| format!("invalid score for '{}': '{}'", name, value))?;
        if scores.insert(name.trim().to_string(), value).is_some() {
            anyhow::bail!("criterion '{}' given more than once", name.trim());
        }
    }
    Ok(scores)
}

/// Report a grading failure on stderr and return its exit code.
pub fn grading_failure(err: &GradingError) -> i32 {
    tracing::error!(exit_code = err.exit_code(), retryable = err.is_retryable(), "{}", err);
    eprintln!("error: {}", err);
    err.exit_code()
}
