use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use colored::Colorize;
use jf_diff::{Patch, PatchList};
use jf_rules::{RuleSet, RuleSide, RulesConfig};
use jf_types::Value;
use tracing::debug;

use crate::cli::{Cli, OutputFormat};

/// Result of a successful run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Same,
    Different,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Same => ExitCode::SUCCESS,
            Outcome::Different => ExitCode::from(1),
        }
    }
}

pub fn run_command(cli: &Cli, out: &mut impl Write, color: bool) -> anyhow::Result<Outcome> {
    let rules = build_rules(cli)?;
    let a = read_json(&cli.a)?;
    let b = read_json(&cli.b)?;

    let patches = jf_diff::diff(&a, &b, &rules).context("diff failed")?;

    match cli.format {
        OutputFormat::Text => out.write_all(render_text(&patches, color).as_bytes())?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &patches)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    Ok(if patches.is_empty() {
        Outcome::Same
    } else {
        Outcome::Different
    })
}

/// Rules from `--rules` first, then the flag rules in a fixed order.
fn build_rules(cli: &Cli) -> anyhow::Result<RuleSet> {
    let mut rules = RuleSet::new();

    if let Some(path) = &cli.rules {
        let config = RulesConfig::load(path)
            .with_context(|| format!("cannot load rules from {}", path.display()))?;
        config
            .apply_to(&mut rules)
            .with_context(|| format!("invalid rule in {}", path.display()))?;
    }

    for pattern in &cli.ignore_b {
        rules = rules.ignore(RuleSide::B, pattern)?;
    }
    if let (Some(selector), Some(key)) = (&cli.sort_selector, &cli.sort_key) {
        rules = rules.order_by_key(selector, key)?;
    }
    for pattern in &cli.ignore_order {
        rules = rules.ignore_order(pattern)?;
    }
    for pattern in &cli.string_number {
        rules = rules.string_number(pattern)?;
    }
    for pattern in &cli.coerce_null {
        rules = rules.coerce_null(RuleSide::AB, pattern)?;
    }

    debug!(rules = rules.len(), "rules ready");
    Ok(rules)
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    Value::from_json_str(&text).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// One row per patch in three space-aligned columns: selector, left, right.
fn render_text(patches: &PatchList, color: bool) -> String {
    let width = |f: fn(&Patch) -> &str| {
        patches.iter().map(|p| f(p).chars().count()).max().unwrap_or(0)
    };
    let selector_width = width(Patch::selector);
    let left_width = width(Patch::left);

    let mut text = String::new();
    for patch in patches {
        let selector = format!("{:<selector_width$}", patch.selector());
        let (left, right) = if patch.right_value().is_none() {
            (patch.left().to_string(), String::new())
        } else {
            (format!("{:<left_width$}", patch.left()), patch.right().to_string())
        };

        let row = if color {
            format!("{} {} {}", selector.bold(), left.red(), right.green())
        } else {
            format!("{selector} {left} {right}")
        };
        text.push_str(row.trim_end());
        text.push('\n');
    }
    text
}
