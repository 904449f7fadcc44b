// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `autoinject check`: report contract diagnostics.
//!
//! Exits non-zero if any error-severity diagnostic is found. Warnings are
//! reported but do not fail the run.

use std::sync::Arc;

use autoinject_core::config::AutoInjectConfig;
use autoinject_core::diagnostics::{Diagnostic, Severity};
use camino::Utf8PathBuf;
use miette::Result;

use super::{OutputFormat, analyze, load_all};
use crate::diagnostic::{ContractDiagnostic, plain_line};
use crate::input::SourceFile;

pub fn run(files: &[Utf8PathBuf], format: OutputFormat, config: &Arc<AutoInjectConfig>) -> Result<()> {
    let mut total = 0usize;
    let mut errors = 0usize;

    let (inputs, symbols) = load_all(files)?;
    for input in &inputs {
        let diagnostics = analyze(input, &symbols, config);
        for diagnostic in &diagnostics {
            match format {
                OutputFormat::Text => match &input.source {
                    Some(source) => {
                        let report = ContractDiagnostic::from_core_diagnostic(
                            diagnostic,
                            input.path.as_str(),
                            source,
                        );
                        eprintln!("{:?}", miette::Report::new(report));
                    }
                    None => eprintln!("{}", plain_line(diagnostic, input.path.as_str())),
                },
                OutputFormat::Json => println!("{}", to_json(input, diagnostic)),
            }
        }
        total += diagnostics.len();
        errors += diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
    }

    if errors > 0 {
        let plural = if errors == 1 { "" } else { "s" };
        miette::bail!(
            "{errors} contract error{plural} found ({total} diagnostic(s) in {} file(s))",
            files.len()
        );
    }
    Ok(())
}

fn to_json(input: &SourceFile, diagnostic: &Diagnostic) -> serde_json::Value {
    serde_json::json!({
        "file": input.path.as_str(),
        "id": diagnostic.id.as_str(),
        "severity": diagnostic.severity,
        "message": diagnostic.message.as_str(),
        "class": diagnostic.class_name.as_str(),
        "span_start": diagnostic.span.start(),
        "span_end": diagnostic.span.end(),
    })
}
