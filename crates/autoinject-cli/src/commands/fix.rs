// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! `autoinject fixes` and `autoinject fix`.
//!
//! `fixes` lists every action offered per diagnostic together with its
//! equivalence key. `fix --key K` applies the action with key `K` to every
//! diagnostic that offers it, one after another, and prints the result.

use std::sync::Arc;

use autoinject_core::config::AutoInjectConfig;
use autoinject_core::fixes::{all_fix_providers, code_actions_for, fix_all};
use autoinject_core::host::{CancellationToken, Document};
use autoinject_core::syntax::printer::print_unit;
use camino::{Utf8Path, Utf8PathBuf};
use miette::{IntoDiagnostic, Result};

use super::{OutputFormat, analyze, load_all};
use crate::diagnostic::plain_line;
use crate::input::SourceFile;

pub fn list(files: &[Utf8PathBuf], config: &Arc<AutoInjectConfig>) -> Result<()> {
    let providers = all_fix_providers(config);
    let cancel = CancellationToken::new();
    let (inputs, symbols) = load_all(files)?;
    for input in &inputs {
        let document = input.document();
        for diagnostic in analyze(input, &symbols, config) {
            println!("{}", plain_line(&diagnostic, input.path.as_str()));
            for action in code_actions_for(&document, &diagnostic, &providers, &cancel) {
                println!("    {}: {}", action.equivalence_key, action.title);
            }
        }
    }
    Ok(())
}

pub fn apply(
    file: &Utf8Path,
    key: &str,
    format: OutputFormat,
    config: &Arc<AutoInjectConfig>,
) -> Result<()> {
    let input = SourceFile::load(file)?;
    let fixed = apply_key(&input, key, config);
    let cancel = CancellationToken::new();
    let Ok(Some(root)) = fixed.syntax_root(&cancel) else {
        miette::bail!("'{}' has no syntax tree to fix", input.path);
    };
    match format {
        OutputFormat::Text => print!("{}", print_unit(&root)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&*root).into_diagnostic()?);
        }
    }
    Ok(())
}

/// Batch-applies `key` with every provider that handles some diagnostic.
fn apply_key(input: &SourceFile, key: &str, config: &Arc<AutoInjectConfig>) -> Document {
    let diagnostics = analyze(input, &input.symbols(), config);
    let cancel = CancellationToken::new();
    let mut document = input.document();
    for provider in all_fix_providers(config) {
        document = fix_all(&document, &diagnostics, provider.as_ref(), key, &cancel);
    }
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROVIDER: &str = r#"{
        "path": "Provider.cs",
        "root": {
            "span": { "start": 0, "end": 400 },
            "types": [{
                "kind": "class",
                "span": { "start": 0, "end": 400 },
                "attribute_lists": [{
                    "span": { "start": 0, "end": 25 },
                    "attributes": [{
                        "name": "Meta",
                        "span": { "start": 1, "end": 24 },
                        "arguments": [{
                            "expression": { "type_of": { "ty": { "named": { "name": "IAutoNode" } } } }
                        }]
                    }]
                }],
                "modifiers": ["public", "partial"],
                "identifier": { "name": "Provider" },
                "base_list": [
                    { "named": { "name": "Node" } },
                    { "generic": { "name": { "name": "IProvide" }, "arguments": [{ "predefined": "int" }] } }
                ]
            }]
        },
        "symbols": [{ "name": "IProvide", "kind": "interface", "arity": 1 }]
    }"#;

    fn config() -> Arc<AutoInjectConfig> {
        Arc::new(AutoInjectConfig::default())
    }

    #[test]
    fn applies_keyed_fixes_from_every_provider() {
        let input = SourceFile::parse(PROVIDER).expect("valid input");
        assert_eq!(analyze(&input, &input.symbols(), &config()).len(), 2);

        let fixed = apply_key(&input, "AutoInjectProvideFix_CreateNew_Setup", &config());
        let root = fixed.syntax_root(&CancellationToken::new()).unwrap().unwrap();
        insta::assert_snapshot!(print_unit(&root).trim_end(), @r"
        [Meta(typeof(IAutoNode))]
        public partial class Provider : Node, IProvide<int>
        {
            public void Setup()
            {
                this.Provide();
            }
        }
        ");
    }

    #[test]
    fn unknown_key_leaves_tree_unchanged() {
        let input = SourceFile::parse(PROVIDER).expect("valid input");
        let fixed = apply_key(&input, "NoSuchFix", &config());
        let root = fixed.syntax_root(&CancellationToken::new()).unwrap().unwrap();
        assert_eq!(Some(&*root), input.root.as_ref());
    }
}
