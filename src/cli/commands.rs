// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Command handlers
//!
//! Each handler opens the stores it needs from the resolved [`Config`] and
//! writes human-readable output to `out`.

use std::io::Write;

use serde_json::{Map, Value};

use super::args::{
    Commands, HistoryArgs, HistoryCommands, SessionArgs, SessionCommands, SettingsArgs,
    SettingsCommands, TemplateArgs, TemplateCommands,
};
use crate::config::Config;
use crate::error::{CodegenError, Result};
use crate::history::{HistoryRenderer, HistoryStore, TextRenderer};
use crate::settings::{GenerationSettings, GenerationSettingsStore};
use crate::storage::FileStorage;
use crate::templates::{self, TemplateSelection};
use crate::validation;

/// Dispatch a parsed command
pub fn run<W: Write>(command: Commands, config: &Config, out: &mut W) -> Result<()> {
    match command {
        Commands::History(args) => run_history_command(args, config, out),
        Commands::Settings(args) => run_settings_command(args, config, out),
        Commands::Template(args) => run_template_command(args, config, out),
        Commands::Session(args) => run_session_command(args, config, out),
    }
}

/// Open the history the way the generator does on start-up: a template
/// picked in the catalogue is consumed and recorded first.
pub fn open_generator(config: &Config) -> HistoryStore<FileStorage> {
    let mut session = config.session_storage();
    let pending = templates::take_selection(&mut session);
    let mut store = HistoryStore::open(session);
    if let Some(selection) = pending {
        tracing::debug!("Recording use of template '{}'", selection.name);
        store.add_template_usage(&selection);
    }
    store
}

pub fn run_history_command<W: Write>(
    args: HistoryArgs,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let mut store = open_generator(config);

    match args.command {
        HistoryCommands::List => {
            TextRenderer::new(&mut *out).render(store.entries());
        }

        HistoryCommands::Add {
            requirement,
            language,
            code,
            extra,
        } => {
            validation::validate_requirement(&requirement)?;
            let extra: Map<String, Value> = extra
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect();
            let id = store.add(requirement, code, language, extra);
            writeln!(out, "Added history entry {}", id)?;
        }

        HistoryCommands::Show { id } => {
            let form = store.reload(id).ok_or(CodegenError::EntryNotFound(id))?;
            let entry = store.find(id).ok_or(CodegenError::EntryNotFound(id))?;

            writeln!(out, "\nEntry: {}", entry.id)?;
            writeln!(
                out,
                "Created: {}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S")
            )?;
            writeln!(out, "Language: {}", form.language)?;
            for (key, value) in entry.extra() {
                match value {
                    Value::Null => {}
                    Value::String(s) => writeln!(out, "{}: {}", key, s)?,
                    other => writeln!(out, "{}: {}", key, other)?,
                }
            }
            writeln!(out, "\nRequirement ({} chars):", form.char_count)?;
            writeln!(out, "{}", form.requirement)?;
            if !form.code.is_empty() {
                writeln!(out, "\nCode:\n{}", form.code)?;
            }
            writeln!(out)?;
        }

        HistoryCommands::Delete { id } => {
            if store.remove(id) {
                writeln!(out, "Removed history entry {}", id)?;
            } else {
                return Err(CodegenError::EntryNotFound(id));
            }
        }

        HistoryCommands::Clear => {
            store.clear();
            writeln!(out, "History cleared")?;
        }
    }

    Ok(())
}

pub fn run_settings_command<W: Write>(
    args: SettingsArgs,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    let mut store = GenerationSettingsStore::new(config.local_storage());

    match args.command {
        SettingsCommands::Show => {
            print_settings(&store.load(), out)?;
        }
        SettingsCommands::Set { key, value } => {
            let mut settings = store.load();
            settings.set(&key, &value)?;
            store.save(&settings);
            writeln!(out, "Set {} = {}", key, value)?;
        }
        SettingsCommands::Reset => {
            let settings = store.reset();
            writeln!(out, "Settings reset to defaults")?;
            print_settings(&settings, out)?;
        }
    }

    Ok(())
}

fn print_settings<W: Write>(settings: &GenerationSettings, out: &mut W) -> Result<()> {
    writeln!(out, "language     = {}", settings.language)?;
    writeln!(out, "framework    = {}", settings.framework)?;
    writeln!(out, "theme        = {}", settings.theme)?;
    writeln!(out, "codeStyle    = {}", settings.code_style)?;
    writeln!(out, "addComments  = {}", settings.add_comments)?;
    writeln!(out, "generateDocs = {}", settings.generate_docs)?;
    writeln!(out, "autoFormat   = {}", settings.auto_format)?;
    writeln!(out, "checkErrors  = {}", settings.check_errors)?;
    Ok(())
}

pub fn run_template_command<W: Write>(
    args: TemplateArgs,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    match args.command {
        TemplateCommands::Use {
            name,
            language,
            category,
            framework,
            pattern,
            description,
        } => {
            let mut selection = TemplateSelection::new(name, language);
            if let Some(category) = category {
                selection = selection.with_category(category);
            }
            if let Some(framework) = framework {
                selection = selection.with_framework(framework);
            }
            if let Some(pattern) = pattern {
                selection = selection.with_pattern(pattern);
            }
            if let Some(description) = description {
                selection = selection.with_description(description);
            }

            templates::stash_selection(&mut config.session_storage(), &selection);
            let store = open_generator(config);
            let id = store
                .entries()
                .first()
                .filter(|entry| entry.template() == Some(selection.name.as_str()))
                .map(|entry| entry.id)
                .ok_or_else(|| {
                    CodegenError::InvalidInput(
                        "Template selection could not be handed over".to_string(),
                    )
                })?;
            writeln!(out, "Using template '{}' (history entry {})", selection.name, id)?;
            writeln!(out, "Prompt: {}", selection.requirement())?;
        }
    }

    Ok(())
}

pub fn run_session_command<W: Write>(
    args: SessionArgs,
    config: &Config,
    out: &mut W,
) -> Result<()> {
    match args.command {
        SessionCommands::End => {
            config.end_session()?;
            writeln!(out, "Session ended")?;
        }
    }
    Ok(())
}
