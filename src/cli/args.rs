// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// codegen - generation history and preferences for the code generator
#[derive(Parser, Debug)]
#[command(name = "codegen")]
#[command(version, about = "Generation history and preferences for the code generator")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to $CODEGEN_HOME or ~/.codegen)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generation history management
    History(HistoryArgs),

    /// Generation settings
    #[command(alias = "config")]
    Settings(SettingsArgs),

    /// Template selection
    Template(TemplateArgs),

    /// Session lifecycle
    Session(SessionArgs),
}

/// Arguments for history management
#[derive(clap::Args, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

/// History subcommands
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List recent generations, newest first
    List,

    /// Record a generation
    Add {
        /// Task description
        requirement: String,

        /// Target language
        #[arg(short, long)]
        language: String,

        /// Generated code
        #[arg(short, long, default_value = "")]
        code: String,

        /// Extra metadata as key=value (repeatable)
        #[arg(short, long = "extra", value_parser = parse_key_value)]
        extra: Vec<(String, String)>,
    },

    /// Show an entry in full, as it would be reloaded into the editor
    Show {
        /// Entry ID
        id: u64,
    },

    /// Delete an entry
    Delete {
        /// Entry ID
        id: u64,
    },

    /// Clear all history
    Clear,
}

/// Arguments for generation settings
#[derive(clap::Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommands,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show current settings
    Show,

    /// Change one setting
    Set {
        /// Setting name (e.g. language, codeStyle, addComments)
        key: String,

        /// New value
        value: String,
    },

    /// Restore defaults
    Reset,
}

/// Arguments for template selection
#[derive(clap::Args, Debug)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub command: TemplateCommands,
}

/// Template subcommands
#[derive(Subcommand, Debug)]
pub enum TemplateCommands {
    /// Pick a template and record it in the history
    Use {
        /// Template name
        name: String,

        /// Target language
        #[arg(short, long)]
        language: String,

        /// Template category
        #[arg(long)]
        category: Option<String>,

        /// Framework
        #[arg(short, long)]
        framework: Option<String>,

        /// Design pattern identifier
        #[arg(short, long)]
        pattern: Option<String>,

        /// Template description
        #[arg(short, long)]
        description: Option<String>,
    },
}

/// Arguments for session lifecycle
#[derive(clap::Args, Debug)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub command: SessionCommands,
}

/// Session subcommands
#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// End the session, discarding session-scoped data
    End,
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
