//! Command-line interface for one-shot masking
//!
//! Supports:
//! - Applying a mask with full control over caret and gravity
//! - Masking / unmasking a whole string
//! - Inspecting a format (placeholder, lengths, validity)
//! - Picking the best of several formats for a text

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::affinity::{select_best_mask, AffinityCalculationStrategy};
use crate::cache::MaskCache;
use crate::config::MaskConfig;
use crate::mask::{self, compile_mask};
use crate::model::{CaretGravity, CaretString, MaskResult, Notation};

/// Format text with input masks
#[derive(Parser, Debug)]
#[command(name = "inputmask", version, about = "Format text with input masks")]
pub struct CliArgs {
    /// Config file (defaults to ~/.config/inputmask/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Apply a mask and print the full result as JSON
    Apply {
        format: String,
        text: String,

        /// Caret position in characters (defaults to the end of the text)
        #[arg(long, value_name = "N")]
        caret: Option<usize>,

        /// Treat the text as the result of a deletion (backward gravity)
        #[arg(long)]
        delete: bool,

        /// Append literals after the text (insertion only)
        #[arg(long)]
        autocomplete: bool,

        /// Remove literals before the caret (deletion only)
        #[arg(long)]
        autoskip: bool,

        /// Read the text right to left
        #[arg(long)]
        rtl: bool,

        /// Custom notation, `X=charset` or `X?=charset` for an optional one
        #[arg(long = "notation", value_name = "SPEC", value_parser = parse_notation)]
        notations: Vec<Notation>,
    },

    /// Print the formatted text
    Mask {
        format: String,
        text: String,

        #[arg(long)]
        autocomplete: bool,
    },

    /// Print the extracted value
    Unmask {
        format: String,
        text: String,

        #[arg(long)]
        autocomplete: bool,
    },

    /// Print the placeholder and the length bounds of a format
    Placeholder {
        format: String,

        #[arg(long = "notation", value_name = "SPEC", value_parser = parse_notation)]
        notations: Vec<Notation>,
    },

    /// Check whether a format compiles
    Check {
        format: String,

        #[arg(long = "notation", value_name = "SPEC", value_parser = parse_notation)]
        notations: Vec<Notation>,
    },

    /// Pick the best mask for a text and apply it
    Pick {
        text: String,

        /// Primary format (defaults to `format` from the config file)
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,

        /// Affine format; repeatable (defaults to the config file's list)
        #[arg(long = "affine", value_name = "FORMAT")]
        affine_formats: Vec<String>,

        #[arg(long, value_name = "STRATEGY")]
        strategy: Option<AffinityCalculationStrategy>,

        #[arg(long = "notation", value_name = "SPEC", value_parser = parse_notation)]
        notations: Vec<Notation>,
    },
}

/// Parse `X=charset` (mandatory) or `X?=charset` (optional).
pub fn parse_notation(spec: &str) -> Result<Notation, String> {
    let (symbol, character_set) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected X=charset, got '{}'", spec))?;

    let (symbol, is_optional) = match symbol.strip_suffix('?') {
        Some(symbol) => (symbol, true),
        None => (symbol, false),
    };

    let mut chars = symbol.chars();
    let (Some(character), None) = (chars.next(), chars.next()) else {
        return Err(format!("notation symbol must be one character, got '{}'", symbol));
    };
    if character_set.is_empty() {
        return Err(format!("notation '{}' has an empty character set", character));
    }

    Ok(Notation::new(character, character_set, is_optional))
}

/// Text to print and whether the command succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub success: bool,
}

impl CommandOutput {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }
}

#[derive(Serialize)]
struct PickOutput<'a> {
    format: &'a str,
    result: &'a MaskResult,
}

fn notations_or_config(notations: Vec<Notation>, config: &MaskConfig) -> Vec<Notation> {
    if notations.is_empty() {
        config.options.custom_notations.clone()
    } else {
        notations
    }
}

/// Run one command. Notations default to the config file's when none are given.
pub fn execute(command: Command, config: &MaskConfig) -> Result<CommandOutput> {
    match command {
        Command::Apply {
            format,
            text,
            caret,
            delete,
            autocomplete,
            autoskip,
            rtl,
            notations,
        } => {
            let notations = notations_or_config(notations, config);
            let mask = compile_mask(&format, &notations, rtl)?;
            let caret_gravity = if delete {
                CaretGravity::Backward { autoskip }
            } else {
                CaretGravity::Forward { autocomplete }
            };
            let caret_position = caret.unwrap_or_else(|| text.chars().count());
            let result = mask.apply(&CaretString::new(text, caret_position, caret_gravity));
            Ok(CommandOutput::ok(serde_json::to_string_pretty(&result)?))
        }

        Command::Mask {
            format,
            text,
            autocomplete,
        } => Ok(CommandOutput::ok(mask::mask(&format, &text, autocomplete)?)),

        Command::Unmask {
            format,
            text,
            autocomplete,
        } => Ok(CommandOutput::ok(mask::unmask(&format, &text, autocomplete)?)),

        Command::Placeholder { format, notations } => {
            let notations = notations_or_config(notations, config);
            let mask = compile_mask(&format, &notations, config.options.right_to_left)?;
            let lines = [
                format!("placeholder: {}", mask.placeholder()),
                format!("acceptable_text_length: {}", mask.acceptable_text_length()),
                format!("total_text_length: {}", mask.total_text_length()),
                format!("acceptable_value_length: {}", mask.acceptable_value_length()),
                format!("total_value_length: {}", mask.total_value_length()),
            ];
            Ok(CommandOutput::ok(lines.join("\n")))
        }

        Command::Check { format, notations } => {
            let notations = notations_or_config(notations, config);
            Ok(match compile_mask(&format, &notations, false) {
                Ok(_) => CommandOutput::ok("valid"),
                Err(e) => CommandOutput {
                    text: format!("invalid: {}", e),
                    success: false,
                },
            })
        }

        Command::Pick {
            text,
            format,
            affine_formats,
            strategy,
            notations,
        } => {
            let Some(primary_format) = format.or_else(|| config.format.clone()) else {
                bail!("no primary format: pass --format or set `format` in the config file");
            };
            let affine_formats = if affine_formats.is_empty() {
                config.options.affine_formats.clone()
            } else {
                affine_formats
            };
            let notations = notations_or_config(notations, config);
            let strategy = strategy.unwrap_or(config.options.affinity_calculation_strategy);

            let text = CaretString::at_end(
                text,
                CaretGravity::Forward {
                    autocomplete: config.options.autocomplete,
                },
            );
            let cache = MaskCache::new();
            let mask = select_best_mask(
                &cache,
                &primary_format,
                &affine_formats,
                &notations,
                strategy,
                config.options.right_to_left,
                &text,
            )?;
            let result = mask.apply(&text);
            let output = PickOutput {
                format: mask.format(),
                result: &result,
            };
            Ok(CommandOutput::ok(serde_json::to_string_pretty(&output)?))
        }
    }
}
