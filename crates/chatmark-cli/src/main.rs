mod render;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use chatmark_config::Config;
use chatmark_engine::{
    MessageStream, Parser, RecoveryChain, RecoveryRule, extract_query_trigger,
};
use clap::{Parser as ClapParser, Subcommand};

use crate::render::{Format, print_blocks, print_chunk};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(ClapParser, Debug)]
#[command(
    name = "chatmark",
    version,
    about = "Parse the inline tag markup of data-analysis chat replies into content blocks"
)]
struct Cli {
    /// Config file to use instead of ~/.config/chatmark/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output mode. Defaults to "pretty" when stdout is a TTY, "json"
    /// otherwise.
    #[arg(long, global = true, value_enum)]
    output: Option<Format>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse a complete message and print its blocks.
    Parse {
        /// Message file, or `-` for stdin.
        #[arg(default_value = "-")]
        file: String,
    },

    /// Feed a message through the parser chunk by chunk, as a streaming
    /// client would, printing the blocks after every chunk.
    Replay {
        /// Transcript file, or `-` for stdin. Relative paths are looked up
        /// in `replay.transcripts_dir` when configured.
        #[arg(default_value = "-")]
        file: String,
        /// Characters per chunk (overrides `replay.chunk_chars`).
        #[arg(long)]
        chunk_chars: Option<usize>,
    },

    /// Print the query the host should run automatically, if any. Exits 1
    /// when the message has none.
    Query {
        #[arg(default_value = "-")]
        file: String,
    },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output);
    let config = load_config(cli.config.as_deref())?;
    let parser = Parser::new(recovery_chain(&config.parser.disabled_rules));

    match cli.cmd {
        Cmd::Parse { file } => cmd_parse(&parser, &file, format)?,
        Cmd::Replay { file, chunk_chars } => {
            let chunk_chars = chunk_chars.unwrap_or(config.replay.chunk_chars);
            let input = if file == "-" {
                read_input(&file)?
            } else {
                let path = config.replay.resolve(Path::new(&file));
                read_input(&path.to_string_lossy())?
            };
            cmd_replay(parser, &input, chunk_chars, format)?;
        }
        Cmd::Query { file } => cmd_query(&file)?,
    }

    Ok(())
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_parse(parser: &Parser, file: &str, format: Format) -> Result<()> {
    let input = read_input(file)?;
    let blocks = parser.parse(&input);
    print_blocks(&blocks, extract_query_trigger(&input).as_deref(), format)
}

fn cmd_replay(parser: Parser, input: &str, chunk_chars: usize, format: Format) -> Result<()> {
    if chunk_chars == 0 {
        bail!("chunk size must be at least one character");
    }

    let chars: Vec<char> = input.chars().collect();
    let mut stream = MessageStream::with_parser(parser);
    for (index, piece) in chars.chunks(chunk_chars).enumerate() {
        let chunk: String = piece.iter().collect();
        stream.push_chunk(&chunk);
        print_chunk(index, &chunk, &stream.keyed_blocks(), format)?;
    }

    let finished = stream.finish();
    print_blocks(&finished.blocks, finished.query_trigger.as_deref(), format)
}

fn cmd_query(file: &str) -> Result<()> {
    let input = read_input(file)?;
    match extract_query_trigger(&input) {
        Some(query) => println!("{query}"),
        None => process::exit(1),
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read message from stdin")?;
        return Ok(input);
    }
    fs::read_to_string(file).with_context(|| format!("failed to read message file '{file}'"))
}

/// An explicit `--config` must exist; the default location is optional.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::load()
            .with_context(|| {
                format!(
                    "failed to load config file {}",
                    Config::config_path().display()
                )
            })?
            .unwrap_or_default());
    };
    match Config::load_from_path(path)? {
        Some(config) => Ok(config),
        None => bail!("config file '{}' not found", path.display()),
    }
}

/// Full recovery chain minus the configured rules. Unknown names are
/// reported and skipped.
fn recovery_chain(disabled: &[String]) -> RecoveryChain {
    disabled
        .iter()
        .fold(RecoveryChain::default(), |chain, name| {
            match RecoveryRule::from_name(name) {
                Some(RecoveryRule::Escape) => {
                    log::warn!("recovery rule `escape` cannot be disabled");
                    chain
                }
                Some(rule) => chain.without(rule),
                None => {
                    log::warn!("unknown recovery rule `{name}` in config, ignored");
                    chain
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_rules_are_removed_in_order() {
        let chain = recovery_chain(&["bare-list".into(), "stub".into()]);
        assert_eq!(
            chain.rules(),
            [
                RecoveryRule::UnterminatedList,
                RecoveryRule::UnterminatedSwitch,
                RecoveryRule::MixedSwitch,
                RecoveryRule::BareDirective,
                RecoveryRule::Escape,
            ]
        );
    }

    #[test]
    fn unknown_and_escape_are_ignored() {
        let chain = recovery_chain(&["escape".into(), "nope".into()]);
        assert_eq!(chain, RecoveryChain::default());
    }
}
