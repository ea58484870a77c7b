//! Command-line interface for thongna
//!
//! Usage:
//!   thongna tokenize -d words_th.txt "ค่าจ้างแรงงาน"
//!   echo "ค่าจ้างแรงงาน" | thongna tokenize -d words_th.txt --json
//!   thongna normalize "เเปลก"
//!   thongna reverse "สวัสดี"

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use thongna::{load_dict, normalize, reverse_text, Newmm, NewmmConfig, SimpleTokenizer, Token};

/// A fast dictionary-based Thai word segmenter
#[derive(Debug, Parser)]
#[command(name = "thongna", version, about)]
struct Cli {
    /// Increase verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split text into words
    Tokenize(TokenizeArgs),
    /// Normalize Thai text
    Normalize(NormalizeArgs),
    /// Reverse text by code points
    Reverse(TextArg),
}

/// Arguments for the tokenize command
#[derive(Debug, Args)]
struct TokenizeArgs {
    /// Dictionary file, one word per line
    #[arg(short, long, value_name = "FILE")]
    dict: Option<PathBuf>,

    /// Name to register the dictionary under
    #[arg(short, long, default_value = "default")]
    name: String,

    /// Split into clusters only (no dictionary)
    #[arg(long)]
    simple: bool,

    /// Bound the work on highly ambiguous text
    #[arg(long)]
    safe: bool,

    /// Segment long text on a worker pool
    #[arg(short, long)]
    parallel: bool,

    /// Tuning file (JSON)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Text to tokenize (default: stdin)
    text: Option<String>,
}

/// Arguments for the normalize command
#[derive(Debug, Args)]
struct NormalizeArgs {
    /// Leave numbers attached to surrounding text
    #[arg(long)]
    no_whitespace_number: bool,

    /// Text to normalize (default: stdin)
    text: Option<String>,
}

#[derive(Debug, Args)]
struct TextArg {
    /// Input text (default: stdin)
    text: Option<String>,
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

/// The text argument, or all of stdin
fn read_input(text: Option<String>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t);
    }
    let mut bytes = Vec::new();
    io::stdin()
        .read_to_end(&mut bytes)
        .context("failed to read stdin")?;
    let text = String::from_utf8(bytes).context("stdin is not valid UTF-8")?;
    Ok(text.trim_end_matches(['\r', '\n']).to_string())
}

fn print_tokens(tokens: &[Token], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tokens)?);
    } else {
        for token in tokens {
            println!("{}\t{}", token.text, token.kind.as_str());
        }
    }
    Ok(())
}

fn run_tokenize(args: TokenizeArgs) -> Result<()> {
    let text = read_input(args.text)?;

    if args.simple {
        return print_tokens(&SimpleTokenizer::tokenize(&text), args.json);
    }

    let Some(path) = args.dict else {
        bail!("a dictionary is required (--dict FILE), or use --simple");
    };
    let (message, ok) = load_dict(&path, &args.name);
    log::info!("{message}");
    if !ok {
        bail!(message);
    }

    let mut newmm = Newmm::from_registry(&args.name)?;
    if let Some(config_path) = args.config {
        let json = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        newmm = newmm.with_config(NewmmConfig::from_json(&json)?);
    }

    let tokens = newmm.tokenize(&text, args.safe, args.parallel)?;
    log::debug!("{} tokens", tokens.len());
    print_tokens(&tokens, args.json)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Tokenize(args) => run_tokenize(args),
        Command::Normalize(args) => {
            let text = read_input(args.text)?;
            println!("{}", normalize(&text, !args.no_whitespace_number));
            Ok(())
        }
        Command::Reverse(args) => {
            let text = read_input(args.text)?;
            println!("{}", reverse_text(&text));
            Ok(())
        }
    }
}
