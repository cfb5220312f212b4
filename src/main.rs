mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use remedian::domain::Severity;
use remedian::output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "remedian",
    about = "Pattern-based vulnerability scanner and auto-fixer",
    version
)]
enum Cli {
    Scan(ScanArgs),
    Stdin(StdinArgs),
    Fix(FixArgs),
    Rules(RulesArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser)]
struct ScanArgs {
    #[arg(default_value = ".")]
    path: PathBuf,

    #[arg(
        long,
        short,
        default_value = "terminal",
        help = "Output format: terminal, json, markdown"
    )]
    format: OutputFormat,

    #[arg(long, help = "Only report findings at or above this severity")]
    min_severity: Option<Severity>,

    #[arg(long, help = "Disable colored output")]
    no_color: bool,
}

#[derive(Parser)]
struct StdinArgs {
    #[arg(
        long,
        short,
        default_value = "terminal",
        help = "Output format: terminal, json, markdown"
    )]
    format: OutputFormat,

    #[arg(long, help = "Only report findings at or above this severity")]
    min_severity: Option<Severity>,

    #[arg(long, help = "Disable colored output")]
    no_color: bool,
}

#[derive(Parser)]
struct FixArgs {
    path: PathBuf,

    #[arg(
        long,
        help = "Only fix the given categories (slug or label, comma separated)"
    )]
    only: Vec<String>,

    #[arg(long, help = "Rewrite the file in place instead of printing")]
    write: bool,

    #[arg(long, help = "Print only the fix summary, not the fixed text")]
    summary_only: bool,

    #[arg(
        long,
        short,
        default_value = "terminal",
        help = "Summary format: terminal, json, markdown"
    )]
    format: OutputFormat,

    #[arg(long, help = "Disable colored output")]
    no_color: bool,
}

#[derive(Parser)]
struct RulesArgs {
    #[command(subcommand)]
    command: RulesCommand,
}

#[derive(Parser)]
enum RulesCommand {
    List,
}

#[derive(Parser)]
struct CompletionsArgs {
    #[arg(help = "Target shell: bash, zsh, fish, elvish, powershell")]
    shell: Shell,
}

fn main() -> Result<()> {
    match Cli::parse() {
        Cli::Scan(args) => {
            if args.no_color {
                colored::control::set_override(false);
            }
            cli::run_scan(&args.path, args.format, args.min_severity)
        }
        Cli::Stdin(args) => {
            if args.no_color {
                colored::control::set_override(false);
            }
            cli::run_stdin(args.format, args.min_severity)
        }
        Cli::Fix(args) => {
            if args.no_color {
                colored::control::set_override(false);
            }
            cli::run_fix(
                &args.path,
                &args.only,
                args.write,
                args.summary_only,
                args.format,
            )
        }
        Cli::Rules(args) => match args.command {
            RulesCommand::List => cli::run_rules_list(),
        },
        Cli::Completions(args) => {
            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "remedian", &mut std::io::stdout());
            Ok(())
        }
    }
}
