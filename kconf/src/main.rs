mod render;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use kconfig::{LogSink, Scope, Sink, Snapshot, Variables};
use std::path::PathBuf;

use render::Printer;

#[derive(Parser)]
#[command(name = "kconf", version, about = "Kconfig structure tracer")]
struct Cli {
    /// disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TreeArgs {
    /// directory holding the top-level `Kconfig`
    #[arg(short, long, default_value = ".")]
    base: PathBuf,

    /// sets both ARCH and SRCARCH
    #[arg(long)]
    arch: Option<String>,

    /// extra `$(NAME)` values, as NAME=VALUE
    #[arg(short = 'D', long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print how every line of the tree was classified
    Trace(TreeArgs),
    /// Print the scope outline
    Tree(TreeArgs),
    /// List declared config symbols
    Symbols(TreeArgs),
    /// Print the entries two `.config` files agree on
    Common {
        first: PathBuf,
        second: PathBuf,
        /// only keep symbols declared under this Kconfig tree
        #[arg(long)]
        declared_in: Option<PathBuf>,
    },
}

impl TreeArgs {
    fn variables(&self) -> Variables {
        let mut vars = Variables::kernel_defaults();
        if let Some(arch) = &self.arch {
            vars = vars.with("ARCH", arch).with("SRCARCH", arch);
        }
        for (name, value) in &self.vars {
            vars = vars.with(name, value);
        }
        vars
    }

    fn parse<S: Sink>(&self, sink: &mut S) -> anyhow::Result<Scope> {
        let parser = kconfig::Parser::new(&self.base).variables(self.variables());
        parser.parse(sink).with_context(|| {
            format!(
                "failed to parse {}",
                parser.base().join(kconfig::parser::ENTRY_FILE).display()
            )
        })
    }
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{s}`"))?;
    if name.is_empty() {
        return Err(format!("missing variable name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Cli::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    match args.command {
        Commands::Trace(tree) => {
            tree.parse(&mut Printer::stdout())?;
        }
        Commands::Tree(tree) => {
            let root = tree.parse(&mut LogSink)?;
            print!("{root}");
        }
        Commands::Symbols(tree) => {
            let root = tree.parse(&mut LogSink)?;
            for symbol in root.symbols() {
                println!("{symbol}");
            }
        }
        Commands::Common {
            first,
            second,
            declared_in,
        } => {
            let a = Snapshot::from_path(&first)
                .with_context(|| format!("couldn't read {}", first.display()))?;
            let b = Snapshot::from_path(&second)
                .with_context(|| format!("couldn't read {}", second.display()))?;
            let mut common = &a & &b;
            if let Some(base) = declared_in {
                let root = TreeArgs {
                    base,
                    arch: None,
                    vars: Vec::new(),
                }
                .parse(&mut LogSink)?;
                common = common.retain_symbols(&root);
            }
            if common.is_empty() {
                bail!("{} and {} share no entries", first.display(), second.display());
            }
            println!("{common}");
        }
    }
    Ok(())
}
