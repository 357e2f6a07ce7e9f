use clap::{Parser, Subcommand};

use asciify_cli::commands::{build_ops, plan_ops, table_ops};
use asciify_cli::trace_init;

#[derive(Parser)]
#[command(name = "tabletool", about = "ASCII transliteration table build tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build and close a table from a plan
    Build {
        /// Plan TOML file (default: built-in plan)
        plan: Option<String>,
        /// UnicodeData.txt for name, case and numeric properties
        #[arg(long)]
        ucd: Option<String>,
        /// Output file, or - for stdout
        #[arg(short, long, default_value = "-")]
        output: String,
    },
    /// Transliterate text with a finished table
    Apply {
        /// Table file
        table: String,
        /// Text to transliterate
        text: String,
        /// Fail on characters without an entry instead of passing them through
        #[arg(long)]
        strict: bool,
    },
    /// Check that a table file is fully printable ASCII
    Check {
        /// Table file
        table: String,
    },
    /// Export the built-in plan as TOML
    PlanExport,
    /// Validate a custom plan TOML file
    PlanValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    trace_init::init_tracing();

    match cli.command {
        Command::Build { plan, ucd, output } => {
            build_ops::build(plan.as_deref(), ucd.as_deref(), &output)
        }
        Command::Apply {
            table,
            text,
            strict,
        } => table_ops::apply(&table, &text, strict),
        Command::Check { table } => table_ops::check(&table),
        Command::PlanExport => plan_ops::plan_export(),
        Command::PlanValidate { file } => plan_ops::plan_validate(&file),
    }
}
