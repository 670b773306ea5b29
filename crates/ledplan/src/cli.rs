use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ledplan")]
#[command(author, version, about)]
#[command(long_about = "Controller sizing and cable routing for LED video walls.\n\n\
    Pick a controller, split the wall into data hubs and power runs, and route\n\
    every cable, including redundant backup cabling.\n\n\
    Examples:\n  \
    ledplan plan --product p25.yaml -c 8 -r 4            Plan an 8x4 wall\n  \
    ledplan plan --width 200 --height 200 --pitch 2.5 -c 5 -r 1 --redundancy\n  \
    ledplan sweep --product p25.yaml --max-columns 20    Size every grid up to 20x10\n  \
    ledplan controllers                                 List the controller catalog")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Plan controller, hub groups, power runs and cabling for one wall
    Plan {
        #[command(flatten)]
        product: ProductArgs,

        /// Cabinets per row
        #[arg(short, long)]
        columns: u32,

        /// Cabinet rows
        #[arg(short, long)]
        rows: u32,

        /// Mirror every data-hub port with a backup port and cable
        #[arg(long)]
        redundancy: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the controller selected for every grid size up to a limit
    Sweep {
        #[command(flatten)]
        product: ProductArgs,

        /// Largest number of columns to evaluate
        #[arg(long, default_value = "10")]
        max_columns: u32,

        /// Largest number of rows to evaluate
        #[arg(long, default_value = "10")]
        max_rows: u32,

        /// Size for redundant operation
        #[arg(long)]
        redundancy: bool,
    },

    /// List the controllers available for selection
    Controllers {
        /// Only show controllers that support redundancy
        #[arg(long)]
        redundant: bool,
    },

    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

/// Product geometry, either from a YAML descriptor or given inline.
#[derive(Args, Clone)]
pub struct ProductArgs {
    /// Product descriptor (YAML)
    #[arg(short, long, conflicts_with_all = ["width", "height", "pitch"])]
    pub product: Option<PathBuf>,

    /// Cabinet resolution width in pixels
    #[arg(long, requires_all = ["height", "pitch"])]
    pub width: Option<u32>,

    /// Cabinet resolution height in pixels
    #[arg(long, requires_all = ["width", "pitch"])]
    pub height: Option<u32>,

    /// Pixel pitch in millimetres
    #[arg(long, requires_all = ["width", "height"])]
    pub pitch: Option<f64>,

    /// Product name for inline products
    #[arg(long, default_value = "custom")]
    pub name: String,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. planner.pixel_limit_per_port, planner.layout.corridor_count)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Plan {
                product,
                columns,
                rows,
                redundancy,
                format,
                output,
            }) => crate::commands::plan::run(&product, columns, rows, redundancy, format, output),
            Some(Commands::Sweep {
                product,
                max_columns,
                max_rows,
                redundancy,
            }) => crate::commands::sweep::run(&product, max_columns, max_rows, redundancy),
            Some(Commands::Controllers { redundant }) => {
                crate::commands::controllers::run(redundant)
            }
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Version) => {
                println!("ledplan {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
            None => {
                use clap::CommandFactory;
                let mut cmd = Self::command();
                cmd.print_help()?;
                println!();
                Ok(())
            }
        }
    }
}
