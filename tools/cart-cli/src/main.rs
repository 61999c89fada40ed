//! Cart CLI - inspect and edit a storefront cart persisted on disk.
//!
//! Commands:
//! - `cart add` - Add a product variant
//! - `cart remove` - Remove a line (or every variant of a product)
//! - `cart update` - Set a line's quantity
//! - `cart clear` - Empty the cart
//! - `cart show` - List lines and totals
//! - `cart quantity` - Print a line's quantity
//! - `cart contains` - Check whether a line exists

mod commands;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use commands::{AddArgs, ClearArgs, LookupArgs, RemoveArgs, UpdateArgs};

/// Cart CLI - Inspect and edit a persisted storefront cart
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory the cart is stored in
    #[arg(long, global = true, default_value = ".cart")]
    data_dir: String,

    /// Session name; each session keeps its own cart
    #[arg(long, global = true)]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a line from the cart
    Remove(RemoveArgs),

    /// Set the quantity of a line
    Update(UpdateArgs),

    /// Remove everything from the cart
    Clear(ClearArgs),

    /// Show lines and totals
    Show,

    /// Print the quantity held for a product variant
    Quantity(LookupArgs),

    /// Check whether a product variant is in the cart
    Contains(LookupArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("CART_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config and open the cart
    let ctx = context::Context::load(
        cli.config.as_deref(),
        &cli.data_dir,
        cli.session,
        output,
    )?;

    let result = match cli.command {
        Commands::Add(args) => commands::edit::add(args, &ctx),
        Commands::Remove(args) => commands::edit::remove(args, &ctx),
        Commands::Update(args) => commands::edit::update(args, &ctx),
        Commands::Clear(args) => commands::clear::run(args, &ctx),
        Commands::Show => commands::show::run(&ctx),
        Commands::Quantity(args) => commands::lookup::quantity(args, &ctx),
        Commands::Contains(args) => commands::lookup::contains(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
