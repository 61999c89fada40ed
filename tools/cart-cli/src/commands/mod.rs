//! CLI command implementations.

pub mod clear;
pub mod edit;
pub mod lookup;
pub mod show;

use clap::Args;
use rust_decimal::Decimal;

/// Variant selectors shared by every line-addressing command.
#[derive(Args, Debug, Clone, Default)]
pub struct VariantArgs {
    /// Selected size.
    #[arg(long)]
    pub size: Option<String>,

    /// Selected color.
    #[arg(long)]
    pub color: Option<String>,
}

impl VariantArgs {
    /// Size as a borrowed option.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Color as a borrowed option.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Product ID.
    pub id: i64,

    /// Product title.
    #[arg(short, long)]
    pub title: String,

    /// Unit price (e.g. 19.99).
    #[arg(short, long)]
    pub price: Decimal,

    /// Product image URL.
    #[arg(long, default_value = "")]
    pub image: String,

    /// Discount percentage (0-100).
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub discount: Option<u8>,

    /// How many to add.
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub quantity: i64,

    #[command(flatten)]
    pub variant: VariantArgs,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Product ID.
    pub id: i64,

    /// Remove every variant of the product.
    #[arg(long, conflicts_with_all = ["size", "color"])]
    pub all_variants: bool,

    #[command(flatten)]
    pub variant: VariantArgs,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Product ID.
    pub id: i64,

    /// New quantity; zero or less removes the line.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,

    #[command(flatten)]
    pub variant: VariantArgs,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the quantity and contains commands.
#[derive(Args)]
pub struct LookupArgs {
    /// Product ID.
    pub id: i64,

    #[command(flatten)]
    pub variant: VariantArgs,
}
