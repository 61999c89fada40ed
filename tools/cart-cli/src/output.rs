//! Output formatting for the CLI.

use console::style;
use storefront_cart::{CartLineItem, CartTotals, Currency, Money};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// Print one cart line as a table row.
    pub fn cart_line(&self, line: &CartLineItem, currency: Currency, widths: &[usize]) {
        self.table_row(
            &[
                &line.product_id.to_string(),
                &line.title,
                &variant_label(line),
                &line.quantity.to_string(),
                &line_total_label(line, currency),
            ],
            widths,
        );
    }

    /// Print the cart totals block.
    pub fn totals(&self, totals: &CartTotals) {
        if self.json {
            return;
        }
        println!();
        self.kv("items", &totals.total_items.to_string());
        self.kv("subtotal", &totals.subtotal.display());
        if totals.has_discounts() {
            self.kv(
                "you save",
                &format!(
                    "{} ({}%)",
                    style(totals.discount_amount.display()).green(),
                    totals.savings_percentage().round_dp(1)
                ),
            );
        }
        self.kv("total", &style(totals.total.display()).bold().to_string());
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Size and color of a line, `-` when it has neither.
fn variant_label(line: &CartLineItem) -> String {
    match (&line.selected_size, &line.selected_color) {
        (Some(size), Some(color)) => format!("{} / {}", size, color),
        (Some(size), None) => size.clone(),
        (None, Some(color)) => color.clone(),
        (None, None) => "-".to_string(),
    }
}

fn line_total_label(line: &CartLineItem, currency: Currency) -> String {
    match line.line_total() {
        Some(total) => Money::new(total, currency).display(),
        None => "overflow".to_string(),
    }
}
