//! Dialects listing command

use colored::Colorize;
use tablesmith_types::Dialect;

/// Print the built-in dialects with a one-line summary each
pub fn run() {
    println!("{}", "Available dialects:".bright_cyan());
    println!();
    for dialect in Dialect::ALL {
        println!("  {:<10} {}", dialect.as_str().bright_blue(), dialect.summary());
    }
}
