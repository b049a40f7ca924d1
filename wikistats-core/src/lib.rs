pub mod ambiguity;
pub mod error;
pub mod external;
pub mod pause;
pub mod report;
pub mod run;
pub mod site;

use colored::Colorize;

pub use error::CoreError;
pub use run::{RunOptions, RunOutcome, RunProgressCallback, execute_run};
pub use site::WikiSite;

pub fn print_banner() {
    println!(
        "{} {}",
        "wikistats".bright_cyan().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    println!("{}", "category neighbors for wiki pages".bright_black());
    println!();
}
