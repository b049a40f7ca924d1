use tracing::Level;
use wikistats::{command_argument_builder, handle_run};
use wikistats_core::print_banner;

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();

    // Logs go to stderr so they never mix with the result summary
    let level = if matches.get_flag("verbose") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if !matches.get_flag("quiet") {
        print_banner();
    }

    let code = handle_run(&matches).await;
    std::process::exit(code);
}
