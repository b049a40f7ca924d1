use crate::CLAP_STYLING;
use clap::arg;
use url::Url;
use wikistats_core::error::CoreError;
use wikistats_core::pause::{DEFAULT_PAUSE, PauseSpec};

fn parse_pause(raw: &str) -> Result<PauseSpec, String> {
    raw.parse::<PauseSpec>().map_err(|e: CoreError| e.to_string())
}

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("wikistats")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("wikistats")
        .about(
            "Checks that a wiki page is not a disambiguation page, saves its external links \
            and ranks the pages sharing the most categories with it.",
        )
        .styles(CLAP_STYLING)
        .arg(
            arg!(<PAGE>)
                .required(true)
                .help("Name of the target page as it appears in its URL, e.g. Python_(programming_language)"),
        )
        .arg(
            arg!(-p --"pause" <PAUSE>)
                .required(false)
                .help(
                    "Pause after every candidate request: 500ms, 2s, a bare number of \
                    milliseconds, a range such as 1s-3s, or gauss:<mean>/<sigma>",
                )
                .value_parser(parse_pause)
                .default_value(DEFAULT_PAUSE),
        )
        .arg(
            arg!(-l --"lang" <LANG>)
                .required(false)
                .help("Wiki language code (en, ru, de, es, fr, pt, nl)")
                .default_value("en"),
        )
        .arg(
            arg!(--"links-file" <PATH>)
                .required(false)
                .visible_alias("links_file")
                .help("File receiving the external links of the page")
                .default_value("links.txt"),
        )
        .arg(
            arg!(--"nearest-file" <PATH>)
                .required(false)
                .visible_alias("nearest_file")
                .help("File receiving the ranked category neighbors")
                .default_value("nearest.txt"),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Format of the neighbors file: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            arg!(--"origin" <URL>)
                .required(false)
                .help("Talk to this wiki instead of https://<lang>.wikipedia.org")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(--"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("10"),
        )
        .arg(arg!(-q --"quiet" "Suppress banner and progress output").required(false))
        .arg(arg!(-v --"verbose" "Log debug output to stderr").required(false))
}
