// SPDX-License-Identifier: MPL-2.0
use gallery_lens::app::{self, paths, Flags};
use std::io;
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
Gallery Lens

USAGE:
  gallery_lens [OPTIONS]

OPTIONS:
  -h, --help               Print help information
      --lang <id>          Interface language (e.g. en-US, fr)
      --server <url>       Gallery server address for this session
      --config-dir <path>  Directory holding settings.toml
";

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gallery_lens=info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(&mut args) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!(?remaining, "ignoring unexpected arguments");
    }

    paths::init_cli_overrides(flags.config_dir.clone());
    app::run(flags)
}

fn parse_flags(args: &mut pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    Ok(Flags {
        lang: args.opt_value_from_str("--lang")?,
        server: args.opt_value_from_str("--server")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    })
}
