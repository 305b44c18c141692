// SPDX-License-Identifier: MPL-2.0
use iced_peek::config::{Config, Flags, USAGE};
use iced_peek::{app, logging};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let flags = match Flags::parse(pico_args::Arguments::from_env()) {
        Ok(flags) => flags,
        Err(err) => {
            eprintln!("{err}\n\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if flags.help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    logging::init();

    let mut config = Config::from_env();
    config.apply(&flags);
    let start_path = flags.start_path.unwrap_or_else(|| PathBuf::from("."));

    match app::run(config, start_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "viewer exited with an error");
            ExitCode::FAILURE
        }
    }
}
