// SPDX-License-Identifier: MPL-2.0
use asset_lens::app::{self, Flags};

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    let data_dir = args.opt_value_from_str("--data-dir").unwrap_or_else(|err| {
        eprintln!("Invalid --data-dir: {err}");
        None
    });
    let config_dir = args.opt_value_from_str("--config-dir").unwrap_or_else(|err| {
        eprintln!("Invalid --config-dir: {err}");
        None
    });

    let flags = Flags {
        directory: args
            .finish()
            .into_iter()
            .next()
            .and_then(|s| s.into_string().ok()),
        data_dir,
        config_dir,
    };

    app::paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());
    app::run(flags)
}
