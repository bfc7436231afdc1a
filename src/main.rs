use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use cview_align::config::Config;
use cview_align::menu::actions::run_script;
use cview_align::state::Session;
use cview_align::utils::logger;

fn main() -> ExitCode {
    let (config, config_msg) = Config::load();
    if logger::init(&config.log_level).is_err() {
        eprintln!("Logger already initialised");
    }
    log::debug!("{}", config_msg);

    let mut session = Session::with_config(&config);

    // Script from the first argument, or stdin
    let result = match std::env::args().nth(1) {
        Some(path) => match File::open(&path) {
            Ok(file) => run_script(&mut session, BufReader::new(file)),
            Err(e) => {
                log::error!("Cannot open script {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => run_script(&mut session, io::stdin().lock()),
    };

    match result {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            log::warn!("{} command(s) failed", failures);
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("Failed to read script: {}", e);
            ExitCode::FAILURE
        }
    }
}
