use std::io::{self, Write};
use std::process::ExitCode;

use plate_ocr::cli::parse_cli;
use plate_ocr::output::write_report;
use plate_ocr::{RunResult, engine_for, resolve_settings, run};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("plate-ocr: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> RunResult<()> {
    let (cli, sources) = parse_cli();
    let settings = resolve_settings(&cli, &sources)?;
    if let Some(path) = settings.config_path.as_ref() {
        log::info!("using config {}", path.display());
    }

    let engine = engine_for(&settings)?;
    let report = run(&settings, engine.as_ref())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, &report, settings.format, settings.show_detections)?;
    out.flush()?;
    Ok(())
}
