//! Blackboard replay: draws a JSON script onto a canvas and saves it.
//!
//! ```text
//! bb-replay <script.json> <output.png>
//! ```
//!
//! The output format follows the file extension. Set `RUST_LOG=debug` to
//! trace every step.

mod script;

use bb_core::{CanvasError, Result};
use std::path::PathBuf;
use std::process::ExitCode;

fn run(script_path: PathBuf, output: PathBuf) -> Result<()> {
    let text = std::fs::read_to_string(&script_path)
        .map_err(|e| CanvasError::io(&script_path, e))?;
    let script = script::Script::from_json(&text)?;
    let shell = script::replay(&script)?;
    shell.save(&output, None)?;
    let canvas = shell.canvas();
    log::info!(
        "replayed {} steps onto {}x{} canvas",
        script.steps.len(),
        canvas.width(),
        canvas.height()
    );
    Ok(())
}

fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let mut args = std::env::args_os().skip(1);
    let (Some(script_path), Some(output)) = (args.next(), args.next()) else {
        eprintln!("usage: bb-replay <script.json> <output.png>");
        return ExitCode::from(2);
    };

    match run(script_path.into(), output.into()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
