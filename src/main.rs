// GUI-subsystem binary on Windows so no console window is allocated.
#![windows_subsystem = "windows"]

mod app;
mod cli;

use std::process::ExitCode;

use clap::Parser;
use eframe::egui;

use app::PaintStudioApp;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // -- CLI / headless mode -------------------------------------------
    if cli::CliArgs::is_cli_mode() {
        let args = cli::CliArgs::parse();
        return cli::run(args);
    }

    // -- GUI mode --------------------------------------------------------
    let args = cli::CliArgs::parse();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("Paint Studio"),
        ..Default::default()
    };

    match eframe::run_native(
        "Paint Studio",
        options,
        Box::new(move |cc| Box::new(PaintStudioApp::new(cc, args.file))),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("could not start window: {err}");
            ExitCode::FAILURE
        }
    }
}
