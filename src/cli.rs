// ============================================================================
// Paint Studio CLI — headless format conversion via command-line arguments
// ============================================================================
//
// Usage examples:
//   paint-studio photo.png                 open a file in the GUI
//   paint-studio -i photo.jpg -o out.png   convert without opening the GUI
//
// Conversion runs synchronously on the current thread; no window is created.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use paint_studio::io;

/// Paint Studio raster editor.
///
/// With a plain file argument the GUI opens on that image. With
/// --input/--output the process converts between image formats and exits.
#[derive(Parser, Debug)]
#[command(name = "paint-studio", version)]
pub struct CliArgs {
    /// Image file to open in the GUI.
    pub file: Option<PathBuf>,

    /// Input file for headless conversion (no GUI).
    #[arg(short, long, value_name = "FILE", requires = "output")]
    pub input: Option<PathBuf>,

    /// Output file for headless conversion; format inferred from extension.
    /// Supports png, jpeg, bmp, gif, tga, tiff, ico.
    #[arg(short, long, value_name = "FILE", requires = "input")]
    pub output: Option<PathBuf>,
}

impl CliArgs {
    /// True when the invocation asked for headless conversion.
    pub fn is_cli_mode() -> bool {
        std::env::args().any(|a| a == "--input" || a == "-i")
    }
}

/// Runs the conversion and returns the OS exit code.
pub fn run(args: CliArgs) -> ExitCode {
    let (Some(input), Some(output)) = (args.input, args.output) else {
        eprintln!("error: headless mode needs both --input and --output.");
        return ExitCode::FAILURE;
    };
    match io::convert(&input, &output) {
        Ok(()) => {
            println!("{} -> {}", input.display(), output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: could not convert '{}': {err}", input.display());
            ExitCode::FAILURE
        }
    }
}
