//! appdesk - generate desktop entries for AppImages.
//!
//! Thin command-line wrapper over `appdesk-core`: parses arguments, sets up
//! logging and turns the library result into console output and an exit
//! code.

mod output;

use anyhow::Result;
use appdesk_core::{report_launcher_dirs, Generator, Overrides};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

const EXAMPLES: &str = "\
Examples:
  appdesk MyApp.AppImage
  appdesk MyApp.AppImage --name \"My Application\" --comment \"A great app\"
  appdesk MyApp.AppImage --output-dir ~/.local/share/applications
  appdesk --list-dirs";

#[derive(Parser, Debug)]
#[command(name = "appdesk")]
#[command(about = "Generate .desktop files for AppImages")]
#[command(after_help = EXAMPLES)]
struct Args {
    /// Path to the AppImage file
    #[arg(required_unless_present = "list_dirs")]
    appimage: Option<PathBuf>,

    /// Output directory for the .desktop file
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Application name (overrides extracted name)
    #[arg(short, long)]
    name: Option<String>,

    /// Application comment/description
    #[arg(short, long)]
    comment: Option<String>,

    /// Desktop categories (e.g., "Graphics;Photography;")
    #[arg(long)]
    categories: Option<String>,

    /// List available desktop directories
    #[arg(long)]
    list_dirs: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            name: self.name.clone(),
            comment: self.comment.clone(),
            categories: self.categories.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Set up logging (stderr, so stdout stays clean for --json)
    let log_level = if args.debug { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .without_time()
        .compact()
        .init();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    if args.list_dirs {
        let statuses = report_launcher_dirs()?;
        return output::print_directories(&statuses, args.json);
    }

    // clap enforces the positional unless --list-dirs was given
    let Some(ref appimage) = args.appimage else {
        anyhow::bail!("AppImage path is required (or use --list-dirs)");
    };

    let mut generator = Generator::for_current_user()?;
    if let Some(ref dir) = args.output_dir {
        generator = generator.with_apps_dir(dir);
    }
    debug!(
        "Writing entries to {}, icons to {}",
        generator.apps_dir().display(),
        generator.icon_dir().display()
    );

    if !args.json {
        println!("Analyzing AppImage: {}", appimage.display());
    }

    let entry = generator.generate(appimage, &args.overrides()).await?;
    output::print_generated(&entry, args.json)
}
