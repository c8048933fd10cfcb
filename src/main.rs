//! # textcanvas CLI
//!
//! Terminal host for the text-to-image renderer.
//!
//! ## Usage
//!
//! ```bash
//! # Render with saved preferences, prompting for a destination
//! textcanvas render "Hello\n\nWorld"
//!
//! # Render a file as JPEG straight to disk
//! textcanvas render --input notes.txt --format jpeg --out notes.jpeg
//!
//! # Change saved defaults
//! textcanvas config set --font-size 32 --bg "#202020" --fg "#F0F0F0"
//!
//! # Show exported files
//! textcanvas history
//! ```

use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

use textcanvas::{
    Api, TextCanvasError,
    api::{FileFilter, ImageRequest, SaveDialog},
    prefs::{DEFAULT_CONFIG_FILE, Theme},
    render::{FontSpec, OutputFormat, encode},
};

/// textcanvas - Render text into images
#[derive(Parser, Debug)]
#[command(name = "textcanvas")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Preferences file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render text to an image file
    Render {
        /// Text to render (reads --input or stdin when omitted)
        text: Option<String>,

        /// Read text from a file
        #[arg(long, short, value_name = "FILE", conflicts_with = "text")]
        input: Option<PathBuf>,

        /// Output format: png, jpeg or bmp
        #[arg(long)]
        format: Option<String>,

        /// Font size in points
        #[arg(long)]
        font_size: Option<String>,

        /// Background color (#RRGGBB)
        #[arg(long)]
        bg: Option<String>,

        /// Text color (#RRGGBB)
        #[arg(long)]
        fg: Option<String>,

        /// Image width in pixels
        #[arg(long)]
        width: Option<String>,

        /// Font file to try before the defaults (repeatable)
        #[arg(long, value_name = "FILE")]
        font: Vec<PathBuf>,

        /// Destination file (prompts when omitted)
        #[arg(long, short, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Show or change saved preferences
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// List exported images
    History,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print preferences as JSON
    Show,

    /// Update and save preferences
    Set {
        /// light or dark
        #[arg(long)]
        theme: Option<String>,

        /// Switch between light and dark
        #[arg(long, conflicts_with = "theme")]
        toggle_theme: bool,

        /// Default output format: png, jpeg or bmp
        #[arg(long)]
        format: Option<String>,

        /// Default font size in points
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        font_size: Option<u32>,

        /// Default background color (#RRGGBB)
        #[arg(long)]
        bg: Option<String>,

        /// Default text color (#RRGGBB)
        #[arg(long)]
        fg: Option<String>,

        /// Default image width in pixels
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        width: Option<u32>,
    },
}

/// Save dialog that prompts on the terminal.
///
/// An empty answer accepts the suggested name; end of input cancels.
struct TerminalDialog;

impl SaveDialog for TerminalDialog {
    fn choose(
        &self,
        suggested_name: &str,
        filters: &[FileFilter],
    ) -> textcanvas::Result<Option<PathBuf>> {
        let labels: Vec<&str> = filters.iter().map(|f| f.label.as_str()).collect();
        let mut stderr = io::stderr();
        write!(stderr, "Save as [{}] ({}): ", suggested_name, labels.join(", "))?;
        stderr.flush()?;

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer)? == 0 {
            return Ok(None);
        }

        let answer = answer.trim();
        if answer.is_empty() {
            Ok(Some(PathBuf::from(suggested_name)))
        } else {
            Ok(Some(PathBuf::from(answer)))
        }
    }
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), TextCanvasError> {
    let mut api = Api::open(&cli.config).with_dialog(Box::new(TerminalDialog));

    match cli.command {
        Commands::Render {
            text,
            input,
            format,
            font_size,
            bg,
            fg,
            width,
            font,
            out,
        } => {
            let text = match (text, input) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)?,
                (None, None) => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            for path in font.into_iter().rev() {
                api.rasterizer_mut().prepend_font(FontSpec::Path(path));
            }

            let config = api.load_config();
            let mut request = ImageRequest::from_config(text, &config);
            if let Some(format) = format {
                request.format = format;
            }
            if let Some(size) = font_size {
                request.font_size = size.into();
            }
            if let Some(bg) = bg {
                request.bg_color = bg;
            }
            if let Some(fg) = fg {
                request.font_color = fg;
            }
            if let Some(width) = width {
                request.width = width.into();
            }

            let outcome = api.generate_image(&request);
            let uri = match (outcome.success, outcome.image_data) {
                (true, Some(uri)) => uri,
                _ => fail(outcome.message.as_deref().unwrap_or("Failed to generate image")),
            };
            let (encoded_format, bytes) = encode::decode_data_uri(&uri)?;

            let path = match out {
                Some(path) => path,
                None => {
                    let suggested = format!("output.{}", encoded_format.extension());
                    let chosen = api.choose_save_path(&suggested);
                    if !chosen.success {
                        fail(chosen.message.as_deref().unwrap_or("Failed to choose save path"));
                    }
                    match chosen.path {
                        Some(path) => path,
                        None => {
                            println!("No save path chosen, image discarded");
                            return Ok(());
                        }
                    }
                }
            };

            std::fs::write(&path, &bytes)?;
            println!("Saved {} ({} bytes)", path.display(), bytes.len());

            let recorded = api.record_export(path.display().to_string());
            if !recorded.success {
                eprintln!("Warning: {}", recorded.message);
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = api.load_config();
                let json = serde_json::to_string_pretty(&config)
                    .map_err(|e| TextCanvasError::Config(e.to_string()))?;
                println!("{}", json);
            }
            ConfigAction::Set {
                theme,
                toggle_theme,
                format,
                font_size,
                bg,
                fg,
                width,
            } => {
                let mut config = api.load_config();
                if let Some(theme) = theme {
                    config.theme = theme.parse::<Theme>()?;
                }
                if toggle_theme {
                    config.theme = config.theme.toggled();
                }
                if let Some(format) = format {
                    config.default_format = format.parse::<OutputFormat>()?;
                }
                if let Some(size) = font_size {
                    config.font_size = size;
                }
                if let Some(bg) = bg {
                    config.bg_color = bg;
                }
                if let Some(fg) = fg {
                    config.font_color = fg;
                }
                if let Some(width) = width {
                    config.image_width = width;
                }

                let outcome = api.save_config(config);
                if !outcome.success {
                    fail(&outcome.message);
                }
                println!("{}", outcome.message);
            }
        },

        Commands::History => {
            let config = api.load_config();
            if config.history.is_empty() {
                println!("No exported images yet.");
            }
            for (i, entry) in config.history.iter().enumerate() {
                println!("{:>3}. {}", i + 1, entry);
            }
        }
    }

    Ok(())
}

/// Report a failed outcome with its own message and exit.
fn fail(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}
