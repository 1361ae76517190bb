mod font_dirs;

use clap::Parser;
use std::path::PathBuf;

use resume_render::{FontBook, OutputFormat, Renderer, ResumeRequest, Theme};

#[derive(Parser)]
#[command(name = "resume-render", about = "Render a resume JSON file to PDF and DOCX")]
struct Args {
    /// Input resume JSON file (resume fields plus an optional `theme` object)
    input: PathBuf,
    /// Theme preset overriding the one embedded in the input
    #[arg(long)]
    theme: Option<String>,
    /// Output PDF file
    #[arg(long)]
    pdf: Option<PathBuf>,
    /// Output DOCX file
    #[arg(long)]
    docx: Option<PathBuf>,
    /// Additional directory to search for font files (repeatable)
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,
    /// Font family to embed for the theme's font class
    #[arg(long)]
    font_family: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !args.input.is_file() {
        eprintln!("Error: not a file: {}", args.input.display());
        std::process::exit(1);
    }

    let json = match std::fs::read_to_string(&args.input) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: {}: {e}", args.input.display());
            std::process::exit(1);
        }
    };
    let request = match ResumeRequest::from_json(&json) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let theme = match args.theme.as_deref() {
        Some(id) => match Theme::preset(id) {
            Some(theme) => theme,
            None => {
                eprintln!(
                    "Error: unknown theme {id:?} (expected one of: {})",
                    resume_render::PRESET_IDS.join(", ")
                );
                std::process::exit(2);
            }
        },
        None => request.theme_or_default(),
    };

    let mut fonts = FontBook::builtin();
    if let Some(family) = args.font_family.as_deref() {
        let dirs = font_dirs::font_directories(&args.font_dirs);
        font_dirs::load_family(&mut fonts, theme.font, family, dirs);
    }
    let renderer = Renderer::new(fonts);

    let outputs: Vec<(OutputFormat, PathBuf)> = if args.pdf.is_none() && args.docx.is_none() {
        OutputFormat::ALL
            .into_iter()
            .map(|format| (format, args.input.with_extension(format.extension())))
            .collect()
    } else {
        [(OutputFormat::Pdf, args.pdf), (OutputFormat::Docx, args.docx)]
            .into_iter()
            .filter_map(|(format, path)| path.map(|p| (format, p)))
            .collect()
    };

    for (format, path) in outputs {
        let result = renderer
            .render(format, &request.resume, &theme)
            .and_then(|bytes| std::fs::write(&path, bytes).map_err(Into::into));
        if let Err(e) = result {
            eprintln!("Error: {}: {e}", path.display());
            std::process::exit(1);
        }
        log::info!("Wrote {}", path.display());
    }
}
