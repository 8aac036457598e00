use clap::Parser;
use eframe::egui;
use pdf_reader::app::ReaderApp;
use pdf_reader::config::ReaderConfig;
use pdf_reader::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use pdf_reader::locale;
use pdf_reader::viewer::pdf_loader::PdfiumBackend;
use pdf_reader::AppState;
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pdf-reader")]
#[command(about = "Tabbed PDF reader", long_about = None)]
struct Cli {
    #[arg(value_name = "FILE", help = "PDF file to open on startup")]
    file: Option<PathBuf>,
}

fn init_logging(config: &ReaderConfig) {
    let result = File::create(&config.log_file)
        .map_err(|e| e.to_string())
        .and_then(|file| {
            WriteLogger::init(config.log_level, Config::default(), file).map_err(|e| e.to_string())
        });

    if let Err(e) = result {
        eprintln!(
            "Warning: logging to {} disabled: {}",
            config.log_file.display(),
            e
        );
    }
}

fn main() -> eframe::Result<()> {
    let cli = Cli::parse();
    let config = ReaderConfig::from_env(cli.file);
    init_logging(&config);

    log::info!("Starting PDF reader v{}", env!("CARGO_PKG_VERSION"));

    let backend = match PdfiumBackend::spawn(config.pdfium_dir.clone()) {
        Ok(backend) => backend,
        Err(e) => {
            log::error!("Failed to start PDF worker: {}", e);
            eprintln!("Error: failed to start PDF worker: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(Arc::new(backend), config.language);
    let title = locale::window_title(config.language);
    let initial_file = config.initial_file;

    let options = eframe::NativeOptions {
        vsync: true,
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        "PDF Reader",
        options,
        Box::new(|cc| Ok(Box::new(ReaderApp::new(cc, state, initial_file)))),
    )
}
