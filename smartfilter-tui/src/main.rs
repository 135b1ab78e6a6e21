mod app;
mod error;
mod event_loop;
mod paths;
mod render;
mod store;
mod terminal;

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;

use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};
use smartfilter_lib::DataView;

use app::App;
use error::AppError;
use store::JsonFileStore;
use terminal::TerminalGuard;

/// Log to `latest.log` in the cache directory, rotating the previous one.
/// Logging is skipped when the directory cannot be created.
fn init_logging() {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
    }
}

async fn run() -> Result<(), AppError> {
    let data_file = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(AppError::Usage)?;

    init_logging();

    let data = DataView::from_json(&fs::read_to_string(&data_file)?)?;
    let properties = paths::properties_file(&data_file).ok_or(AppError::NoDataDir)?;
    let store = JsonFileStore::open(properties)?;
    info!("Data {:?}, properties {:?}", data_file, store.path());

    let mut app = App::new(store, data)?;

    let mut terminal = TerminalGuard::new()?;
    event_loop::run(&mut app, &mut terminal).await
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
