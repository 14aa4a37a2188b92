use std::env;
use std::sync::Mutex;

use tracing::Level;

const DEBUG_ENV_VAR: &str = "MDTRAY_DEBUG";
const LOG_FILE_NAME: &str = "mdtray-debug.log";

/// Installs a file-backed subscriber when `MDTRAY_DEBUG=1`. Without it the
/// app runs with no subscriber and tracing calls are no-ops.
pub(crate) fn init_logging() {
    if env::var(DEBUG_ENV_VAR).ok().as_deref() != Some("1") {
        return;
    }

    let path = mdtrayd::app_data_dir().join(LOG_FILE_NAME);
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)
    else {
        return;
    };

    let installed = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .try_init()
        .is_ok();

    if installed {
        std::panic::set_hook(Box::new(|info| {
            tracing::error!("panic: {}", info);
        }));
        tracing::info!("log file initialized at {}", path.display());
    }
}
