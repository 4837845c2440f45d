use std::thread;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

// Temporary to observe the thread is not blocking
pub fn thread_logging(str: &str) {
    let thread_id = thread::current().id();
    info!("{}: {:?}", str, thread_id);
}
