use std::io::Write;
use std::time::Instant;

/// Send log records to stderr prefixed with the time since startup.
///
/// `verbose` lowers the default level from Warn to Info; `RUST_LOG` still
/// takes precedence when set.
pub fn init_logger(verbose: bool) {
    let start = Instant::now();
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(move |buf, record| {
            let elapsed = start.elapsed().as_secs();
            writeln!(
                buf,
                "[{:02}:{:02}:{:02}] {}: {}",
                elapsed / 3600,
                (elapsed % 3600) / 60,
                elapsed % 60,
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}
