use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Call once at startup.
///
/// `RUST_LOG` wins when set; otherwise `level` applies to this crate's
/// targets and to tower_http's request spans.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "teacher_directory={level},teacher_server={level},tower_http={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .compact()
        .init();
}
