use std::path::Path;

use env_logger::{Env, Target};

/// Install the global logger. `RUST_LOG` wins over `default_filter`; output
/// goes to `log_file` when one is given so it cannot scribble over the TUI.
pub fn init(log_file: Option<&Path>, default_filter: &str) -> std::io::Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}
