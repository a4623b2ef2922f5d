use anyhow::Context;
use clap::Parser;
use microlog::{
    arguments::Args,
    logger::{self, LogTag, Message},
};

/// Append tagged lines to the log file and exit once they are on disk
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let path = args.log_path();
    let options = args.logger_options()?;
    // Dropped when main returns, after every queued line is written
    let _guard = logger::init(&path, options)
        .with_context(|| format!("Failed to initialize log file {}", path.display()))?;

    let message = if args.json {
        let value: serde_json::Value =
            serde_json::from_str(&args.message).context("Message is not valid JSON")?;
        Message::from(value)
    } else {
        Message::from(args.message.as_str())
    };

    let sender = args.sender.as_deref();
    for _ in 0..args.repeat {
        match args.tag {
            LogTag::Debug => logger::log_debug(message.clone(), sender),
            LogTag::Info => logger::log_info(message.clone(), sender),
            LogTag::Success => logger::log_success(message.clone(), sender),
            LogTag::Error => logger::log_error(message.clone(), sender),
            LogTag::Text => logger::log_text(&message.render()),
        }
    }

    Ok(())
}
