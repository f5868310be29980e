use core::fmt::Arguments;
use std::error::Error;
use twitch_release::{error, ReleaseLog, ReleaseTool};
use yansi::Paint;

struct ReleaseLogger;

impl ReleaseLogger {
    fn new() -> ReleaseLogger {
        ReleaseLogger {}
    }
}

impl ReleaseLog for ReleaseLogger {
    fn output(self: &Self, args: Arguments) {
        println!("{}", args);
    }
    fn warning(self: &Self, args: Arguments) {
        eprintln!("{}", format!("warning: {}", Paint::yellow(args)));
    }
    fn error(self: &Self, args: Arguments) {
        eprintln!("{}", format!("error: {}", Paint::red(args)));
    }
}

#[tokio::main]
async fn main() {
    let logger = ReleaseLogger::new();

    if let Err(error) = ReleaseTool::new(&logger).run(std::env::args_os()).await {
        error!(logger, "{}", error);

        let mut source = error.source();

        while let Some(cause) = source {
            error!(logger, "caused by: {}", cause);
            source = cause.source();
        }

        std::process::exit(1);
    }
}
