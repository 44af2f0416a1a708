use clap::Parser;
use docindex::{cli::Command, op};
use docindex_tracing::{init_tracing_subscriber, println_error, TracingSubscriberOptions};

fn main() {
    let command = Command::parse();
    init_tracing_subscriber(TracingSubscriberOptions {
        verbosity: Some(command.verbose),
        silent: Some(command.silent),
        ..Default::default()
    });
    if let Err(err) = op::run(command) {
        println_error(&format!("{err:#}"));
        std::process::exit(1);
    }
}
