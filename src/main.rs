use clap::Parser;
use podcheck::cli::{self, Cli, Settings};
use podcheck::config::Config;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Usage errors exit with status 2 from here.
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(Config::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::from(1);
        }
    };
    let settings = Settings::resolve(&cli, config);
    init_tracing(settings.log.as_deref());

    let outcome = cli::run(
        &cli.path,
        &settings,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    );
    ExitCode::from(outcome.exit_code())
}

fn init_tracing(directive: Option<&str>) {
    let filter = cli::log_filter(directive, &mut io::stderr().lock());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
