use clap::Parser;
use demandcast::cli::{run, Cli};
use demandcast::logging::{init_logging, LogConfig};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let _ = init_logging(&LogConfig::from_verbosity(cli.verbose));
    run(cli)
}
