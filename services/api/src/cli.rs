use crate::demo::{run_demo, run_submit, DemoArgs, SubmitArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use resfi::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "ResFi Waitlist",
    about = "Run the ResFi.ai waitlist service or drive it from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Submit one waitlist entry against the configured service
    Submit(SubmitArgs),
    /// Run a scripted end-to-end demo against an in-memory waitlist
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Submit(args) => run_submit(args).await,
        Command::Demo(args) => run_demo(args).await,
    }
}
