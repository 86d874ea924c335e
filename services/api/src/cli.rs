use crate::demo::{run_demo, run_play, QuizArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use matchmaker::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Equipment Matchmaker",
    about = "Serve or play the adaptive equipment matchmaking quiz",
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
    /// Take the quiz interactively in the terminal
    Play(QuizArgs),
    /// Run a scripted quiz that always picks the first option
    Demo(QuizArgs),
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
        Command::Play(args) => run_play(args).await,
        Command::Demo(args) => run_demo(args),
    }
}
