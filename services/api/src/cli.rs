use crate::demo::{run_assess, run_demo, run_rate, AssessArgs, DemoArgs, RateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use loan_eligibility::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Eligibility Service",
    about = "Run the loan eligibility service or score applications from the command line",
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
    /// Score a loan application stored as JSON
    Assess(AssessArgs),
    /// Quote an interest rate and repayment schedule
    Rate(RateArgs),
    /// Score a set of sample applicants side by side
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
        Command::Assess(args) => run_assess(args),
        Command::Rate(args) => run_rate(args),
        Command::Demo(args) => run_demo(args),
    }
}
