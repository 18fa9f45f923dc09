use crate::demo::{run_assess, run_demo, AssessArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use wellness_triage::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Wellness Triage",
    about = "Run the wellness triage service or score a symptom selection from the command line",
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
    /// Score a symptom selection and print the dual assessment and gate decision
    Assess(AssessArgs),
    /// Walk one case through scoring, the confirmation gate, doctor review and feedback
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
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wellness_triage::workflows::triage::{PrimaryGoal, StressLevel};

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["wellness-triage-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn assess_accepts_comma_separated_symptoms_and_labels() {
        let cli = Cli::try_parse_from([
            "wellness-triage-api",
            "assess",
            "--symptoms",
            "4,5,9",
            "--goal",
            "current_discomfort",
            "--stress",
            "very_high",
            "--json",
        ])
        .expect("parses");

        let Some(Command::Assess(args)) = cli.command else {
            panic!("expected assess command");
        };
        assert_eq!(args.symptoms, vec![4, 5, 9]);
        assert_eq!(args.goal, PrimaryGoal::CurrentDiscomfort);
        assert_eq!(args.stress, StressLevel::VeryHigh);
        assert!(args.json);
    }

    #[test]
    fn assess_rejects_unknown_labels() {
        let result = Cli::try_parse_from([
            "wellness-triage-api",
            "assess",
            "--symptoms",
            "1",
            "--sleep",
            "restless",
        ]);
        assert!(result.is_err());
    }
}
