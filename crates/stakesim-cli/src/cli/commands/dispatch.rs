use super::super::args::*;
use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Prompt(args) => super::prompt::run(args),
        Command::Grade(args) => super::grade::run(args).await,
        Command::Override(args) => super::overrides::run(args),
        Command::Review(args) => super::review::run(args),
        Command::ValidateRubric(args) => super::validate_rubric::run(args),
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
