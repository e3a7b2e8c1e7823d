use crate::commands::open;
use crate::error::CliError;
use clap::Args;
use interpreter::Operation;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct SayArgs {
    /// Table the command applies to
    pub table: String,

    /// The spoken or typed command, e.g. "Add a person named Ada, age 36"
    #[arg(trailing_var_arg = true, required = true)]
    pub text: Vec<String>,
}

pub fn handle_say(args: &SayArgs, config_path: Option<PathBuf>) -> Result<(), CliError> {
    let ctx = open(config_path)?;
    let table = ctx.table(&args.table)?;

    let outcome = ctx.engine.submit_utterance(table.id, &args.text.join(" "))?;
    if !matches!(outcome.operation, Operation::Unrecognized) {
        ctx.flush()?;
    }

    println!("{}", outcome.message);
    Ok(())
}
