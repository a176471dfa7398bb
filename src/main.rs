use clap::Parser;
use coilab::cli::Cli;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    coilab::cli::run(cli)?;
    Ok(())
}
