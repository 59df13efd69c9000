use clap::Parser;
use tessera_cli::{CliArgs, TesseraCli};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    let result = match TesseraCli::from_args(&args) {
        Ok(cli) => cli.run(args).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
