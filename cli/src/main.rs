mod downsample;
mod encode;
mod info;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "whittle",
    about = "Whittle dense signal traces down to chart-sized series"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Downsample sample streams into a chart payload
    Downsample(downsample::Opts),
    /// Summarize sample streams without emitting data
    Info(info::Opts),
    /// Transcode sample streams between encodings
    Encode(encode::Opts),
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Downsample(opts) => downsample::downsample(&opts).await,
        Command::Info(opts) => info::info(&opts).await,
        Command::Encode(opts) => encode::encode(&opts).await,
    }
}
