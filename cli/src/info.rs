use clap::Args;
use eyre::Result;
use tokio::io::AsyncWriteExt;
use whittle::{report_text, Series, SINGLE_TRACE_POINTS};

use crate::downsample::{read_series, trace_name, Input, Output};

#[derive(Args, Debug)]
pub struct Opts {
    /// Threshold used to report the would-be reduction
    #[clap(long, default_value_t = SINGLE_TRACE_POINTS)]
    pub threshold: usize,

    /// Output file [default: stdout]
    #[clap(long, default_value = "stdout")]
    pub output: String,

    /// Input files [default: stdin]
    pub files: Vec<String>,
}

pub async fn info(opts: &Opts) -> Result<()> {
    let sources: Vec<String> = if opts.files.is_empty() {
        vec!["stdin".to_string()]
    } else {
        opts.files.clone()
    };

    let mut series: Vec<(String, Series)> = Vec::new();
    for source in &sources {
        let mut input = Input::from_filename(source).await?;
        series.push((trace_name(source), read_series(&mut input).await?));
    }

    let mut buf = Vec::new();
    report_text(&series, opts.threshold, &mut buf)?;

    let mut output = Output::from_filename(&opts.output).await?;
    output.write_all(&buf).await?;
    output.flush().await?;

    Ok(())
}
