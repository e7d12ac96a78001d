use clap::Args;
use eyre::Result;
use tokio::io::AsyncBufReadExt;
use whittle::{Codec, CsvCodec, JsonCodec};

use crate::downsample::{Input, Output};

#[derive(Args, Debug)]
pub struct Opts {
    /// Output encoding (json, csv)
    #[clap(long, default_value = "json")]
    pub to: String,

    /// Output file [default: stdout]
    #[clap(long, default_value = "stdout")]
    pub output: String,

    /// Input files [default: stdin]
    pub files: Vec<String>,
}

pub async fn encode(opts: &Opts) -> Result<()> {
    let to_csv = match opts.to.as_str() {
        "csv" => true,
        "json" => false,
        other => eyre::bail!("unknown encoding: {}", other),
    };

    let sources: Vec<String> = if opts.files.is_empty() {
        vec!["stdin".to_string()]
    } else {
        opts.files.clone()
    };

    let mut output = Output::from_filename(&opts.output).await?;

    for source in &sources {
        let mut input = Input::from_filename(source).await?;

        // Pick the input encoding by peeking at the first byte.
        let buf = input.fill_buf().await?;
        if buf.is_empty() {
            continue;
        }
        let is_json = buf[0] == b'{';

        loop {
            let result = if is_json {
                JsonCodec.decode(&mut input).await
            } else {
                CsvCodec.decode(&mut input).await
            };
            match result {
                Ok(sample) => {
                    if to_csv {
                        CsvCodec.encode(&mut output, &sample).await?;
                    } else {
                        JsonCodec.encode(&mut output, &sample).await?;
                    }
                }
                Err(_) => break,
            }
        }
    }

    Ok(())
}
