use clap::Args;
use eyre::Result;
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::fs::File;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter,
    ReadBuf,
};
use whittle::{budget_for, Codec, CsvCodec, JsonCodec, PlotPayload, Sample, Series};

#[derive(Args, Debug)]
pub struct Opts {
    /// Maximum points per output trace [0 = auto: 15000 single, 5000 multi]
    #[clap(long, default_value_t = 0)]
    threshold: usize,

    /// Trace name for a single input [default: derived from the file name]
    #[clap(long)]
    name: Option<String>,

    /// Output file [default: stdout]
    #[clap(long, default_value = "stdout")]
    output: String,

    /// Input files, one trace each [default: stdin]
    pub files: Vec<String>,
}

pub async fn downsample(opts: &Opts) -> Result<()> {
    let sources: Vec<String> = if opts.files.is_empty() {
        vec!["stdin".to_string()]
    } else {
        opts.files.clone()
    };

    let threshold = if opts.threshold == 0 {
        budget_for(sources.len())
    } else {
        opts.threshold
    };

    let mut payload = PlotPayload::new();
    for source in &sources {
        let mut input = Input::from_filename(source).await?;
        let series = read_series(&mut input).await?;
        if series.is_empty() {
            eprintln!("{}: no samples, skipping", source);
            continue;
        }

        let name = match (&opts.name, sources.len()) {
            (Some(name), 1) => name.clone(),
            _ => trace_name(source),
        };

        // LTTB is CPU-bound; keep it off the I/O driver threads.
        let original_points = series.len();
        let reduced = tokio::task::spawn_blocking(move || series.downsample(threshold)).await??;
        payload.push_reduced(name, original_points, reduced);
    }

    if payload.traces.is_empty() {
        eyre::bail!("no data to downsample");
    }

    eprintln!(
        "downsampled {} -> {} points ({})",
        payload.metadata.original_points,
        payload.metadata.downsampled_points,
        payload.metadata.compression_ratio,
    );

    let mut buf = Vec::new();
    whittle::report_json(&payload, &mut buf)?;

    let mut output = Output::from_filename(&opts.output).await?;
    output.write_all(&buf).await?;
    output.flush().await?;

    Ok(())
}

/// Decode a whole sample stream into a series. The encoding is picked from
/// the first byte: `{` means JSON lines, anything else CSV records.
pub async fn read_series(input: &mut Input) -> Result<Series> {
    let buf = input.fill_buf().await?;
    if buf.is_empty() {
        return Ok(Series::default());
    }
    let is_json = buf[0] == b'{';

    let mut samples: Vec<Sample> = Vec::new();
    loop {
        let result = if is_json {
            JsonCodec.decode(input).await
        } else {
            CsvCodec.decode(input).await
        };
        match result {
            Ok(sample) => samples.push(sample),
            Err(_) => break,
        }
    }

    Ok(Series::from_samples(&samples))
}

pub fn trace_name(source: &str) -> String {
    if source == "stdin" {
        return "series".to_string();
    }
    Path::new(source)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

pub enum Input {
    Stdin(BufReader<tokio::io::Stdin>),
    File(BufReader<File>),
}

impl Input {
    pub async fn from_filename(name: &str) -> Result<Self> {
        match name {
            "stdin" => Ok(Input::Stdin(BufReader::new(tokio::io::stdin()))),
            _ => {
                let f = File::open(name).await?;
                Ok(Input::File(BufReader::new(f)))
            }
        }
    }
}

impl AsyncRead for Input {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Input::Stdin(reader) => Pin::new(reader).poll_read(cx, buf),
            Input::File(reader) => Pin::new(reader).poll_read(cx, buf),
        }
    }
}

impl AsyncBufRead for Input {
    fn poll_fill_buf(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<&[u8]>> {
        match self.get_mut() {
            Input::Stdin(reader) => Pin::new(reader).poll_fill_buf(cx),
            Input::File(reader) => Pin::new(reader).poll_fill_buf(cx),
        }
    }

    fn consume(self: Pin<&mut Self>, amt: usize) {
        match self.get_mut() {
            Input::Stdin(reader) => Pin::new(reader).consume(amt),
            Input::File(reader) => Pin::new(reader).consume(amt),
        }
    }
}

#[derive(Debug)]
pub enum Output {
    Stdout(BufWriter<tokio::io::Stdout>),
    File(BufWriter<File>),
}

impl Output {
    pub async fn from_filename(name: &str) -> Result<Self> {
        match name {
            "stdout" => Ok(Output::Stdout(BufWriter::new(tokio::io::stdout()))),
            _ => {
                let f = File::create(name).await?;
                Ok(Output::File(BufWriter::new(f)))
            }
        }
    }
}

impl AsyncWrite for Output {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<Result<usize, io::Error>> {
        match self.get_mut() {
            Output::Stdout(writer) => Pin::new(writer).poll_write(cx, buf),
            Output::File(writer) => Pin::new(writer).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        match self.get_mut() {
            Output::Stdout(writer) => Pin::new(writer).poll_flush(cx),
            Output::File(writer) => Pin::new(writer).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        match self.get_mut() {
            Output::Stdout(writer) => Pin::new(writer).poll_shutdown(cx),
            Output::File(writer) => Pin::new(writer).poll_shutdown(cx),
        }
    }
}
