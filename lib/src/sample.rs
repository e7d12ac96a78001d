use async_trait::async_trait;
use eyre::Result;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufRead, AsyncBufReadExt as _, AsyncWrite, AsyncWriteExt as _};

// Sample is a single measurement row: an x value (time, frequency) paired
// with a y value (amplitude, magnitude).
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

#[async_trait]
pub trait Codec {
    async fn encode<W: AsyncWrite + Unpin + Send>(
        &self,
        writer: &mut W,
        sample: &Sample,
    ) -> Result<()>;
    async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Sample>;
}

/// One JSON object per line: `{"x":0.5,"y":1.25}`.
pub struct JsonCodec;

#[async_trait]
impl Codec for JsonCodec {
    async fn encode<W: AsyncWrite + Unpin + Send>(
        &self,
        writer: &mut W,
        sample: &Sample,
    ) -> Result<()> {
        writer.write_all(&serde_json::to_vec(sample)?).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Sample> {
        let mut buf = Vec::new();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            eyre::bail!("EOF");
        }
        serde_json::from_slice(&buf).map_err(|e| eyre::eyre!(e))
    }
}

/// One `x,y` record per line. Blank lines are skipped on decode.
pub struct CsvCodec;

#[async_trait]
impl Codec for CsvCodec {
    async fn encode<W: AsyncWrite + Unpin + Send>(
        &self,
        writer: &mut W,
        sample: &Sample,
    ) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        wtr.serialize(sample)?;
        let record = wtr.into_inner().map_err(|e| eyre::eyre!(e))?;
        writer.write_all(&record).await?;
        writer.flush().await?;
        Ok(())
    }

    async fn decode<R: AsyncBufRead + Unpin + Send>(&self, reader: &mut R) -> Result<Sample> {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                eyre::bail!("no CSV record");
            }
            if !line.trim().is_empty() {
                break;
            }
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(line.as_bytes());
        match rdr.deserialize().next() {
            Some(Ok(sample)) => Ok(sample),
            Some(Err(e)) => Err(eyre::eyre!("bad CSV record {:?}: {}", line.trim(), e)),
            None => eyre::bail!("no CSV record"),
        }
    }
}
