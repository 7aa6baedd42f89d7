use super::event_line;
use clap::Args;
use feltscan_core::decoding::{EventSchemaRegistry, builtin_registry};
use feltscan_sdk::{PartialEvent, RawEvent};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// JSON-lines input, as written by `events` ("-" reads stdin)
    #[arg(short = 'i', long, default_value = "-")]
    pub infile: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short = 'o', long)]
    pub outfile: Option<PathBuf>,
}

/// Decodes the `UNKNOWN` lines of an event stream with the built-in schemas.
pub async fn run(args: ParseArgs) -> anyhow::Result<()> {
    let registry = builtin_registry()?;

    let input: Box<dyn AsyncBufRead + Unpin> = if args.infile.as_os_str() == "-" {
        Box::new(BufReader::new(tokio::io::stdin()))
    } else {
        Box::new(BufReader::new(tokio::fs::File::open(&args.infile).await?))
    };
    let output: Box<dyn AsyncWrite + Unpin> = match &args.outfile {
        Some(path) => Box::new(tokio::fs::File::create(path).await?),
        None => Box::new(tokio::io::stdout()),
    };
    let mut output = BufWriter::new(output);

    let mut lines = input.lines();
    let mut line_number = 0u64;
    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }
        match reparse_line(&registry, &line) {
            Ok(rendered) => output.write_all(&rendered).await?,
            Err(e) => tracing::warn!(line = line_number, error = %e, "Skipping malformed line"),
        }
    }
    output.flush().await?;
    Ok(())
}

/// Re-renders one line, decoding it if it is an `UNKNOWN` event with a
/// registered signature.
fn reparse_line(registry: &EventSchemaRegistry, line: &str) -> serde_json::Result<Vec<u8>> {
    let partial: PartialEvent = serde_json::from_str(line)?;
    if !partial.is_unknown() {
        return passthrough(&partial);
    }

    match serde_json::from_str::<RawEvent>(partial.event.get()) {
        Ok(raw) => event_line(Some(registry), raw),
        Err(e) => {
            tracing::warn!(error = %e, "UNKNOWN line does not hold a raw event, passing it through");
            passthrough(&partial)
        }
    }
}

fn passthrough(partial: &PartialEvent) -> serde_json::Result<Vec<u8>> {
    let mut line = serde_json::to_vec(partial)?;
    line.push(b'\n');
    Ok(line)
}
