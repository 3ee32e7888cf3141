use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use simple_logger::SimpleLogger;

use geopbf_codecs::{codec_by_field, decode_blob, encode_blob, Compression};
use geopbf_core::{Blob, Limits, MAX_BLOB_LEN, MAX_RAW_SIZE};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "geopbf",
    about = "Encode, decode, and inspect GeoPBF content blobs",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file's content into a serialized blob
    Encode {
        /// Source file holding the content
        input: PathBuf,
        /// Destination blob file
        output: PathBuf,
        /// Codec to use: raw | zlib | lz4 | zstd
        #[arg(short, long, default_value = "zlib")]
        codec: String,
        /// Compression level (zlib 0–9, zstd 1–22)
        #[arg(short, long)]
        level: Option<i32>,
    },
    /// Recover the original content from a serialized blob
    Decode {
        /// Source blob file
        input: PathBuf,
        /// Destination content file
        output: PathBuf,
        /// Largest serialized blob accepted, in bytes
        #[arg(long, default_value_t = MAX_BLOB_LEN)]
        max_blob_len: usize,
        /// Largest declared uncompressed size accepted, in bytes
        #[arg(long, default_value_t = MAX_RAW_SIZE)]
        max_raw_size: u32,
        /// Reject raw blobs whose declared raw_size lies about the
        /// content length
        #[arg(long)]
        strict_raw_size: bool,
    },
    /// Print a blob's structural fields without extracting content
    Inspect {
        /// Blob file to inspect
        file: PathBuf,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn compression_from_name(name: &str, level: Option<i32>) -> anyhow::Result<Compression> {
    match name {
        "raw" | "none" => Ok(Compression::None),
        "zlib" | "z" => {
            let level = level.unwrap_or(6);
            if !(0..=9).contains(&level) {
                anyhow::bail!("zlib level must be 0–9, got {}", level);
            }
            Ok(Compression::Zlib(level as u32))
        }
        "lz4" | "l" => Ok(Compression::Lz4),
        "zstd" => {
            let level = level.unwrap_or(3);
            if !(1..=22).contains(&level) {
                anyhow::bail!("zstd level must be 1–22, got {}", level);
            }
            Ok(Compression::Zstd(level))
        }
        other => anyhow::bail!(
            "unknown codec '{}'. Valid options: raw, zlib, lz4, zstd",
            other
        ),
    }
}

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut value = n as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", value, UNITS[unit])
    }
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_encode(
    input: PathBuf,
    output: PathBuf,
    codec_name: &str,
    level: Option<i32>,
) -> anyhow::Result<()> {
    let compression = compression_from_name(codec_name, level)?;
    let content =
        fs::read(&input).with_context(|| format!("reading input file {:?}", input))?;
    debug!("read {} content bytes from {:?}", content.len(), input);

    let encoded = encode_blob(&content, compression)?;
    fs::write(&output, &encoded)
        .with_context(|| format!("writing blob file {:?}", output))?;

    eprintln!("  codec       : {}", codec_name);
    eprintln!("  content     : {}", human_bytes(content.len() as u64));
    eprintln!("  blob        : {}", human_bytes(encoded.len() as u64));
    if !encoded.is_empty() {
        eprintln!(
            "  ratio       : {:.2}x",
            content.len() as f64 / encoded.len() as f64
        );
    }
    Ok(())
}

fn run_decode(
    input: PathBuf,
    output: PathBuf,
    max_blob_len: usize,
    max_raw_size: u32,
    strict_raw_size: bool,
) -> anyhow::Result<()> {
    let buf = fs::read(&input).with_context(|| format!("reading blob file {:?}", input))?;
    debug!("read {} blob bytes from {:?}", buf.len(), input);

    let limits = Limits {
        max_blob_len,
        max_raw_size,
        strict_raw_size,
    };
    let content = decode_blob(&buf, &limits)
        .with_context(|| format!("decoding blob file {:?}", input))?;

    fs::write(&output, &content)
        .with_context(|| format!("writing content file {:?}", output))?;

    eprintln!("  blob        : {}", human_bytes(buf.len() as u64));
    eprintln!("  content     : {}", human_bytes(content.len() as u64));
    Ok(())
}

fn run_inspect(file: PathBuf) -> anyhow::Result<()> {
    let buf = fs::read(&file).with_context(|| format!("reading blob file {:?}", file))?;
    let blob = Blob::decode(&buf, &Limits::default())
        .with_context(|| format!("decoding blob file {:?}", file))?;

    println!("=== GeoPBF Blob: {:?} ===", file);
    println!();
    match blob.compression() {
        None => println!("  content     : raw (field 1)"),
        Some(field) => {
            let codec = codec_by_field(field)?;
            println!("  content     : {}-compressed (field {})", codec.name(), field);
        }
    }
    println!("  serialized  : {}", human_bytes(buf.len() as u64));
    println!("  payload     : {}", human_bytes(blob.payload_len() as u64));
    println!("  raw size    : {}", human_bytes(blob.raw_size() as u64));
    if blob.payload_len() > 0 {
        println!(
            "  ratio       : {:.2}x",
            blob.raw_size() as f64 / blob.payload_len() as f64
        );
    }
    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    SimpleLogger::new().with_level(level).init()?;

    match cli.command {
        Commands::Encode {
            input,
            output,
            codec,
            level,
        } => run_encode(input, output, &codec, level),
        Commands::Decode {
            input,
            output,
            max_blob_len,
            max_raw_size,
            strict_raw_size,
        } => run_decode(input, output, max_blob_len, max_raw_size, strict_raw_size),
        Commands::Inspect { file } => run_inspect(file),
    }
}
