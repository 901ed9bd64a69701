//! Command line front end for generating and decoding grid tag patterns.

use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use nalgebra::Point2;

use gridtag::{TagDecoder, TagEncoder, CORNER_COUNT, SAMPLE_COUNT};

#[derive(Parser)]
#[command(name = "gridtag", version, about = "Generate and decode 8x8 grid tag patterns")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the cell pattern for a tag id.
    Pattern {
        /// Tag id in [0, 65536).
        #[arg(long)]
        id: u32,
        /// Output format.
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Decode 64 sampled cells given as a string of '0'/'1' characters.
    Decode {
        /// Cell samples in physical scan order.
        bits: String,
        /// Image corners as "x0,y0,x1,y1,x2,y2,x3,y3".
        #[arg(long)]
        corners: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// 8 rows of '#' (black) and '.' (white) cells.
    Text,
    /// A single 64-character '0'/'1' string.
    Bits,
    /// JSON array of cell values.
    Json,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("tag id {0} out of range, expected [0, 65536)")]
    IdOutOfRange(u32),
    #[error("expected {SAMPLE_COUNT} sample characters, got {0}")]
    BadSampleLength(usize),
    #[error("invalid sample character {0:?}, expected '0' or '1'")]
    BadSampleChar(char),
    #[error("expected {} comma-separated corner coordinates", CORNER_COUNT * 2)]
    BadCorners,
    #[error("no tag decoded")]
    NoTag,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Pattern { id, format } => print_pattern(id, format),
        Command::Decode { bits, corners } => decode(&bits, corners.as_deref()),
    }
}

fn print_pattern(id: u32, format: Format) -> Result<(), CliError> {
    let id = u16::try_from(id).map_err(|_| CliError::IdOutOfRange(id))?;
    let cells = TagEncoder::new().bit_pattern(id);

    match format {
        Format::Text => {
            for row in cells.chunks(8) {
                let line: String = row.iter().map(|&c| if c == 0 { '#' } else { '.' }).collect();
                println!("{line}");
            }
        }
        Format::Bits => {
            let line: String = cells.iter().map(|&c| if c == 0 { '0' } else { '1' }).collect();
            println!("{line}");
        }
        Format::Json => println!("{}", serde_json::to_string(&cells.to_vec())?),
    }
    Ok(())
}

fn decode(bits: &str, corners: Option<&str>) -> Result<(), CliError> {
    let samples = parse_samples(bits)?;
    let corners = match corners {
        Some(raw) => parse_corners(raw)?,
        // Unit square placeholder when the caller has no geometry.
        None => [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ],
    };

    let detection = TagDecoder::new()
        .decode(&corners, &samples)
        .ok_or(CliError::NoTag)?;
    println!("{}", serde_json::to_string_pretty(&detection)?);
    Ok(())
}

fn parse_samples(bits: &str) -> Result<[u8; SAMPLE_COUNT], CliError> {
    let bits = bits.trim();
    if bits.chars().count() != SAMPLE_COUNT {
        return Err(CliError::BadSampleLength(bits.chars().count()));
    }
    let mut samples = [0u8; SAMPLE_COUNT];
    for (slot, ch) in samples.iter_mut().zip(bits.chars()) {
        *slot = match ch {
            '0' => 0,
            '1' => 1,
            other => return Err(CliError::BadSampleChar(other)),
        };
    }
    Ok(samples)
}

fn parse_corners(raw: &str) -> Result<[Point2<f32>; CORNER_COUNT], CliError> {
    let values: Vec<f32> = raw
        .split(',')
        .map(|v| v.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .map_err(|_| CliError::BadCorners)?;
    if values.len() != CORNER_COUNT * 2 {
        return Err(CliError::BadCorners);
    }
    Ok(std::array::from_fn(|k| {
        Point2::new(values[2 * k], values[2 * k + 1])
    }))
}
