use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use huffman::files::{self, compressed_path, decompressed_path};
use huffman::{CodeTable, FrequencyTable};

#[derive(Parser)]
#[command(version, about = "Huffman compression for arbitrary files")]
struct Cli {
    /// Log more; repeat for trace output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compress INPUT into a container (default INPUT.huf)
    Compress {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Restore the original bytes of a container
    Decompress {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the frequency table and the code table of INPUT
    Stats { input: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match cli.command {
        Command::Compress { input, output } => {
            let output = output.unwrap_or_else(|| compressed_path(&input));
            let summary = files::compress_file(&input, &output)
                .context(format!("compressing {}", input.display()))?;
            println!(
                "{} -> {} ({} -> {} bytes, {:.1}%)",
                input.display(),
                output.display(),
                summary.input_len,
                summary.output_len,
                summary.ratio() * 100.0
            );
        }
        Command::Decompress { input, output } => {
            let output = output.unwrap_or_else(|| decompressed_path(&input));
            if output == input {
                bail!("refusing to overwrite {} with its own output", input.display());
            }
            let summary = files::decompress_file(&input, &output)
                .context(format!("decompressing {}", input.display()))?;
            println!(
                "{} -> {} ({} bytes)",
                input.display(),
                output.display(),
                summary.output_len
            );
        }
        Command::Stats { input } => stats(&input)?,
    }

    Ok(())
}

fn stats(input: &Path) -> anyhow::Result<()> {
    let data = files::read_source(input).context(format!("reading {}", input.display()))?;
    let freq = FrequencyTable::from_bytes(&data);
    let table = CodeTable::from_frequencies(&freq)
        .context(format!("building codes for {}", input.display()))?;

    println!("Character Frequencies:");
    print!("{freq}");
    println!();
    println!("Huffman Codes:");
    print!("{table}");
    println!();

    let bits = table.encoded_bit_len(&freq);
    println!(
        "{} bytes -> {} payload bits ({:.3} bits/byte)",
        freq.total(),
        bits,
        bits as f64 / freq.total() as f64
    );
    Ok(())
}
