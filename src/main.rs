//! BedFusion: sort, merge, pad, split and deduplicate BED files
//!
//! Usage: bedfusion [OPTIONS] <INPUTS>...

use anyhow::Context;
use clap::parser::ValueSource;
use clap::{CommandFactory, FromArgMatches, Parser};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use bedfusion::bed::BedFile;
use bedfusion::config::{ConfigFile, Options};
use bedfusion::genome::Genome;
use bedfusion::pipeline;

#[derive(Parser)]
#[command(name = "bedfusion")]
#[command(version)]
#[command(
    about = "Sort, merge, pad, split and deduplicate BED files",
    long_about = "Sort, merge, pad, split and deduplicate BED files.\n\n\
        Read priority order: 1. flags 2. configuration file 3. environment variables"
)]
struct Cli {
    /// BED file path(s). Several files are joined as if they were one file (use - for stdin)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Path to a TOML configuration file with keys named like the long flags
    #[arg(short, long, env = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Path to the output file. If unset the output is written to stdout
    #[arg(short, long, env = "OUTPUT_FILE")]
    output: Option<PathBuf>,

    /// Tab separated file whose first two columns are chromosome and length
    /// (e.g. a fasta index)
    #[arg(long, env = "FASTA_IDX")]
    fasta_idx: Option<PathBuf>,

    /// Column holding the strand (1-based). Regions on different strands are not merged
    #[arg(long, env = "STRAND_COL", default_value_t = 0, help_heading = "Input")]
    strand_col: usize,

    /// Column holding the feature (1-based). Regions of different features are not merged
    #[arg(long, env = "FEAT_COL", default_value_t = 0, help_heading = "Input")]
    feat_col: usize,

    /// Sorting: lex (1 < 10 < 2 < MT < X), nat (1 < 2 < 10 < MT < X),
    /// ccs (custom order, see --chr-order), fidx (fasta index order)
    #[arg(short, long, env = "SORT_TYPE", default_value = "lex", help_heading = "Sorting")]
    sort_type: String,

    /// Comma separated chromosome order for --sort-type=ccs. Chromosomes not
    /// listed are sorted naturally after the listed ones
    #[arg(long, env = "CHR_ORDER", value_delimiter = ',', help_heading = "Sorting")]
    chr_order: Vec<String>,

    /// Remove duplicated lines
    #[arg(short, long, env = "DEDUPLICATE", help_heading = "Sorting")]
    deduplicate: bool,

    /// Do not merge regions
    #[arg(long, env = "NO_MERGE", help_heading = "Merging")]
    no_merge: bool,

    /// Overlap between regions to be merged. Touching regions merge at 0, use -1
    /// to only merge overlapping regions
    #[arg(
        long,
        env = "OVERLAP",
        default_value_t = 0,
        allow_hyphen_values = true,
        help_heading = "Merging"
    )]
    overlap: i64,

    /// Bases added on both sides of every region, before merging
    #[arg(
        long,
        env = "PADDING",
        default_value_t = 0,
        allow_hyphen_values = true,
        help_heading = "Padding"
    )]
    padding: i64,

    /// What to do with chromosomes missing from --fasta-idx: err, warn or force
    #[arg(long, env = "PADDING_TYPE", default_value = "err", help_heading = "Padding")]
    padding_type: String,

    /// Lowest coordinate a padded start may take (0 or 1)
    #[arg(
        long,
        env = "FIRST_BASE",
        default_value_t = 1,
        allow_hyphen_values = true,
        help_heading = "Padding"
    )]
    first_base: i64,

    /// Split regions into smaller regions
    #[arg(long, env = "FISSION", help_heading = "Fission")]
    fission: bool,

    /// Fission split size in bp. Must be > 0
    #[arg(
        long,
        env = "SPLIT_SIZE",
        default_value_t = 100,
        allow_hyphen_values = true,
        help_heading = "Fission"
    )]
    split_size: i64,
}

impl Cli {
    fn into_options(self) -> Options {
        Options {
            inputs: self.inputs,
            output: self.output,
            fasta_idx: self.fasta_idx,
            strand_col: self.strand_col,
            feat_col: self.feat_col,
            sort_type: self.sort_type,
            chr_order: self.chr_order,
            deduplicate: self.deduplicate,
            no_merge: self.no_merge,
            overlap: self.overlap,
            padding: self.padding,
            padding_type: self.padding_type,
            first_base: self.first_base,
            fission: self.fission,
            split_size: self.split_size,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let config_path = cli.config.clone();
    let mut options = cli.into_options();
    if let Some(path) = config_path {
        let file = ConfigFile::from_path(&path)
            .with_context(|| format!("can't read config file {}", path.display()))?;
        file.apply(&mut options, |id| {
            matches.value_source(id) == Some(ValueSource::CommandLine)
        });
    }

    let config = options.validate()?;

    let mut bed = BedFile::new();
    for input in &config.inputs {
        let read = if input.to_string_lossy() == "-" {
            bed.read_from(io::stdin().lock(), config.columns)
        } else {
            bed.read_path(input, config.columns)
        };
        read.with_context(|| format!("can't read bed file {}", input.display()))?;
    }
    log::debug!("read {} lines from {} input(s)", bed.lines.len(), config.inputs.len());

    let genome = config
        .fasta_idx
        .as_ref()
        .map(|path| {
            Genome::from_file(path)
                .with_context(|| format!("can't read fasta index file {}", path.display()))
        })
        .transpose()?;

    let fused = pipeline::run(&config, bed.lines, genome.as_ref())?;
    for warning in &fused.warnings {
        log::warn!("{}", warning);
    }

    let result = BedFile {
        header: bed.header,
        lines: fused.lines,
    };
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create output file {}", path.display()))?;
            write_output(&result, file)?;
        }
        None => write_output(&result, io::stdout().lock())?,
    }
    Ok(())
}

fn write_output<W: Write>(bed: &BedFile, output: W) -> io::Result<()> {
    let mut buf_output = BufWriter::with_capacity(256 * 1024, output);
    bed.write(&mut buf_output)?;
    buf_output.flush()
}
