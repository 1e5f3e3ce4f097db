//! AGP Convert CLI entry point
//!
//! Converts AGP layouts between the 4-column and 9-column variants while
//! editing chromosomes along the way.

use agp_convert::core::{ContigSizeTable, RenameTable};
use agp_convert::formats::AgpLayout;
use agp_convert::pipeline::{self, split_keys, PipelineConfig, DEFAULT_GAP_SIZE, DEFAULT_RANK_PREFIX};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Output AGP layout (CLI enum)
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormatArg {
    /// chromosome, contig, strand(0/1), position
    #[value(name = "4")]
    Four,
    /// Standard AGP with resolved coordinates and gap rows
    #[value(name = "9")]
    Nine,
}

impl From<OutputFormatArg> for AgpLayout {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Four => AgpLayout::FourColumn,
            OutputFormatArg::Nine => AgpLayout::NineColumn,
        }
    }
}

#[derive(Parser)]
#[command(name = "agp-convert")]
#[command(about = "Convert AGP files between 4-column and 9-column layouts")]
#[command(version)]
#[command(author = "AGP Convert Contributors")]
struct Cli {
    /// Input AGP file (4 or 9 columns, optionally .gz/.bz2)
    #[arg(short = 'i', long, help_heading = "Basic parameters")]
    input: PathBuf,

    /// Output AGP file (.gz suffix writes gzip)
    #[arg(short = 'o', long, help_heading = "Basic parameters")]
    output: PathBuf,

    /// Output AGP format
    #[arg(short = 'F', long = "output-format", help_heading = "Basic parameters")]
    output_format: OutputFormatArg,

    /// Contig size file (ctg<TAB>size); required for 4-column to 9-column conversion
    #[arg(short = 's', long, help_heading = "Basic parameters")]
    size: Option<PathBuf>,

    /// Gap size in bp between adjacent contigs in 9-column output
    #[arg(
        short = 'g',
        long = "gap-size",
        default_value_t = DEFAULT_GAP_SIZE,
        allow_negative_numbers = true,
        help_heading = "Basic parameters"
    )]
    gap_size: i64,

    /// Keep chromosomes whose id contains any key (comma-separated, e.g. 'chr,RagTag')
    #[arg(long, help_heading = "Changing parameters (select -> filter -> id2id -> reverse)")]
    select: Option<String>,

    /// Remove these substrings from chromosome ids (comma-separated, e.g. '_RagTag,NX_')
    #[arg(long, help_heading = "Changing parameters (select -> filter -> id2id -> reverse)")]
    filter: Option<String>,

    /// ID relation file (id<TAB>new_id) used to rename chromosomes
    #[arg(long, help_heading = "Changing parameters (select -> filter -> id2id -> reverse)")]
    id2id: Option<PathBuf>,

    /// Chromosomes to reverse (comma-separated, e.g. 'chr1,chr2')
    #[arg(long, help_heading = "Changing parameters (select -> filter -> id2id -> reverse)")]
    reverse: Option<String>,

    /// Reorder chromosomes in natural order: 1,2,3...10
    #[arg(long, help_heading = "Output order parameters")]
    nature: bool,

    /// Rename chromosomes by total size, largest first
    #[arg(long = "size-order", alias = "sizeOrder", help_heading = "Output order parameters")]
    size_order: bool,

    /// Prefix for chromosomes renamed by size
    #[arg(long, default_value = DEFAULT_RANK_PREFIX, help_heading = "Output order parameters")]
    prefix: String,
}

impl Cli {
    fn pipeline_config(&self) -> anyhow::Result<PipelineConfig> {
        let mut config = PipelineConfig::new(self.output_format.into());
        config.gap_size = self.gap_size;
        config.select = self.select.as_deref().map(split_keys);
        config.filter = self.filter.as_deref().map(split_keys);
        config.reverse = self.reverse.as_deref().map(split_keys);
        config.natural_order = self.nature;
        config.size_rank_prefix = self.size_order.then(|| self.prefix.clone());

        if let Some(path) = &self.id2id {
            let table = RenameTable::from_file(path)
                .with_context(|| format!("Failed to load ID relation file {:?}", path))?;
            config.rename = Some(table);
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let start = Instant::now();

    let config = cli.pipeline_config()?;
    let size_table = match &cli.size {
        Some(path) => Some(
            ContigSizeTable::from_file(path)
                .with_context(|| format!("Failed to load contig size file {:?}", path))?,
        ),
        None => None,
    };

    eprintln!("Converting AGP file: {:?} -> {:?}", cli.input, cli.output);
    let stats = pipeline::convert_agp(&cli.input, &cli.output, size_table, &config)
        .with_context(|| format!("Failed to convert AGP file {:?}", cli.input))?;
    info!("AGP file converted and saved to {:?}", cli.output);

    eprintln!("\n=== Conversion Statistics ===");
    eprintln!("Input records:   {}", stats.input_records);
    eprintln!("Output rows:     {}", stats.output_rows);
    eprintln!("Chromosomes:     {}", stats.chromosomes);
    eprintln!("Gap rows:        {}", stats.gaps);
    if stats.assembled_bp > 0 {
        eprintln!("Assembled bases: {}", stats.assembled_bp);
    }
    eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());

    Ok(())
}
