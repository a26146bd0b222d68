use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, LevelFilter};

use lingea_trd::{format_line, DecodeOutcome, DecodeSummary, MarkupStyle, Result, TrdReader};

#[derive(Parser)]
#[command(name = "trd-decode", about = "Convert a Lingea .trd dictionary to headword<TAB>definition lines")]
struct Cli {
    /// Path to the .trd file
    input: PathBuf,
    /// Markup style: none (0), escaped (1) or markup (2)
    #[arg(short, long, value_enum, default_value_t = MarkupStyle::Markup)]
    out_style: MarkupStyle,
    /// Trace every field read (same as RUST_LOG=trace)
    #[arg(short, long)]
    debug: bool,
    /// Skip record 0
    #[arg(long)]
    skip_first: bool,
    /// Stop at the first record whose padding is not all zeros
    #[arg(long)]
    stop_on_error: bool,
    /// Decode at most N records
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
    /// Decode records on all cores
    #[cfg(feature = "parallel")]
    #[arg(long)]
    parallel: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.debug {
        logger.filter_level(LevelFilter::Trace);
    }
    logger.init();

    match run(&cli) {
        Ok(summary) => {
            eprintln!("{}", summary);
            if summary.all_passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<DecodeSummary> {
    let reader = TrdReader::open(&cli.input)?;
    info!("Copyright: {}", reader.header().copyright);

    let limit = cli.limit.unwrap_or(usize::MAX);
    let results = decode(cli, &reader, limit);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut summary = DecodeSummary::default();

    for (n, result) in results {
        summary.add(&result);
        match result {
            Ok(outcome) => {
                out.write_all(format_line(&outcome, cli.out_style).as_bytes())?;
                if cli.stop_on_error && !outcome.is_well_formed() {
                    error!("Record {} has non-zero padding, stopping", n);
                    break;
                }
            }
            Err(e) if e.is_record_scoped() => {
                if cli.stop_on_error {
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
    }

    out.flush()?;
    Ok(summary)
}

fn decode<'a>(
    cli: &Cli,
    reader: &'a TrdReader,
    limit: usize,
) -> Box<dyn Iterator<Item = (usize, Result<DecodeOutcome>)> + 'a> {
    #[cfg(feature = "parallel")]
    {
        if cli.parallel {
            let first = usize::from(cli.skip_first);
            return Box::new(reader.decode_all_par().into_iter().skip(first).take(limit));
        }
    }

    let records = reader.iter_records();
    let records = if cli.skip_first { records.skip_first() } else { records };
    Box::new(records.take(limit))
}
