use std::convert::TryFrom;
use std::error::Error;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use gptscan::disk::LogicalBlockSize;
use gptscan::ScanConfig;

/// List the GPT partitions of a disk image whose filesystem is recognized.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Disk image to inspect
    image: PathBuf,

    /// Logical sector size in bytes (512 or 4096)
    #[arg(long, default_value = "512", value_parser = parse_sector_size)]
    sector_size: LogicalBlockSize,

    /// Also probe slots whose partition type GUID is zero
    #[arg(long, action)]
    include_unused: bool,

    /// Log progress to stderr, repeat for more detail (needs the `log` feature)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                std::process::exit(1)
            }
        },
    };

    if let Err(e) = run(args) {
        eprintln!("Failed to scan image: {}", e);
        std::process::exit(1)
    }
}

fn parse_sector_size(s: &str) -> Result<LogicalBlockSize, String> {
    let bytes: u64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    LogicalBlockSize::try_from(bytes).map_err(|e| e.to_string())
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "log")]
    logger::init(args.verbose);

    let cfg = ScanConfig::new()
        .logical_block_size(args.sector_size)
        .skip_unused(!args.include_unused);
    let records = cfg.scan(&args.image)?;

    for record in records {
        println!("{record}");
    }

    Ok(())
}

#[cfg(feature = "log")]
mod logger {
    use log::{LevelFilter, Metadata, Record};

    static LOGGER: Logger = Logger;

    struct Logger;

    impl log::Log for Logger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                eprintln!("{} - {}", record.level(), record.args());
            }
        }

        fn flush(&self) {}
    }

    pub fn init(verbosity: u8) {
        let level = match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(level);
        }
    }
}
