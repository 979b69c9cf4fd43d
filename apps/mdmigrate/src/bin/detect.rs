//! `mdmigrate-detect` entry point: scan a tree and print the report.

use mdmigrate::cli::{self, DetectCli};
use mdmigrate::{config, output, utils, IssueDetector};

fn main() {
    let args: DetectCli = cli::parse_or_exit();
    cli::init_logging(args.verbose);

    let cfg = match config::load_optional(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(e.exit_code());
        }
    };
    let mode = config::resolve_output(args.output, &cfg);

    let mut detector = IssueDetector::new(&args.source_dir);
    let result = detector
        .scan()
        .and_then(|report| output::print_report(report, mode, utils::use_colors()));
    if let Err(e) = result {
        eprintln!("{} {}", utils::error_prefix(), e);
        std::process::exit(e.exit_code());
    }
}
