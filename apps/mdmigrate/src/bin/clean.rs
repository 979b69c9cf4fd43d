//! `mdmigrate-clean` entry point: copy a tree with the selected fixes applied.

use mdmigrate::cli::{self, CleanCli};
use mdmigrate::models::CleanSummary;
use mdmigrate::{config, output, utils, MarkdownCleaner, MigrateError};

fn run(args: &CleanCli) -> Result<CleanSummary, MigrateError> {
    let cfg = config::load_optional(args.config.as_deref())?;
    let opts = config::resolve_clean(&args.flags(), &cfg);
    log::debug!("clean options: {:?}", opts);

    let mut cleaner = MarkdownCleaner::new(&args.source_dir, &args.output_dir);
    let changed = cleaner.clean(&opts)?.to_vec();
    Ok(CleanSummary {
        output: cleaner.output().to_string_lossy().to_string(),
        changed,
        renamed: opts.normalize_names.then(|| cleaner.renames().to_vec()),
    })
}

fn main() {
    let args: CleanCli = cli::parse_or_exit();
    cli::init_logging(args.verbose);

    match run(&args) {
        Ok(summary) => output::print_clean(&summary, utils::use_colors()),
        Err(e) => {
            eprintln!("{} {}", utils::error_prefix(), e);
            std::process::exit(e.exit_code());
        }
    }
}
