use crate::cli::TruncateArgs;
use crate::error::{CliError, Result};
use gatsolkit::workflows;
use tracing::info;

pub async fn run(args: TruncateArgs) -> Result<()> {
    if args.max_residues < 0 {
        return Err(CliError::Argument(format!(
            "--max-residues must not be negative (got {})",
            args.max_residues
        )));
    }

    info!(
        "Truncating chain {} of {:?} after residue {}",
        args.chain, args.input, args.max_residues
    );
    let stats = tokio::task::block_in_place(|| {
        workflows::truncate::run(&args.input, &args.output, args.chain, args.max_residues)
    })?;

    println!(
        "Removed {} coordinate line(s). Truncated structure written to {}",
        stats.coordinates_dropped,
        args.output.display()
    );
    if stats.malformed_passed > 0 {
        println!(
            "Note: {} coordinate line(s) could not be parsed and were kept as-is.",
            stats.malformed_passed
        );
    }
    Ok(())
}
