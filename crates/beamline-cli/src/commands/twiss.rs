use super::write_table;
use crate::cli::TwissArgs;
use crate::error::Result;
use beamline::sequences::Sequence;
use beamline::sequences::twiss::TwissSequence;
use tracing::info;

pub fn run(args: TwissArgs) -> Result<()> {
    let columns: Vec<&str> = args.columns.iter().map(String::as_str).collect();
    let selection = if columns.is_empty() {
        None
    } else {
        Some(columns.as_slice())
    };

    info!("Loading Twiss table from {:?}", &args.input);
    let sequence = TwissSequence::from_tfs_path(
        &args.input,
        selection,
        args.from.as_deref(),
        args.to.as_deref(),
    )?;

    match (sequence.particle(), sequence.kinematics()) {
        (Some(particle), Some(kinematics)) => info!(
            "Sequence '{}': {} at p = {:.6} GeV/c (gamma = {:.6}).",
            sequence.name(),
            particle,
            kinematics.momentum(),
            kinematics.gamma()
        ),
        (Some(particle), None) => info!(
            "Sequence '{}': {} without kinematics in header.",
            sequence.name(),
            particle
        ),
        _ => info!("Sequence '{}' loaded.", sequence.name()),
    }

    write_table(&sequence.to_table(), args.output.as_deref())
}
