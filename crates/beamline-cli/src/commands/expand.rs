use super::write_table;
use crate::cli::ExpandArgs;
use crate::config::build_config;
use crate::error::Result;
use beamline::core::io::line::LineDescription;
use beamline::sequences::Sequence;
use beamline::sequences::placement::PlacementSequence;
use tracing::{info, warn};

pub fn run(args: ExpandArgs) -> Result<()> {
    info!("Loading line description from {:?}", &args.line);
    let line = LineDescription::load(&args.line)?;

    info!("Merging configuration from defaults, settings file, line file and CLI arguments...");
    let config = build_config(&args, &line)?;

    let mut sequence = PlacementSequence::from_line(line, config.sequence_config.clone())?;
    let undefined = sequence
        .records()
        .iter()
        .filter(|r| r.positions().is_undefined())
        .count();
    if undefined > 0 {
        warn!(
            "{} element(s) have no position hint and will sit at the running cursor.",
            undefined
        );
    }

    if config.expand {
        let inserted = sequence.expand_counted(config.drift_kind);
        info!(
            "Inserted {} drift(s) into sequence '{}'.",
            inserted,
            sequence.name()
        );
    } else {
        info!("Expansion disabled; writing resolved placements only.");
    }

    write_table(&sequence.to_table(), config.output_path.as_deref())
}
