//! Substation layout loader
//!
//! Reads `coords.csv` (`;`-separated, one header row, integer `x;y` per
//! substation) from the environment configuration folder. The layout is
//! optional: a missing folder, a missing file or a malformed row yields
//! `None` and a warning.

use std::path::Path;

use domain::{NetworkLayout, SubstationCoord};
use tracing::{debug, warn};

/// File name of the layout inside the environment configuration folder
pub const COORDS_FILE_NAME: &str = "coords.csv";

/// Parse the first two fields of a row; trailing columns are ignored
fn parse_row(record: &csv::StringRecord) -> Result<SubstationCoord, String> {
    let field = |idx: usize| -> Result<i32, String> {
        let raw = record
            .get(idx)
            .ok_or_else(|| format!("missing column {}", idx + 1))?;
        raw.parse::<i32>()
            .map_err(|e| format!("column {}: {raw:?}: {e}", idx + 1))
    };
    Ok(SubstationCoord {
        x: field(0)?,
        y: field(1)?,
    })
}

/// Load the substation layout from `folder`, if present and well-formed
pub fn load_network_layout(folder: &Path) -> Option<NetworkLayout> {
    let path = folder.join(COORDS_FILE_NAME);

    let mut reader = match csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(&path)
    {
        Ok(reader) => reader,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Network layout unavailable");
            return None;
        },
    };

    let mut substations = Vec::new();
    for (line, row) in reader.records().enumerate() {
        match row.map_err(|e| e.to_string()).and_then(|r| parse_row(&r)) {
            Ok(coord) => substations.push(coord),
            Err(e) => {
                // +2: one for the header, one for 1-based numbering
                warn!(path = %path.display(), line = line + 2, error = %e, "Malformed network layout");
                return None;
            },
        }
    }

    debug!(substations = substations.len(), "Network layout loaded");
    Some(NetworkLayout::new(substations))
}
