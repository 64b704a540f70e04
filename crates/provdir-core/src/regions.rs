use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One paginated search space on the directory: a locality within a region,
/// e.g. `Austin` in `TX`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchTarget {
    pub region: String,
    pub locality: String,
}

impl std::fmt::Display for SearchTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.locality, self.region)
    }
}

/// Region code → locality names, as stored in the regions file.
pub type RegionMap = BTreeMap<String, Vec<String>>;

/// Load and validate the region configuration from a YAML (or JSON) file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_regions(path: &Path) -> Result<RegionMap, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RegionsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let regions: RegionMap =
        serde_yaml::from_str(&content).map_err(ConfigError::RegionsFileParse)?;

    validate_regions(&regions)?;

    Ok(regions)
}

/// Flatten a region map into search targets.
///
/// Regions come out in key order and localities in file order, so two runs
/// over the same file discover pages in the same sequence. A locality listed
/// twice under one region yields a single target.
#[must_use]
pub fn targets_from_regions(regions: &RegionMap) -> Vec<SearchTarget> {
    let mut seen = HashSet::new();
    regions
        .iter()
        .flat_map(|(region, localities)| {
            localities.iter().map(move |locality| SearchTarget {
                region: region.trim().to_string(),
                locality: locality.trim().to_string(),
            })
        })
        .filter(|target| seen.insert(target.clone()))
        .collect()
}

fn validate_regions(regions: &RegionMap) -> Result<(), ConfigError> {
    for (region, localities) in regions {
        if region.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region name must be non-empty".to_string(),
            ));
        }

        if let Some(pos) = localities.iter().position(|l| l.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "region '{region}' has an empty locality at position {pos}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "regions_test.rs"]
mod tests;
