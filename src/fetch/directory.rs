use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::RetrievalError;
use super::ElementSource;
use crate::propagate::{parse_multi_tle, ElementSet};

/// Serves element sets from `*.tle` / `*.txt` files in a directory.
pub struct DirectorySource {
    tle_dir: PathBuf,
    sets: HashMap<u32, String>,
}

impl DirectorySource {
    pub fn load(tle_dir: PathBuf) -> Result<Self, RetrievalError> {
        if !tle_dir.exists() {
            return Err(RetrievalError::DirectoryNotFound(
                tle_dir.display().to_string(),
            ));
        }

        let mut sets = HashMap::new();
        for entry in fs::read_dir(&tle_dir)? {
            let path = entry?.path();
            if !path.is_file() || !has_tle_extension(&path) {
                continue;
            }
            match read_sets(&path) {
                Ok(found) => sets.extend(found),
                Err(e) => log::warn!("Failed to read TLE file {}: {}", path.display(), e),
            }
        }

        let source = Self { tle_dir, sets };
        log::info!(
            "Loaded {} element sets from {}",
            source.len(),
            source.tle_dir.display()
        );
        Ok(source)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }
}

fn has_tle_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "tle" || ext == "txt")
}

fn read_sets(path: &Path) -> Result<Vec<(u32, String)>, RetrievalError> {
    let content = fs::read_to_string(path)?;
    let mut found = Vec::new();

    for (name, line1, line2) in parse_multi_tle(&content) {
        match ElementSet::from_lines(name.clone(), &line1, &line2) {
            Ok(set) => {
                let text = match name {
                    Some(name) => format!("{}\n{}\n{}\n", name, line1, line2),
                    None => format!("{}\n{}\n", line1, line2),
                };
                found.push((set.catalog_id() as u32, text));
            }
            Err(e) => log::warn!("Skipping element set in {}: {}", path.display(), e),
        }
    }

    Ok(found)
}

impl ElementSource for DirectorySource {
    async fn fetch(&self, catalog_id: u32) -> Result<String, RetrievalError> {
        self.sets
            .get(&catalog_id)
            .cloned()
            .ok_or(RetrievalError::NotFound(catalog_id))
    }
}
