use std::fs::File;
use std::io;
use ron::de::from_reader;
use ron::ser::{to_writer_pretty, PrettyConfig};
// target_set.rs
use serde::{Deserialize, Serialize};
use crate::GenTarget;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TargetSet {
    pub targets: Vec<GenTarget>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, target: GenTarget) {
        self.targets.push(target);
    }

    // Method to write the TargetSet to a file
    pub fn write_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> io::Result<()> {
        let file = File::create(path)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        to_writer_pretty(file, &self.targets, PrettyConfig::default())
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(())
    }

    // Method to read the TargetSet from a file
    pub fn read_from_file<P: AsRef<std::path::Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?; // Map any io::Error

        let targets: Vec<GenTarget> = from_reader(file)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?; // Map ron::de::SpannedError to io::Error

        Ok(TargetSet { targets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use crate::{AmbiguityPolicy, GenTargetExt, Normalization};

    #[test]
    fn test_write_to_file() {
        let mut targets = TargetSet::new();

        targets.gen_target()
            .target_named("packet_structures")
            .normalization(Normalization::CollapseWhitespace)
            .on_ambiguity(AmbiguityPolicy::Reject)
            .build();

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path();

        targets.write_to_file(temp_path).unwrap();

        assert!(temp_file.path().exists());
    }

    #[test]
    fn test_read_from_file() {
        let mut targets = TargetSet::new();

        targets.gen_target()
            .target_named("packet_structures")
            .serialize_marker("pack", "void (char *&) const")
            .deserialize_marker("unpack", "void (char *&)")
            .on_ambiguity(AmbiguityPolicy::Reject)
            .build();

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path();

        targets.write_to_file(temp_path).unwrap();

        let loaded = TargetSet::read_from_file(temp_path).unwrap();

        // Verify that the loaded set contains the correct data
        assert_eq!(loaded.targets.len(), 1);
        let target = &loaded.targets[0];
        assert_eq!(target.name, "packet_structures");
        assert_eq!(target.serialize_marker.name, "pack");
        assert_eq!(target.serialize_marker.type_spelling, "void (char *&) const");
        assert_eq!(target.deserialize_marker.name, "unpack");
        assert_eq!(target.ambiguity, AmbiguityPolicy::Reject);
        // Normalization wasn't touched, so the default survives the round trip
        assert_eq!(target.normalization, Normalization::Exact);
    }
}
