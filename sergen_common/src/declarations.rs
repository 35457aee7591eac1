use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

pub const SERGEN_DIR: &str = ".sergen";
pub const DECLARATIONS_FILE_SUFFIX: &str = "_declarations.json";

/// Opaque, stable key a front end assigns to one structure declaration.
///
/// For a libclang front end this is the cursor's USR. sergen never looks
/// inside it; it is only hashed, ordered, and printed in diagnostics.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct DeclarationId(String);

impl DeclarationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeclarationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A method name paired with the exact type spelling the front end reports
/// for it, qualifiers and whitespace included.
///
/// Two signatures are equal iff both strings are equal. Any tolerance for
/// spelling variations lives behind the normalization seam in
/// `sergen_gen_impl`, not here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub name: String,
    pub type_spelling: String,
}

impl Signature {
    pub fn new(name: impl Into<String>, type_spelling: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_spelling: type_spelling.into(),
        }
    }
}

/// A callable member of a structure, as reported by the front end.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub type_spelling: String,
}

impl Method {
    pub fn new(name: impl Into<String>, type_spelling: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_spelling: type_spelling.into(),
        }
    }

    pub fn signature(&self) -> Signature {
        Signature::new(self.name.clone(), self.type_spelling.clone())
    }
}

/// A data member of a structure. Field order within a structure is the
/// serialized byte order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub type_spelling: String,
}

impl Field {
    pub fn new(name: impl Into<String>, type_spelling: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_spelling: type_spelling.into(),
        }
    }
}

/// One candidate structure declaration: its spelling plus the member
/// methods and fields the front end saw, in declaration order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Structure {
    /// The type name as it appears in source, used to qualify the
    /// generated method definitions.
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Structure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_methods(mut self, methods: Vec<Method>) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_fields(mut self, fields: Vec<Field>) -> Self {
        self.fields = fields;
        self
    }
}

/// Everything a front end reported for a compilation pass: a mapping from
/// declaration identity to declaration content.
///
/// A front end dumps one of these per translation unit as
/// `<translation_unit>_declarations.json` under `.sergen/`; the dumps for a
/// whole build are merged back into a single map before filtering. The map
/// is immutable for the duration of a filter-and-generate pass.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeclarationMap {
    /// Name of the translation unit this map was collected from. After a
    /// merge, the first non-empty name wins.
    pub translation_unit: String,
    /// Keyed by the front end's opaque identity. `BTreeMap` so that a
    /// full-map pass visits structures in a stable order regardless of the
    /// order dumps arrived in.
    pub structures: BTreeMap<DeclarationId, Structure>,
    /// Base directory for dump files (not serialized)
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Default for DeclarationMap {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationMap {
    /// Creates an empty map with the default dump directory (.sergen)
    pub fn new() -> Self {
        Self {
            translation_unit: String::new(),
            structures: BTreeMap::new(),
            base_dir: PathBuf::from(SERGEN_DIR),
        }
    }

    /// Creates an empty map with a custom dump directory
    pub fn with_base_dir(dir_path: impl AsRef<Path>) -> Self {
        Self {
            translation_unit: String::new(),
            structures: BTreeMap::new(),
            base_dir: dir_path.as_ref().to_path_buf(),
        }
    }

    pub fn insert(&mut self, id: DeclarationId, structure: Structure) {
        self.structures.insert(id, structure);
    }

    pub fn get(&self, id: &DeclarationId) -> Option<&Structure> {
        self.structures.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DeclarationId, &Structure)> {
        self.structures.iter()
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Serialize this map to a file in the base directory with a name
    /// based on the translation unit
    pub fn serialize_to_file(&self) -> Result<PathBuf> {
        if self.translation_unit.is_empty() {
            return Err(anyhow::anyhow!(
                "Cannot serialize DeclarationMap with empty translation_unit"
            ));
        }

        // Ensure the base directory exists
        fs::create_dir_all(&self.base_dir).context(format!(
            "Failed to create directory: {}",
            self.base_dir.display()
        ))?;

        // Create a predictable filename using just the translation unit name
        let filename = format!("{}{}", self.translation_unit, DECLARATIONS_FILE_SUFFIX);
        let file_path = self.base_dir.join(&filename);

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&file_path)
            .context(format!(
                "Failed to open file for writing: {}",
                file_path.display()
            ))?;

        serde_json::to_writer_pretty(file, &self).context(format!(
            "Failed to serialize DeclarationMap to: {}",
            file_path.display()
        ))?;

        Ok(file_path)
    }

    /// Load all declaration dumps from the default .sergen directory and
    /// return the merged result
    pub fn load_all_dumps() -> Result<DeclarationMap> {
        let (map, _) = Self::load_all_dumps_from_dir(&PathBuf::from(SERGEN_DIR))?;
        Ok(map)
    }

    /// Load all declaration dumps from a specific directory and return the
    /// merged result along with the translation unit names that were found.
    ///
    /// Files are visited in sorted filename order, so when two dumps carry
    /// the same declaration identity the merge result is deterministic:
    /// the later filename wins.
    pub fn load_all_dumps_from_dir(dir_path: &Path) -> Result<(DeclarationMap, Vec<String>)> {
        if !dir_path.exists() {
            return Err(anyhow::anyhow!(
                "Directory not found: {}",
                dir_path.display()
            ));
        }

        let mut aggregated = DeclarationMap::with_base_dir(dir_path);
        let mut unit_names = Vec::new();

        let entries = fs::read_dir(dir_path)
            .context(format!("Failed to read directory: {}", dir_path.display()))?;

        // Collect and sort first; read_dir order is platform-dependent
        let mut paths: Vec<PathBuf> = entries.filter_map(Result::ok).map(|e| e.path()).collect();
        paths.sort();

        let mut dumps_found = false;
        for path in paths {
            if let Some(filename) = path.file_name().and_then(|f| f.to_str()) {
                // Look specifically for our deterministic *_declarations.json pattern
                if filename.ends_with(DECLARATIONS_FILE_SUFFIX) {
                    let content = fs::read_to_string(&path)
                        .context(format!("Failed to read file: {}", path.display()))?;

                    let map: DeclarationMap = serde_json::from_str(&content)
                        .context(format!("Failed to parse JSON from: {}", path.display()))?;

                    dumps_found = true;

                    if !unit_names.contains(&map.translation_unit) {
                        unit_names.push(map.translation_unit.clone());
                    }

                    aggregated.merge(&map);
                }
            }
        }

        if !dumps_found {
            return Err(anyhow::anyhow!(
                "No declaration dump files found in {}",
                dir_path.display()
            ));
        }

        Ok((aggregated, unit_names))
    }

    /// Clean up all dump files from the base directory
    pub fn clean_dump_files(&self) -> Result<()> {
        if !self.base_dir.exists() {
            return Ok(()); // Nothing to clean if directory doesn't exist
        }

        let entries = fs::read_dir(&self.base_dir).context(format!(
            "Failed to read directory: {}",
            self.base_dir.display()
        ))?;

        for entry in entries.filter_map(Result::ok) {
            let path = entry.path();
            if let Some(filename) = path.file_name().and_then(|f| f.to_str()) {
                if filename.ends_with(DECLARATIONS_FILE_SUFFIX) {
                    let _ = fs::remove_file(&path); // Ignore errors on deletion
                }
            }
        }

        Ok(())
    }

    /// Merge another DeclarationMap into this one. Colliding identities
    /// are overwritten by `other`.
    fn merge(&mut self, other: &DeclarationMap) {
        if self.translation_unit.is_empty() {
            self.translation_unit = other.translation_unit.clone();
        }

        for (id, structure) in &other.structures {
            self.structures.insert(id.clone(), structure.clone());
        }
    }
}
