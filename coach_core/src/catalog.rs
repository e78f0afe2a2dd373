//! Built-in content catalogs and catalog loading.
//!
//! The default exercise, yoga and meditation libraries ship embedded as CSV
//! and are parsed once per process. Custom catalogs use the same columns:
//!
//! ```text
//! name,media,image,category,focus_area,duration,goal,level,description
//! ```
//!
//! Row order is kept as-is; it decides tie-breaks during matching.

use crate::normalize::normalize;
use crate::{Catalog, CatalogEntry, CatalogKind, Config, Error, Result};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

static EXERCISES_CSV: &str = include_str!("../data/exercises.csv");
static YOGA_CSV: &str = include_str!("../data/yoga.csv");
static MEDITATIONS_CSV: &str = include_str!("../data/meditations.csv");

/// Cached default catalogs - parsed once and shared by every request
static DEFAULT_EXERCISES: Lazy<Catalog> =
    Lazy::new(|| build_embedded(CatalogKind::Exercise, EXERCISES_CSV));
static DEFAULT_YOGA: Lazy<Catalog> = Lazy::new(|| build_embedded(CatalogKind::Yoga, YOGA_CSV));
static DEFAULT_MEDITATIONS: Lazy<Catalog> =
    Lazy::new(|| build_embedded(CatalogKind::Meditation, MEDITATIONS_CSV));

/// Get a reference to the cached built-in catalog for `kind`
pub fn default_catalog(kind: CatalogKind) -> &'static Catalog {
    match kind {
        CatalogKind::Exercise => &DEFAULT_EXERCISES,
        CatalogKind::Yoga => &DEFAULT_YOGA,
        CatalogKind::Meditation => &DEFAULT_MEDITATIONS,
    }
}

fn build_embedded(kind: CatalogKind, data: &str) -> Catalog {
    // The embedded files are part of the build; a parse failure is a bug.
    Catalog::from_csv_reader(kind, data.as_bytes())
        .unwrap_or_else(|e| panic!("embedded {} catalog is invalid: {}", kind, e))
}

/// Filters for browsing a catalog
#[derive(Clone, Debug, Default)]
pub struct CatalogQuery {
    /// Case-insensitive substring of the entry name
    pub search: Option<String>,
    /// Case-insensitive substring of the focus area or category
    pub focus: Option<String>,
}

impl Catalog {
    pub fn new(kind: CatalogKind, entries: Vec<CatalogEntry>) -> Self {
        Self { kind, entries }
    }

    /// Read a catalog from CSV
    pub fn from_csv_reader<R: Read>(kind: CatalogKind, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut entries = Vec::new();
        for row in rdr.deserialize() {
            let entry: CatalogEntry = row?;
            entries.push(entry);
        }

        Ok(Self::new(kind, entries))
    }

    /// Read and validate a catalog file
    pub fn from_csv_path(kind: CatalogKind, path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_csv_reader(kind, file)?;

        let errors = catalog.validate();
        if !errors.is_empty() {
            return Err(Error::CatalogValidation(format!(
                "{} catalog at {:?}: {}",
                kind,
                path,
                errors.join("; ")
            )));
        }

        tracing::info!(
            "Loaded {} {} entries from {:?}",
            catalog.len(),
            kind,
            path
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact (case-insensitive) lookup by canonical name
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Entries matching the query filters, in catalog order
    pub fn search(&self, query: &CatalogQuery) -> Vec<&CatalogEntry> {
        let search = query.search.as_ref().map(|s| s.to_lowercase());
        let focus = query.focus.as_ref().map(|s| s.to_lowercase());

        self.entries
            .iter()
            .filter(|e| match &search {
                Some(s) => e.name.to_lowercase().contains(s.as_str()),
                None => true,
            })
            .filter(|e| match &focus {
                Some(f) => [&e.focus_area, &e.category]
                    .into_iter()
                    .flatten()
                    .any(|v| v.to_lowercase().contains(f.as_str())),
                None => true,
            })
            .collect()
    }

    /// Validate the catalog for matchability
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                errors.push(format!("Entry #{} has empty name", idx + 1));
                continue;
            }
            if normalize(&entry.name).is_empty() {
                errors.push(format!(
                    "Entry '{}' has no letters or digits and can never match",
                    entry.name
                ));
            }
            if !seen.insert(entry.name.to_lowercase()) {
                errors.push(format!("Duplicate entry name '{}'", entry.name));
            }
        }

        errors
    }
}

/// The three catalogs used at runtime, built once at startup
#[derive(Clone, Debug)]
pub struct Catalogs {
    pub exercises: Catalog,
    pub yoga: Catalog,
    pub meditations: Catalog,
}

impl Catalogs {
    /// Built-in catalogs only
    pub fn builtin() -> Self {
        Self {
            exercises: default_catalog(CatalogKind::Exercise).clone(),
            yoga: default_catalog(CatalogKind::Yoga).clone(),
            meditations: default_catalog(CatalogKind::Meditation).clone(),
        }
    }

    /// Built-in catalogs with any overrides from the config applied
    pub fn load(config: &Config) -> Result<Self> {
        let mut catalogs = Self::builtin();

        for kind in CatalogKind::ALL {
            if let Some(path) = config.catalogs.path_for(kind) {
                *catalogs.get_mut(kind) = Catalog::from_csv_path(kind, path)?;
            }
        }

        Ok(catalogs)
    }

    pub fn get(&self, kind: CatalogKind) -> &Catalog {
        match kind {
            CatalogKind::Exercise => &self.exercises,
            CatalogKind::Yoga => &self.yoga,
            CatalogKind::Meditation => &self.meditations,
        }
    }

    fn get_mut(&mut self, kind: CatalogKind) -> &mut Catalog {
        match kind {
            CatalogKind::Exercise => &mut self.exercises,
            CatalogKind::Yoga => &mut self.yoga,
            CatalogKind::Meditation => &mut self.meditations,
        }
    }
}
