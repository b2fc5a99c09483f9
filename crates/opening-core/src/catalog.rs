//! Position and evaluation catalogs.
//!
//! Both are loaded once from tab-separated tables (`identity<TAB>value`,
//! one per line) and treated as read-only afterwards.

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::{CatalogError, OracleError};
use crate::evaluation::Evaluation;
use crate::oracle::RulesOracle;

/// Frequently-played positions with their counts and known opening names.
///
/// Positions keep the order they were inserted in (the positions table is
/// written most-frequent first), which fixes the id assigned to each output
/// record.
#[derive(Debug, Clone, Default)]
pub struct PositionCatalog {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
    names: HashMap<String, String>,
}

impl PositionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a position, or replace the frequency of one already present.
    pub fn insert_position(&mut self, identity: impl Into<String>, frequency: u64) {
        let identity = identity.into();
        match self.index.get(&identity) {
            Some(&i) => self.entries[i].1 = frequency,
            None => {
                self.index.insert(identity.clone(), self.entries.len());
                self.entries.push((identity, frequency));
            }
        }
    }

    pub fn insert_name(&mut self, identity: impl Into<String>, name: impl Into<String>) {
        self.names.insert(identity.into(), name.into());
    }

    pub fn frequency(&self, identity: &str) -> Option<u64> {
        self.index.get(identity).map(|&i| self.entries[i].1)
    }

    pub fn name(&self, identity: &str) -> Option<&str> {
        self.names.get(identity).map(String::as_str)
    }

    /// Positions with their frequencies, in insertion order.
    pub fn positions(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(id, freq)| (id.as_str(), *freq))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Read `identity<TAB>frequency` rows.
    pub fn read_positions<R: BufRead>(&mut self, reader: R) -> Result<usize, CatalogError> {
        let mut added = 0;
        for_each_row(reader, |line, identity, value| {
            let frequency = value.parse::<u64>().map_err(|_| CatalogError::InvalidValue {
                line,
                field: "frequency",
                value: value.to_string(),
            })?;
            self.insert_position(identity, frequency);
            added += 1;
            Ok(())
        })?;
        Ok(added)
    }

    /// Read `identity<TAB>name` rows. Later rows win.
    pub fn read_names<R: BufRead>(&mut self, reader: R) -> Result<usize, CatalogError> {
        let mut added = 0;
        for_each_row(reader, |_, identity, name| {
            self.insert_name(identity, name);
            added += 1;
            Ok(())
        })?;
        Ok(added)
    }

    pub fn load_positions<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, CatalogError> {
        self.read_positions(BufReader::new(File::open(path)?))
    }

    pub fn load_names<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, CatalogError> {
        self.read_names(BufReader::new(File::open(path)?))
    }
}

/// Engine evaluations by identity.
#[derive(Debug, Clone, Default)]
pub struct EvaluationCatalog {
    evaluations: HashMap<String, Evaluation>,
}

impl EvaluationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, identity: impl Into<String>, evaluation: Evaluation) {
        self.evaluations.insert(identity.into(), evaluation);
    }

    pub fn get(&self, identity: &str) -> Option<Evaluation> {
        self.evaluations.get(identity).copied()
    }

    pub fn len(&self) -> usize {
        self.evaluations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluations.is_empty()
    }

    /// Read `identity<TAB>centipawns` rows. When `keep` is given, rows for
    /// other identities are skipped without being stored.
    pub fn read<R: BufRead>(
        &mut self,
        reader: R,
        keep: Option<&HashSet<String>>,
    ) -> Result<usize, CatalogError> {
        let mut added = 0;
        for_each_row(reader, |line, identity, value| {
            if keep.is_some_and(|k| !k.contains(identity)) {
                return Ok(());
            }
            let cp = value.parse::<i32>().map_err(|_| CatalogError::InvalidValue {
                line,
                field: "evaluation",
                value: value.to_string(),
            })?;
            self.insert(identity, Evaluation::centipawns(cp));
            added += 1;
            Ok(())
        })?;
        Ok(added)
    }

    pub fn load<P: AsRef<Path>>(
        &mut self,
        path: P,
        keep: Option<&HashSet<String>>,
    ) -> Result<usize, CatalogError> {
        self.read(BufReader::new(File::open(path)?), keep)
    }
}

impl FromIterator<(String, Evaluation)> for EvaluationCatalog {
    fn from_iter<I: IntoIterator<Item = (String, Evaluation)>>(iter: I) -> Self {
        Self {
            evaluations: iter.into_iter().collect(),
        }
    }
}

/// Every cataloged position plus every position one legal move away from
/// one. These are the only evaluations ranking can ever look up.
pub fn neighborhood<O: RulesOracle>(
    catalog: &PositionCatalog,
    oracle: &O,
) -> Result<HashSet<String>, OracleError> {
    let mut identities = HashSet::with_capacity(catalog.len() * 8);
    for (identity, _) in catalog.positions() {
        identities.insert(identity.to_string());
        for mv in oracle.legal_moves(identity)? {
            identities.insert(mv.resulting_identity);
        }
    }
    debug!(positions = identities.len(), "Explored neighbor positions");
    Ok(identities)
}

fn for_each_row<R, F>(reader: R, mut f: F) -> Result<(), CatalogError>
where
    R: BufRead,
    F: FnMut(usize, &str, &str) -> Result<(), CatalogError>,
{
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let row = line.trim_end_matches(['\r', '\n']);
        if row.is_empty() {
            continue;
        }
        let (identity, value) = row.split_once('\t').ok_or_else(|| CatalogError::MalformedRow {
            line: i + 1,
            content: row.to_string(),
        })?;
        f(i + 1, identity, value)?;
    }
    Ok(())
}
