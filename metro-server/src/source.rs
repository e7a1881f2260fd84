//! Loading stop and edge records from semicolon-separated files.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::graph::{BuildError, EdgeRecord, Graph, StopRecord, build_graph};

/// Errors that can occur while loading network data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// File could not be opened or read
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be parsed
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Raw stop and edge records as served to the front-end.
///
/// Serializes as `{ "stops": [...], "edges": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NetworkData {
    pub stops: Vec<StopRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl NetworkData {
    pub fn new(stops: Vec<StopRecord>, edges: Vec<EdgeRecord>) -> Self {
        Self { stops, edges }
    }

    /// Load both record files.
    pub fn load(stops_path: &Path, edges_path: &Path) -> Result<Self, SourceError> {
        let stops = read_records(stops_path)?;
        let edges = read_records(edges_path)?;

        info!(
            stops = stops.len(),
            edges = edges.len(),
            "loaded network records"
        );

        Ok(Self { stops, edges })
    }

    /// Build the routing graph from these records.
    pub fn graph(&self) -> Result<Graph, SourceError> {
        Ok(build_graph(&self.stops, &self.edges)?)
    }
}

/// Read every row of a semicolon-separated file with a header line.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SourceError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|source| SourceError::Io {
        path: display.clone(),
        source,
    })?;

    csv::ReaderBuilder::new()
        .delimiter(b';')
        .trim(csv::Trim::All)
        .from_reader(file)
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|source| SourceError::Csv {
            path: display,
            source,
        })
}
