use crate::core::models::library::LibraryEntry;
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Default number of library rows held in memory per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 1_000_000;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Library '{path}' has no '{column}' column")]
    MissingColumn { path: String, column: String },
}

/// Streaming scanner over a CSV compound library.
///
/// The library may be arbitrarily larger than available memory, so rows are
/// surfaced in bounded-size chunks: each call to [`next_chunk`] reads at most
/// `chunk_size` rows and returns them as owned [`LibraryEntry`] values. Only
/// the `smiles` column and the configured identifier column are retained;
/// all other columns are ignored.
///
/// [`next_chunk`]: LibraryScanner::next_chunk
pub struct LibraryScanner {
    reader: csv::Reader<File>,
    path: String,
    smiles_idx: usize,
    identifier_idx: usize,
    chunk_size: usize,
}

impl LibraryScanner {
    /// Opens a library file and locates the join columns in its header.
    pub fn open(
        path: &Path,
        identifier_column: &str,
        chunk_size: usize,
    ) -> Result<Self, LibraryError> {
        let display = path.to_string_lossy().to_string();
        let mut reader = csv::Reader::from_path(path).map_err(|e| LibraryError::Csv {
            path: display.clone(),
            source: e,
        })?;

        let headers = reader.headers().map_err(|e| LibraryError::Csv {
            path: display.clone(),
            source: e,
        })?;
        let smiles_idx = Self::column_index(headers, "smiles").ok_or_else(|| {
            LibraryError::MissingColumn {
                path: display.clone(),
                column: "smiles".to_string(),
            }
        })?;
        let identifier_idx = Self::column_index(headers, identifier_column).ok_or_else(|| {
            LibraryError::MissingColumn {
                path: display.clone(),
                column: identifier_column.to_string(),
            }
        })?;

        Ok(Self {
            reader,
            path: display,
            smiles_idx,
            identifier_idx,
            chunk_size: chunk_size.max(1),
        })
    }

    fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
        headers.iter().position(|h| h.trim() == name)
    }

    /// Reads the next chunk of at most `chunk_size` rows.
    ///
    /// Returns `Ok(None)` once the library is exhausted. Each chunk is fully
    /// materialized before it is returned; there is no partial emission.
    pub fn next_chunk(&mut self) -> Result<Option<Vec<LibraryEntry>>, LibraryError> {
        let mut chunk = Vec::new();
        let mut record = csv::StringRecord::new();

        while chunk.len() < self.chunk_size {
            let more = self
                .reader
                .read_record(&mut record)
                .map_err(|e| LibraryError::Csv {
                    path: self.path.clone(),
                    source: e,
                })?;
            if !more {
                break;
            }
            let (Some(smiles), Some(identifier)) =
                (record.get(self.smiles_idx), record.get(self.identifier_idx))
            else {
                // Short row without the join columns carries nothing to match.
                continue;
            };
            chunk.push(LibraryEntry {
                smiles: smiles.to_string(),
                identifier: identifier.to_string(),
            });
        }

        if chunk.is_empty() {
            Ok(None)
        } else {
            Ok(Some(chunk))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_library(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.csv");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn scans_rows_in_bounded_chunks() {
        let (_dir, path) = write_library(
            "smiles,zincid\n\
             CCO,ZINC000001\n\
             CCN,ZINC000002\n\
             CCC,ZINC000003\n",
        );

        let mut scanner = LibraryScanner::open(&path, "zincid", 2).unwrap();

        let first = scanner.next_chunk().unwrap().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].smiles, "CCO");
        assert_eq!(first[0].identifier, "ZINC000001");

        let second = scanner.next_chunk().unwrap().unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].identifier, "ZINC000003");

        assert!(scanner.next_chunk().unwrap().is_none());
    }

    #[test]
    fn ignores_extra_columns() {
        let (_dir, path) = write_library(
            "tranche,smiles,zincid,mw\n\
             H04,CCO,ZINC000001,46.07\n",
        );

        let mut scanner = LibraryScanner::open(&path, "zincid", 100).unwrap();
        let chunk = scanner.next_chunk().unwrap().unwrap();

        assert_eq!(chunk.len(), 1);
        assert_eq!(chunk[0].smiles, "CCO");
        assert_eq!(chunk[0].identifier, "ZINC000001");
    }

    #[test]
    fn missing_identifier_column_is_an_error() {
        let (_dir, path) = write_library("smiles,name\nCCO,ethanol\n");

        let result = LibraryScanner::open(&path, "zincid", 100);

        assert!(matches!(
            result,
            Err(LibraryError::MissingColumn { column, .. }) if column == "zincid"
        ));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let result = LibraryScanner::open(&dir.path().join("absent.csv"), "zincid", 100);

        assert!(result.is_err());
    }
}
