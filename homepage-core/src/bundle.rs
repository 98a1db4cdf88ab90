//! Build artifacts and their zip serialization.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::BundleError;

/// Contents of one file in a [`Bundle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleFile {
    Text(String),
    Binary(Vec<u8>),
}

impl BundleFile {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            BundleFile::Text(s) => s.as_bytes(),
            BundleFile::Binary(b) => b,
        }
    }
}

/// The generated files of one build, in the order they are archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    archive_name: String,
    files: Vec<(String, BundleFile)>,
}

impl Bundle {
    pub fn new(archive_name: impl Into<String>) -> Self {
        Self {
            archive_name: archive_name.into(),
            files: Vec::new(),
        }
    }

    /// Add a file. Names must be unique within the bundle.
    pub fn insert(&mut self, name: impl Into<String>, file: BundleFile) -> Result<(), BundleError> {
        let name = name.into();
        if self.files.iter().any(|(n, _)| *n == name) {
            return Err(BundleError::DuplicateEntry(name));
        }
        self.files.push((name, file));
        Ok(())
    }

    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    pub fn get(&self, name: &str) -> Option<&BundleFile> {
        self.files.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Serialize the bundle as a zip archive.
    ///
    /// Entries carry a fixed timestamp and permissions, so the same bundle
    /// always produces byte-identical archives.
    pub fn to_zip(&self) -> Result<Vec<u8>, BundleError> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, file) in &self.files {
            log::debug!("archiving {name} ({} bytes)", file.as_bytes().len());
            zip.start_file(name.as_str(), options)?;
            zip.write_all(file.as_bytes())?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Read;

    fn sample() -> Bundle {
        let mut b = Bundle::new("homepage.zip");
        b.insert("index.html", BundleFile::Text("<p>hi</p>".into())).unwrap();
        b.insert("logo.bin", BundleFile::Binary(vec![0, 159, 146, 150])).unwrap();
        b
    }

    #[test]
    fn duplicate_entry_rejected() {
        let mut b = sample();
        let err = b.insert("index.html", BundleFile::Text(String::new())).unwrap_err();
        assert!(matches!(err, BundleError::DuplicateEntry(name) if name == "index.html"));
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn zip_contains_entries_in_order() {
        let bytes = sample().to_zip().unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, vec!["index.html", "logo.bin"]);

        let mut binary = Vec::new();
        archive.by_name("logo.bin").unwrap().read_to_end(&mut binary).unwrap();
        assert_eq!(binary, vec![0, 159, 146, 150]);
    }

    #[test]
    fn zip_is_byte_identical_across_runs() {
        assert_eq!(sample().to_zip().unwrap(), sample().to_zip().unwrap());
    }
}
