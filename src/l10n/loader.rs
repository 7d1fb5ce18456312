//! Folder walking that feeds parsed documents into the registry.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use globset::Glob;
use log::{debug, info};
use walkdir::WalkDir;

use super::format::{DictionaryFormat, Json, Xml};
use super::registry::Resources;
use super::types::error::{ResourceError, Result};
use super::types::models::ResourceDictionary;

/// Loads dictionaries from folders into a [`Resources`] registry.
///
/// Relative folders are resolved against the root path given at construction
/// (for a web application, its content root). Files are visited recursively in
/// file-name order, so when two files define the same key for the same culture
/// the one visited last wins.
#[derive(Debug)]
pub struct DictionaryLoader<'a> {
    resources: &'a Resources,
    root: PathBuf,
}

impl<'a> DictionaryLoader<'a> {
    /// # Errors
    /// Returns [`ResourceError::InvalidRoot`] if `root` is blank.
    pub fn new(resources: &'a Resources, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if root.as_os_str().to_string_lossy().trim().is_empty() {
            return Err(ResourceError::InvalidRoot);
        }

        Ok(Self {
            resources,
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads all files under `folder` (including subfolders) whose name matches
    /// `pattern`, parsing each one with `parser`.
    ///
    /// The first file that fails to open, parse or merge stops the walk; files
    /// loaded before it stay loaded.
    ///
    /// # Errors
    /// - [`ResourceError::InvalidPattern`] if `pattern` is not a valid glob
    /// - [`ResourceError::Io`] if the folder cannot be walked
    /// - [`ResourceError::Load`] naming the file that failed
    pub fn load_with<F, D>(&self, folder: impl AsRef<Path>, pattern: &str, parser: F) -> Result<&Self>
    where
        F: Fn(&mut dyn Read) -> Result<D>,
        D: ResourceDictionary,
    {
        let folder = self.resolve(folder.as_ref());
        let matcher = Glob::new(pattern)
            .map_err(|e| ResourceError::InvalidPattern(e.to_string()))?
            .compile_matcher();

        info!("Loading dictionaries matching '{}' from {}", pattern, folder.display());

        let mut loaded = 0usize;
        for entry in WalkDir::new(&folder).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() || !matcher.is_match(entry.file_name()) {
                continue;
            }

            let path = entry.path();
            debug!("Loading dictionary {}", path.display());
            self.load_file(path, &parser).map_err(|source| ResourceError::Load {
                path: path.to_path_buf(),
                source: Box::new(source),
            })?;
            loaded += 1;
        }

        info!("Loaded {} dictionaries from {}", loaded, folder.display());
        Ok(self)
    }

    /// Loads all files of format `F` under `folder`.
    pub fn load<F: DictionaryFormat>(&self, folder: impl AsRef<Path>) -> Result<&Self> {
        debug!("Loading {} dictionaries", F::DEBUG_NAME);
        self.load_with(folder, F::PATTERN, F::parse)
    }

    /// Loads JSON dictionaries (`*.json`) under `folder`.
    pub fn load_json(&self, folder: impl AsRef<Path>) -> Result<&Self> {
        self.load::<Json>(folder)
    }

    /// Loads XML dictionaries (`*.xml`) under `folder`.
    pub fn load_xml(&self, folder: impl AsRef<Path>) -> Result<&Self> {
        self.load::<Xml>(folder)
    }

    fn load_file<F, D>(&self, path: &Path, parser: &F) -> Result<()>
    where
        F: Fn(&mut dyn Read) -> Result<D>,
        D: ResourceDictionary,
    {
        let mut reader = BufReader::new(File::open(path)?);
        let dictionary = parser(&mut reader)?;
        self.resources.load(dictionary)
    }

    fn resolve(&self, folder: &Path) -> PathBuf {
        if folder.is_absolute() {
            folder.to_path_buf()
        } else {
            self.root.join(folder)
        }
    }
}
