use std::collections::HashSet;
use std::path::PathBuf;

use crate::io::local::LocalStore;
use crate::io::remote::{GatewayError, RemoteStore};
use crate::model::collection::ListCollection;
use crate::model::config::Paths;
use crate::model::todo_list::TodoList;
use crate::ops::collection_ops::CollectionError;
use crate::parse::{
    FormatError, IndexFile, check_skylink, index_of, parse_index, parse_list, serialize_index,
    serialize_list,
};

/// Error type for loading and saving lists
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("could not fetch {skylink}: {source}")]
    Fetch {
        skylink: String,
        source: GatewayError,
    },
    #[error("could not upload '{name}': {source}")]
    Publish { name: String, source: GatewayError },
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Collection(#[from] CollectionError),
}

/// What a successful save published
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// `(name, skylink)` for each list uploaded, in collection order
    pub published: Vec<(String, String)>,
}

/// The local files and the content store, threaded through every load
/// and save.
pub struct Workspace<L, R> {
    pub local: L,
    pub remote: R,
    pub paths: Paths,
}

impl<L: LocalStore, R: RemoteStore> Workspace<L, R> {
    pub fn new(local: L, remote: R, paths: Paths) -> Self {
        Workspace {
            local,
            remote,
            paths,
        }
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Startup load.
    ///
    /// A missing save file gives the empty collection. A malformed one is
    /// copied to the backup path and also gives the empty collection, as
    /// does an unreadable one. Store failures while fetching lists are returned.
    pub fn load_collection(&self) -> Result<ListCollection, SyncError> {
        match self.read_collection() {
            Ok(Some(coll)) => Ok(coll),
            Ok(None) => {
                log::debug!("no save file at {}", self.paths.save_file.display());
                Ok(ListCollection::new())
            }
            Err(SyncError::Format(e)) => {
                self.back_up_save_file();
                log::warn!(
                    "{} ({}); starting with no lists",
                    e,
                    self.paths.save_file.display()
                );
                Ok(ListCollection::new())
            }
            Err(e @ SyncError::ReadError { .. }) => {
                log::warn!("{}; starting with no lists", e);
                Ok(ListCollection::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Strict load: `Ok(None)` if there is no save file, `Err` if it is
    /// malformed or a list cannot be fetched.
    pub fn read_collection(&self) -> Result<Option<ListCollection>, SyncError> {
        let raw = match self.local.read(&self.paths.save_file) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(source) => {
                return Err(SyncError::ReadError {
                    path: self.paths.save_file.clone(),
                    source,
                });
            }
        };

        let IndexFile { current, records } = parse_index(&raw)?;
        log::info!("loading {} lists", records.len());

        let mut lists = Vec::with_capacity(records.len());
        let mut names = HashSet::new();
        for record in records {
            let list = if record.skylink.is_empty() {
                TodoList::published(record.name, "", Vec::new())
            } else {
                self.hydrate_list(&record.name, &record.skylink)?
            };
            if !names.insert(list.name.clone()) {
                return Err(FormatError::DuplicateName(list.name).into());
            }
            lists.push(list);
        }

        let count = lists.len();
        ListCollection::from_parts(current, lists)
            .map(Some)
            .ok_or_else(|| FormatError::CurrentOutOfRange { current, count }.into())
    }

    fn back_up_save_file(&self) {
        let backup = self.paths.backup_file();
        let result = self
            .local
            .read(&self.paths.save_file)
            .and_then(|raw| match raw {
                Some(raw) => self.local.write(&backup, &raw),
                None => Ok(()),
            });
        match result {
            Ok(()) => log::warn!("backed up save file to {}", backup.display()),
            Err(e) => log::warn!("could not back up save file: {}", e),
        }
    }

    /// Fetch a list by skylink, stage it in the cache, and parse it.
    ///
    /// `cache_name` picks the cache file; the list's own name comes from
    /// the fetched content.
    pub fn hydrate_list(&self, cache_name: &str, skylink: &str) -> Result<TodoList, SyncError> {
        log::debug!("fetching '{}' from {}", cache_name, skylink);
        let raw = self
            .remote
            .fetch(skylink)
            .map_err(|source| SyncError::Fetch {
                skylink: skylink.to_string(),
                source,
            })?;

        let cache = self.paths.cache_file(cache_name);
        self.local
            .write(&cache, &raw)
            .map_err(|source| SyncError::WriteError {
                path: cache,
                source,
            })?;

        Ok(parse_list(&raw, skylink)?)
    }

    /// Open a list by skylink.
    ///
    /// If a known list was last published under it, that list becomes
    /// current. Otherwise the list is fetched, appended clean, and made
    /// current. Returns the list's index.
    pub fn load_by_skylink(
        &self,
        coll: &mut ListCollection,
        skylink: &str,
    ) -> Result<usize, SyncError> {
        if let Some(index) = coll.position_by_skylink(skylink) {
            coll.set_current(index);
            return Ok(index);
        }

        check_skylink(skylink)?;
        let list = self.hydrate_list(skylink, skylink)?;
        if coll.contains_name(&list.name) {
            return Err(CollectionError::DuplicateName(list.name).into());
        }
        let index = coll.push(list);
        coll.set_current(index);
        coll.mark_dirty();
        Ok(index)
    }

    // -----------------------------------------------------------------------
    // Saving
    // -----------------------------------------------------------------------

    /// Upload one list and record its new skylink.
    ///
    /// The serialized list is staged in the cache file first. On failure
    /// the list keeps its old skylink and stays dirty.
    pub fn publish_list(&self, list: &mut TodoList) -> Result<(), SyncError> {
        let raw = serialize_list(list)?;

        let cache = self.paths.cache_file(&list.name);
        self.local
            .write(&cache, raw.as_bytes())
            .map_err(|source| SyncError::WriteError {
                path: cache,
                source,
            })?;

        let skylink = self
            .remote
            .publish(raw.as_bytes())
            .map_err(|source| SyncError::Publish {
                name: list.name.clone(),
                source,
            })?;
        check_skylink(&skylink)?;

        log::debug!("published '{}' as {}", list.name, skylink);
        list.skylink = skylink;
        list.saved = true;
        Ok(())
    }

    /// Publish every dirty list in order, then write the save file.
    ///
    /// A collection in which two lists share a name is refused before
    /// anything is published. The first failure stops the save and the
    /// save file is left as it was. Lists published before the failure
    /// keep their new skylinks.
    pub fn save_all(&self, coll: &mut ListCollection) -> Result<SaveReport, SyncError> {
        check_unique_names(coll)?;
        let mut report = SaveReport::default();
        for index in coll.dirty_indices() {
            let Some(list) = coll.get_mut(index) else {
                continue;
            };
            self.publish_list(list)?;
            report
                .published
                .push((list.name.clone(), list.skylink.clone()));
        }

        self.save_index(coll)?;
        coll.saved = true;
        log::info!(
            "saved {} lists ({} uploaded)",
            coll.len(),
            report.published.len()
        );
        Ok(report)
    }

    /// Write the save file for the collection as it stands.
    ///
    /// Refused if two lists share a name, since the file could not be
    /// loaded back.
    pub fn save_index(&self, coll: &ListCollection) -> Result<(), SyncError> {
        check_unique_names(coll)?;
        let text = serialize_index(&index_of(coll))?;
        self.local
            .write(&self.paths.save_file, text.as_bytes())
            .map_err(|source| SyncError::WriteError {
                path: self.paths.save_file.clone(),
                source,
            })
    }
}

fn check_unique_names(coll: &ListCollection) -> Result<(), CollectionError> {
    match coll.duplicate_name() {
        Some(name) => Err(CollectionError::DuplicateName(name.to_string())),
        None => Ok(()),
    }
}
