//! File-drop ingestion
//!
//! Dropped entries are first prepared (videos and thumbnails persisted through
//! the [`MediaStore`]), then committed in one list replacement. Preparation
//! does not touch the engine, so hosts can run it outside an engine borrow
//! with [`prepare_entries`] between `begin_ingest` and `finish_ingest`.

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::container::add_to_container;
use crate::error::{DesktopError, DesktopResult};
use crate::item::{DesktopItem, FolderData, ImageData, ItemKind, VideoData};
use crate::math::Vec2;
use crate::services::MediaStore;
use crate::types::{new_item_id, ItemId};
use super::{BusyOp, DesktopEngine};

/// Something dropped onto the desktop
#[derive(Clone, Debug, PartialEq)]
pub enum DroppedEntry {
    /// An image the host already has a URL for
    Image { name: String, url: String },
    /// Raw video bytes, optionally with a poster frame
    Video {
        name: String,
        data: Vec<u8>,
        thumbnail: Option<Vec<u8>>,
        duration: Option<f64>,
    },
    /// A directory; its media become a folder
    Directory { name: String, entries: Vec<DroppedEntry> },
}

impl DroppedEntry {
    fn name(&self) -> &str {
        match self {
            DroppedEntry::Image { name, .. }
            | DroppedEntry::Video { name, .. }
            | DroppedEntry::Directory { name, .. } => name,
        }
    }
}

/// An entry ready to become desktop items
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "camelCase")]
pub enum PreparedEntry {
    Media { name: String, kind: ItemKind },
    Folder { name: String, members: Vec<(String, ItemKind)> },
}

/// An entry that could not be imported
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestFailure {
    pub name: String,
    pub message: String,
}

/// Outcome of a drop
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestReport {
    /// Top-level entries created (media items and folders)
    pub created: Vec<ItemId>,
    pub failures: Vec<IngestFailure>,
}

/// Persist what needs persisting and turn entries into item payloads
///
/// Directories are flattened: nested directories contribute their media to
/// the outermost folder. A failing thumbnail only drops the thumbnail.
pub async fn prepare_entries<S: MediaStore>(
    store: &S,
    entries: Vec<DroppedEntry>,
) -> (Vec<PreparedEntry>, Vec<IngestFailure>) {
    let mut prepared = Vec::new();
    let mut failures = Vec::new();

    for entry in entries {
        match entry {
            DroppedEntry::Directory { name, entries } => {
                let mut members = Vec::new();
                for leaf in flatten(entries) {
                    let leaf_name = leaf.name().to_string();
                    match prepare_media(store, leaf).await {
                        Ok(kind) => members.push((leaf_name, kind)),
                        Err(message) => failures.push(IngestFailure { name: leaf_name, message }),
                    }
                }
                prepared.push(PreparedEntry::Folder { name, members });
            }
            media => {
                let name = media.name().to_string();
                match prepare_media(store, media).await {
                    Ok(kind) => prepared.push(PreparedEntry::Media { name, kind }),
                    Err(message) => failures.push(IngestFailure { name, message }),
                }
            }
        }
    }
    (prepared, failures)
}

/// Media leaves of a directory tree, depth first
fn flatten(entries: Vec<DroppedEntry>) -> Vec<DroppedEntry> {
    let mut leaves = Vec::new();
    let mut pending = entries;
    pending.reverse();
    while let Some(entry) = pending.pop() {
        match entry {
            DroppedEntry::Directory { mut entries, .. } => {
                entries.reverse();
                pending.extend(entries);
            }
            leaf => leaves.push(leaf),
        }
    }
    leaves
}

async fn prepare_media<S: MediaStore>(store: &S, entry: DroppedEntry) -> Result<ItemKind, String> {
    match entry {
        DroppedEntry::Image { url, .. } => Ok(ItemKind::Image(ImageData::new(url))),
        DroppedEntry::Video { name, data, thumbnail, duration } => {
            let saved = store.save_video(data, &name).await.map_err(|e| e.message)?;
            let thumbnail_url = match thumbnail {
                Some(bytes) => match store.save_thumbnail(bytes, &format!("{}.jpg", saved.filename)).await {
                    Ok(url) => Some(url),
                    Err(err) => {
                        warn!(video = %saved.filename, error = %err, "thumbnail upload failed");
                        None
                    }
                },
                None => None,
            };
            Ok(ItemKind::Video(VideoData {
                video_url: saved.url,
                thumbnail_url,
                duration,
                ..Default::default()
            }))
        }
        DroppedEntry::Directory { .. } => Err("nested directory".to_string()),
    }
}

impl DesktopEngine {
    /// Claim the ingest slot
    pub fn begin_ingest(&mut self) -> DesktopResult<()> {
        if !self.busy.begin(BusyOp::Ingest) {
            return Err(self.reject(DesktopError::Busy { op: BusyOp::Ingest.label() }));
        }
        Ok(())
    }

    /// Release the ingest slot and commit prepared entries around `point`
    ///
    /// With a container open, media join it and directory contents are added
    /// to it directly (containers do not nest).
    pub fn finish_ingest(
        &mut self,
        prepared: Vec<PreparedEntry>,
        mut failures: Vec<IngestFailure>,
        point: Vec2,
    ) -> IngestReport {
        self.busy.end(BusyOp::Ingest);
        let now = self.now();
        let open = self.open_container.clone();
        let accepts_only_images = open
            .as_deref()
            .and_then(|id| self.item(id))
            .is_some_and(|c| c.as_stack().is_some());

        // Top-level entries in the current view, each a (name, kind, members)
        let mut entries: Vec<(String, ItemKind, Vec<(String, ItemKind)>)> = Vec::new();
        for entry in prepared {
            match (entry, open.is_some()) {
                (PreparedEntry::Media { name, kind }, _) => entries.push((name, kind, Vec::new())),
                (PreparedEntry::Folder { members, .. }, true) => {
                    entries.extend(members.into_iter().map(|(name, kind)| (name, kind, Vec::new())));
                }
                (PreparedEntry::Folder { name, members }, false) => {
                    entries.push((name, ItemKind::Folder(FolderData::default()), members));
                }
            }
        }
        if accepts_only_images {
            entries.retain(|(name, kind, _)| {
                let keep = matches!(kind, ItemKind::Image(_));
                if !keep {
                    failures.push(IngestFailure {
                        name: name.clone(),
                        message: "stacks hold images only".to_string(),
                    });
                }
                keep
            });
        }

        let anchor = self.grid().place(point);
        let positions = self.place_batch(open.as_deref(), anchor, entries.len(), &HashSet::new());
        let grid = self.grid();

        let mut created = Vec::with_capacity(entries.len());
        for ((name, kind, members), position) in entries.into_iter().zip(positions) {
            let id = new_item_id();
            let mut item = DesktopItem::new(id.clone(), name, position, now, kind);
            let mut member_items = Vec::with_capacity(members.len());
            for (i, (member_name, member_kind)) in members.into_iter().enumerate() {
                let cell = grid.place_point(grid.spread_offset(i, self.config.spread_columns));
                member_items.push(DesktopItem::new(new_item_id(), member_name, cell, now, member_kind));
            }
            if let Some(ids) = item.member_ids_mut() {
                *ids = member_items.iter().map(|m| m.id.clone()).collect();
            }
            self.items.push(item);
            self.items.extend(member_items);
            created.push(id);
        }

        if let Some(container_id) = &open {
            if let Err(err) = add_to_container(&mut self.items, container_id, &created, now) {
                warn!(error = %err, "could not add dropped items to the open container");
            }
        }

        if !created.is_empty() {
            self.select_only_ids(created.clone());
            self.commit_items();
        }
        for failure in &failures {
            warn!(entry = %failure.name, error = %failure.message, "dropped entry not imported");
        }
        info!(created = created.len(), failed = failures.len(), "ingested dropped files");
        IngestReport { created, failures }
    }

    /// Import dropped files at `point`
    pub async fn ingest_drop<S: MediaStore>(
        &mut self,
        store: &S,
        entries: Vec<DroppedEntry>,
        point: Vec2,
    ) -> DesktopResult<IngestReport> {
        self.begin_ingest()?;
        let (prepared, failures) = prepare_entries(store, entries).await;
        Ok(self.finish_ingest(prepared, failures, point))
    }
}
