//! Desktop workspace engine for the image studio
//!
//! This crate provides the spatial layout and interaction core of the
//! studio's desktop view:
//! - Grid snapping, viewport bounds and free-cell search
//! - Folders and stacks with exclusive membership
//! - Selection, marquee and multi-item drag with collision resolution
//! - Copy/cut/paste, stacking, reorganize, merge and file-drop import
//!
//! ## Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`math`]: Geometry types (`Vec2`, `Point`, `Rect`, `Size`)
//! - [`grid`]: Snapping, bounds and the occupancy resolver
//! - [`item`]: The desktop item model and display classification
//! - [`container`]: Folder and stack membership
//! - [`input`]: Pointer state machine
//! - [`services`]: Contracts for the backend collaborators
//!
//! The host owns the authoritative item list. It hands the list to the
//! engine, forwards pointer events, and drains [`HostRequest`]s, which
//! include whole-list replacements after every mutation.
//!
//! ## Example
//!
//! ```rust
//! use studio_desktop::{DesktopEngine, HostRequest, Vec2};
//!
//! let mut engine = DesktopEngine::new(1280.0, 800.0);
//! let folder_id = engine.create_folder(Vec2::new(10.0, 10.0)).unwrap();
//!
//! let requests = engine.take_requests();
//! assert!(matches!(&requests[0], HostRequest::ItemsChanged { items } if items[0].id == folder_id));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: All state management is pure Rust, testable without browser
//! 2. **Time Abstraction**: Timestamps come from an injectable [`Clock`]
//! 3. **Host Owns Effects**: The engine only queues requests, never performs I/O

pub mod container;
pub mod grid;
pub mod input;
pub mod item;
pub mod math;
pub mod services;

mod clipboard;
mod clock;
mod config;
mod engine;
mod error;
mod host;
mod menu;
mod selection;
mod types;
mod viewport;

// WASM exports (only available with "wasm" feature)
#[cfg(feature = "wasm")]
mod wasm;
#[cfg(feature = "wasm")]
pub use wasm::*;

// Re-export core types for convenience
pub use clipboard::{ClipboardAction, ClipboardState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::DesktopConfig;
pub use error::{DesktopError, DesktopResult};
pub use grid::{GridBounds, GridCell, GridLayout, OccupancyResolver, OccupiedCells};
pub use host::{HostRequest, ItemAction, Notice, NoticeLevel};
pub use input::{DragState, InputResult, InputRouter, Modifiers};
pub use item::{DesktopItem, DisplayState, FolderData, ImageData, ItemKind, ItemType, StackData, VideoData};
pub use math::{Point, Rect, Size, Vec2};
pub use menu::{menu_actions, ContextMenu, MenuAction, MenuContext};
pub use selection::Selection;
pub use types::{new_item_id, ItemId, Timestamp};
pub use viewport::Viewport;

pub use engine::{
    prepare_entries, AutoStackReport, BusyFlags, BusyOp, DesktopEngine, DroppedEntry, HistoryImage,
    IngestFailure, IngestReport, PreparedEntry,
};
