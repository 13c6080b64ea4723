//! Desktop item model
//!
//! Items are a struct of common fields plus a tagged [`ItemKind`] payload,
//! so adding a new kind is a compile-checked change everywhere it matters.

mod display;
#[allow(clippy::module_inception)]
mod item;
mod kind;

pub use display::{classify, DisplayState};
pub use item::DesktopItem;
pub use kind::{FolderData, ImageData, ItemKind, ItemType, StackData, VideoData};
