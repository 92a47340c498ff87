//! PlanScale Core Library
//!
//! Platform-agnostic engine for measuring floor-plan images: scale
//! calibration, measurement lines, area polygons, furniture footprints
//! and text notes, with undo/redo and a versioned project format.

pub mod calibration;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod history;
pub mod input;
pub mod library;
pub mod plan;
pub mod project;
pub mod scale_bar;
pub mod storage;
pub mod store;
pub mod tools;

pub use calibration::{Calibration, CalibrationError, CalibrationState};
pub use config::PlanConfig;
pub use entities::{
    Annotation, AreaPolygon, Entity, EntityId, EntityKind, EntityTrait, FurnitureItem, MeasureLine,
};
pub use history::{History, MAX_UNDO_HISTORY};
pub use input::{Modifiers, MouseButton, PointerEvent, Shortcut};
pub use library::{
    FurnitureLibrary, FurnitureTemplate, LibraryError, LibraryState, MAX_RECENT_ITEMS, NewTemplate,
};
pub use plan::{ImageBitmap, Plan, PlanError, PlanEvent};
pub use project::{ProjectData, ProjectError};
pub use scale_bar::ScaleBar;
pub use storage::{MemoryStorage, Storage, StorageError, StorageResult};
pub use store::EntityStore;
pub use tools::{Commit, Interaction, Mode};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
