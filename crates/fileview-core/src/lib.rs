//! fileview-core - Core library for fileview
//!
//! This crate contains the attachment models, display attribute derivation,
//! gallery state reducer and controller used by every fileview front end.

pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod query;
pub mod state;
pub mod util;

pub use config::GalleryConfig;
pub use controller::{Applied, GalleryController, PendingFetch, RequestToken};
pub use error::{Error, Result};
pub use models::{AttachmentId, AttachmentRecord, DisplayAttachment, RecordId};
pub use state::GalleryState;
