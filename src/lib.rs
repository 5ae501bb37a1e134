//! # vicon_csv - Vicon Tracker CSV importer
//!
//! Reads rigid-body tracks exported by Vicon Tracker and resamples them
//! onto a host timeline. Provides:
//! - Header parsing and tracked object discovery
//! - Lazy resampling with shortest-path rotation blending
//! - A fixed rigid offset applied in the tracked body's frame
//! - C FFI for embedding in host applications
//!
//! ## Quick Start
//! ```no_run
//! use vicon_csv::{ImportConfig, Importer, OutputSample, TargetObject};
//! use std::fs::File;
//!
//! let importer = Importer::new(File::open("capture.csv").unwrap()).unwrap();
//! for object in importer.objects() {
//!     println!("{} at column {}", object.name, object.column);
//! }
//!
//! let config = ImportConfig {
//!     output_frame_rate: 30.0,
//!     target_object: TargetObject::Name("Wand".into()),
//!     ..ImportConfig::default()
//! };
//! let mut samples: Vec<OutputSample> = Vec::new();
//! let summary = importer.run(&config, &mut samples).unwrap();
//! println!("{} frames, last {:?}", summary.samples, summary.last_frame);
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod ffi;
pub mod importer;
pub mod interpolate;
pub mod math;
mod offset;
pub mod resample;
pub mod table;
pub mod types;

pub use config::{ImportConfig, TargetObject};
pub use error::ImportError;
pub use extract::PoseExtractor;
pub use importer::{resolve_object, Importer};
pub use interpolate::interpolate;
pub use math::{Quat, Vec3};
pub use resample::{ImportSummary, PoseSink, Resampler};
pub use table::{RawRow, TableReader, TrackedObject};
pub use types::*;

/// Result type alias for vicon_csv operations.
pub type Result<T> = std::result::Result<T, ImportError>;
