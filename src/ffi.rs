//! C FFI layer for vicon_csv.
//!
//! Provides an opaque handle-based API for host applications.
//! The generated C header is written to `include/vicon_csv.h` by cbindgen.

use crate::config::{ImportConfig, TargetObject};
use crate::error::LastError;
use crate::importer::Importer;
use crate::resample::PoseSink;
use crate::types::{InterpolationOffset, Pose, RotationEncoding};
use std::ffi::{c_char, c_int, c_void, CStr, CString};
use std::io::Cursor;

/// Last error message for C consumers.
static LAST_ERROR: LastError = LastError::new();

/// Opaque importer handle for C consumers.
pub struct VcImporter {
    importer: Option<Importer<Cursor<Vec<u8>>>>,
    names: Vec<CString>,
}

/// Pose data in C-compatible layout.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VcPose {
    /// Position [x, y, z] in meters.
    pub position: [f64; 3],
    /// Quaternion [qx, qy, qz, qw].
    pub quaternion: [f64; 4],
}

impl From<&Pose> for VcPose {
    fn from(pose: &Pose) -> Self {
        Self {
            position: pose.position,
            quaternion: pose.orientation.to_array(),
        }
    }
}

/// Import settings in C-compatible layout.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct VcImportConfig {
    /// Capture rate of the table in frames per second.
    pub input_frame_rate: f64,
    /// Frame rate of the host timeline.
    pub output_frame_rate: f64,
    /// Null-terminated object name. NULL or empty selects `object_index`.
    pub object_name: *const c_char,
    pub object_index: u32,
    /// 0 = Euler, 1 = axis-angle.
    pub rotation_encoding: c_int,
    /// Offset rotation as XYZ Euler angles in degrees.
    pub offset_rotation_deg: [f64; 3],
    /// Offset translation in meters, in the tracked body's frame.
    pub offset_translation: [f64; 3],
}

/// Called once per output frame (1-based).
pub type VcSampleCallback =
    Option<extern "C" fn(user_data: *mut c_void, frame: u64, pose: *const VcPose)>;

/// Called after the last frame with the highest frame emitted.
pub type VcCompleteCallback = Option<extern "C" fn(user_data: *mut c_void, last_frame: u64)>;

struct CallbackSink {
    on_sample: VcSampleCallback,
    on_complete: VcCompleteCallback,
    user_data: *mut c_void,
}

impl PoseSink for CallbackSink {
    fn on_sample(&mut self, frame: u64, pose: &Pose) {
        if let Some(cb) = self.on_sample {
            let out = VcPose::from(pose);
            cb(self.user_data, frame, &out);
        }
    }

    fn on_complete(&mut self, last_frame: u64) {
        if let Some(cb) = self.on_complete {
            cb(self.user_data, last_frame);
        }
    }
}

/// Convert the C settings into an [`ImportConfig`].
///
/// # Safety
/// `object_name` must be null or point to a null-terminated string.
unsafe fn import_config(config: &VcImportConfig) -> ImportConfig {
    let name = if config.object_name.is_null() {
        String::new()
    } else {
        CStr::from_ptr(config.object_name)
            .to_string_lossy()
            .into_owned()
    };
    let target_object = if name.is_empty() {
        TargetObject::Index(config.object_index as usize)
    } else {
        TargetObject::Name(name)
    };

    let r = config.offset_rotation_deg;
    ImportConfig {
        input_frame_rate: config.input_frame_rate,
        output_frame_rate: config.output_frame_rate,
        target_object,
        rotation_encoding: match config.rotation_encoding {
            0 => RotationEncoding::Euler,
            _ => RotationEncoding::AxisAngle,
        },
        offset: InterpolationOffset::from_euler_degrees(r[0], r[1], r[2], config.offset_translation),
    }
}

/// Default settings: 100 fps in, 24 fps out, first object, axis-angle,
/// no offset.
#[no_mangle]
pub extern "C" fn vc_default_config() -> VcImportConfig {
    let defaults = ImportConfig::default();
    VcImportConfig {
        input_frame_rate: defaults.input_frame_rate,
        output_frame_rate: defaults.output_frame_rate,
        object_name: std::ptr::null(),
        object_index: 0,
        rotation_encoding: defaults.rotation_encoding as c_int,
        offset_rotation_deg: [0.0; 3],
        offset_translation: [0.0; 3],
    }
}

/// Parse the header of an in-memory capture table.
/// The bytes are copied; the caller keeps ownership of `data`.
/// Returns NULL on error (check vc_last_error()).
///
/// # Safety
/// `data` must point to `len` readable bytes, or be null.
#[no_mangle]
pub unsafe extern "C" fn vc_importer_open(data: *const u8, len: usize) -> *mut VcImporter {
    LAST_ERROR.clear();
    if data.is_null() {
        LAST_ERROR.set_message("data pointer is null");
        return std::ptr::null_mut();
    }
    let bytes = std::slice::from_raw_parts(data, len).to_vec();

    match Importer::new(Cursor::new(bytes)) {
        Ok(importer) => {
            let names = importer
                .objects()
                .iter()
                .map(|o| CString::new(o.name.as_str()).unwrap_or_default())
                .collect();
            Box::into_raw(Box::new(VcImporter {
                importer: Some(importer),
                names,
            }))
        }
        Err(e) => {
            LAST_ERROR.set(&e);
            std::ptr::null_mut()
        }
    }
}

/// Free an importer handle.
///
/// # Safety
/// `handle` must be a pointer returned by `vc_importer_open`, or null.
#[no_mangle]
pub unsafe extern "C" fn vc_importer_close(handle: *mut VcImporter) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Number of tracked objects listed in the header.
///
/// # Safety
/// `handle` must be a valid importer pointer, or null.
#[no_mangle]
pub unsafe extern "C" fn vc_importer_object_count(handle: *const VcImporter) -> c_int {
    if handle.is_null() {
        return -1;
    }
    let handle = &*handle;
    handle.names.len() as c_int
}

/// Name of the tracked object at `index`. Returns a pointer to a
/// null-terminated string valid for the lifetime of the handle, or NULL.
///
/// # Safety
/// `handle` must be a valid importer pointer, or null.
#[no_mangle]
pub unsafe extern "C" fn vc_importer_object_name(
    handle: *const VcImporter,
    index: c_int,
) -> *const c_char {
    if handle.is_null() || index < 0 {
        return std::ptr::null();
    }
    let handle = &*handle;
    match handle.names.get(index as usize) {
        Some(name) => name.as_ptr(),
        None => std::ptr::null(),
    }
}

/// Resample the configured object, calling `on_sample` for every output
/// frame and `on_complete` once at the end. A handle can be run once.
/// Returns the number of frames emitted, or -1 on error.
///
/// # Safety
/// `handle` must be a valid importer pointer and `config` a valid settings
/// pointer (either may be null). The callbacks receive `user_data` as is.
#[no_mangle]
pub unsafe extern "C" fn vc_importer_run(
    handle: *mut VcImporter,
    config: *const VcImportConfig,
    on_sample: VcSampleCallback,
    on_complete: VcCompleteCallback,
    user_data: *mut c_void,
) -> c_int {
    LAST_ERROR.clear();
    if handle.is_null() || config.is_null() {
        LAST_ERROR.set_message("handle or config pointer is null");
        return -1;
    }
    let handle = &mut *handle;
    let importer = match handle.importer.take() {
        Some(importer) => importer,
        None => {
            LAST_ERROR.set_message("importer has already been run");
            return -1;
        }
    };

    let config = import_config(&*config);
    let mut sink = CallbackSink {
        on_sample,
        on_complete,
        user_data,
    };

    match importer.run(&config, &mut sink) {
        Ok(summary) => summary.samples.min(c_int::MAX as usize) as c_int,
        Err(e) => {
            LAST_ERROR.set(&e);
            -1
        }
    }
}

/// Get the last error message. Returns NULL if no error.
/// The returned pointer is valid until the next vicon_csv API call.
#[no_mangle]
pub extern "C" fn vc_last_error() -> *const c_char {
    LAST_ERROR.as_ptr()
}
