//! Input handling module
//! Media type detection and the selected resume file

pub mod file_detector;
pub mod selection;

pub use file_detector::MediaType;
pub use selection::{SelectedFile, MAX_FILE_BYTES};
