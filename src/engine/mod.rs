//! Engine Boundary
//!
//! File emission for synthesized signals. The synthesis core never
//! touches the filesystem; everything that does lives here.

pub mod io;

pub use io::{
    clear_wave_files, default_data_dir, ensure_data_dir, export_signal, wave_file_name,
    ExportFormat, DEFAULT_SAMPLE_RATE,
};
