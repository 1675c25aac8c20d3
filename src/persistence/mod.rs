pub mod files;
pub mod snapshot;

pub use files::{
    atomic_write, ensure_grove_dir, get_grove_dir, init_local_grove, report_file, state_file,
    LOG_FILE_NAME,
};
pub use snapshot::{load_state, save_state};
