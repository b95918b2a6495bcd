pub mod export;
pub mod files;
pub mod snapshot;

pub use export::write_export;
pub use files::{
    atomic_write, default_export_file, ensure_stint_dir, get_stint_dir, init_local_stint,
    read_file, tasks_file,
};
pub use snapshot::{load_snapshot, save_snapshot};
