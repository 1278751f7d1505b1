pub mod extract;
pub mod preprocess;
pub mod sequence;
pub mod shell;
pub mod storage;
pub mod store;

pub use extract::{ExtractError, extract_json, strip_code_fences};
pub use sequence::RequestSequence;
pub use shell::ShellState;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{ExperienceStore, HistoryStore, LearnerStore};
