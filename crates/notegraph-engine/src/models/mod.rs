pub mod file_info;
pub mod note;

pub use file_info::FileInfo;
pub use note::{ExportOptions, Note, NoteData, NoteError, WriteOptions};
