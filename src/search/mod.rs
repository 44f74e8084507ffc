pub mod matcher;
pub mod source;

pub use matcher::{matches_in, search_file, LineMatch, LineMatches};
pub use source::{FileListSource, NoPromptSource, PromptSource};
