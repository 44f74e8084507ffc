pub mod entry;
pub mod walker;

pub use entry::{format_timestamp, permission_string, EntryRecord, Owner};
pub use walker::{collect_tree, list_directory, Listing, ListOptions, Node, WalkEvent};
