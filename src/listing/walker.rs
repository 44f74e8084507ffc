use crate::error::{Result, ToolError};
use crate::listing::entry::EntryRecord;
use serde::Serialize;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub recursive: bool,
    pub follow_links: bool,
}

/// One step of a lazy directory traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkEvent {
    Entry(EntryRecord),
    /// Events up to the matching `ExitDir` belong to this subdirectory.
    EnterDir {
        name: String,
        path: PathBuf,
        depth: usize,
    },
    ExitDir,
}

/// A listing collected into a tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf(EntryRecord),
    Branch {
        name: String,
        path: PathBuf,
        children: Vec<Node>,
    },
}

/// Lazy traversal of one directory. Entries come in OS enumeration order;
/// the first error ends the walk.
pub struct Listing {
    entries: walkdir::IntoIter,
    recursive: bool,
    open_dirs: usize,
    pending: VecDeque<WalkEvent>,
    done: bool,
}

impl Listing {
    fn record(entry: &DirEntry) -> Result<EntryRecord> {
        let metadata = entry.metadata()?;
        let name = entry.file_name().to_string_lossy().into_owned();
        EntryRecord::from_metadata(name, &metadata).map_err(|e| ToolError::from_io(entry.path(), e))
    }

    fn push_entry(&mut self, entry: DirEntry) -> Result<()> {
        // An entry at depth d sits inside d - 1 open subdirectories.
        while self.open_dirs >= entry.depth() {
            self.pending.push_back(WalkEvent::ExitDir);
            self.open_dirs -= 1;
        }

        if self.recursive && entry.file_type().is_dir() {
            trace!(path = %entry.path().display(), "entering directory");
            self.pending.push_back(WalkEvent::EnterDir {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().to_path_buf(),
                depth: entry.depth(),
            });
            self.open_dirs += 1;
        } else {
            let record = Self::record(&entry)?;
            self.pending.push_back(WalkEvent::Entry(record));
        }
        Ok(())
    }
}

impl Iterator for Listing {
    type Item = Result<WalkEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            if self.done {
                return None;
            }

            match self.entries.next() {
                Some(Ok(entry)) => {
                    if let Err(e) = self.push_entry(entry) {
                        self.done = true;
                        self.pending.clear();
                        return Some(Err(e));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    self.pending.clear();
                    return Some(Err(e.into()));
                }
                None => {
                    self.done = true;
                    for _ in 0..self.open_dirs {
                        self.pending.push_back(WalkEvent::ExitDir);
                    }
                    self.open_dirs = 0;
                }
            }
        }
    }
}

/// Start listing `path`. The root is checked up front so a bad path fails
/// before any entry is produced.
pub fn list_directory<P: AsRef<Path>>(path: P, options: ListOptions) -> Result<Listing> {
    let root = path.as_ref();

    let metadata = fs::metadata(root).map_err(|e| ToolError::from_io(root, e))?;
    if !metadata.is_dir() {
        return Err(ToolError::wrong_kind(root, "directory"));
    }
    fs::read_dir(root).map_err(|e| ToolError::from_io(root, e))?;

    debug!(
        path = %root.display(),
        recursive = options.recursive,
        follow_links = options.follow_links,
        "listing directory"
    );

    let entries = WalkDir::new(root)
        .min_depth(1)
        .max_depth(if options.recursive { usize::MAX } else { 1 })
        .follow_links(options.follow_links)
        .into_iter();

    Ok(Listing {
        entries,
        recursive: options.recursive,
        open_dirs: 0,
        pending: VecDeque::new(),
        done: false,
    })
}

struct Frame {
    name: String,
    path: PathBuf,
    children: Vec<Node>,
}

/// Fold walk events into a tree.
pub fn collect_tree<I>(events: I) -> Result<Vec<Node>>
where
    I: IntoIterator<Item = Result<WalkEvent>>,
{
    let mut roots = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for event in events {
        match event? {
            WalkEvent::Entry(record) => {
                let siblings = stack.last_mut().map_or(&mut roots, |f| &mut f.children);
                siblings.push(Node::Leaf(record));
            }
            WalkEvent::EnterDir { name, path, .. } => stack.push(Frame {
                name,
                path,
                children: Vec::new(),
            }),
            WalkEvent::ExitDir => {
                if let Some(frame) = stack.pop() {
                    close_frame(frame, &mut stack, &mut roots);
                }
            }
        }
    }

    while let Some(frame) = stack.pop() {
        close_frame(frame, &mut stack, &mut roots);
    }

    Ok(roots)
}

fn close_frame(frame: Frame, stack: &mut [Frame], roots: &mut Vec<Node>) {
    let siblings = stack.last_mut().map_or(roots, |f| &mut f.children);
    siblings.push(Node::Branch {
        name: frame.name,
        path: frame.path,
        children: frame.children,
    });
}
