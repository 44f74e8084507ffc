use crate::cli::LsCli;
use crate::error::Result;
use crate::listing::{collect_tree, list_directory, EntryRecord, ListOptions, Node, WalkEvent};
use crate::tools::ToolContext;
use crate::ui::{Column, OutputMode, TableLayout};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const OUTPUT_FIELDS: [&str; 4] = ["name", "permissions", "owner", "last_modified"];

#[derive(Debug, Serialize)]
struct ListingReport {
    path: String,
    entries: Vec<Node>,
}

pub struct MiniLs {
    ctx: ToolContext,
}

impl MiniLs {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    pub fn from_cli(cli: &LsCli) -> Result<Self> {
        Ok(Self::new(ToolContext::from_args(cli)?))
    }

    pub fn context(&self) -> &ToolContext {
        &self.ctx
    }

    pub fn options(&self) -> ListOptions {
        ListOptions {
            recursive: self.ctx.config().ls.recursive,
            follow_links: self.ctx.config().ls.follow_links,
        }
    }

    fn layout(&self) -> TableLayout {
        let ls = &self.ctx.config().ls;
        TableLayout::new(vec![
            Column::padded(ls.name_width),
            Column::padded(ls.permissions_width),
            Column::padded(ls.owner_width),
            Column::padded(ls.modified_width),
        ])
    }

    pub fn format_record(&self, record: &EntryRecord) -> [String; 4] {
        [
            record.name.clone(),
            record.permissions.clone(),
            record.owner.name.clone(),
            record.last_modified(&self.ctx.config().ls.timestamp_format),
        ]
    }

    /// List each path in turn, streaming rows as the walk produces them.
    /// Returns the number of entry rows printed.
    pub fn report<W: Write>(&self, paths: &[PathBuf], out: W) -> Result<usize> {
        let mut writer = self.ctx.report_writer(out);
        let layout = self.layout();
        let options = self.options();
        let mut total = 0;

        for path in paths {
            self.ctx.check_shutdown()?;
            let listing = list_directory(path, options)?;
            let events = listing.map(|event| self.ctx.check_shutdown().and(event));

            if self.ctx.mode() == OutputMode::Json {
                let entries = collect_tree(events)?;
                total += count_leaves(&entries);
                writer.json(&ListingReport {
                    path: path.display().to_string(),
                    entries,
                })?;
                continue;
            }

            writer.banner("Path", &path.display().to_string())?;
            writer.line(&format!("Directory: {}", path.display()))?;
            writer.rule('-')?;
            writer.header(&layout, &OUTPUT_FIELDS)?;

            let mut count = 0;
            for event in events {
                match event? {
                    WalkEvent::Entry(record) => {
                        writer.row(&layout, &self.format_record(&record))?;
                        count += 1;
                    }
                    WalkEvent::EnterDir { path: dir, .. } => {
                        writer.line(&format!("Directory: {}", dir.display()))?;
                    }
                    WalkEvent::ExitDir => {}
                }
            }

            writer.rule('-')?;
            writer.rule('#')?;

            info!(path = %path.display(), entries = count, "listed directory");
            total += count;
        }

        writer.flush()?;
        self.ctx
            .output_formatter()
            .info(&format!("Listed {} entries under {} path(s)", total, paths.len()));
        Ok(total)
    }
}

/// Entry rows in a collected tree; branches themselves are not rows.
fn count_leaves(nodes: &[Node]) -> usize {
    let mut stack: Vec<&[Node]> = vec![nodes];
    let mut count = 0;
    while let Some(level) = stack.pop() {
        for node in level {
            match node {
                Node::Leaf(_) => count += 1,
                Node::Branch { children, .. } => stack.push(children),
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::ToolError;
    use crate::tools::test_context;
    use filetime::FileTime;
    use std::fs;
    use tempfile::TempDir;

    fn sample_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.txt"), "one\ntwo cat\nthree\n").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("b.txt"), "cat\n").unwrap();
        temp_dir
    }

    fn run(ls: &MiniLs, path: &TempDir) -> (usize, String) {
        let mut out: Vec<u8> = Vec::new();
        let total = ls.report(&[path.path().to_path_buf()], &mut out).unwrap();
        (total, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_flat_report() {
        let temp_dir = sample_tree();
        let ls = MiniLs::new(test_context(Config::default()));

        let (total, text) = run(&ls, &temp_dir);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(total, 2);
        assert_eq!(lines[1], format!("Path: {}", temp_dir.path().display()));
        assert_eq!(lines[3], format!("Directory: {}", temp_dir.path().display()));
        assert!(lines[5].starts_with("name                 permissions     owner      last_modified"));
        assert_eq!(lines.len(), 10);
        assert!(lines[6..8].iter().any(|l| l.starts_with("a.txt ")));
        assert!(lines[6..8].iter().any(|l| l.starts_with("sub ") && l.contains(" d")));
        assert_eq!(text.matches("Directory:").count(), 1);
    }

    #[test]
    fn test_recursive_report() {
        let temp_dir = sample_tree();
        let mut config = Config::default();
        config.ls.recursive = true;
        let ls = MiniLs::new(test_context(config));

        let (total, text) = run(&ls, &temp_dir);

        assert_eq!(total, 2);
        let sub = temp_dir.path().join("sub");
        let marker = format!("Directory: {}", sub.display());
        let marker_at = text.find(&marker).unwrap();
        let b_at = text.find("b.txt").unwrap();
        assert!(marker_at < b_at);
        assert!(text.contains("a.txt"));
    }

    #[test]
    fn test_record_formatting() {
        let temp_dir = sample_tree();
        let file = temp_dir.path().join("a.txt");
        filetime::set_file_mtime(&file, FileTime::from_unix_time(0, 0)).unwrap();

        let mut config = Config::default();
        config.ls.timestamp_format = "%s".to_string();
        let ls = MiniLs::new(test_context(config));

        let metadata = fs::symlink_metadata(&file).unwrap();
        let record = EntryRecord::from_metadata("a.txt", &metadata).unwrap();
        let row = ls.format_record(&record);

        assert_eq!(row[0], "a.txt");
        assert!(row[1].starts_with('-'));
        assert_eq!(row[2], record.owner.name);
        assert_eq!(row[3], "0");
    }

    #[test]
    fn test_bad_path_prints_no_table() {
        let temp_dir = sample_tree();
        let ls = MiniLs::new(test_context(Config::default()));

        let mut out: Vec<u8> = Vec::new();
        let err = ls
            .report(&[temp_dir.path().join("nope")], &mut out)
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_json_report() {
        let temp_dir = sample_tree();
        let mut config = Config::default();
        config.ls.recursive = true;
        let ctx = ToolContext::without_signals(config, OutputMode::Json, 0, true);
        let ls = MiniLs::new(ctx);

        let (total, text) = run(&ls, &temp_dir);
        assert_eq!(total, 2);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let entries = value["entries"].as_array().unwrap();

        assert_eq!(entries.len(), 2);
        let sub = entries.iter().find(|e| e["kind"] == "branch").unwrap();
        assert_eq!(sub["name"], "sub");
        assert_eq!(sub["children"][0]["kind"], "leaf");
        assert_eq!(sub["children"][0]["name"], "b.txt");
    }

    #[test]
    fn test_json_and_table_counts_agree() {
        let temp_dir = sample_tree();
        fs::write(temp_dir.path().join("sub").join("c.txt"), "dog\n").unwrap();
        fs::create_dir(temp_dir.path().join("sub").join("deeper")).unwrap();
        fs::write(temp_dir.path().join("sub").join("deeper").join("d.txt"), "").unwrap();

        let mut config = Config::default();
        config.ls.recursive = true;

        let table = MiniLs::new(test_context(config.clone()));
        let (table_total, _) = run(&table, &temp_dir);

        let json = MiniLs::new(ToolContext::without_signals(config, OutputMode::Json, 0, true));
        let (json_total, _) = run(&json, &temp_dir);

        assert_eq!(table_total, 4);
        assert_eq!(json_total, table_total);
    }

    #[test]
    fn test_cancelled_walk() {
        let temp_dir = sample_tree();
        let ls = MiniLs::new(test_context(Config::default()));
        ls.context().shutdown().request_shutdown();

        let err = ls
            .report(&[temp_dir.path().to_path_buf()], Vec::<u8>::new())
            .unwrap_err();
        assert!(matches!(err, ToolError::Cancelled));
    }
}
