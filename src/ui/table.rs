//! Fixed-width tables framed by `#` banners and `-` rules.

use console::style;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub width: usize,
    /// Cut values longer than `width` instead of letting them overflow.
    pub truncate: bool,
}

impl Column {
    pub fn padded(width: usize) -> Self {
        Self {
            width,
            truncate: false,
        }
    }

    pub fn truncated(width: usize) -> Self {
        Self {
            width,
            truncate: true,
        }
    }

    pub fn render(&self, value: &str) -> String {
        let width = self.width;
        if self.truncate && value.chars().count() > width {
            value.chars().take(width).collect()
        } else {
            format!("{:<width$}", value)
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableLayout {
    columns: Vec<Column>,
}

impl TableLayout {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Cells are separated by one space; trailing padding is dropped.
    pub fn row<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let line = self
            .columns
            .iter()
            .zip(cells)
            .map(|(column, cell)| column.render(cell.as_ref()))
            .collect::<Vec<_>>()
            .join(" ");
        line.trim_end().to_string()
    }
}

pub struct ReportWriter<W> {
    out: W,
    banner_width: usize,
    use_colors: bool,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, banner_width: usize, use_colors: bool) -> Self {
        Self {
            out,
            banner_width,
            use_colors,
        }
    }

    pub fn rule(&mut self, ch: char) -> io::Result<()> {
        let line: String = std::iter::repeat(ch).take(self.banner_width).collect();
        writeln!(self.out, "{}", line)
    }

    /// `####`, `<label>: <target>`, `####`.
    pub fn banner(&mut self, label: &str, target: &str) -> io::Result<()> {
        self.rule('#')?;
        if self.use_colors {
            writeln!(self.out, "{}: {}", label, style(target).cyan().bold())?;
        } else {
            writeln!(self.out, "{}: {}", label, target)?;
        }
        self.rule('#')
    }

    pub fn header<S: AsRef<str>>(&mut self, layout: &TableLayout, cells: &[S]) -> io::Result<()> {
        let line = layout.row(cells);
        if self.use_colors {
            writeln!(self.out, "{}", style(line).bold())
        } else {
            writeln!(self.out, "{}", line)
        }
    }

    pub fn row<S: AsRef<str>>(&mut self, layout: &TableLayout, cells: &[S]) -> io::Result<()> {
        writeln!(self.out, "{}", layout.row(cells))
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn json<T: Serialize>(&mut self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
        writeln!(self.out, "{}", text)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_padding_and_truncation() {
        assert_eq!(Column::padded(5).render("ab"), "ab   ");
        assert_eq!(Column::padded(3).render("abcdef"), "abcdef");
        assert_eq!(Column::truncated(3).render("abcdef"), "abc");
        assert_eq!(Column::truncated(3).render("ä"), "ä  ");
    }

    #[test]
    fn test_row_layout() {
        let layout = TableLayout::new(vec![Column::padded(15), Column::padded(15), Column::padded(15)]);
        assert_eq!(
            layout.row(&["Total Space", "Free Space", "Used Space"]),
            "Total Space     Free Space      Used Space"
        );
    }

    #[test]
    fn test_banner() {
        let mut out: Vec<u8> = Vec::new();
        let mut writer = ReportWriter::new(&mut out, 10, false);
        writer.banner("File", "/tmp").unwrap();
        writer.rule('-').unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "##########\nFile: /tmp\n##########\n----------\n");
    }
}
