pub mod output;
pub mod signals;
pub mod table;

pub use output::{OutputFormatter, OutputMode};
pub use signals::GracefulShutdown;
pub use table::{Column, ReportWriter, TableLayout};
