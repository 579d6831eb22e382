//! Console rendering for the non-interactive commands.

use std::io::Write;

use crate::dao::Table;
use crate::error::BrowseError;
use crate::view::FeedbackSink;

/// Feedback sink that prints to a pair of writers (stdout and stderr).
pub struct ConsoleFeedback<O: Write, E: Write> {
    out: O,
    err: E,
    errors: usize,
}

impl ConsoleFeedback<std::io::Stdout, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdout(), std::io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleFeedback<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            errors: 0,
        }
    }

    /// Number of errors reported so far.
    pub fn errors(&self) -> usize {
        self.errors
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> FeedbackSink for ConsoleFeedback<O, E> {
    fn info(&mut self, msg: String) {
        tracing::info!("{}", msg);
        // A closed stdout is not worth failing the batch over.
        let _ = writeln!(self.out, "{}", msg);
    }

    fn err(&mut self, err: &BrowseError) {
        self.errors += 1;
        let _ = writeln!(self.err, "error: {}", err);
        if let Some(hint) = err.suggestion() {
            let _ = writeln!(self.err, "  hint: {}", hint);
        }
    }
}

/// Render a table as left-aligned columns separated by two spaces.
pub fn format_table(table: &Table) -> String {
    let mut widths: Vec<usize> = table.header.iter().map(|h| h.len()).collect();
    for row in &table.rows {
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.len());
            }
        }
    }

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = w))
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = line(&table.header);
    out.push('\n');
    for row in &table.rows {
        out.push_str(&line(&row.cells));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::Row;

    #[test]
    fn info_goes_to_out_and_errors_to_err_with_hint() {
        let mut sink = ConsoleFeedback::new(Vec::new(), Vec::new());
        sink.info("[1] deployment paused successfully".into());
        sink.err(&BrowseError::action_failed("Pause", BrowseError::Timeout));
        assert_eq!(sink.errors(), 1);

        let (out, err) = sink.into_inner();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "[1] deployment paused successfully\n"
        );
        let err = String::from_utf8(err).unwrap();
        assert!(err.starts_with("error: failed to Pause: context deadline exceeded\n"));
        assert!(err.contains("  hint: Raise the call timeout"));
    }

    #[test]
    fn table_columns_are_aligned() {
        let table = Table {
            header: vec!["NAME".into(), "PAUSED".into()],
            rows: vec![
                Row {
                    path: "default/web".into(),
                    cells: vec!["web".into(), "false".into()],
                },
                Row {
                    path: "kube-system/coredns".into(),
                    cells: vec!["coredns".into(), "true".into()],
                },
            ],
        };
        assert_eq!(
            format_table(&table),
            "NAME     PAUSED\nweb      false\ncoredns  true\n"
        );
    }
}
