//! Contains the common [`ErrorKind`] trait used by every symcas error to display user-facing
//! error messages, and the span-carrying [`Error`] type that ties a kind to the input it came
//! from.
//!
//! Kernel operations (series expansion, numeric evaluation, ...) have no source text of their
//! own, so their error kinds are usually attached to the span of the whole input line by whoever
//! parsed that line.

use ariadne::{Color, Report, Source};
use std::{fmt::Debug, io, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;

    /// A plain, single-line description of the error, for contexts without source code.
    fn message(&self) -> String;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Writes the report for this error to the given writer, using `input` as the source code.
    pub fn write_report(&self, input: &str, writer: impl io::Write) -> io::Result<()> {
        self.build_report("input").write(("input", Source::from(input)), writer)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type does not have a `Display` implementation, so we can
    /// only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) -> io::Result<()> {
        self.build_report("input").eprint(("input", Source::from(input)))
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use ariadne::{Label, ReportKind};
    use super::*;

    /// Hand-written kind so that this crate does not need the derive macro to test itself.
    #[derive(Debug)]
    struct DivisionByZero;

    impl ErrorKind for DivisionByZero {
        fn build_report<'a>(
            &self,
            src_id: &'a str,
            spans: &[Range<usize>],
        ) -> Report<(&'a str, Range<usize>)> {
            Report::build(ReportKind::Error, src_id, spans[0].start)
                .with_message(self.message())
                .with_label(Label::new((src_id, spans[0].clone()))
                    .with_color(EXPR)
                    .with_message("this denominator is zero"))
                .finish()
        }

        fn message(&self) -> String {
            "division by zero".to_string()
        }
    }

    /// Renders the report of the given error without ANSI color codes.
    fn render(err: &Error, input: &str) -> String {
        let mut buf = Vec::new();
        err.write_report(input, &mut buf).unwrap();
        String::from_utf8_lossy(&strip_ansi_escapes::strip(buf)).into_owned()
    }

    #[test]
    fn report_contains_message_and_label() {
        let input = "x / 0";
        let err = Error::new(vec![4..5], DivisionByZero);
        let report = render(&err, input);

        assert!(report.contains("division by zero"));
        assert!(report.contains("this denominator is zero"));
        assert!(report.contains("x / 0"));
    }

    #[test]
    fn display_uses_plain_message() {
        let err = Error::new(vec![0..1], DivisionByZero);
        assert_eq!(err.to_string(), "division by zero");
    }
}
