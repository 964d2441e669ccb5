//! Span-tagged errors and their rendering.
//!
//! Every crate in the workspace reports failures as an [`Error`]: one or more source spans plus
//! a boxed [`ErrorKind`] describing what went wrong. The engine itself never prints anything;
//! an embedding calls [`Error::build_report`] when it wants the `ariadne` rendering and decides
//! where the output goes.

use ariadne::{Color, Report};
use std::{fmt::Debug, ops::Range};

/// The color used to highlight source code fragments quoted inside a diagnostic.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// A rendered diagnostic, addressed by source id and span.
pub type ErrorReport<'a> = Report<'a, (&'a str, Range<usize>)>;

/// A specific failure that knows how to describe itself.
///
/// Implementations are normally derived with `#[derive(ErrorKind)]` from `arbor-attrs`, which
/// turns an `#[error(message = ..., labels = [...], help = ...)]` attribute into the report
/// builder. The labels are paired with the error's spans in order.
pub trait ErrorKind: Debug + Send {
    /// Renders this failure as a report over the given spans.
    fn build_report<'a>(&self, src_id: &'a str, spans: &[Range<usize>]) -> ErrorReport<'a>;
}

/// A failure tied to the regions of source code that caused it.
#[derive(Debug)]
pub struct Error {
    /// The spans the error's labels point at, in label order.
    pub spans: Vec<Range<usize>>,

    /// What went wrong.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Wraps a kind together with the spans its labels point at.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Renders the error against the given source id.
    pub fn build_report<'a>(&self, src_id: &'a str) -> ErrorReport<'a> {
        self.kind.build_report(src_id, &self.spans)
    }
}
