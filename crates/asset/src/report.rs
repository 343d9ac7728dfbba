//! Per-line diagnostics collected while parsing OBJ and MTL text.

use std::fmt;

use crate::error::{FaceError, ScanError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineIssueKind {
    /// A numeric or name token was missing or unparsable. The line was dropped.
    Malformed(ScanError),
    /// An `f` line was rejected. No face was appended.
    InvalidFace(FaceError),
    /// A command this parser does not handle. The line was skipped.
    Unsupported,
    /// `Kd` with no pending `newmtl`. The color was dropped.
    OrphanColor,
}

impl LineIssueKind {
    /// Whether the line carried data that was lost.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::InvalidFace(_))
    }
}

impl From<ScanError> for LineIssueKind {
    fn from(e: ScanError) -> Self {
        Self::Malformed(e)
    }
}

impl From<FaceError> for LineIssueKind {
    fn from(e: FaceError) -> Self {
        Self::InvalidFace(e)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIssue {
    /// 1-based line number.
    pub line: usize,
    pub command: String,
    pub kind: LineIssueKind,
}

impl fmt::Display for LineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LineIssueKind::Malformed(e) => {
                write!(f, "line {} ('{}'): {}", self.line, self.command, e)
            }
            LineIssueKind::InvalidFace(e) => {
                write!(f, "line {} ('{}'): {}", self.line, self.command, e)
            }
            LineIssueKind::Unsupported => {
                write!(f, "line {}: unsupported command '{}'", self.line, self.command)
            }
            LineIssueKind::OrphanColor => {
                write!(f, "line {}: '{}' without a preceding newmtl", self.line, self.command)
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    issues: Vec<LineIssue>,
}

impl ParseReport {
    pub(crate) fn push(&mut self, line: usize, command: &str, kind: LineIssueKind) {
        let issue = LineIssue {
            line,
            command: command.to_owned(),
            kind,
        };
        if issue.kind.is_error() {
            log::warn!("{issue}");
        } else {
            log::debug!("{issue}");
        }
        self.issues.push(issue);
    }

    pub fn issues(&self) -> &[LineIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &LineIssue> {
        self.issues.iter().filter(|i| i.kind.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_are_not_errors() {
        let mut report = ParseReport::default();
        report.push(1, "s", LineIssueKind::Unsupported);
        report.push(2, "Kd", LineIssueKind::OrphanColor);
        assert!(!report.has_errors());
        assert_eq!(report.issues().len(), 2);

        report.push(3, "v", ScanError::MissingToken.into());
        assert!(report.has_errors());
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.errors().next().map(|i| i.line), Some(3));
    }

    #[test]
    fn display_names_line_and_command() {
        let issue = LineIssue {
            line: 7,
            command: "f".into(),
            kind: FaceError::ZeroIndex.into(),
        };
        assert_eq!(
            issue.to_string(),
            "line 7 ('f'): OBJ indices are 1-based; found 0"
        );
    }
}
