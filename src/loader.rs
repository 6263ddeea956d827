use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

/// One non-comment input line: codepoint notation, field name, raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTriple {
    pub ucn: String,
    pub field: String,
    pub value: String,
}

/// Errors that can occur while reading source files.
#[derive(Debug)]
pub enum LoadError {
    /// I/O failure on a source file
    Io { path: PathBuf, source: io::Error },
    /// A line did not split into exactly three tab-separated columns
    MalformedLine {
        path: PathBuf,
        line: usize,
        content: String,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            LoadError::MalformedLine {
                path,
                line,
                content,
            } => {
                // Truncate long lines
                let display_content = if content.len() > 60 {
                    format!("{}...", &content[..60])
                } else {
                    content.clone()
                };
                write!(
                    f,
                    "{}:{}: malformed line (expected 3 tab-separated columns): {}",
                    path.display(),
                    line,
                    display_content
                )
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Streaming reader over an ordered list of Unihan source files.
///
/// Yields one [`RawTriple`] per non-comment line whose field is requested,
/// reading line-at-a-time so the full input is never buffered. The dataset
/// is assumed trustworthy: a structurally malformed line aborts the scan.
pub struct TripleStream {
    pending: std::vec::IntoIter<PathBuf>,
    current: Option<CurrentFile>,
    wanted: HashSet<String>,
}

struct CurrentFile {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
}

impl TripleStream {
    /// Creates a stream over `paths` (read in order, each exactly once),
    /// yielding only triples whose field is in `wanted` or is one of the
    /// index fields `ucn`/`char`.
    pub fn new(paths: Vec<PathBuf>, wanted: HashSet<String>) -> Self {
        TripleStream {
            pending: paths.into_iter(),
            current: None,
            wanted,
        }
    }

    /// Convenience constructor: `files` resolved against a base directory.
    pub fn in_dir(dir: &Path, files: &[String], wanted: HashSet<String>) -> Self {
        let paths = files.iter().map(|f| dir.join(f)).collect();
        Self::new(paths, wanted)
    }

    fn keeps(&self, field: &str) -> bool {
        field == "ucn" || field == "char" || self.wanted.contains(field)
    }
}

impl Iterator for TripleStream {
    type Item = Result<RawTriple, LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(current) = &mut self.current {
                match current.lines.next() {
                    Some(Ok(line)) => {
                        current.line_no += 1;
                        if line.is_empty() || line.starts_with('#') {
                            continue;
                        }
                        let columns: Vec<&str> = line.split('\t').collect();
                        if columns.len() != 3 {
                            return Some(Err(LoadError::MalformedLine {
                                path: current.path.clone(),
                                line: current.line_no,
                                content: line,
                            }));
                        }
                        if !self.keeps(columns[1]) {
                            continue;
                        }
                        return Some(Ok(RawTriple {
                            ucn: columns[0].to_string(),
                            field: columns[1].to_string(),
                            value: columns[2].to_string(),
                        }));
                    }
                    Some(Err(e)) => {
                        let path = current.path.clone();
                        self.current = None;
                        return Some(Err(LoadError::Io { path, source: e }));
                    }
                    None => {
                        self.current = None;
                    }
                }
            } else {
                let path = self.pending.next()?;
                tracing::debug!("reading {}", path.display());
                match File::open(&path) {
                    Ok(file) => {
                        self.current = Some(CurrentFile {
                            path,
                            lines: BufReader::new(file).lines(),
                            line_no: 0,
                        });
                    }
                    Err(e) => return Some(Err(LoadError::Io { path, source: e })),
                }
            }
        }
    }
}
