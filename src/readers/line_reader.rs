use crate::error::{ProcessingError, Result};
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A trimmed, non-blank input line with its 1-based position in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

/// Streams the lines of a measurements file, skipping blank ones.
///
/// The file handle lives as long as the reader and is closed when it is
/// dropped, whether or not iteration ran to the end.
pub struct LineReader {
    reader: BufReader<File>,
    path: PathBuf,
    buffer: Vec<u8>,
    line_count: usize,
    finished: bool,
}

impl LineReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ProcessingError::io(path, e))?;

        Ok(Self {
            reader: BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file),
            path: path.to_path_buf(),
            buffer: Vec::new(),
            line_count: 0,
            finished: false,
        })
    }

    fn fail(&mut self, source: std::io::Error) -> Option<Result<SourceLine>> {
        self.finished = true;
        Some(Err(ProcessingError::io(&self.path, source)))
    }
}

impl Iterator for LineReader {
    type Item = Result<SourceLine>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.buffer.clear();

            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(_) => {
                    self.line_count += 1;

                    let text = match std::str::from_utf8(&self.buffer) {
                        Ok(text) => text.trim(),
                        Err(e) => {
                            let source = std::io::Error::new(
                                std::io::ErrorKind::InvalidData,
                                format!("line {} is not valid UTF-8: {}", self.line_count, e),
                            );
                            return self.fail(source);
                        }
                    };
                    if text.is_empty() {
                        continue;
                    }

                    return Some(Ok(SourceLine {
                        number: self.line_count,
                        text: text.to_string(),
                    }));
                }
                Err(e) => return self.fail(e),
            }
        }
    }
}
