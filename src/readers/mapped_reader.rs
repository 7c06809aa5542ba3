use crate::error::{ProcessingError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// A contiguous, line-aligned byte range of the mapped input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub index: usize,
    pub range: Range<usize>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Read-only memory map of a measurements file.
pub struct MappedInput {
    path: PathBuf,
    mmap: Option<Mmap>,
}

impl MappedInput {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| ProcessingError::io(path, e))?;
        let len = file
            .metadata()
            .map_err(|e| ProcessingError::io(path, e))?
            .len();

        // Zero-length files cannot be mapped on every platform.
        let mmap = if len == 0 {
            None
        } else {
            Some(unsafe { Mmap::map(&file) }.map_err(|e| ProcessingError::io(path, e))?)
        };

        Ok(Self {
            path: path.to_path_buf(),
            mmap,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Split the input into ranges of roughly `chunk_size` bytes, each ending
    /// just after a newline (or at end of file).
    pub fn partitions(&self, chunk_size: usize) -> Vec<Partition> {
        plan_partitions(self.bytes(), chunk_size)
    }

    /// 1-based line number of the line starting at `offset`.
    pub fn line_number_at(&self, offset: usize) -> usize {
        let end = offset.min(self.len());
        self.bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
    }
}

pub fn plan_partitions(data: &[u8], chunk_size: usize) -> Vec<Partition> {
    let chunk_size = chunk_size.max(1);
    let mut partitions = Vec::with_capacity(data.len() / chunk_size + 1);
    let mut start = 0;

    while start < data.len() {
        let mut end = (start + chunk_size).min(data.len());
        if end < data.len() {
            end = match data[end - 1..].iter().position(|&b| b == b'\n') {
                Some(pos) => end + pos,
                None => data.len(),
            };
        }

        partitions.push(Partition {
            index: partitions.len(),
            range: start..end,
        });
        start = end;
    }

    partitions
}

/// A raw line inside a partition and its absolute byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub offset: usize,
    pub bytes: &'a [u8],
}

impl<'a> RawLine<'a> {
    /// Decode and trim; `Ok(None)` for blank lines.
    pub fn text(&self) -> std::result::Result<Option<&'a str>, std::str::Utf8Error> {
        let text = std::str::from_utf8(self.bytes)?.trim();
        Ok((!text.is_empty()).then_some(text))
    }
}

/// Iterates the newline-separated lines of one partition.
pub struct PartitionLines<'a> {
    data: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> PartitionLines<'a> {
    pub fn new(data: &'a [u8], range: Range<usize>) -> Self {
        Self {
            data,
            pos: range.start,
            end: range.end.min(data.len()),
        }
    }
}

impl<'a> Iterator for PartitionLines<'a> {
    type Item = RawLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }

        let rest = &self.data[self.pos..self.end];
        let (line, consumed) = match rest.iter().position(|&b| b == b'\n') {
            Some(newline) => (&rest[..newline], newline + 1),
            None => (rest, rest.len()),
        };

        let raw = RawLine {
            offset: self.pos,
            bytes: line,
        };
        self.pos += consumed;
        Some(raw)
    }
}
