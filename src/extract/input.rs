use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::error::ExtractError;

/// Lazily yields the lines of a greppable output file.
///
/// Bytes that aren't valid UTF-8 are replaced rather than failing the line.
pub struct InputLines<R> {
    reader: R,
    path: PathBuf,
    buf: Vec<u8>,
}

impl InputLines<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let file =
            File::open(path).map_err(|e| ExtractError::InputOpenFailed(path.to_path_buf(), e))?;

        Ok(Self::new(BufReader::new(file), path))
    }
}

impl<R: BufRead> InputLines<R> {
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> Iterator for InputLines<R> {
    type Item = Result<String, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();

        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
            Err(e) => Some(Err(ExtractError::InputReadFailed(self.path.clone(), e))),
        }
    }
}
