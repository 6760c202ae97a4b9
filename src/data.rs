//! Reading labeled training records.
//!
//! A record file declares a network topology once, then any number of
//! sample pairs:
//!
//! ```text
//! topologie: 2 4 1
//! in: 1.0 0.0
//! out: 1.0
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use crate::prelude::*;

/// A stream of labeled training records.
pub struct TrainingData<R> {
    reader: R,
}

impl TrainingData<BufReader<File>> {
    /// Opens a record file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_reader(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead + Seek> TrainingData<R> {
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the topology declaration: a `topologie:` tag followed by the
    /// layer sizes, input to output.
    pub fn topology(&mut self) -> Result<Vec<usize>> {
        let line = self.next_line()?;
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("topologie:") {
            return Err(Error::RecordErr("expected a topologie: line".into()));
        }

        tokens
            .map(|token| {
                token
                    .parse()
                    .map_err(|_| Error::RecordErr(format!("bad layer size {token:?}")))
            })
            .collect()
    }

    /// Reads the next `in:` line. Returns the parsed values; empty when the
    /// line is absent, untagged, or the stream has ended, so callers detect
    /// the end of an epoch by comparing the count against the topology.
    pub fn next_input(&mut self) -> Vec<f64> {
        self.next_values("in:")
    }

    /// Reads the next `out:` line, with the same count contract as
    /// [`TrainingData::next_input`].
    pub fn next_target(&mut self) -> Vec<f64> {
        self.next_values("out:")
    }

    /// Seeks back to the start of the stream for another epoch. The next
    /// read sees the topology line again.
    pub fn rewind(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        Ok(())
    }

    fn next_values(&mut self, tag: &str) -> Vec<f64> {
        let Ok(line) = self.next_line() else {
            return Vec::new();
        };
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some(tag) {
            return Vec::new();
        }
        // Values stop at the first token that does not read as a number.
        tokens.map_while(|token| token.parse().ok()).collect()
    }

    fn next_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(Error::RecordErr("unexpected end of stream".into()));
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn records(text: &str) -> TrainingData<Cursor<&str>> {
        TrainingData::from_reader(Cursor::new(text))
    }

    #[test]
    fn reads_topology() {
        assert_eq!(records("topologie: 2 4 1\n").topology(), Ok(vec![2, 4, 1]));
    }

    #[test]
    fn missing_topology_tag_is_an_error() {
        let result = records("topology: 2 4 1\n").topology();
        assert!(matches!(result, Err(Error::RecordErr(_))));
    }

    #[test]
    fn empty_stream_is_an_error() {
        assert!(matches!(records("").topology(), Err(Error::RecordErr(_))));
    }

    #[test]
    fn bad_layer_size_is_an_error() {
        let result = records("topologie: 2 x 1\n").topology();
        assert!(matches!(result, Err(Error::RecordErr(_))));
    }

    #[test]
    fn reads_sample_pairs() {
        let mut data = records("topologie: 2 1\nin: 1.0 0.0\nout: 1.0\n");
        data.topology().unwrap();
        assert_eq!(data.next_input(), [1.0, 0.0]);
        assert_eq!(data.next_target(), [1.0]);
    }

    #[test]
    fn exhausted_stream_yields_empty_vectors() {
        let mut data = records("topologie: 2 1\nin: 1.0 0.0\nout: 1.0\n");
        data.topology().unwrap();
        data.next_input();
        data.next_target();
        assert!(data.next_input().is_empty());
        assert!(data.next_target().is_empty());
    }

    #[test]
    fn untagged_line_counts_as_absent() {
        let mut data = records("topologie: 1 1\nnope: 3.0\n");
        data.topology().unwrap();
        assert!(data.next_input().is_empty());
    }

    #[test]
    fn values_stop_at_the_first_bad_token() {
        let mut data = records("topologie: 3 1\nin: 0.5 oops 0.25\n");
        data.topology().unwrap();
        assert_eq!(data.next_input(), [0.5]);
    }

    #[test]
    fn rewind_restarts_the_stream() {
        let mut data = records("topologie: 1 1\nin: 0.5\nout: 0.25\n");
        assert_eq!(data.topology(), Ok(vec![1, 1]));
        assert_eq!(data.next_input(), [0.5]);

        data.rewind().unwrap();
        assert_eq!(data.topology(), Ok(vec![1, 1]));
        assert_eq!(data.next_input(), [0.5]);
        assert_eq!(data.next_target(), [0.25]);
    }
}
