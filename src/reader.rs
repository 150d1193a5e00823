//! Raw little-endian float64 parameter streams.
//!
//! Every input is a flat, header-less sequence of IEEE-754 `f64` values.
//! The F0 stream's byte length determines the utterance's frame count; the
//! matrix streams must then contain exactly the number of values the
//! parameter store's dimensions imply.

use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::mem::size_of;
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::SynthesisError;

/// Read an entire F0 stream. The value count — the file size in 8-byte
/// units — becomes the utterance's frame count.
pub fn read_f0<P: AsRef<Path>>(path: P) -> Result<Vec<f64>, SynthesisError> {
    let file = File::open(path)?;
    let expected = file.metadata()?.len() as usize / size_of::<f64>();
    read_values(&mut BufReader::new(file), "F0", expected)
}

/// Read a row-major matrix stream of exactly `rows * columns` values.
pub fn read_matrix<P: AsRef<Path>>(
    path: P,
    stream: &'static str,
    rows: usize,
    columns: usize,
) -> Result<Vec<f64>, SynthesisError> {
    let file = File::open(path)?;
    read_values(&mut BufReader::new(file), stream, rows * columns)
}

fn read_values(
    reader: &mut impl Read,
    stream: &'static str,
    expected: usize,
) -> Result<Vec<f64>, SynthesisError> {
    let mut values = Vec::with_capacity(expected);
    for _ in 0..expected {
        match reader.read_f64::<LittleEndian>() {
            Ok(value) => values.push(value),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(SynthesisError::TruncatedInput {
                    stream,
                    expected,
                    actual: values.len(),
                });
            }
            Err(e) => return Err(e.into()),
        }
    }
    Ok(values)
}
