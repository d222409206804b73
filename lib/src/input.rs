use std::fs::File;
use std::io::{stdin, Read};
use std::ops::Deref;
use std::path::Path;

use memmap::{Mmap, MmapOptions};

use crate::bail;
use crate::errors::{KmerError, KmerResult};
use crate::format_err;
use crate::MAX_INPUT_LENGTH;

/// The whole input, resident in memory for the length of a run.
pub enum InputBuffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for InputBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            InputBuffer::Mapped(mapped) => &mapped[..],
            InputBuffer::Owned(bytes) => &bytes[..],
        }
    }
}

impl AsRef<[u8]> for InputBuffer {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

fn check_length(len: usize) -> KmerResult<()> {
    if len > MAX_INPUT_LENGTH {
        return Err(KmerError::OversizedInput {
            len,
            max: MAX_INPUT_LENGTH,
        });
    }
    Ok(())
}

/// Open `filename` for counting; `-` reads all of stdin.
pub fn open_input(filename: &str) -> KmerResult<InputBuffer> {
    if filename == "-" {
        let sin = stdin();
        let locked = sin.lock();
        return read_input(locked);
    }
    let path = Path::new(filename);
    if path.is_dir() {
        bail!("{} is a directory", filename);
    }
    let file = File::open(path).map_err(|e| format_err!("unable to open file {}: {}", filename, e))?;
    let len = file.metadata()?.len();
    if len > MAX_INPUT_LENGTH as u64 {
        return Err(KmerError::OversizedInput {
            len: len as usize,
            max: MAX_INPUT_LENGTH,
        });
    }
    // mapping an empty file fails on some platforms
    if len == 0 {
        return Ok(InputBuffer::Owned(Vec::new()));
    }
    let mapped = unsafe { MmapOptions::new().map(&file)? };
    log::debug!("mapped {} bytes from {}", mapped.len(), filename);
    Ok(InputBuffer::Mapped(mapped))
}

/// Read an entire stream into memory, refusing anything over the size limit.
pub fn read_input<R: Read>(reader: R) -> KmerResult<InputBuffer> {
    let mut bytes = Vec::new();
    // one byte past the limit is enough to know it's too long
    reader
        .take(MAX_INPUT_LENGTH as u64 + 1)
        .read_to_end(&mut bytes)?;
    check_length(bytes.len())?;
    Ok(InputBuffer::Owned(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_read_input() {
        let buffer = read_input(Cursor::new(b"ACGT".to_vec())).unwrap();
        assert_eq!(&buffer[..], b"ACGT");

        let buffer = read_input(Cursor::new(Vec::new())).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_check_length() {
        assert!(check_length(MAX_INPUT_LENGTH).is_ok());
        match check_length(MAX_INPUT_LENGTH + 1) {
            Err(KmerError::OversizedInput { len, max }) => {
                assert_eq!(len, MAX_INPUT_LENGTH + 1);
                assert_eq!(max, MAX_INPUT_LENGTH);
            }
            _ => panic!("expected an oversized input error"),
        }
    }

    #[test]
    fn test_open_input() {
        let dir = std::env::temp_dir().join(format!("kmerfreq-input-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let full = dir.join("full.txt");
        File::create(&full).unwrap().write_all(b"GATTACA").unwrap();
        let buffer = open_input(full.to_str().unwrap()).unwrap();
        assert_eq!(buffer.as_ref(), b"GATTACA");

        let empty = dir.join("empty.txt");
        File::create(&empty).unwrap();
        let buffer = open_input(empty.to_str().unwrap()).unwrap();
        assert!(buffer.is_empty());

        assert!(open_input(dir.to_str().unwrap()).is_err());
        assert!(open_input(dir.join("missing.txt").to_str().unwrap()).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_open_oversized_file() {
        let dir = std::env::temp_dir().join(format!("kmerfreq-large-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        // sparse, so nothing is actually written
        let large = dir.join("large.txt");
        File::create(&large)
            .unwrap()
            .set_len(MAX_INPUT_LENGTH as u64 + 1)
            .unwrap();
        match open_input(large.to_str().unwrap()) {
            Err(KmerError::OversizedInput { len, max }) => {
                assert_eq!(len, MAX_INPUT_LENGTH + 1);
                assert_eq!(max, MAX_INPUT_LENGTH);
            }
            Err(e) => panic!("expected an oversized input error, got {}", e),
            Ok(_) => panic!("expected an oversized input error"),
        }

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
