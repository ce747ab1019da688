use std::{
    borrow::Cow,
    fs::OpenOptions,
    io::{BufWriter, Write},
    path::Path,
};

use encoding_rs::Encoding;
use ropey::Rope;

use crate::error::NotesError;

/// Writes the rope verbatim, replacing whatever the file contained.
/// Text that `encoding` can not represent is written as UTF-8 instead.
/// Returns the encoding that was used and the number of bytes written.
pub fn write(
    encoding: &'static Encoding,
    rope: &Rope,
    path: impl AsRef<Path>,
) -> Result<(&'static Encoding, usize), NotesError> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let text = rope.to_string();
    let (bytes, encoding) = match encoding.encode(&text) {
        (_, _, true) => {
            tracing::warn!(
                "Notes contain characters that can not be represented in {}, saving as UTF-8",
                encoding.name()
            );
            (Cow::Borrowed(text.as_bytes()), encoding_rs::UTF_8)
        }
        (bytes, output_encoding, false) => (bytes, output_encoding),
    };

    let mut writer = BufWriter::new(&mut file);
    writer.write_all(&bytes)?;
    writer.flush()?;
    drop(writer);
    file.sync_all()?;

    Ok((encoding, bytes.len()))
}
