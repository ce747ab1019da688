use std::{
    fs::File,
    io::{self, Read},
    path::Path,
};

use encoding_rs::Encoding;
use ropey::Rope;

pub fn detect_encoding(content: &[u8]) -> &'static Encoding {
    if std::str::from_utf8(content).is_ok() {
        return encoding_rs::UTF_8;
    }

    let mut encoding_detector = chardetng::EncodingDetector::new();
    encoding_detector.feed(content, true);
    encoding_detector.guess(None, true)
}

pub fn read(mut reader: impl io::Read) -> Result<(&'static Encoding, Rope), io::Error> {
    let mut content = Vec::new();
    reader.read_to_end(&mut content)?;

    let encoding = detect_encoding(&content);
    // a byte order mark is part of the content and is kept so it is written back as well
    let (text, had_errors) = encoding.decode_without_bom_handling(&content);
    if had_errors {
        tracing::warn!("Malformed {} sequences replaced while reading", encoding.name());
    }

    Ok((encoding, Rope::from_str(&text)))
}

pub fn read_from_file(path: impl AsRef<Path>) -> Result<(&'static Encoding, Rope), io::Error> {
    let file = File::open(path)?;
    read(file)
}
