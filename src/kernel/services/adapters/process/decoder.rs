use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("unknown encoding label: {0}")]
    UnknownLabel(String),
    #[error("{0} is not line-oriented and cannot decode console output")]
    NotAsciiCompatible(&'static str),
}

/// Decodes one line of child output at a time.
///
/// Only ASCII-compatible encodings are accepted so that splitting the raw
/// stream on `\n` never cuts a character in half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputDecoder {
    encoding: &'static Encoding,
}

impl OutputDecoder {
    /// Console output is read as UTF-8 on every platform.
    pub fn native() -> Self {
        Self { encoding: UTF_8 }
    }

    pub fn for_label(label: &str) -> Result<Self, EncodingError> {
        let label = label.trim();
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| EncodingError::UnknownLabel(label.to_string()))?;
        if !encoding.is_ascii_compatible() {
            return Err(EncodingError::NotAsciiCompatible(encoding.name()));
        }
        Ok(Self { encoding })
    }

    /// `None` selects [`OutputDecoder::native`].
    pub fn from_setting(label: Option<&str>) -> Result<Self, EncodingError> {
        match label {
            Some(label) => Self::for_label(label),
            None => Ok(Self::native()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Strips a trailing `\n` or `\r\n` and replaces malformed sequences with
    /// U+FFFD.
    pub fn decode_line(&self, raw: &[u8]) -> String {
        let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let (text, _) = self.encoding.decode_without_bom_handling(raw);
        text.into_owned()
    }
}

impl Default for OutputDecoder {
    fn default() -> Self {
        Self::native()
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/process/decoder.rs"]
mod tests;
