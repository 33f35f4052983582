//! Error types for every layer of the container: per-table capacity
//! errors, and the top-level decode errors `Module::deserialize` returns.

use core::fmt;

/// Failure interning into or decoding a [`crate::StringTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum StringTableError {
    /// Interning would push the total concatenated byte length, or the
    /// entry count, past `u16::MAX`.
    #[cfg_attr(
        feature = "std",
        error("string table full: {attempted_bytes} bytes / {attempted_count} entries would exceed the u16 bound")
    )]
    TableFull {
        /// Total byte length the table would hold after this insert.
        attempted_bytes: usize,
        /// Entry count the table would hold after this insert.
        attempted_count: usize,
    },
    /// The serialized form was too short to hold its own declared
    /// metadata (count, offsets, lengths).
    #[cfg_attr(feature = "std", error("string table buffer truncated"))]
    Truncated,
    /// The serialized form's offsets/lengths did not describe a valid
    /// byte layout (e.g. pointed outside the payload).
    #[cfg_attr(feature = "std", error("string table buffer malformed"))]
    Malformed,
}

#[cfg(not(feature = "std"))]
impl fmt::Display for StringTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Failure adding to or decoding a [`crate::DataSection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum DataSectionError {
    /// Adding this blob would push the cumulative size past `u32::MAX`.
    #[cfg_attr(
        feature = "std",
        error("data section overflow: cumulative size would reach {attempted_bytes} bytes")
    )]
    DataSectionOverflow {
        /// Cumulative size the section would hold after this insert.
        attempted_bytes: u64,
    },
    /// Adding this blob would push the entry count past `u16::MAX`.
    #[cfg_attr(
        feature = "std",
        error("data section full: {attempted_count} entries would exceed the u16 bound")
    )]
    TooManyDataEntries {
        /// Entry count the section would hold after this insert.
        attempted_count: usize,
    },
    /// The serialized form was too short to hold its own declared
    /// metadata (count, offset/length pairs).
    #[cfg_attr(feature = "std", error("data section buffer truncated"))]
    Truncated,
    /// The serialized form's offsets/lengths did not describe a valid
    /// byte layout.
    #[cfg_attr(feature = "std", error("data section buffer malformed"))]
    Malformed,
}

#[cfg(not(feature = "std"))]
impl fmt::Display for DataSectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Failure adding to a [`crate::WgslTable`]. Decoding a WGSL table never
/// fails: a short buffer simply yields entries with empty dependency
/// lists (see the module docs on `WgslTable::deserialize`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum WgslTableError {
    /// The table already holds 1024 entries.
    #[cfg_attr(feature = "std", error("wgsl table full: at most 1024 entries are allowed"))]
    TooManyEntries,
    /// The entry's dependency list holds more than 64 ids.
    #[cfg_attr(
        feature = "std",
        error("wgsl entry has {0} dependencies, at most 64 are allowed")
    )]
    TooManyDeps(usize),
}

#[cfg(not(feature = "std"))]
impl fmt::Display for WgslTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Any failure raised while populating a [`crate::Builder`] (interning a
/// string, adding a data blob, or adding a WGSL entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum BuilderError {
    /// Raised by [`crate::StringTable::intern`].
    #[cfg_attr(feature = "std", error(transparent))]
    StringTable(StringTableError),
    /// Raised by [`crate::DataSection::add`].
    #[cfg_attr(feature = "std", error(transparent))]
    DataSection(DataSectionError),
    /// Raised by [`crate::WgslTable::add`].
    #[cfg_attr(feature = "std", error(transparent))]
    WgslTable(WgslTableError),
}

#[cfg(not(feature = "std"))]
impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<StringTableError> for BuilderError {
    fn from(e: StringTableError) -> Self {
        Self::StringTable(e)
    }
}

impl From<DataSectionError> for BuilderError {
    fn from(e: DataSectionError) -> Self {
        Self::DataSection(e)
    }
}

impl From<WgslTableError> for BuilderError {
    fn from(e: WgslTableError) -> Self {
        Self::WgslTable(e)
    }
}

/// Failure decoding a serialized container buffer back into a [`crate::Module`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ContainerError {
    /// The leading 4 bytes were not `b"PNGB"`.
    #[cfg_attr(feature = "std", error("invalid magic bytes"))]
    InvalidMagic,
    /// The `version` field held something other than 4 or 5.
    #[cfg_attr(feature = "std", error("unsupported container version {0}"))]
    UnsupportedVersion(u16),
    /// The buffer was shorter than a declared section requires.
    #[cfg_attr(
        feature = "std",
        error("buffer too short: needed at least {needed} bytes, got {available}")
    )]
    InvalidFormat {
        /// Minimum length the decode path required.
        needed: usize,
        /// Actual buffer length.
        available: usize,
    },
    /// A header offset field was out of range or broke the required
    /// monotonic ordering of section offsets.
    #[cfg_attr(
        feature = "std",
        error("invalid offset in field `{field}`: {offset} (buffer is {buffer_len} bytes)")
    )]
    InvalidOffset {
        /// Name of the offending header field.
        field: &'static str,
        /// The offset value that failed validation.
        offset: u32,
        /// Length of the buffer being decoded.
        buffer_len: usize,
    },
    /// The data section failed to decode.
    #[cfg_attr(feature = "std", error("invalid data section: {0}"))]
    InvalidDataSection(DataSectionError),
    /// The string table failed to decode.
    #[cfg_attr(feature = "std", error("invalid string table: {0}"))]
    InvalidStringTable(StringTableError),
}

#[cfg(not(feature = "std"))]
impl fmt::Display for ContainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl From<DataSectionError> for ContainerError {
    fn from(e: DataSectionError) -> Self {
        Self::InvalidDataSection(e)
    }
}

impl From<StringTableError> for ContainerError {
    fn from(e: StringTableError) -> Self {
        Self::InvalidStringTable(e)
    }
}
