// Copyright (c) 2021-2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which supports writing ZIP files.
//!
//! # Example
//! ### Whole data (u8 slice)
//! ```no_run
//! # use ziparchive::{Compression, ZipEntryBuilder, base::write::ZipFileWriter};
//! # use ziparchive::error::ZipError;
//! #
//! # fn run() -> Result<(), ZipError> {
//! let mut writer = ZipFileWriter::new(Vec::<u8>::new());
//!
//! let data = b"This is an example file.";
//! let opts = ZipEntryBuilder::new(String::from("foo.txt"), Compression::Deflate);
//!
//! writer.write_entry_whole(opts, data)?;
//! writer.close()?;
//! #   Ok(())
//! # }
//! ```
//! ### Stream data (unknown size & data)
//! ```no_run
//! # use ziparchive::{Compression, ZipEntryBuilder, base::write::ZipFileWriter};
//! # use ziparchive::error::ZipError;
//! # use std::io::Write;
//! #
//! # fn run() -> Result<(), ZipError> {
//! let mut writer = ZipFileWriter::new(Vec::<u8>::new()).with_password("hunter2");
//!
//! let data = b"This is an example file.";
//! let opts = ZipEntryBuilder::new(String::from("bar.txt"), Compression::Deflate);
//!
//! let mut entry_writer = writer.write_entry_stream(opts)?;
//! entry_writer.write_all(data)?;
//!
//! entry_writer.close()?;
//! writer.close()?;
//! #   Ok(())
//! # }
//! ```

pub(crate) mod compressed_writer;
pub(crate) mod entry_stream;
pub(crate) mod entry_whole;
pub(crate) mod io;

pub use entry_stream::EntryStreamWriter;

use crate::core::cdr::{CentralDirectoryRecord, RawCentralDirectoryRecord};
use crate::core::eocdr::{EndOfCentralDirectoryRecord, RawEndOfCentralDirectoryRecord};
use crate::core::lfh::LocalFileHeader;
use crate::entry::ZipEntry;
use crate::error::{Result, ZipError};
use crate::file::ZipFile;
use crate::spec::compression::Compression;
use crate::spec::consts::{NON_ZIP64_MAX_NUM_FILES, NON_ZIP64_MAX_SIZE};
use crate::string::NameEncoding;

use entry_whole::EntryWholeWriter;
use io::offset::OffsetWriter;

use std::io::{Read, Seek, SeekFrom, Write};

/// A ZIP file writer which acts over [`Write`] implementers.
///
/// # Note
/// - [`ZipFileWriter::close()`] must be called before a writer goes out of scope.
/// - An I/O error part way through an entry leaves the archive without a valid central directory. The writer should
///   be discarded rather than used further.
pub struct ZipFileWriter<W> {
    pub(crate) writer: OffsetWriter<W>,
    pub(crate) cd_entries: Vec<CentralDirectoryRecord>,
    pub(crate) encoding: NameEncoding,
    pub(crate) password: Option<Vec<u8>>,
    comment: Vec<u8>,
}

impl<W: Write> ZipFileWriter<W> {
    /// Construct a new ZIP file writer from a mutable reference to a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer: OffsetWriter::new(writer),
            cd_entries: Vec::new(),
            encoding: NameEncoding::default(),
            password: None,
            comment: Vec::new(),
        }
    }

    /// Sets the encoding used for entry names and comments written from this point onwards.
    pub fn with_encoding(mut self, encoding: NameEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Encrypts all entries written from this point onwards with the given password.
    pub fn with_password(mut self, password: impl AsRef<[u8]>) -> Self {
        self.password = Some(password.as_ref().to_vec());
        self
    }

    /// Write a new ZIP entry of known size and data.
    pub fn write_entry_whole<E: Into<ZipEntry>>(&mut self, entry: E, data: &[u8]) -> Result<()> {
        EntryWholeWriter::from_raw(self, entry.into(), data).write()
    }

    /// Write an entry of unknown size and data via streaming (ie. using a data descriptor).
    ///
    /// The generated local file header will hold no compressed size, uncompressed size, and a null CRC. Readers must
    /// take these values from the data descriptor or central directory.
    pub fn write_entry_stream<E: Into<ZipEntry>>(&mut self, entry: E) -> Result<EntryStreamWriter<'_, W>> {
        EntryStreamWriter::from_raw(self, entry.into())
    }

    /// Write an entry by streaming all of the given reader's data into it.
    pub fn write_entry_from_reader<E: Into<ZipEntry>, R: Read>(&mut self, entry: E, reader: &mut R) -> Result<()> {
        let mut entry_writer = self.write_entry_stream(entry)?;
        std::io::copy(reader, &mut entry_writer)?;
        entry_writer.close()
    }

    /// Set the ZIP file comment.
    pub fn comment(&mut self, comment: &str) -> Result<()> {
        let (comment, _) = self.encoding.encode(comment)?;

        if comment.len() > u16::MAX as usize {
            return Err(ZipError::CommentTooLarge);
        }

        self.comment = comment;
        Ok(())
    }

    /// Returns the number of entries written so far, including any carried over when appending.
    pub fn len(&self) -> usize {
        self.cd_entries.len()
    }

    /// Returns whether no entries have been written so far.
    pub fn is_empty(&self) -> bool {
        self.cd_entries.is_empty()
    }

    /// Returns a snapshot of the directory as it would be written if this writer was closed now.
    pub fn directory(&self) -> Result<ZipFile> {
        let entries = self
            .cd_entries
            .iter()
            .map(|record| crate::base::read::stored_entry(record, self.encoding))
            .collect::<Result<Vec<_>>>()?;

        Ok(ZipFile { entries, comment: self.encoding.decode(&self.comment, false) })
    }

    /// Returns a mutable reference to the inner writer.
    ///
    /// Care should be taken when using this inner writer as doing so may invalidate internal state of this writer.
    pub fn inner_mut(&mut self) -> &mut W {
        self.writer.inner_mut()
    }

    /// Consumes this ZIP writer and completes all closing tasks.
    ///
    /// This includes:
    /// - Writing all central directory headers.
    /// - Writing the end of central directory header.
    /// - Writing the file comment.
    ///
    /// Failure to call this function before going out of scope would result in a corrupted ZIP file.
    #[tracing::instrument(skip(self), fields(entries = self.cd_entries.len()))]
    pub fn close(mut self) -> Result<W> {
        let cd_offset = self.writer.offset();
        let cd_size: u64 = self.cd_entries.iter().map(CentralDirectoryRecord::total_length).sum();

        if self.cd_entries.len() >= NON_ZIP64_MAX_NUM_FILES as usize {
            return Err(ZipError::Zip64Needed);
        }

        let num_of_entries = self.cd_entries.len() as u16;
        let eocdr = EndOfCentralDirectoryRecord {
            raw: RawEndOfCentralDirectoryRecord {
                number_of_this_disk: 0,
                number_of_the_disk_with_the_start_of_the_central_directory: 0,
                total_number_of_entries_in_the_central_directory_on_this_disk: num_of_entries,
                total_number_of_entries_in_the_central_directory: num_of_entries,
                size_of_the_central_directory: to_u32(cd_size)?,
                offset_of_start_of_central_directory: to_u32(cd_offset)?,
                zip_file_comment_length: self.comment.len() as u16,
            },
            zip_file_comment: std::mem::take(&mut self.comment),
        };

        crate::core::cd::write(&mut self.writer, &self.cd_entries, &eocdr)?;
        self.writer.flush()?;

        tracing::debug!(cd_offset, cd_size, "wrote central directory");
        Ok(self.writer.into_inner())
    }
}

impl<W: Read + Write + Seek> ZipFileWriter<W> {
    /// Construct a ZIP file writer which appends to an existing archive.
    ///
    /// The existing central directory is parsed and carried over verbatim, and new entries are written from where it
    /// started. On close, the directory is re-emitted after the new entries along with the existing comment.
    ///
    /// # Note
    /// If the new archive can end up shorter than the old one (eg. when shortening the comment), the caller must
    /// truncate the underlying storage to [`ZipFileWriter::offset()`] before writing.
    pub fn append(mut writer: W) -> Result<Self> {
        let directory = crate::core::cd::read(&mut writer)?;
        let offset = directory.offset();
        writer.seek(SeekFrom::Start(offset))?;

        tracing::debug!(entries = directory.records.len(), offset, "opened archive for appending");

        Ok(Self {
            writer: OffsetWriter::with_offset(writer, offset),
            cd_entries: directory.records,
            encoding: NameEncoding::default(),
            password: None,
            comment: directory.eocdr.zip_file_comment,
        })
    }
}

impl<W> ZipFileWriter<W> {
    /// Returns the offset at which the next entry will be written.
    pub fn offset(&self) -> u64 {
        self.writer.offset()
    }
}

/// An entry's name and comment, encoded ready to be written.
pub(crate) struct EncodedText {
    pub(crate) filename: Vec<u8>,
    pub(crate) comment: Vec<u8>,
    pub(crate) unicode: bool,
    pub(crate) compression_option: u16,
}

impl EncodedText {
    pub(crate) fn from_entry(entry: &ZipEntry, encoding: NameEncoding) -> Result<Self> {
        let (filename, filename_unicode) = encoding.encode(entry.filename())?;
        let (comment, comment_unicode) = encoding.encode(entry.comment())?;

        if filename.len() > u16::MAX as usize {
            return Err(ZipError::FileNameTooLarge);
        }
        if comment.len() > u16::MAX as usize {
            return Err(ZipError::CommentTooLarge);
        }

        let compression_option = match entry.compression() {
            Compression::Deflate => entry.compression_level().deflate_flag_bits(),
            Compression::Stored => 0,
        };

        Ok(Self { filename, comment, unicode: filename_unicode || comment_unicode, compression_option })
    }

    pub(crate) fn filename_length(&self) -> Result<u16> {
        self.filename.len().try_into().map_err(|_| ZipError::FileNameTooLarge)
    }

    /// Builds the central directory record mirroring a written local file header.
    pub(crate) fn into_record(
        self,
        lfh: &LocalFileHeader,
        entry: &ZipEntry,
        lfh_offset: u64,
    ) -> Result<CentralDirectoryRecord> {
        Ok(CentralDirectoryRecord {
            raw: RawCentralDirectoryRecord {
                version_made_by: crate::spec::version::as_made_by(entry.attribute_compatibility()),
                version_needed_to_extract: lfh.version_needed_to_extract,
                general_purpose_flags: lfh.general_purpose_flags,
                compression_method: lfh.compression_method,
                last_mod_file_time: lfh.last_mod_file_time,
                last_mod_file_date: lfh.last_mod_file_date,
                crc_32: lfh.crc_32,
                compressed_size: lfh.compressed_size,
                uncompressed_size: lfh.uncompressed_size,
                file_name_length: lfh.file_name_length,
                extra_field_length: 0,
                file_comment_length: self.comment.len() as u16,
                disk_number_start: 0,
                internal_file_attributes: entry.internal_file_attribute(),
                external_file_attributes: entry.external_file_attribute() | entry.directory_attribute(),
                relative_offset_of_local_header: to_u32(lfh_offset)?,
            },
            file_name: self.filename,
            extra_field: Vec::new(),
            file_comment: self.comment,
        })
    }
}

/// Narrows a size or offset to the 32 bits available without ZIP64 extensions.
pub(crate) fn to_u32(value: u64) -> Result<u32> {
    match value < NON_ZIP64_MAX_SIZE as u64 {
        true => Ok(value as u32),
        false => Err(ZipError::Zip64Needed),
    }
}
