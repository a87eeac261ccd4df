// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Raw ZIP records and their byte-level (de)serialisation.
//!
//! Everything in this module is a direct mapping of the on-disk layout with no interpretation applied. Higher-level
//! types such as [`crate::ZipEntry`] are built from these records by the reading and writing modules.

pub mod cd;
pub mod cdr;
pub mod dd;
pub mod eocdr;
pub mod lfh;

macro_rules! raw {
    ($name:ident { $($field:ident, $type:ty, $read:expr, $write:expr),* }) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name {
            $(pub $field : $type),*
        }

        /// Reads the raw underlying header from the given reader.
        #[tracing::instrument(skip(reader))]
        pub fn raw_read(mut reader: impl std::io::Read) -> crate::error::Result<$name> {
            Ok($name {
                $($field : $read(&mut reader)? ),*
            })
        }

        /// Writes the raw underlying header to the given writer.
        #[tracing::instrument(skip(writer, raw))]
        pub fn raw_write(mut writer: impl std::io::Write, raw: &$name) -> crate::error::Result<()> {
            $($write(&mut writer, raw.$field)?;)*
            Ok(())
        }
    }
}

macro_rules! raw_deref {
    ($from:ident, $to:ident) => {
        impl std::ops::Deref for $from {
            type Target = $to;

            fn deref(&self) -> &Self::Target {
                &self.raw
            }
        }

        impl std::ops::DerefMut for $from {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.raw
            }
        }
    };
}

pub(crate) use raw;
pub(crate) use raw_deref;
