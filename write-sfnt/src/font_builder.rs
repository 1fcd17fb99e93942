//! A builder for top-level font objects

use std::borrow::Cow;
use std::collections::BTreeMap;

use read_sfnt::{FontData, FontRef, TopLevelTable};
use types::{Tag, TT_SFNT_VERSION};

use crate::error::BuildError;
use crate::util::SearchRange;
use crate::validate::Validate;
use crate::write::{dump_table, FontWrite};

const TABLE_RECORD_LEN: usize = 16;
const OFFSET_TABLE_LEN: usize = 12;
/// The value the whole-font checksum is adjusted towards.
const CHECKSUM_MAGIC: u32 = 0xB1B0_AFBA;
const HEAD_TAG: Tag = Tag::new(b"head");
const CHECKSUM_ADJUSTMENT_OFFSET: usize = 8;

/// Builds a font binary from a set of tables.
///
/// Each table is either *pristine* (raw bytes, typically borrowed from an
/// existing font, written back verbatim) or *re-serialized* (bytes freshly
/// produced from an owned table model via [`add_table`][Self::add_table]).
/// A font loaded and rebuilt without edits therefore reproduces its table
/// bytes exactly; only tables whose models were touched are recomputed.
///
/// The builder owns everything the output needs: the directory (with its
/// search fields), 4-byte table padding, per-table checksums, and the
/// `head` table's checksum adjustment.
#[derive(Debug, Clone, Default)]
pub struct FontBuilder<'a> {
    tables: BTreeMap<Tag, Cow<'a, [u8]>>,
}

impl<'a> FontBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the provided table model and add it under its tag.
    ///
    /// Fails with [`BuildError::NotReadyForSerialization`] if the model
    /// does not validate.
    pub fn add_table<T>(&mut self, table: &T) -> Result<&mut Self, BuildError>
    where
        T: FontWrite + Validate + TopLevelTable,
    {
        let data = dump_table(table).map_err(|report| BuildError::NotReadyForSerialization {
            tag: T::TAG,
            report,
        })?;
        Ok(self.add_raw(T::TAG, data))
    }

    /// Add raw data under the given tag, replacing any existing entry.
    ///
    /// The bytes are passed through to the output unmodified (modulo the
    /// `head` checksum adjustment, which the builder always owns).
    pub fn add_raw(&mut self, tag: Tag, data: impl Into<Cow<'a, [u8]>>) -> &mut Self {
        self.tables.insert(tag, data.into());
        self
    }

    /// Copy each table from `font` that this builder does not already hold.
    ///
    /// The copies are pristine: their bytes come straight from the source
    /// font. Combined with [`add_table`][Self::add_table] this is the
    /// normal way to modify a font: add the edited tables first, then
    /// backfill the rest.
    pub fn copy_missing_tables(&mut self, font: FontRef<'a>) -> &mut Self {
        for record in font.table_directory.table_records() {
            let tag = record.tag();
            if !self.contains(tag) {
                match font.table_data(tag) {
                    Some(data) => {
                        self.add_raw(tag, data.as_bytes());
                    }
                    None => log::warn!("data for '{tag}' is malformed, skipping"),
                }
            }
        }
        self
    }

    /// Returns `true` if the builder contains a table with this tag.
    pub fn contains(&self, tag: Tag) -> bool {
        self.tables.contains_key(&tag)
    }

    /// Assemble the font binary.
    ///
    /// Tables are laid out in tag order, each padded to a four-byte
    /// boundary; directory checksums are computed from the final table
    /// bytes, and `head.checksum_adjustment` is patched to make the
    /// whole-font checksum come out at `0xB1B0AFBA`.
    pub fn build(&mut self) -> Result<Vec<u8>, BuildError> {
        if self.tables.len() > u16::MAX as usize {
            return Err(BuildError::TooManyTables);
        }
        // the adjustment participates in neither the head table's checksum
        // nor the whole-font sum, so zero it before anything is summed
        if let Some(head) = self.tables.get_mut(&HEAD_TAG) {
            let range = CHECKSUM_ADJUSTMENT_OFFSET..CHECKSUM_ADJUSTMENT_OFFSET + 4;
            if head.len() >= range.end {
                head.to_mut()[range].fill(0);
            }
        }

        let header_len = OFFSET_TABLE_LEN + self.tables.len() * TABLE_RECORD_LEN;
        let mut position = header_len as u32;
        let table_records: Vec<_> = self
            .tables
            .iter()
            .map(|(tag, data)| {
                let offset = position;
                let length = data.len() as u32;
                position += padded_len(length);
                let checksum = FontData::new(data).checksum();
                (*tag, checksum, offset, length)
            })
            .collect();

        let computed = SearchRange::compute(self.tables.len(), TABLE_RECORD_LEN);
        let mut data = Vec::with_capacity(position as usize);
        data.extend_from_slice(&TT_SFNT_VERSION.to_be_bytes());
        data.extend_from_slice(&(self.tables.len() as u16).to_be_bytes());
        data.extend_from_slice(&computed.search_range.to_be_bytes());
        data.extend_from_slice(&computed.entry_selector.to_be_bytes());
        data.extend_from_slice(&computed.range_shift.to_be_bytes());
        let mut head_offset = None;
        for (tag, checksum, offset, length) in &table_records {
            if *tag == HEAD_TAG {
                head_offset = Some(*offset as usize);
            }
            data.extend_from_slice(&tag.to_be_bytes());
            data.extend_from_slice(&checksum.to_be_bytes());
            data.extend_from_slice(&offset.to_be_bytes());
            data.extend_from_slice(&length.to_be_bytes());
        }
        for table in self.tables.values() {
            data.extend_from_slice(table);
            let padding = padded_len(table.len() as u32) as usize - table.len();
            data.extend_from_slice(&[0u8; 4][..padding]);
        }

        if let Some(head_offset) = head_offset {
            let checksum = FontData::new(&data).checksum();
            let adjustment = CHECKSUM_MAGIC.wrapping_sub(checksum);
            let field = head_offset + CHECKSUM_ADJUSTMENT_OFFSET;
            if data.len() >= field + 4 {
                data[field..field + 4].copy_from_slice(&adjustment.to_be_bytes());
            }
        }
        Ok(data)
    }
}

fn padded_len(len: u32) -> u32 {
    (len + 3) & !3
}

#[cfg(test)]
mod tests {
    use read_sfnt::{FontRef, TableProvider};
    use types::Tag;

    use super::*;

    #[test]
    fn sets_binary_search_assists() {
        // based on Roboto's table count
        let data = b"doesn't matter".to_vec();
        let mut builder = FontBuilder::new();
        (0..0x16u32).for_each(|i| {
            builder.add_raw(Tag::from_u32(0x60606060 + i), data.clone());
        });
        let bytes = builder.build().unwrap();
        let font = FontRef::new(&bytes).unwrap();
        let directory = &font.table_directory;
        assert_eq!(
            (256, 4, 96),
            (
                directory.search_range(),
                directory.entry_selector(),
                directory.range_shift()
            )
        );
    }

    #[test]
    fn directory_checksums_match_table_bytes() {
        let mut builder = FontBuilder::new();
        builder.add_raw(Tag::new(b"aaaa"), vec![1u8, 2, 3, 4, 5]);
        builder.add_raw(Tag::new(b"bbbb"), vec![0xFFu8; 8]);
        let bytes = builder.build().unwrap();
        let font = FontRef::new(&bytes).unwrap();
        assert!(font.verify_checksums().is_empty());
    }

    #[test]
    fn checksum_adjustment_closes_the_loop() {
        let mut head = vec![0u8; 54];
        // stale adjustment bytes must not affect the result
        head[8..12].copy_from_slice(&0xDEADBEEFu32.to_be_bytes());
        let mut builder = FontBuilder::new();
        builder.add_raw(Tag::new(b"head"), head);
        builder.add_raw(Tag::new(b"xxxx"), vec![7u8; 6]);
        let bytes = builder.build().unwrap();

        let font = FontRef::new(&bytes).unwrap();
        let adjustment = font.head().unwrap().checksum_adjustment();
        // summing the whole file with the adjustment zeroed must yield
        // CHECKSUM_MAGIC - adjustment
        let mut zeroed = bytes.clone();
        let head_offset = font
            .table_directory
            .table_records()
            .iter()
            .find(|record| record.tag() == Tag::new(b"head"))
            .map(|record| record.offset() as usize)
            .unwrap();
        zeroed[head_offset + 8..head_offset + 12].fill(0);
        let sum = FontData::new(&zeroed).checksum();
        assert_eq!(adjustment, CHECKSUM_MAGIC.wrapping_sub(sum));
        assert_eq!(sum.wrapping_add(adjustment), CHECKSUM_MAGIC);
    }

    #[test]
    fn pristine_tables_round_trip() {
        let mut builder = FontBuilder::new();
        builder.add_raw(Tag::new(b"alph"), vec![1u8, 2, 3, 4]);
        builder.add_raw(Tag::new(b"beta"), vec![9u8; 7]);
        let bytes = builder.build().unwrap();

        let font = FontRef::new(&bytes).unwrap();
        let mut rebuild = FontBuilder::new();
        rebuild.copy_missing_tables(font);
        let rebuilt = rebuild.build().unwrap();
        assert_eq!(bytes, rebuilt);
    }

    #[test]
    fn rejects_too_many_tables() {
        // cheaply simulate the overflow by filling the map with generated
        // tags; (u16::MAX + 1) entries
        let mut builder = FontBuilder::new();
        for i in 0..=u16::MAX as u32 {
            builder.add_raw(Tag::from_u32(i), Vec::new());
        }
        assert!(matches!(builder.build(), Err(BuildError::TooManyTables)));
    }

    #[test]
    fn survives_no_tables() {
        FontBuilder::new().build().unwrap();
    }
}
