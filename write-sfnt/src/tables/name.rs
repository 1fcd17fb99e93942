//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

use read_sfnt::tables::name::{Encoding, MacRomanMapping, Name as ReadName};
use read_sfnt::{FontData, TopLevelTable};
use types::Tag;

use crate::from_obj::{FromObjRef, FromTableRef};
use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

const NAME_RECORD_LEN: usize = 12;

/// The [name] table.
///
/// [name]: https://docs.microsoft.com/en-us/typography/opentype/spec/name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Name {
    /// The table's records; sorted during serialization.
    pub name_records: Vec<NameRecord>,
}

/// One name: its identifying ids plus the string itself.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct NameRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: u16,
    pub string: String,
}

impl NameRecord {
    fn sort_key(&self) -> (u16, u16, u16, u16) {
        (
            self.platform_id,
            self.encoding_id,
            self.language_id,
            self.name_id,
        )
    }

    fn encode(&self) -> Vec<u8> {
        match Encoding::new(self.platform_id, self.encoding_id) {
            Encoding::MacRoman => self
                .string
                .chars()
                .map(|c| MacRomanMapping.encode(c).unwrap_or(b'?'))
                .collect(),
            // UTF-16BE both for the unicode platforms and as the fallback;
            // an unknown encoding id still gets well-formed bytes
            _ => self
                .string
                .encode_utf16()
                .flat_map(|unit| unit.to_be_bytes())
                .collect(),
        }
    }
}

impl TopLevelTable for Name {
    const TAG: Tag = Tag::new(b"name");
}

impl FontWrite for Name {
    fn write_into(&self, writer: &mut TableWriter) {
        let mut records: Vec<_> = self.name_records.iter().collect();
        records.sort_by_key(|record| record.sort_key());

        // identical encoded strings share storage
        let mut storage: Vec<u8> = Vec::new();
        let mut encoded: Vec<(Vec<u8>, u16)> = Vec::new();
        for record in &records {
            let bytes = record.encode();
            if !encoded.iter().any(|(existing, _)| *existing == bytes) {
                let offset = storage.len() as u16;
                storage.extend_from_slice(&bytes);
                encoded.push((bytes, offset));
            }
        }

        0u16.write_into(writer); // version
        (records.len() as u16).write_into(writer);
        let storage_offset = 6 + records.len() * NAME_RECORD_LEN;
        (storage_offset as u16).write_into(writer);
        for record in &records {
            let bytes = record.encode();
            let offset = encoded
                .iter()
                .find_map(|(existing, offset)| (*existing == bytes).then_some(*offset))
                .unwrap_or_default();
            record.platform_id.write_into(writer);
            record.encoding_id.write_into(writer);
            record.language_id.write_into(writer);
            record.name_id.write_into(writer);
            (bytes.len() as u16).write_into(writer);
            offset.write_into(writer);
        }
        writer.write_slice(&storage);
    }
}

impl Validate for Name {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("name", |ctx| {
            ctx.in_field("name_records", |ctx| {
                ctx.array_too_long(self.name_records.len());
                for record in &self.name_records {
                    if Encoding::new(record.platform_id, record.encoding_id)
                        == Encoding::MacRoman
                        && record
                            .string
                            .chars()
                            .any(|c| MacRomanMapping.encode(c).is_none())
                    {
                        ctx.report(format!(
                            "string for name id {} is not representable in Mac Roman",
                            record.name_id
                        ));
                    }
                }
            })
        })
    }
}

impl FromObjRef<ReadName<'_>> for Name {
    fn from_obj_ref(obj: &ReadName, _data: FontData) -> Self {
        let storage = obj.string_data();
        Name {
            name_records: obj
                .name_records()
                .iter()
                .map(|record| NameRecord {
                    platform_id: record.platform_id(),
                    encoding_id: record.encoding_id(),
                    language_id: record.language_id(),
                    name_id: record.name_id(),
                    string: record
                        .string(storage)
                        .map(|string| string.to_string())
                        .unwrap_or_default(),
                })
                .collect(),
        }
    }
}

impl FromTableRef<ReadName<'_>> for Name {}

#[cfg(test)]
mod tests {
    use read_sfnt::FontRead;

    use super::*;
    use crate::dump_table;
    use crate::from_obj::ToOwnedTable;

    fn record(platform: u16, encoding: u16, name_id: u16, string: &str) -> NameRecord {
        NameRecord {
            platform_id: platform,
            encoding_id: encoding,
            language_id: 0x409,
            name_id,
            string: string.into(),
        }
    }

    #[test]
    fn round_trip_with_shared_storage() {
        let name = Name {
            name_records: vec![
                record(3, 1, 1, "Test Family"),
                record(3, 1, 2, "Regular"),
                // same string under a different name id: shares storage
                record(3, 1, 16, "Test Family"),
            ],
        };
        let bytes = dump_table(&name).unwrap();
        let view = ReadName::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.count(), 3);
        assert_eq!(view.string_for_id(2).unwrap().to_string(), "Regular");
        let records = view.name_records();
        let storage = view.string_data();
        assert_eq!(
            records[0].string(storage).unwrap().to_string(),
            records[2].string(storage).unwrap().to_string(),
        );
        assert_eq!(records[0].string_offset(), records[2].string_offset());

        let back: Name = view.to_owned_table();
        assert_eq!(back, name);
    }

    #[test]
    fn records_are_sorted() {
        let name = Name {
            name_records: vec![record(3, 1, 2, "b"), record(1, 0, 1, "a")],
        };
        let bytes = dump_table(&name).unwrap();
        let view = ReadName::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.name_records()[0].platform_id(), 1);
        assert_eq!(view.name_records()[1].platform_id(), 3);
    }

    #[test]
    fn mac_roman_strings_are_checked() {
        let name = Name {
            name_records: vec![record(1, 0, 1, "日本")],
        };
        assert!(dump_table(&name).is_err());
    }
}
