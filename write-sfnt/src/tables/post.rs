//! The [post (PostScript)](https://docs.microsoft.com/en-us/typography/opentype/spec/post) table

use read_sfnt::tables::post::{Post as ReadPost, DEFAULT_GLYPH_NAMES};
use read_sfnt::{FontData, TopLevelTable};
use types::{FWord, Fixed, GlyphId, Tag, Version16Dot16};

use crate::from_obj::{FromObjRef, FromTableRef};
use crate::validate::{Validate, ValidationCtx};
use crate::write::{FontWrite, TableWriter};

/// The [post] table.
///
/// With `glyph_names` set a version 2.0 table is written, indexing into
/// the standard Macintosh ordering where a name matches and storing the
/// rest inline; without names the header-only version 3.0 form is used.
///
/// [post]: https://docs.microsoft.com/en-us/typography/opentype/spec/post
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Post {
    pub italic_angle: Fixed,
    pub underline_position: FWord,
    pub underline_thickness: FWord,
    pub is_fixed_pitch: u32,
    pub min_mem_type42: u32,
    pub max_mem_type42: u32,
    pub min_mem_type1: u32,
    pub max_mem_type1: u32,
    /// One name per glyph, in glyph order.
    pub glyph_names: Option<Vec<String>>,
}

impl Post {
    /// Create a new version 2.0 table from glyph names, in glyph order.
    pub fn new_v2<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        Post {
            glyph_names: Some(names.into_iter().map(String::from).collect()),
            ..Default::default()
        }
    }

    fn version(&self) -> Version16Dot16 {
        if self.glyph_names.is_some() {
            Version16Dot16::VERSION_2_0
        } else {
            Version16Dot16::VERSION_3_0
        }
    }

    fn standard_index(name: &str) -> Option<u16> {
        DEFAULT_GLYPH_NAMES
            .iter()
            .position(|standard| *standard == name)
            .map(|ix| ix as u16)
    }
}

impl TopLevelTable for Post {
    const TAG: Tag = Tag::new(b"post");
}

impl FontWrite for Post {
    fn write_into(&self, writer: &mut TableWriter) {
        self.version().write_into(writer);
        self.italic_angle.write_into(writer);
        self.underline_position.write_into(writer);
        self.underline_thickness.write_into(writer);
        self.is_fixed_pitch.write_into(writer);
        self.min_mem_type42.write_into(writer);
        self.max_mem_type42.write_into(writer);
        self.min_mem_type1.write_into(writer);
        self.max_mem_type1.write_into(writer);
        let Some(names) = self.glyph_names.as_ref() else {
            return;
        };
        (names.len() as u16).write_into(writer);
        let mut next_custom = DEFAULT_GLYPH_NAMES.len() as u16;
        let mut storage: Vec<&str> = Vec::new();
        for name in names {
            match Self::standard_index(name) {
                Some(index) => index.write_into(writer),
                None => {
                    next_custom.write_into(writer);
                    next_custom += 1;
                    storage.push(name);
                }
            }
        }
        for name in storage {
            (name.len() as u8).write_into(writer);
            writer.write_slice(name.as_bytes());
        }
    }
}

impl Validate for Post {
    fn validate_impl(&self, ctx: &mut ValidationCtx) {
        ctx.in_table("post", |ctx| {
            let Some(names) = self.glyph_names.as_ref() else {
                return;
            };
            ctx.in_field("glyph_names", |ctx| {
                ctx.array_too_long(names.len());
                for name in names {
                    if name.len() > u8::MAX as usize {
                        ctx.report(format!("name '{name}' exceeds 255 bytes"));
                    }
                    if !name.is_ascii() {
                        ctx.report(format!("name '{name}' is not ASCII"));
                    }
                }
            });
        })
    }
}

impl FromObjRef<ReadPost<'_>> for Post {
    fn from_obj_ref(obj: &ReadPost, _data: FontData) -> Self {
        let glyph_names = (obj.num_names() > 0).then(|| {
            (0..obj.num_names() as u16)
                .map(|gid| {
                    obj.glyph_name(GlyphId::new(gid))
                        .unwrap_or_default()
                        .to_string()
                })
                .collect()
        });
        Post {
            italic_angle: obj.italic_angle(),
            underline_position: obj.underline_position(),
            underline_thickness: obj.underline_thickness(),
            is_fixed_pitch: obj.is_fixed_pitch(),
            min_mem_type42: obj.min_mem_type42(),
            max_mem_type42: obj.max_mem_type42(),
            min_mem_type1: obj.min_mem_type1(),
            max_mem_type1: obj.max_mem_type1(),
            glyph_names,
        }
    }
}

impl FromTableRef<ReadPost<'_>> for Post {}

#[cfg(test)]
mod tests {
    use read_sfnt::FontRead;

    use super::*;
    use crate::dump_table;

    #[test]
    fn header_only_version_3() {
        let post = Post {
            italic_angle: Fixed::from_f32(-11.0),
            underline_position: FWord::new(-80),
            ..Default::default()
        };
        let bytes = dump_table(&post).unwrap();
        assert_eq!(bytes.len(), ReadPost::HEADER_LEN);
        let view = ReadPost::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.version(), Version16Dot16::VERSION_3_0);
        assert_eq!(view.glyph_name(GlyphId::new(0)), None);
    }

    #[test]
    fn version_2_names_mix_standard_and_custom() {
        let post = Post::new_v2([".notdef", "A", "smiley", "B"]);
        let bytes = dump_table(&post).unwrap();
        let view = ReadPost::read(FontData::new(&bytes)).unwrap();
        assert_eq!(view.glyph_name(GlyphId::new(0)), Some(".notdef"));
        assert_eq!(view.glyph_name(GlyphId::new(1)), Some("A"));
        assert_eq!(view.glyph_name(GlyphId::new(2)), Some("smiley"));
        assert_eq!(view.glyph_name(GlyphId::new(3)), Some("B"));
        let back: Post = crate::from_obj::ToOwnedTable::to_owned_table(&view);
        assert_eq!(back, post);
    }

    #[test]
    fn non_ascii_names_fail_validation() {
        assert!(dump_table(&Post::new_v2(["Ä"])).is_err());
    }
}
