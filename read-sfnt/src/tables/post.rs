//! The [post (PostScript)](https://docs.microsoft.com/en-us/typography/opentype/spec/post) table

use types::{Fixed, FWord, GlyphId, Tag, Version16Dot16};

use crate::font_data::FontData;
use crate::read::{FontRead, ReadError};
use crate::table_provider::TopLevelTable;

/// The [post] table.
///
/// [post]: https://docs.microsoft.com/en-us/typography/opentype/spec/post
#[derive(Clone)]
pub struct Post<'a> {
    data: FontData<'a>,
    /// version 2.0 only: per-glyph indices into the name storage
    glyph_name_index: &'a [types::BigEndian<u16>],
    /// version 2.0 only: the Pascal-string storage block
    string_data: FontData<'a>,
}

impl TopLevelTable for Post<'_> {
    const TAG: Tag = Tag::new(b"post");
}

impl<'a> Post<'a> {
    /// The length of the version-independent header.
    pub const HEADER_LEN: usize = 32;

    pub fn version(&self) -> Version16Dot16 {
        self.data.read_at(0).unwrap_or_default()
    }

    /// Italic angle in counter-clockwise degrees from vertical.
    pub fn italic_angle(&self) -> Fixed {
        self.data.read_at(4).unwrap_or_default()
    }

    pub fn underline_position(&self) -> FWord {
        self.data.read_at(8).unwrap_or_default()
    }

    pub fn underline_thickness(&self) -> FWord {
        self.data.read_at(10).unwrap_or_default()
    }

    /// Nonzero if the font is monospaced.
    pub fn is_fixed_pitch(&self) -> u32 {
        self.data.read_at(12).unwrap_or_default()
    }

    pub fn min_mem_type42(&self) -> u32 {
        self.data.read_at(16).unwrap_or_default()
    }

    pub fn max_mem_type42(&self) -> u32 {
        self.data.read_at(20).unwrap_or_default()
    }

    pub fn min_mem_type1(&self) -> u32 {
        self.data.read_at(24).unwrap_or_default()
    }

    pub fn max_mem_type1(&self) -> u32 {
        self.data.read_at(28).unwrap_or_default()
    }

    /// The number of glyphs covered by a version 2.0 name index.
    pub fn num_names(&self) -> usize {
        self.glyph_name_index.len()
    }

    /// The PostScript name for the given glyph, if one can be determined.
    ///
    /// For a version 2.0 table, indices below 258 select an entry in the
    /// standard Macintosh glyph ordering and larger indices select a string
    /// from the table's own storage. Other versions carry no names.
    pub fn glyph_name(&self, glyph_id: GlyphId) -> Option<&'a str> {
        let index = self.glyph_name_index.get(glyph_id.to_u16() as usize)?.get();
        if let Some(standard) = DEFAULT_GLYPH_NAMES.get(index as usize) {
            return Some(standard);
        }
        self.string(index as usize - DEFAULT_GLYPH_NAMES.len())
    }

    /// The nth Pascal string in the storage block.
    fn string(&self, target: usize) -> Option<&'a str> {
        let mut pos = 0usize;
        let mut remaining = target;
        loop {
            let len: u8 = self.string_data.read_at(pos).ok()?;
            if remaining == 0 {
                let bytes = self
                    .string_data
                    .slice(pos + 1..pos + 1 + len as usize)?
                    .as_bytes();
                return std::str::from_utf8(bytes).ok();
            }
            remaining -= 1;
            pos += len as usize + 1;
        }
    }
}

impl<'a> FontRead<'a> for Post<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let version: Version16Dot16 = data.read_at(0)?;
        data.check_min_len(Self::HEADER_LEN)?;
        if version != Version16Dot16::VERSION_2_0 {
            return Ok(Post {
                data,
                glyph_name_index: &[],
                string_data: FontData::new(&[]),
            });
        }
        let num_glyphs: u16 = data.read_at(Self::HEADER_LEN)?;
        let index_start = Self::HEADER_LEN + 2;
        let index_end = index_start + num_glyphs as usize * 2;
        let glyph_name_index = data.read_array(index_start..index_end)?;
        let string_data = data.split_off(index_end).ok_or(ReadError::OutOfBounds)?;
        Ok(Post {
            data,
            glyph_name_index,
            string_data,
        })
    }
}

/// The 258 standard names of the Macintosh glyph ordering.
///
/// A version 2.0 `post` table refers to these by index; only names outside
/// this set are stored in the font.
#[rustfmt::skip]
pub static DEFAULT_GLYPH_NAMES: [&str; 258] = [
    ".notdef", ".null", "nonmarkingreturn", "space", "exclam", "quotedbl",
    "numbersign", "dollar", "percent", "ampersand", "quotesingle",
    "parenleft", "parenright", "asterisk", "plus", "comma", "hyphen",
    "period", "slash", "zero", "one", "two", "three", "four", "five", "six",
    "seven", "eight", "nine", "colon", "semicolon", "less", "equal",
    "greater", "question", "at", "A", "B", "C", "D", "E", "F", "G", "H",
    "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S", "T", "U", "V",
    "W", "X", "Y", "Z", "bracketleft", "backslash", "bracketright",
    "asciicircum", "underscore", "grave", "a", "b", "c", "d", "e", "f",
    "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s", "t",
    "u", "v", "w", "x", "y", "z", "braceleft", "bar", "braceright",
    "asciitilde", "Adieresis", "Aring", "Ccedilla", "Eacute", "Ntilde",
    "Odieresis", "Udieresis", "aacute", "agrave", "acircumflex",
    "adieresis", "atilde", "aring", "ccedilla", "eacute", "egrave",
    "ecircumflex", "edieresis", "iacute", "igrave", "icircumflex",
    "idieresis", "ntilde", "oacute", "ograve", "ocircumflex", "odieresis",
    "otilde", "uacute", "ugrave", "ucircumflex", "udieresis", "dagger",
    "degree", "cent", "sterling", "section", "bullet", "paragraph",
    "germandbls", "registered", "copyright", "trademark", "acute",
    "dieresis", "notequal", "AE", "Oslash", "infinity", "plusminus",
    "lessequal", "greaterequal", "yen", "mu", "partialdiff", "summation",
    "product", "pi", "integral", "ordfeminine", "ordmasculine", "Omega",
    "ae", "oslash", "questiondown", "exclamdown", "logicalnot", "radical",
    "florin", "approxequal", "Delta", "guillemotleft", "guillemotright",
    "ellipsis", "nonbreakingspace", "Agrave", "Atilde", "Otilde", "OE",
    "oe", "endash", "emdash", "quotedblleft", "quotedblright", "quoteleft",
    "quoteright", "divide", "lozenge", "ydieresis", "Ydieresis",
    "fraction", "currency", "guilsinglleft", "guilsinglright", "fi", "fl",
    "daggerdbl", "periodcentered", "quotesinglbase", "quotedblbase",
    "perthousand", "Acircumflex", "Ecircumflex", "Aacute", "Edieresis",
    "Egrave", "Iacute", "Icircumflex", "Idieresis", "Igrave", "Oacute",
    "Ocircumflex", "apple", "Ograve", "Uacute", "Ucircumflex", "Ugrave",
    "dotlessi", "circumflex", "tilde", "macron", "breve", "dotaccent",
    "ring", "cedilla", "hungarumlaut", "ogonek", "caron", "Lslash",
    "lslash", "Scaron", "scaron", "Zcaron", "zcaron", "brokenbar", "Eth",
    "eth", "Yacute", "yacute", "Thorn", "thorn", "minus", "multiply",
    "onesuperior", "twosuperior", "threesuperior", "onehalf", "onequarter",
    "threequarters", "franc", "Gbreve", "gbreve", "Idotaccent", "Scedilla",
    "scedilla", "Cacute", "cacute", "Ccaron", "ccaron", "dcroat",
];
