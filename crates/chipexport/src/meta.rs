//! Song metadata and its GD3 serialization.
//!
//! `Metadata` carries the free-text tags a user attaches to an export. Each
//! format copies what its header can hold (NSF/GBS fixed 32-byte fields, the
//! SPC ID666 tag, SAP text lines, the GYMX header) and VGM appends a GD3
//! chunk built by `Gd3::from_metadata`.
//!
//! The GD3 chunk is a four-byte identifier (`"Gd3 "`), a 32-bit LE version
//! (`0x00000100` for 1.00), a 32-bit LE data length and eleven UTF-16LE
//! nul-terminated strings.

/// Free-text tags for an export. Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub game: String,
    pub copyright: String,
    pub date: String,
    pub comment: String,
}

/// GD3 tag as appended to a VGM file.
#[derive(Debug, Clone, PartialEq)]
pub struct Gd3 {
    pub track_name_en: Option<String>,
    pub track_name_jp: Option<String>,
    pub game_name_en: Option<String>,
    pub game_name_jp: Option<String>,
    pub system_name_en: Option<String>,
    pub system_name_jp: Option<String>,
    pub author_name_en: Option<String>,
    pub author_name_jp: Option<String>,
    pub release_date: Option<String>,
    pub creator: Option<String>,
    pub notes: Option<String>,
    /// Raw version word, `0x00000100` for 1.00.
    pub version: u32,
}

impl Default for Gd3 {
    fn default() -> Self {
        Gd3 {
            track_name_en: None,
            track_name_jp: None,
            game_name_en: None,
            game_name_jp: None,
            system_name_en: None,
            system_name_jp: None,
            author_name_en: None,
            author_name_jp: None,
            release_date: None,
            creator: None,
            notes: None,
            version: 0x0000_0100,
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl Gd3 {
    /// Build a GD3 tag from export metadata.
    ///
    /// Copyright has no GD3 field of its own and is folded into the notes
    /// ahead of the comment. `system` names the sound hardware.
    pub fn from_metadata(meta: &Metadata, system: &str, creator: &str) -> Self {
        let notes = match (non_empty(&meta.copyright), non_empty(&meta.comment)) {
            (Some(c), Some(n)) => Some(format!("{c}\n{n}")),
            (c, n) => c.or(n),
        };
        Gd3 {
            track_name_en: non_empty(&meta.title),
            game_name_en: non_empty(&meta.game),
            system_name_en: non_empty(system),
            author_name_en: non_empty(&meta.author),
            release_date: non_empty(&meta.date),
            creator: non_empty(creator),
            notes,
            ..Gd3::default()
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();

        out.extend_from_slice(b"Gd3 ");
        out.extend_from_slice(&self.version.to_le_bytes());
        out.extend_from_slice(&0_u32.to_le_bytes());

        let fields: [&Option<String>; 11] = [
            &self.track_name_en,
            &self.track_name_jp,
            &self.game_name_en,
            &self.game_name_jp,
            &self.system_name_en,
            &self.system_name_jp,
            &self.author_name_en,
            &self.author_name_jp,
            &self.release_date,
            &self.creator,
            &self.notes,
        ];

        let mut data: Vec<u8> = Vec::new();
        for field in fields {
            if let Some(s) = field {
                for code in s.encode_utf16() {
                    data.extend_from_slice(&code.to_le_bytes());
                }
            }
            data.extend_from_slice(&0_u16.to_le_bytes());
        }

        out[8..12].copy_from_slice(&(data.len() as u32).to_le_bytes());
        out.extend_from_slice(&data);
        out
    }
}
