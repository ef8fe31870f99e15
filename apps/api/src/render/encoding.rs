//! Single-byte font encodings for the standard fonts.
//!
//! A font only addresses 256 codes. Codes 32..=126 keep their ASCII meaning;
//! the non-ASCII characters a document uses are assigned codes from 128
//! upwards and named in the font's `/Differences` array, so Helvetica's full
//! Latin glyph set is reachable. Once the 128 upper codes run out, further
//! characters go to another plane, drawn through its own font resources.

use std::collections::{BTreeSet, HashMap};

use lopdf::{dictionary, Dictionary, Object};

use crate::layout::glyphs::glyph_for;

const FIRST_CODE: u8 = 128;
const PLANE_SIZE: usize = 128;
const REPLACEMENT: u8 = b'?';

/// A run of font codes that share one plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRun {
    pub plane: usize,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct GlyphEncoding {
    codes: HashMap<char, (usize, u8)>,
    planes: Vec<Vec<&'static str>>,
}

impl Default for GlyphEncoding {
    fn default() -> Self {
        Self {
            codes: HashMap::new(),
            planes: vec![Vec::new()],
        }
    }
}

impl GlyphEncoding {
    /// Builds an encoding covering every printable non-ASCII character in `texts`.
    /// Codes are assigned in code-point order, so the result is deterministic.
    pub fn for_texts<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let needed: BTreeSet<char> = texts
            .into_iter()
            .flat_map(str::chars)
            .filter(|c| !c.is_ascii())
            .collect();

        let mut encoding = Self::default();
        for (c, glyph) in needed.into_iter().filter_map(|c| glyph_for(c).map(|g| (c, g))) {
            if encoding.planes.last().map_or(true, |p| p.len() == PLANE_SIZE) {
                encoding.planes.push(Vec::new());
            }
            let plane = encoding.planes.len() - 1;
            let names = &mut encoding.planes[plane];
            encoding.codes.insert(c, (plane, FIRST_CODE + names.len() as u8));
            names.push(glyph.name);
        }
        encoding
    }

    /// Encodes `text` as runs of font codes, starting a new run whenever the
    /// plane changes. ASCII joins whichever run is open. Characters with no
    /// code become `?`, control characters become spaces.
    pub fn encode_runs(&self, text: &str) -> Vec<EncodedRun> {
        let mut runs: Vec<EncodedRun> = Vec::new();
        let mut pending = Vec::new();
        for c in text.chars() {
            let (plane, byte) = match c {
                ' '..='~' => (None, c as u8),
                c if c.is_control() => (None, b' '),
                c => match self.codes.get(&c) {
                    Some(&(plane, code)) => (Some(plane), code),
                    None => (None, REPLACEMENT),
                },
            };
            match (plane, runs.last_mut()) {
                (None, Some(run)) => run.bytes.push(byte),
                (None, None) => pending.push(byte),
                (Some(plane), Some(run)) if run.plane == plane => run.bytes.push(byte),
                (Some(plane), _) => {
                    let mut bytes = std::mem::take(&mut pending);
                    bytes.push(byte);
                    runs.push(EncodedRun { plane, bytes });
                }
            }
        }
        if !pending.is_empty() {
            runs.push(EncodedRun {
                plane: 0,
                bytes: pending,
            });
        }
        runs
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    pub fn extra_glyphs(&self) -> usize {
        self.planes.iter().map(Vec::len).sum()
    }

    /// The `/Encoding` dictionary for `plane`, shared by both fonts of that plane.
    pub fn to_dictionary(&self, plane: usize) -> Dictionary {
        let mut dict = dictionary! {
            "Type" => "Encoding",
            "BaseEncoding" => "WinAnsiEncoding",
        };
        let names = self.planes.get(plane).map(Vec::as_slice).unwrap_or_default();
        if !names.is_empty() {
            let mut differences = Vec::with_capacity(names.len() + 1);
            differences.push(Object::Integer(FIRST_CODE as i64));
            differences.extend(names.iter().map(|name| Object::Name(name.as_bytes().to_vec())));
            dict.set("Differences", differences);
        }
        dict
    }
}
