//! Glyph names for the non-ASCII characters the standard Helvetica faces can print.
//!
//! Covers Latin-1, Latin Extended-A, the Romanian comma-below letters and common
//! typographic punctuation. Each entry also names an ASCII stand-in whose
//! advance width approximates the glyph's.

/// A printable non-ASCII glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// PostScript glyph name, as used in a PDF `/Differences` array.
    pub name: &'static str,
    /// ASCII character with a similar advance width.
    pub width_like: char,
}

const fn g(name: &'static str, width_like: char) -> Option<Glyph> {
    Some(Glyph { name, width_like })
}

/// Returns the glyph for a non-ASCII character, or `None` if Helvetica has no glyph for it.
pub fn glyph_for(c: char) -> Option<Glyph> {
    match c {
        '\u{00A0}' => g("space", ' '),
        '¡' => g("exclamdown", '!'),
        '¢' => g("cent", 'c'),
        '£' => g("sterling", '0'),
        '¥' => g("yen", '0'),
        '¦' => g("brokenbar", '|'),
        '§' => g("section", '0'),
        '¨' => g("dieresis", '`'),
        '©' => g("copyright", 'O'),
        'ª' => g("ordfeminine", 'r'),
        '«' => g("guillemotleft", 'n'),
        '¬' => g("logicalnot", '+'),
        '\u{00AD}' => g("hyphen", '-'),
        '®' => g("registered", 'O'),
        '¯' => g("macron", '`'),
        '°' => g("degree", 'v'),
        '±' => g("plusminus", '+'),
        '²' => g("twosuperior", 'r'),
        '³' => g("threesuperior", 'r'),
        '´' => g("acute", '`'),
        'µ' => g("mu", 'u'),
        '¶' => g("paragraph", 'n'),
        '·' => g("periodcentered", '.'),
        '¸' => g("cedilla", '`'),
        '¹' => g("onesuperior", 'r'),
        'º' => g("ordmasculine", 'r'),
        '»' => g("guillemotright", 'n'),
        '¼' => g("onequarter", '%'),
        '½' => g("onehalf", '%'),
        '¾' => g("threequarters", '%'),
        '¿' => g("questiondown", '?'),
        'À' => g("Agrave", 'A'),
        'Á' => g("Aacute", 'A'),
        'Â' => g("Acircumflex", 'A'),
        'Ã' => g("Atilde", 'A'),
        'Ä' => g("Adieresis", 'A'),
        'Å' => g("Aring", 'A'),
        'Æ' => g("AE", 'W'),
        'Ç' => g("Ccedilla", 'C'),
        'È' => g("Egrave", 'E'),
        'É' => g("Eacute", 'E'),
        'Ê' => g("Ecircumflex", 'E'),
        'Ë' => g("Edieresis", 'E'),
        'Ì' => g("Igrave", 'I'),
        'Í' => g("Iacute", 'I'),
        'Î' => g("Icircumflex", 'I'),
        'Ï' => g("Idieresis", 'I'),
        'Ð' => g("Eth", 'D'),
        'Ñ' => g("Ntilde", 'N'),
        'Ò' => g("Ograve", 'O'),
        'Ó' => g("Oacute", 'O'),
        'Ô' => g("Ocircumflex", 'O'),
        'Õ' => g("Otilde", 'O'),
        'Ö' => g("Odieresis", 'O'),
        '×' => g("multiply", '+'),
        'Ø' => g("Oslash", 'O'),
        'Ù' => g("Ugrave", 'U'),
        'Ú' => g("Uacute", 'U'),
        'Û' => g("Ucircumflex", 'U'),
        'Ü' => g("Udieresis", 'U'),
        'Ý' => g("Yacute", 'Y'),
        'Þ' => g("Thorn", 'P'),
        'ß' => g("germandbls", 'b'),
        'à' => g("agrave", 'a'),
        'á' => g("aacute", 'a'),
        'â' => g("acircumflex", 'a'),
        'ã' => g("atilde", 'a'),
        'ä' => g("adieresis", 'a'),
        'å' => g("aring", 'a'),
        'æ' => g("ae", 'm'),
        'ç' => g("ccedilla", 'c'),
        'è' => g("egrave", 'e'),
        'é' => g("eacute", 'e'),
        'ê' => g("ecircumflex", 'e'),
        'ë' => g("edieresis", 'e'),
        'ì' => g("igrave", 't'),
        'í' => g("iacute", 't'),
        'î' => g("icircumflex", 't'),
        'ï' => g("idieresis", 't'),
        'ð' => g("eth", 'o'),
        'ñ' => g("ntilde", 'n'),
        'ò' => g("ograve", 'o'),
        'ó' => g("oacute", 'o'),
        'ô' => g("ocircumflex", 'o'),
        'õ' => g("otilde", 'o'),
        'ö' => g("odieresis", 'o'),
        '÷' => g("divide", '+'),
        'ø' => g("oslash", 'o'),
        'ù' => g("ugrave", 'u'),
        'ú' => g("uacute", 'u'),
        'û' => g("ucircumflex", 'u'),
        'ü' => g("udieresis", 'u'),
        'ý' => g("yacute", 'y'),
        'þ' => g("thorn", 'p'),
        'ÿ' => g("ydieresis", 'y'),
        'Ā' => g("Amacron", 'A'),
        'ā' => g("amacron", 'a'),
        'Ă' => g("Abreve", 'A'),
        'ă' => g("abreve", 'a'),
        'Ą' => g("Aogonek", 'A'),
        'ą' => g("aogonek", 'a'),
        'Ć' => g("Cacute", 'C'),
        'ć' => g("cacute", 'c'),
        'Č' => g("Ccaron", 'C'),
        'č' => g("ccaron", 'c'),
        'Ď' => g("Dcaron", 'D'),
        'ď' => g("dcaron", 'w'),
        'Đ' => g("Dcroat", 'D'),
        'đ' => g("dcroat", 'd'),
        'Ē' => g("Emacron", 'E'),
        'ē' => g("emacron", 'e'),
        'Ė' => g("Edotaccent", 'E'),
        'ė' => g("edotaccent", 'e'),
        'Ę' => g("Eogonek", 'E'),
        'ę' => g("eogonek", 'e'),
        'Ě' => g("Ecaron", 'E'),
        'ě' => g("ecaron", 'e'),
        'Ğ' => g("Gbreve", 'G'),
        'ğ' => g("gbreve", 'g'),
        'Ģ' => g("Gcommaaccent", 'G'),
        'ģ' => g("gcommaaccent", 'g'),
        'Ī' => g("Imacron", 'I'),
        'ī' => g("imacron", 't'),
        'Į' => g("Iogonek", 'I'),
        'į' => g("iogonek", 'i'),
        'İ' => g("Idotaccent", 'I'),
        'ı' => g("dotlessi", 'i'),
        'Ķ' => g("Kcommaaccent", 'K'),
        'ķ' => g("kcommaaccent", 'k'),
        'Ĺ' => g("Lacute", 'L'),
        'ĺ' => g("lacute", 'l'),
        'Ļ' => g("Lcommaaccent", 'L'),
        'ļ' => g("lcommaaccent", 'l'),
        'Ľ' => g("Lcaron", 'L'),
        'ľ' => g("lcaron", 'f'),
        'Ł' => g("Lslash", 'L'),
        'ł' => g("lslash", 'l'),
        'Ń' => g("Nacute", 'N'),
        'ń' => g("nacute", 'n'),
        'Ņ' => g("Ncommaaccent", 'N'),
        'ņ' => g("ncommaaccent", 'n'),
        'Ň' => g("Ncaron", 'N'),
        'ň' => g("ncaron", 'n'),
        'Ō' => g("Omacron", 'O'),
        'ō' => g("omacron", 'o'),
        'Ő' => g("Ohungarumlaut", 'O'),
        'ő' => g("ohungarumlaut", 'o'),
        'Œ' => g("OE", 'W'),
        'œ' => g("oe", 'W'),
        'Ŕ' => g("Racute", 'R'),
        'ŕ' => g("racute", 'r'),
        'Ŗ' => g("Rcommaaccent", 'R'),
        'ŗ' => g("rcommaaccent", 'r'),
        'Ř' => g("Rcaron", 'R'),
        'ř' => g("rcaron", 'r'),
        'Ś' => g("Sacute", 'S'),
        'ś' => g("sacute", 's'),
        'Ş' => g("Scedilla", 'S'),
        'ş' => g("scedilla", 's'),
        'Š' => g("Scaron", 'S'),
        'š' => g("scaron", 's'),
        'Ţ' => g("Tcommaaccent", 'T'),
        'ţ' => g("tcommaaccent", 't'),
        'Ť' => g("Tcaron", 'T'),
        'ť' => g("tcaron", 'r'),
        'Ū' => g("Umacron", 'U'),
        'ū' => g("umacron", 'u'),
        'Ů' => g("Uring", 'U'),
        'ů' => g("uring", 'u'),
        'Ű' => g("Uhungarumlaut", 'U'),
        'ű' => g("uhungarumlaut", 'u'),
        'Ų' => g("Uogonek", 'U'),
        'ų' => g("uogonek", 'u'),
        'Ÿ' => g("Ydieresis", 'Y'),
        'Ź' => g("Zacute", 'Z'),
        'ź' => g("zacute", 'z'),
        'Ż' => g("Zdotaccent", 'Z'),
        'ż' => g("zdotaccent", 'z'),
        'Ž' => g("Zcaron", 'Z'),
        'ž' => g("zcaron", 'z'),
        'ƒ' => g("florin", '0'),
        'Ș' => g("Scommaaccent", 'S'),
        'ș' => g("scommaaccent", 's'),
        'Ț' => g("Tcommaaccent", 'T'),
        'ț' => g("tcommaaccent", 't'),
        'ˆ' => g("circumflex", '`'),
        '˜' => g("tilde", '`'),
        '–' => g("endash", '_'),
        '—' => g("emdash", 'W'),
        '‘' => g("quoteleft", 'l'),
        '’' => g("quoteright", 'l'),
        '‚' => g("quotesinglbase", 'l'),
        '“' => g("quotedblleft", 'r'),
        '”' => g("quotedblright", 'r'),
        '„' => g("quotedblbase", 'r'),
        '†' => g("dagger", '0'),
        '‡' => g("daggerdbl", '0'),
        '•' => g("bullet", '*'),
        '…' => g("ellipsis", 'W'),
        '‰' => g("perthousand", 'W'),
        '‹' => g("guilsinglleft", 'r'),
        '›' => g("guilsinglright", 'r'),
        '€' => g("Euro", '0'),
        '™' => g("trademark", 'W'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polish_letters_have_glyphs() {
        for c in "ąćęłńóśźżĄĆĘŁŃÓŚŹŻ".chars() {
            assert!(glyph_for(c).is_some(), "missing glyph for {c}");
        }
    }

    #[test]
    fn test_glyph_names() {
        assert_eq!(glyph_for('ł').map(|g| g.name), Some("lslash"));
        assert_eq!(glyph_for('é').map(|g| g.name), Some("eacute"));
        assert_eq!(glyph_for('’').map(|g| g.name), Some("quoteright"));
    }

    #[test]
    fn test_unsupported_scripts_have_no_glyph() {
        assert!(glyph_for('ж').is_none());
        assert!(glyph_for('音').is_none());
    }

    #[test]
    fn test_width_stand_ins_are_ascii() {
        for c in "ąéßÆ—…€".chars() {
            let glyph = glyph_for(c).unwrap();
            assert!(glyph.width_like.is_ascii_graphic() || glyph.width_like == ' ');
        }
    }
}
