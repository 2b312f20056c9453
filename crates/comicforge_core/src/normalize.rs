//! Name normalization for templates and characters.
//!
//! Template names arrive from two sources that must compare equal: uploaded
//! filenames and CSV cells. Both run through [`normalize`] so that matching
//! is symmetric regardless of origin.

use unicode_normalization::UnicodeNormalization;

/// Canonicalize a user-supplied name.
///
/// Applies, in order: Unicode NFC composition (unifies precomposed and
/// combining dakuten/handakuten forms), removal of all whitespace (ASCII and
/// full-width U+3000 alike), stripping of a leading/trailing run of quote
/// characters, and stripping of trailing commas.
///
/// Pure and total: always returns a string, possibly empty, and
/// `normalize(normalize(s)) == normalize(s)` for all inputs.
///
/// # Examples
///
/// ```
/// use comicforge_core::normalize;
///
/// assert_eq!(normalize(" テンプレ 1 "), "テンプレ1");
/// assert_eq!(normalize("\"quoted\""), "quoted");
/// assert_eq!(normalize("テンプレ1,,"), "テンプレ1");
/// ```
pub fn normalize(input: &str) -> String {
    let composed: String = input.nfc().collect();
    let stripped: String = composed.chars().filter(|c| !c.is_whitespace()).collect();
    stripped
        .trim_matches(|c| c == '"' || c == '\'')
        .trim_end_matches(',')
        .to_string()
}

/// Render each character of a string with its codepoint.
///
/// Diagnostic companion to [`normalize`]: unmatched template names are most
/// often caused by invisible characters, and this dump makes them visible.
///
/// # Examples
///
/// ```
/// use comicforge_core::debug_chars;
///
/// assert_eq!(debug_chars("ab"), "[0]='a'(97) [1]='b'(98)");
/// ```
pub fn debug_chars(input: &str) -> String {
    input
        .chars()
        .enumerate()
        .map(|(i, c)| format!("[{}]='{}'({})", i, c, c as u32))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strip a recognized image extension (`.png`, `.jpg`, `.jpeg`, any case)
/// from a filename. Other extensions are left in place.
///
/// # Examples
///
/// ```
/// use comicforge_core::image_stem;
///
/// assert_eq!(image_stem("サトル.png"), "サトル");
/// assert_eq!(image_stem("page.JPEG"), "page");
/// assert_eq!(image_stem("notes.txt"), "notes.txt");
/// ```
pub fn image_stem(filename: &str) -> &str {
    if let Some(idx) = filename.rfind('.') {
        let ext = &filename[idx + 1..];
        if ext.eq_ignore_ascii_case("png")
            || ext.eq_ignore_ascii_case("jpg")
            || ext.eq_ignore_ascii_case("jpeg")
        {
            return &filename[..idx];
        }
    }
    filename
}

/// Why a character filename was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum FilenameRule {
    /// The stem contains hiragana, which the generation prompts cannot match
    #[display("hiragana is not allowed; use katakana or kanji")]
    ContainsHiragana,
    /// The stem contains no katakana or kanji at all
    #[display("name must contain katakana or kanji")]
    MissingKatakanaOrKanji,
}

/// Validate a character image filename.
///
/// Character names are referenced from prompts by exact text, so the stem
/// must be written in katakana or kanji; hiragana anywhere in the stem is
/// rejected.
///
/// # Examples
///
/// ```
/// use comicforge_core::{FilenameRule, validate_character_filename};
///
/// assert!(validate_character_filename("サトル.png").is_ok());
/// assert_eq!(
///     validate_character_filename("さとる.png"),
///     Err(FilenameRule::ContainsHiragana)
/// );
/// ```
pub fn validate_character_filename(filename: &str) -> Result<(), FilenameRule> {
    let stem = image_stem(filename);

    let has_hiragana = stem.chars().any(|c| ('\u{3041}'..='\u{3096}').contains(&c));
    let has_katakana_or_kanji = stem.chars().any(|c| {
        ('\u{30A0}'..='\u{30FF}').contains(&c) || ('\u{4E00}'..='\u{9FAF}').contains(&c)
    });

    if has_hiragana {
        return Err(FilenameRule::ContainsHiragana);
    }
    if !has_katakana_or_kanji {
        return Err(FilenameRule::MissingKatakanaOrKanji);
    }
    Ok(())
}
