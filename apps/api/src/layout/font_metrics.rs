//! Static font metrics and page geometry for the printable board.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe AFM advance widths of the base-14 Helvetica-Bold font, which every
//! PDF viewer ships, so nothing needs to be embedded.
//!
//! The table is indexed by `WinAnsiEncoding` byte, 0x20..=0xFF; text is
//! mapped through the same encoding the PDF writer uses before it is measured.

use crate::config::PageSize;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Geometry and typography for a one-page board, in PDF points (1/72 inch).
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Horizontal and vertical margin used to size the grid.
    pub margin: f32,
    pub title_font_size: f32,
    /// Distance from the top edge of the page to the title baseline.
    pub title_offset: f32,
    /// Distance from the top edge of the page to the top edge of the grid.
    pub grid_top_offset: f32,
    /// Inner padding on each side of a cell.
    pub cell_padding: f32,
    /// Extra leading added to the font size for each wrapped line.
    pub line_spacing: f32,
    /// Upper bound of the per-cell font-size search.
    pub max_font_size: u8,
    /// Lower bound of the per-cell font-size search, and the fallback size.
    pub min_font_size: u8,
}

const INCH: f32 = 72.0;

/// Returns the default page config for the given paper size.
///
/// 1" margins, 24pt title 1" below the top edge, grid top 1.5" below the top
/// edge, 5pt cell padding, 2pt line spacing, cell text between 14pt and 6pt.
pub fn default_page_config(size: PageSize) -> PageConfig {
    let (page_width, page_height) = match size {
        PageSize::Letter => (612.0, 792.0),
        PageSize::A4 => (595.28, 841.89),
    };
    PageConfig {
        page_width,
        page_height,
        margin: INCH,
        title_font_size: 24.0,
        title_offset: INCH,
        grid_top_offset: 1.5 * INCH,
        cell_padding: 5.0,
        line_spacing: 2.0,
        max_font_size: 14,
        min_font_size: 6,
    }
}

impl PageConfig {
    /// Overrides the per-cell font-size search range.
    pub fn with_font_range(mut self, max: u8, min: u8) -> Self {
        self.max_font_size = max;
        self.min_font_size = min;
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// Maps a character to its `WinAnsiEncoding` byte. Unmappable characters
/// become `?`, which is also how they are measured.
pub fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

/// Encodes text for a `WinAnsiEncoding` font.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a base-14 font, indexed by WinAnsi byte.
///
/// `widths[i]` = width of byte `(i + 32)` at 1em, covering 0x20 (space)
/// through 0xFF (ydieresis).
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~  [95]=DEL
/// [96..127]=0x80-0x9F (WinAnsi punctuation, Œ, Š, Ž ...)
/// [128..223]=0xA0-0xFF (Latin-1)
/// ```
/// Slots for bytes the encoder never emits (DEL, 0x81, 0x8D, 0x8F, 0x90,
/// 0x9D) hold 0.
pub struct FontMetricTable {
    /// PostScript name written into the PDF font dictionary.
    pub base_font: &'static str,
    widths: [f32; 224],
}

impl FontMetricTable {
    /// Width in em units of an encoded byte.
    fn byte_width(&self, byte: u8) -> f32 {
        match byte {
            0x20..=0xFF => self.widths[usize::from(byte) - 32],
            _ => 0.0,
        }
    }

    /// Measures the rendered width of a string in em units.
    ///
    /// Each character is measured as the glyph the PDF draws for it, so text
    /// outside WinAnsi is measured as `?`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.byte_width(win_ansi_byte(c))).sum()
    }

    /// Width of `s` in points when set at `font_size` points.
    pub fn text_width(&self, s: &str, font_size: f32) -> f32 {
        self.measure_str(s) * font_size
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width table
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica-Bold, used for the title and every cell.
static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    base_font: "Helvetica-Bold",
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~      DEL
        0.389, 0.280, 0.389, 0.584, 0.000,
        // €      0x81   ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      0x8D   Ž      0x8F
        0.556, 0.000, 0.278, 0.556, 0.500, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.000, 0.611, 0.000,
        // 0x90   ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      0x9D   ž      Ÿ
        0.000, 0.278, 0.278, 0.500, 0.500, 0.350, 0.556, 1.000, 0.333, 1.000, 0.556, 0.333, 0.944, 0.000, 0.500, 0.667,
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.280, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.611, 0.556, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.722, 0.722, 0.722, 0.722, 0.722, 0.722, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.584, 0.611, 0.611, 0.611, 0.611, 0.611, 0.556, 0.611, 0.556,
    ],
};

/// Returns the metric table for the board font.
pub fn helvetica_bold() -> &'static FontMetricTable {
    &HELVETICA_BOLD_TABLE
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_str_empty_returns_zero() {
        assert_eq!(helvetica_bold().measure_str(""), 0.0);
    }

    #[test]
    fn test_measure_str_ascii_characters() {
        // "FREE" = F(0.611) + R(0.722) + E(0.667) + E(0.667) = 2.667
        let width = helvetica_bold().measure_str("FREE");
        assert!((width - 2.667).abs() < 1e-3, "FREE width should be ~2.667, got {width}");
    }

    #[test]
    fn test_text_width_scales_with_font_size() {
        let metrics = helvetica_bold();
        let at_10 = metrics.text_width("Bingo", 10.0);
        let at_20 = metrics.text_width("Bingo", 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-3);
    }

    #[test]
    fn test_measure_str_latin1_uses_real_widths() {
        let metrics = helvetica_bold();
        assert!((metrics.measure_str("Æ") - 1.000).abs() < 1e-4);
        assert!((metrics.measure_str("Ä") - 0.722).abs() < 1e-4);
        assert!((metrics.measure_str("é") - 0.556).abs() < 1e-4);
        assert!((metrics.measure_str("—") - 1.000).abs() < 1e-4);
    }

    #[test]
    fn test_measure_str_unmappable_measures_as_question_mark() {
        let metrics = helvetica_bold();
        let width = metrics.measure_str("日本");
        assert!((width - metrics.measure_str("??")).abs() < 1e-4);
    }

    #[test]
    fn test_table_slots_line_up_with_encoding() {
        let table = helvetica_bold();
        assert_eq!(table.widths.len(), 0xFF - 0x20 + 1);
        assert!((table.byte_width(b'?') - 0.611).abs() < 1e-4);
        assert!((table.byte_width(0xC6) - 1.000).abs() < 1e-4);
        assert!((table.byte_width(0xFF) - 0.556).abs() < 1e-4);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Cafe"), b"Cafe".to_vec());
        assert_eq!(encode_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_win_ansi("it’s"), vec![b'i', b't', 0x92, b's']);
        assert_eq!(encode_win_ansi("Œuvre™"), vec![0x8C, b'u', b'v', b'r', b'e', 0x99]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_default_letter_config() {
        let config = default_page_config(PageSize::Letter);
        assert_eq!(config.page_width, 612.0);
        assert_eq!(config.page_height, 792.0);
        assert_eq!(config.max_font_size, 14);
        assert_eq!(config.min_font_size, 6);
        assert_eq!(config.cell_padding, 5.0);
        assert_eq!(config.line_spacing, 2.0);
    }

    #[test]
    fn test_with_font_range_overrides_bounds() {
        let config = default_page_config(PageSize::A4).with_font_range(18, 8);
        assert_eq!(config.max_font_size, 18);
        assert_eq!(config.min_font_size, 8);
        assert!(config.page_height > 800.0);
    }
}
