//! Glyph metrics of the built-in fonts
//!
//! Each table maps a code point to `[depth, height, italic, skew, width]` in
//! ems at the font's design size, as measured from the Computer Modern
//! fonts. Only the glyphs the built-in symbol set and delimiter assemblies
//! can reach are listed.

use phf::phf_map;

/// Metrics of a single glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterMetrics {
    /// Extent below the baseline
    pub depth: f64,
    /// Extent above the baseline
    pub height: f64,
    /// Italic correction
    pub italic: f64,
    /// Horizontal offset for accents
    pub skew: f64,
    /// Advance width
    pub width: f64,
}

impl CharacterMetrics {
    /// Create a new CharacterMetrics instance
    #[must_use]
    pub const fn new(depth: f64, height: f64, italic: f64, skew: f64, width: f64) -> Self {
        Self {
            depth,
            height,
            italic,
            skew,
            width,
        }
    }
}

const fn m(depth: f64, height: f64, italic: f64, skew: f64, width: f64) -> CharacterMetrics {
    CharacterMetrics::new(depth, height, italic, skew, width)
}

/// Built-in fonts by name.
pub static FONT_METRICS_INDEX: phf::Map<&'static str, &'static phf::Map<u32, CharacterMetrics>> = phf_map! {
    "Main-Regular" => &MAIN_REGULAR,
    "Math-Italic" => &MATH_ITALIC,
    "Size1-Regular" => &SIZE1_REGULAR,
    "Size2-Regular" => &SIZE2_REGULAR,
    "Size3-Regular" => &SIZE3_REGULAR,
    "Size4-Regular" => &SIZE4_REGULAR,
};


/// Upright roman: digits, operators, delimiters and text letters.
pub static MAIN_REGULAR: phf::Map<u32, CharacterMetrics> = phf_map! {
    32u32 => m(0.0, 0.0, 0.0, 0.0, 0.25), // space
    33u32 => m(0.0, 0.69444, 0.0, 0.0, 0.27778), // !
    39u32 => m(0.0, 0.69444, 0.0, 0.0, 0.27778), // apostrophe
    40u32 => m(0.25, 0.75, 0.0, 0.0, 0.38889), // (
    41u32 => m(0.25, 0.75, 0.0, 0.0, 0.38889), // )
    43u32 => m(0.08333, 0.58333, 0.0, 0.0, 0.77778), // +
    44u32 => m(0.19444, 0.10556, 0.0, 0.0, 0.27778), // ,
    45u32 => m(0.0, 0.43056, 0.0, 0.0, 0.33333), // -
    46u32 => m(0.0, 0.10556, 0.0, 0.0, 0.27778), // .
    47u32 => m(0.25, 0.75, 0.0, 0.0, 0.5), // /
    48u32 => m(0.0, 0.64444, 0.0, 0.0, 0.5), // 0
    49u32 => m(0.0, 0.64444, 0.0, 0.0, 0.5), // 1
    50u32 => m(0.0, 0.64444, 0.0, 0.0, 0.5), // 2
    51u32 => m(0.0, 0.64444, 0.0, 0.0, 0.5), // 3
    52u32 => m(0.0, 0.64444, 0.0, 0.0, 0.5), // 4
    53u32 => m(0.0, 0.64444, 0.0, 0.0, 0.5), // 5
    54u32 => m(0.0, 0.64444, 0.0, 0.0, 0.5), // 6
    55u32 => m(0.0, 0.64444, 0.0, 0.0, 0.5), // 7
    56u32 => m(0.0, 0.64444, 0.0, 0.0, 0.5), // 8
    57u32 => m(0.0, 0.64444, 0.0, 0.0, 0.5), // 9
    58u32 => m(0.0, 0.43056, 0.0, 0.0, 0.27778), // :
    59u32 => m(0.19444, 0.43056, 0.0, 0.0, 0.27778), // ;
    60u32 => m(0.0391, 0.5391, 0.0, 0.0, 0.77778), // <
    61u32 => m(-0.13313, 0.36687, 0.0, 0.0, 0.77778), // =
    62u32 => m(0.0391, 0.5391, 0.0, 0.0, 0.77778), // >
    65u32 => m(0.0, 0.68333, 0.0, 0.0, 0.75), // A
    66u32 => m(0.0, 0.68333, 0.0, 0.0, 0.70834), // B
    67u32 => m(0.0, 0.68333, 0.0, 0.0, 0.72222), // C
    68u32 => m(0.0, 0.68333, 0.0, 0.0, 0.76389), // D
    69u32 => m(0.0, 0.68333, 0.0, 0.0, 0.68056), // E
    70u32 => m(0.0, 0.68333, 0.0, 0.0, 0.65278), // F
    71u32 => m(0.0, 0.68333, 0.0, 0.0, 0.78472), // G
    72u32 => m(0.0, 0.68333, 0.0, 0.0, 0.75), // H
    73u32 => m(0.0, 0.68333, 0.0, 0.0, 0.36111), // I
    74u32 => m(0.0, 0.68333, 0.0, 0.0, 0.51389), // J
    75u32 => m(0.0, 0.68333, 0.0, 0.0, 0.77778), // K
    76u32 => m(0.0, 0.68333, 0.0, 0.0, 0.625), // L
    77u32 => m(0.0, 0.68333, 0.0, 0.0, 0.91667), // M
    78u32 => m(0.0, 0.68333, 0.0, 0.0, 0.75), // N
    79u32 => m(0.0, 0.68333, 0.0, 0.0, 0.77778), // O
    80u32 => m(0.0, 0.68333, 0.0, 0.0, 0.68056), // P
    81u32 => m(0.19444, 0.68333, 0.0, 0.0, 0.77778), // Q
    82u32 => m(0.0, 0.68333, 0.0, 0.0, 0.73611), // R
    83u32 => m(0.0, 0.68333, 0.0, 0.0, 0.55556), // S
    84u32 => m(0.0, 0.68333, 0.0, 0.0, 0.72222), // T
    85u32 => m(0.0, 0.68333, 0.0, 0.0, 0.75), // U
    86u32 => m(0.0, 0.68333, 0.01389, 0.0, 0.75), // V
    87u32 => m(0.0, 0.68333, 0.01389, 0.0, 1.02778), // W
    88u32 => m(0.0, 0.68333, 0.0, 0.0, 0.75), // X
    89u32 => m(0.0, 0.68333, 0.025, 0.0, 0.75), // Y
    90u32 => m(0.0, 0.68333, 0.0, 0.0, 0.61111), // Z
    91u32 => m(0.25, 0.75, 0.0, 0.0, 0.27778), // [
    93u32 => m(0.25, 0.75, 0.0, 0.0, 0.27778), // ]
    97u32 => m(0.0, 0.43056, 0.0, 0.0, 0.5), // a
    98u32 => m(0.0, 0.69444, 0.0, 0.0, 0.55556), // b
    99u32 => m(0.0, 0.43056, 0.0, 0.0, 0.44445), // c
    100u32 => m(0.0, 0.69444, 0.0, 0.0, 0.55556), // d
    101u32 => m(0.0, 0.43056, 0.0, 0.0, 0.44445), // e
    102u32 => m(0.0, 0.69444, 0.07778, 0.0, 0.30556), // f
    103u32 => m(0.19444, 0.43056, 0.01389, 0.0, 0.5), // g
    104u32 => m(0.0, 0.69444, 0.0, 0.0, 0.55556), // h
    105u32 => m(0.0, 0.66786, 0.0, 0.0, 0.27778), // i
    106u32 => m(0.19444, 0.66786, 0.0, 0.0, 0.30556), // j
    107u32 => m(0.0, 0.69444, 0.0, 0.0, 0.52778), // k
    108u32 => m(0.0, 0.69444, 0.0, 0.0, 0.27778), // l
    109u32 => m(0.0, 0.43056, 0.0, 0.0, 0.83334), // m
    110u32 => m(0.0, 0.43056, 0.0, 0.0, 0.55556), // n
    111u32 => m(0.0, 0.43056, 0.0, 0.0, 0.5), // o
    112u32 => m(0.19444, 0.43056, 0.0, 0.0, 0.55556), // p
    113u32 => m(0.19444, 0.43056, 0.0, 0.0, 0.52778), // q
    114u32 => m(0.0, 0.43056, 0.0, 0.0, 0.39167), // r
    115u32 => m(0.0, 0.43056, 0.0, 0.0, 0.39445), // s
    116u32 => m(0.0, 0.61508, 0.0, 0.0, 0.38889), // t
    117u32 => m(0.0, 0.43056, 0.0, 0.0, 0.55556), // u
    118u32 => m(0.0, 0.43056, 0.01389, 0.0, 0.52778), // v
    119u32 => m(0.0, 0.43056, 0.01389, 0.0, 0.72222), // w
    120u32 => m(0.0, 0.43056, 0.0, 0.0, 0.52778), // x
    121u32 => m(0.19444, 0.43056, 0.01389, 0.0, 0.52778), // y
    122u32 => m(0.0, 0.43056, 0.0, 0.0, 0.44445), // z
    123u32 => m(0.25, 0.75, 0.0, 0.0, 0.5), // {
    124u32 => m(0.25, 0.75, 0.0, 0.0, 0.27778), // |
    125u32 => m(0.25, 0.75, 0.0, 0.0, 0.5), // }
    160u32 => m(0.0, 0.0, 0.0, 0.0, 0.25), // no-break space
    177u32 => m(0.08333, 0.58333, 0.0, 0.0, 0.77778), // plus-minus
    215u32 => m(0.08333, 0.58333, 0.0, 0.0, 0.77778), // times
    247u32 => m(0.08333, 0.58333, 0.0, 0.0, 0.77778), // divide
    915u32 => m(0.0, 0.68333, 0.0, 0.0, 0.625), // Gamma
    916u32 => m(0.0, 0.68333, 0.0, 0.0, 0.83334), // Delta
    920u32 => m(0.0, 0.68333, 0.0, 0.0, 0.77778), // Theta
    923u32 => m(0.0, 0.68333, 0.0, 0.0, 0.69445), // Lambda
    928u32 => m(0.0, 0.68333, 0.0, 0.0, 0.75), // Pi
    931u32 => m(0.0, 0.68333, 0.0, 0.0, 0.72222), // Sigma
    934u32 => m(0.0, 0.68333, 0.0, 0.0, 0.72222), // Phi
    936u32 => m(0.0, 0.68333, 0.0, 0.0, 0.77778), // Psi
    937u32 => m(0.0, 0.68333, 0.0, 0.0, 0.72222), // Omega
    8242u32 => m(0.0, 0.55556, 0.0, 0.0, 0.275), // prime
    8594u32 => m(-0.13313, 0.36687, 0.0, 0.0, 1.0), // rightarrow
    8722u32 => m(0.08333, 0.58333, 0.0, 0.0, 0.77778), // minus
    8730u32 => m(0.2, 0.8, 0.0, 0.0, 0.83334), // surd
    8734u32 => m(0.0, 0.43056, 0.0, 0.0, 1.0), // infty
    8739u32 => m(0.25, 0.75, 0.0, 0.0, 0.27778), // divides
    8741u32 => m(0.25, 0.75, 0.0, 0.0, 0.5), // parallel
    8804u32 => m(0.13597, 0.63597, 0.0, 0.0, 0.77778), // leq
    8805u32 => m(0.13597, 0.63597, 0.0, 0.0, 0.77778), // geq
    8901u32 => m(-0.05555, 0.44445, 0.0, 0.0, 0.27778), // cdot
};

/// Math italic letters and lowercase Greek.
pub static MATH_ITALIC: phf::Map<u32, CharacterMetrics> = phf_map! {
    65u32 => m(0.0, 0.68333, 0.0, 0.13889, 0.75), // A
    66u32 => m(0.0, 0.68333, 0.05017, 0.08334, 0.75851), // B
    67u32 => m(0.0, 0.68333, 0.07153, 0.08334, 0.71472), // C
    68u32 => m(0.0, 0.68333, 0.02778, 0.05556, 0.82792), // D
    69u32 => m(0.0, 0.68333, 0.05764, 0.08334, 0.7382), // E
    70u32 => m(0.0, 0.68333, 0.13889, 0.08334, 0.64306), // F
    71u32 => m(0.0, 0.68333, 0.0, 0.08334, 0.78625), // G
    72u32 => m(0.0, 0.68333, 0.08125, 0.05556, 0.83125), // H
    73u32 => m(0.0, 0.68333, 0.07847, 0.11111, 0.43958), // I
    74u32 => m(0.0, 0.68333, 0.09618, 0.16667, 0.55451), // J
    75u32 => m(0.0, 0.68333, 0.07153, 0.05556, 0.84931), // K
    76u32 => m(0.0, 0.68333, 0.0, 0.02778, 0.68056), // L
    77u32 => m(0.0, 0.68333, 0.10903, 0.08334, 0.97014), // M
    78u32 => m(0.0, 0.68333, 0.10903, 0.08334, 0.80347), // N
    79u32 => m(0.0, 0.68333, 0.02778, 0.08334, 0.76278), // O
    80u32 => m(0.0, 0.68333, 0.13889, 0.08334, 0.64201), // P
    81u32 => m(0.19444, 0.68333, 0.0, 0.08334, 0.79056), // Q
    82u32 => m(0.0, 0.68333, 0.00773, 0.08334, 0.75929), // R
    83u32 => m(0.0, 0.68333, 0.05764, 0.08334, 0.6132), // S
    84u32 => m(0.0, 0.68333, 0.13889, 0.08334, 0.58438), // T
    85u32 => m(0.0, 0.68333, 0.10903, 0.02778, 0.68278), // U
    86u32 => m(0.0, 0.68333, 0.22222, 0.0, 0.58333), // V
    87u32 => m(0.0, 0.68333, 0.13889, 0.0, 0.94445), // W
    88u32 => m(0.0, 0.68333, 0.07847, 0.08334, 0.82847), // X
    89u32 => m(0.0, 0.68333, 0.22222, 0.0, 0.58056), // Y
    90u32 => m(0.0, 0.68333, 0.07153, 0.08334, 0.68264), // Z
    97u32 => m(0.0, 0.43056, 0.0, 0.0, 0.52859), // a
    98u32 => m(0.0, 0.69444, 0.0, 0.0, 0.42917), // b
    99u32 => m(0.0, 0.43056, 0.0, 0.05556, 0.43276), // c
    100u32 => m(0.0, 0.69444, 0.0, 0.16667, 0.52049), // d
    101u32 => m(0.0, 0.43056, 0.0, 0.05556, 0.46563), // e
    102u32 => m(0.19444, 0.69444, 0.10764, 0.16667, 0.48959), // f
    103u32 => m(0.19444, 0.43056, 0.03588, 0.02778, 0.47697), // g
    104u32 => m(0.0, 0.69444, 0.0, 0.0, 0.57616), // h
    105u32 => m(0.0, 0.65952, 0.0, 0.0, 0.34451), // i
    106u32 => m(0.19444, 0.65952, 0.05724, 0.0, 0.41181), // j
    107u32 => m(0.0, 0.69444, 0.03148, 0.0, 0.5206), // k
    108u32 => m(0.0, 0.69444, 0.01968, 0.08334, 0.29838), // l
    109u32 => m(0.0, 0.43056, 0.0, 0.0, 0.87801), // m
    110u32 => m(0.0, 0.43056, 0.0, 0.0, 0.60023), // n
    111u32 => m(0.0, 0.43056, 0.0, 0.05556, 0.48472), // o
    112u32 => m(0.19444, 0.43056, 0.0, 0.08334, 0.50313), // p
    113u32 => m(0.19444, 0.43056, 0.03588, 0.08334, 0.44641), // q
    114u32 => m(0.0, 0.43056, 0.02778, 0.05556, 0.45116), // r
    115u32 => m(0.0, 0.43056, 0.0, 0.05556, 0.46875), // s
    116u32 => m(0.0, 0.61508, 0.0, 0.08334, 0.36111), // t
    117u32 => m(0.0, 0.43056, 0.0, 0.02778, 0.57246), // u
    118u32 => m(0.0, 0.43056, 0.03588, 0.02778, 0.48472), // v
    119u32 => m(0.0, 0.43056, 0.02691, 0.08334, 0.71592), // w
    120u32 => m(0.0, 0.43056, 0.0, 0.02778, 0.57153), // x
    121u32 => m(0.19444, 0.43056, 0.03588, 0.05556, 0.49028), // y
    122u32 => m(0.0, 0.43056, 0.04398, 0.05556, 0.46505), // z
    945u32 => m(0.0, 0.43056, 0.0037, 0.02778, 0.6397), // alpha
    946u32 => m(0.19444, 0.69444, 0.05278, 0.08334, 0.56563), // beta
    947u32 => m(0.19444, 0.43056, 0.05556, 0.0, 0.51773), // gamma
    948u32 => m(0.0, 0.69444, 0.03785, 0.05556, 0.44444), // delta
    952u32 => m(0.0, 0.69444, 0.02778, 0.08334, 0.46944), // theta
    955u32 => m(0.0, 0.69444, 0.0, 0.0, 0.58333), // lambda
    956u32 => m(0.19444, 0.43056, 0.0, 0.02778, 0.60255), // mu
    960u32 => m(0.0, 0.43056, 0.03588, 0.0, 0.57003), // pi
    963u32 => m(0.0, 0.43056, 0.03588, 0.0, 0.57141), // sigma
    969u32 => m(0.0, 0.43056, 0.03588, 0.0, 0.62245), // omega
    981u32 => m(0.19444, 0.69444, 0.0, 0.08334, 0.59618), // phi
    1013u32 => m(0.0, 0.43056, 0.0, 0.08334, 0.40555), // epsilon
};

/// First size of large operators and delimiters.
pub static SIZE1_REGULAR: phf::Map<u32, CharacterMetrics> = phf_map! {
    40u32 => m(0.35001, 0.85, 0.0, 0.0, 0.45834), // (
    41u32 => m(0.35001, 0.85, 0.0, 0.0, 0.45834), // )
    47u32 => m(0.35001, 0.85, 0.0, 0.0, 0.57778), // /
    91u32 => m(0.35001, 0.85, 0.0, 0.0, 0.41667), // [
    93u32 => m(0.35001, 0.85, 0.0, 0.0, 0.41667), // ]
    123u32 => m(0.35001, 0.85, 0.0, 0.0, 0.58334), // {
    125u32 => m(0.35001, 0.85, 0.0, 0.0, 0.58334), // }
    8719u32 => m(0.25001, 0.75, 0.0, 0.0, 0.94445), // prod
    8720u32 => m(0.25001, 0.75, 0.0, 0.0, 0.94445), // coprod
    8721u32 => m(0.25001, 0.75, 0.0, 0.0, 1.05556), // sum
    8730u32 => m(0.35001, 0.85, 0.0, 0.0, 1.0), // surd
    8739u32 => m(-0.00099, 0.601, 0.0, 0.0, 0.22222), // divides
    8741u32 => m(-0.00099, 0.601, 0.0, 0.0, 0.35555), // parallel
    8747u32 => m(0.30612, 0.805, 0.19445, 0.0, 0.47222), // int
    8750u32 => m(0.30612, 0.805, 0.19445, 0.0, 0.47222), // oint
    8898u32 => m(0.25001, 0.75, 0.0, 0.0, 0.83334), // bigcap
    8899u32 => m(0.25001, 0.75, 0.0, 0.0, 0.83334), // bigcup
};

/// Display-size operators and second delimiter size.
pub static SIZE2_REGULAR: phf::Map<u32, CharacterMetrics> = phf_map! {
    40u32 => m(0.65002, 1.15, 0.0, 0.0, 0.59722), // (
    41u32 => m(0.65002, 1.15, 0.0, 0.0, 0.59722), // )
    47u32 => m(0.65002, 1.15, 0.0, 0.0, 0.81111), // /
    91u32 => m(0.65002, 1.15, 0.0, 0.0, 0.47222), // [
    93u32 => m(0.65002, 1.15, 0.0, 0.0, 0.47222), // ]
    123u32 => m(0.65002, 1.15, 0.0, 0.0, 0.66667), // {
    125u32 => m(0.65002, 1.15, 0.0, 0.0, 0.66667), // }
    8719u32 => m(0.55001, 1.05, 0.0, 0.0, 1.27779), // prod
    8720u32 => m(0.55001, 1.05, 0.0, 0.0, 1.27779), // coprod
    8721u32 => m(0.55001, 1.05, 0.0, 0.0, 1.44445), // sum
    8730u32 => m(0.65002, 1.15, 0.0, 0.0, 1.0), // surd
    8747u32 => m(0.86225, 1.36, 0.44445, 0.0, 0.55556), // int
    8750u32 => m(0.86225, 1.36, 0.44445, 0.0, 0.55556), // oint
    8898u32 => m(0.55001, 1.05, 0.0, 0.0, 1.11111), // bigcap
    8899u32 => m(0.55001, 1.05, 0.0, 0.0, 1.11111), // bigcup
};

/// Third delimiter size.
pub static SIZE3_REGULAR: phf::Map<u32, CharacterMetrics> = phf_map! {
    40u32 => m(0.95003, 1.45, 0.0, 0.0, 0.73611), // (
    41u32 => m(0.95003, 1.45, 0.0, 0.0, 0.73611), // )
    47u32 => m(0.95003, 1.45, 0.0, 0.0, 1.04445), // /
    91u32 => m(0.95003, 1.45, 0.0, 0.0, 0.52778), // [
    93u32 => m(0.95003, 1.45, 0.0, 0.0, 0.52778), // ]
    123u32 => m(0.95003, 1.45, 0.0, 0.0, 0.75), // {
    125u32 => m(0.95003, 1.45, 0.0, 0.0, 0.75), // }
    8730u32 => m(0.95003, 1.45, 0.0, 0.0, 1.0), // surd
};

/// Largest delimiter size and the pieces of stacked delimiters.
pub static SIZE4_REGULAR: phf::Map<u32, CharacterMetrics> = phf_map! {
    40u32 => m(1.25003, 1.75, 0.0, 0.0, 0.79167), // (
    41u32 => m(1.25003, 1.75, 0.0, 0.0, 0.79167), // )
    47u32 => m(1.25003, 1.75, 0.0, 0.0, 1.27779), // /
    91u32 => m(1.25003, 1.75, 0.0, 0.0, 0.58334), // [
    93u32 => m(1.25003, 1.75, 0.0, 0.0, 0.58334), // ]
    123u32 => m(1.25003, 1.75, 0.0, 0.0, 0.80556), // {
    125u32 => m(1.25003, 1.75, 0.0, 0.0, 0.80556), // }
    8730u32 => m(1.25003, 1.75, 0.0, 0.0, 1.0), // surd
    9115u32 => m(0.64502, 1.155, 0.0, 0.0, 0.875), // paren top left
    9116u32 => m(1e-05, 0.6, 0.0, 0.0, 0.875), // paren extension left
    9117u32 => m(0.64502, 1.155, 0.0, 0.0, 0.875), // paren bottom left
    9118u32 => m(0.64502, 1.155, 0.0, 0.0, 0.875), // paren top right
    9119u32 => m(1e-05, 0.6, 0.0, 0.0, 0.875), // paren extension right
    9120u32 => m(0.64502, 1.155, 0.0, 0.0, 0.875), // paren bottom right
    9121u32 => m(0.64502, 1.155, 0.0, 0.0, 0.66667), // bracket top left
    9122u32 => m(-0.00099, 0.601, 0.0, 0.0, 0.66667), // bracket extension left
    9123u32 => m(0.64502, 1.155, 0.0, 0.0, 0.66667), // bracket bottom left
    9124u32 => m(0.64502, 1.155, 0.0, 0.0, 0.66667), // bracket top right
    9125u32 => m(-0.00099, 0.601, 0.0, 0.0, 0.66667), // bracket extension right
    9126u32 => m(0.64502, 1.155, 0.0, 0.0, 0.66667), // bracket bottom right
    9127u32 => m(1e-05, 0.9, 0.0, 0.0, 0.88889), // brace top left
    9128u32 => m(0.65002, 1.15, 0.0, 0.0, 0.88889), // brace middle left
    9129u32 => m(0.90001, 0.0, 0.0, 0.0, 0.88889), // brace bottom left
    9130u32 => m(0.0, 0.3, 0.0, 0.0, 0.88889), // brace extension
    9131u32 => m(1e-05, 0.9, 0.0, 0.0, 0.88889), // brace top right
    9132u32 => m(0.65002, 1.15, 0.0, 0.0, 0.88889), // brace middle right
    9133u32 => m(0.90001, 0.0, 0.0, 0.0, 0.88889), // brace bottom right
};
