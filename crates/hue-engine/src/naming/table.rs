//! Named reference colors.
//!
//! CSS Color Module Level 4 extended keywords. Aliases that share an RGB
//! value (`aqua`, `fuchsia`) and the British `grey` spellings are left out so
//! that every entry is a distinct color and lookups never tie on a duplicate.

use crate::color::Rgb;

/// Version tag of [`CSS_COLORS`]; bump whenever an entry changes.
pub const CSS_TABLE_VERSION: &str = "css4-2022.1";

/// Keyword table, alphabetical.
pub const CSS_COLORS: &[(&str, Rgb)] = &[
    ("aliceblue", Rgb::new(0xF0, 0xF8, 0xFF)),
    ("antiquewhite", Rgb::new(0xFA, 0xEB, 0xD7)),
    ("aquamarine", Rgb::new(0x7F, 0xFF, 0xD4)),
    ("azure", Rgb::new(0xF0, 0xFF, 0xFF)),
    ("beige", Rgb::new(0xF5, 0xF5, 0xDC)),
    ("bisque", Rgb::new(0xFF, 0xE4, 0xC4)),
    ("black", Rgb::new(0x00, 0x00, 0x00)),
    ("blanchedalmond", Rgb::new(0xFF, 0xEB, 0xCD)),
    ("blue", Rgb::new(0x00, 0x00, 0xFF)),
    ("blueviolet", Rgb::new(0x8A, 0x2B, 0xE2)),
    ("brown", Rgb::new(0xA5, 0x2A, 0x2A)),
    ("burlywood", Rgb::new(0xDE, 0xB8, 0x87)),
    ("cadetblue", Rgb::new(0x5F, 0x9E, 0xA0)),
    ("chartreuse", Rgb::new(0x7F, 0xFF, 0x00)),
    ("chocolate", Rgb::new(0xD2, 0x69, 0x1E)),
    ("coral", Rgb::new(0xFF, 0x7F, 0x50)),
    ("cornflowerblue", Rgb::new(0x64, 0x95, 0xED)),
    ("cornsilk", Rgb::new(0xFF, 0xF8, 0xDC)),
    ("crimson", Rgb::new(0xDC, 0x14, 0x3C)),
    ("cyan", Rgb::new(0x00, 0xFF, 0xFF)),
    ("darkblue", Rgb::new(0x00, 0x00, 0x8B)),
    ("darkcyan", Rgb::new(0x00, 0x8B, 0x8B)),
    ("darkgoldenrod", Rgb::new(0xB8, 0x86, 0x0B)),
    ("darkgray", Rgb::new(0xA9, 0xA9, 0xA9)),
    ("darkgreen", Rgb::new(0x00, 0x64, 0x00)),
    ("darkkhaki", Rgb::new(0xBD, 0xB7, 0x6B)),
    ("darkmagenta", Rgb::new(0x8B, 0x00, 0x8B)),
    ("darkolivegreen", Rgb::new(0x55, 0x6B, 0x2F)),
    ("darkorange", Rgb::new(0xFF, 0x8C, 0x00)),
    ("darkorchid", Rgb::new(0x99, 0x32, 0xCC)),
    ("darkred", Rgb::new(0x8B, 0x00, 0x00)),
    ("darksalmon", Rgb::new(0xE9, 0x96, 0x7A)),
    ("darkseagreen", Rgb::new(0x8F, 0xBC, 0x8F)),
    ("darkslateblue", Rgb::new(0x48, 0x3D, 0x8B)),
    ("darkslategray", Rgb::new(0x2F, 0x4F, 0x4F)),
    ("darkturquoise", Rgb::new(0x00, 0xCE, 0xD1)),
    ("darkviolet", Rgb::new(0x94, 0x00, 0xD3)),
    ("deeppink", Rgb::new(0xFF, 0x14, 0x93)),
    ("deepskyblue", Rgb::new(0x00, 0xBF, 0xFF)),
    ("dimgray", Rgb::new(0x69, 0x69, 0x69)),
    ("dodgerblue", Rgb::new(0x1E, 0x90, 0xFF)),
    ("firebrick", Rgb::new(0xB2, 0x22, 0x22)),
    ("floralwhite", Rgb::new(0xFF, 0xFA, 0xF0)),
    ("forestgreen", Rgb::new(0x22, 0x8B, 0x22)),
    ("gainsboro", Rgb::new(0xDC, 0xDC, 0xDC)),
    ("ghostwhite", Rgb::new(0xF8, 0xF8, 0xFF)),
    ("gold", Rgb::new(0xFF, 0xD7, 0x00)),
    ("goldenrod", Rgb::new(0xDA, 0xA5, 0x20)),
    ("gray", Rgb::new(0x80, 0x80, 0x80)),
    ("green", Rgb::new(0x00, 0x80, 0x00)),
    ("greenyellow", Rgb::new(0xAD, 0xFF, 0x2F)),
    ("honeydew", Rgb::new(0xF0, 0xFF, 0xF0)),
    ("hotpink", Rgb::new(0xFF, 0x69, 0xB4)),
    ("indianred", Rgb::new(0xCD, 0x5C, 0x5C)),
    ("indigo", Rgb::new(0x4B, 0x00, 0x82)),
    ("ivory", Rgb::new(0xFF, 0xFF, 0xF0)),
    ("khaki", Rgb::new(0xF0, 0xE6, 0x8C)),
    ("lavender", Rgb::new(0xE6, 0xE6, 0xFA)),
    ("lavenderblush", Rgb::new(0xFF, 0xF0, 0xF5)),
    ("lawngreen", Rgb::new(0x7C, 0xFC, 0x00)),
    ("lemonchiffon", Rgb::new(0xFF, 0xFA, 0xCD)),
    ("lightblue", Rgb::new(0xAD, 0xD8, 0xE6)),
    ("lightcoral", Rgb::new(0xF0, 0x80, 0x80)),
    ("lightcyan", Rgb::new(0xE0, 0xFF, 0xFF)),
    ("lightgoldenrodyellow", Rgb::new(0xFA, 0xFA, 0xD2)),
    ("lightgray", Rgb::new(0xD3, 0xD3, 0xD3)),
    ("lightgreen", Rgb::new(0x90, 0xEE, 0x90)),
    ("lightpink", Rgb::new(0xFF, 0xB6, 0xC1)),
    ("lightsalmon", Rgb::new(0xFF, 0xA0, 0x7A)),
    ("lightseagreen", Rgb::new(0x20, 0xB2, 0xAA)),
    ("lightskyblue", Rgb::new(0x87, 0xCE, 0xFA)),
    ("lightslategray", Rgb::new(0x77, 0x88, 0x99)),
    ("lightsteelblue", Rgb::new(0xB0, 0xC4, 0xDE)),
    ("lightyellow", Rgb::new(0xFF, 0xFF, 0xE0)),
    ("lime", Rgb::new(0x00, 0xFF, 0x00)),
    ("limegreen", Rgb::new(0x32, 0xCD, 0x32)),
    ("linen", Rgb::new(0xFA, 0xF0, 0xE6)),
    ("magenta", Rgb::new(0xFF, 0x00, 0xFF)),
    ("maroon", Rgb::new(0x80, 0x00, 0x00)),
    ("mediumaquamarine", Rgb::new(0x66, 0xCD, 0xAA)),
    ("mediumblue", Rgb::new(0x00, 0x00, 0xCD)),
    ("mediumorchid", Rgb::new(0xBA, 0x55, 0xD3)),
    ("mediumpurple", Rgb::new(0x93, 0x70, 0xDB)),
    ("mediumseagreen", Rgb::new(0x3C, 0xB3, 0x71)),
    ("mediumslateblue", Rgb::new(0x7B, 0x68, 0xEE)),
    ("mediumspringgreen", Rgb::new(0x00, 0xFA, 0x9A)),
    ("mediumturquoise", Rgb::new(0x48, 0xD1, 0xCC)),
    ("mediumvioletred", Rgb::new(0xC7, 0x15, 0x85)),
    ("midnightblue", Rgb::new(0x19, 0x19, 0x70)),
    ("mintcream", Rgb::new(0xF5, 0xFF, 0xFA)),
    ("mistyrose", Rgb::new(0xFF, 0xE4, 0xE1)),
    ("moccasin", Rgb::new(0xFF, 0xE4, 0xB5)),
    ("navajowhite", Rgb::new(0xFF, 0xDE, 0xAD)),
    ("navy", Rgb::new(0x00, 0x00, 0x80)),
    ("oldlace", Rgb::new(0xFD, 0xF5, 0xE6)),
    ("olive", Rgb::new(0x80, 0x80, 0x00)),
    ("olivedrab", Rgb::new(0x6B, 0x8E, 0x23)),
    ("orange", Rgb::new(0xFF, 0xA5, 0x00)),
    ("orangered", Rgb::new(0xFF, 0x45, 0x00)),
    ("orchid", Rgb::new(0xDA, 0x70, 0xD6)),
    ("palegoldenrod", Rgb::new(0xEE, 0xE8, 0xAA)),
    ("palegreen", Rgb::new(0x98, 0xFB, 0x98)),
    ("paleturquoise", Rgb::new(0xAF, 0xEE, 0xEE)),
    ("palevioletred", Rgb::new(0xDB, 0x70, 0x93)),
    ("papayawhip", Rgb::new(0xFF, 0xEF, 0xD5)),
    ("peachpuff", Rgb::new(0xFF, 0xDA, 0xB9)),
    ("peru", Rgb::new(0xCD, 0x85, 0x3F)),
    ("pink", Rgb::new(0xFF, 0xC0, 0xCB)),
    ("plum", Rgb::new(0xDD, 0xA0, 0xDD)),
    ("powderblue", Rgb::new(0xB0, 0xE0, 0xE6)),
    ("purple", Rgb::new(0x80, 0x00, 0x80)),
    ("rebeccapurple", Rgb::new(0x66, 0x33, 0x99)),
    ("red", Rgb::new(0xFF, 0x00, 0x00)),
    ("rosybrown", Rgb::new(0xBC, 0x8F, 0x8F)),
    ("royalblue", Rgb::new(0x41, 0x69, 0xE1)),
    ("saddlebrown", Rgb::new(0x8B, 0x45, 0x13)),
    ("salmon", Rgb::new(0xFA, 0x80, 0x72)),
    ("sandybrown", Rgb::new(0xF4, 0xA4, 0x60)),
    ("seagreen", Rgb::new(0x2E, 0x8B, 0x57)),
    ("seashell", Rgb::new(0xFF, 0xF5, 0xEE)),
    ("sienna", Rgb::new(0xA0, 0x52, 0x2D)),
    ("silver", Rgb::new(0xC0, 0xC0, 0xC0)),
    ("skyblue", Rgb::new(0x87, 0xCE, 0xEB)),
    ("slateblue", Rgb::new(0x6A, 0x5A, 0xCD)),
    ("slategray", Rgb::new(0x70, 0x80, 0x90)),
    ("snow", Rgb::new(0xFF, 0xFA, 0xFA)),
    ("springgreen", Rgb::new(0x00, 0xFF, 0x7F)),
    ("steelblue", Rgb::new(0x46, 0x82, 0xB4)),
    ("tan", Rgb::new(0xD2, 0xB4, 0x8C)),
    ("teal", Rgb::new(0x00, 0x80, 0x80)),
    ("thistle", Rgb::new(0xD8, 0xBF, 0xD8)),
    ("tomato", Rgb::new(0xFF, 0x63, 0x47)),
    ("turquoise", Rgb::new(0x40, 0xE0, 0xD0)),
    ("violet", Rgb::new(0xEE, 0x82, 0xEE)),
    ("wheat", Rgb::new(0xF5, 0xDE, 0xB3)),
    ("white", Rgb::new(0xFF, 0xFF, 0xFF)),
    ("whitesmoke", Rgb::new(0xF5, 0xF5, 0xF5)),
    ("yellow", Rgb::new(0xFF, 0xFF, 0x00)),
    ("yellowgreen", Rgb::new(0x9A, 0xCD, 0x32)),
];
