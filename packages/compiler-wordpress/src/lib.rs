mod compiler;

pub use compiler::{
    build_theme_json, compile_to_theme_json, ColorSettings, CompileOptions, FontFamilyEntry,
    PaletteEntry, Settings, SizeEntry, SpacingSettings, StyleColor, StyleSpacing, StyleTypography,
    Styles, ThemeJson, TypographySettings, WordPressError, WordPressResult, THEME_JSON_SCHEMA,
    THEME_JSON_VERSION,
};
