//! Configuration constants for conversion and extraction.

/// Extension given to converted fonts.
pub const OTF_EXTENSION: &str = "otf";

/// Glob pattern used by `convert-dir` when none is given.
pub const DEFAULT_WOFF_PATTERN: &str = "*.woff";

/// Host serving Typekit kit scripts.
pub const TYPEKIT_HOST: &str = "use.typekit.net";

/// Placeholder in the kit CSS URL template.
pub const CSS_FORMAT_PLACEHOLDER: &str = "{format}{/extras*}";

/// Value substituted for [`CSS_FORMAT_PLACEHOLDER`]; selects data URI fonts.
pub const CSS_FORMAT: &str = "d";

/// User agent sent with every request. Kits serve embedded fonts to it.
pub const USER_AGENT: &str = "Mozilla/5.0 (iPad; CPU OS 6_0 like Mac OS X) \
     AppleWebKit/536.26 (KHTML, like Gecko) Version/6.0 Mobile/10A5355d Safari/8536.25";

/// Do Not Track header value.
pub const DNT: &str = "1";
