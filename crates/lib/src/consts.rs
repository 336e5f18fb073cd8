//! Project-wide defaults.

pub const APP_NAME: &str = "whipbuild";

/// Compiler used when none is configured.
pub const DEFAULT_COMPILER: &str = "cc";

/// Source root, relative to the project directory.
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// File-name suffixes that mark a compilable source file.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".c"];

pub const RELEASE_OUTPUT: &str = "out/whippet.out";
pub const DEBUG_OUTPUT: &str = "out/a.out";
pub const CUSTOM_OUTPUT: &str = "out/c_whippet.out";

/// Compiler flag that precedes the output path in a single token.
pub const OUTPUT_FLAG: &str = "-o";
