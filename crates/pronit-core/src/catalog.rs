//! Static template tables: `.gitignore` templates by language or platform,
//! and the licenses offered in extended mode.

use crate::error::{PronitError, Result};

// ---------------------------------------------------------------------------
// Ignore templates
// ---------------------------------------------------------------------------

/// Lowercased key → template path in the gitignore template repository.
const IGNORE_TEMPLATES: &[(&str, &str)] = &[
    ("actionscript", "Actionscript.gitignore"),
    ("ada", "Ada.gitignore"),
    ("android", "Android.gitignore"),
    ("angular", "Angular.gitignore"),
    ("c", "C.gitignore"),
    ("c++", "C++.gitignore"),
    ("clojure", "Clojure.gitignore"),
    ("cmake", "CMake.gitignore"),
    ("cuda", "CUDA.gitignore"),
    ("dart", "Dart.gitignore"),
    ("delphi", "Delphi.gitignore"),
    ("elixir", "Elixir.gitignore"),
    ("elm", "Elm.gitignore"),
    ("erlang", "Erlang.gitignore"),
    ("flutter", "Dart.gitignore"),
    ("fortran", "Fortran.gitignore"),
    ("go", "Go.gitignore"),
    ("godot", "Godot.gitignore"),
    ("gradle", "Gradle.gitignore"),
    ("haskell", "Haskell.gitignore"),
    ("java", "Java.gitignore"),
    ("julia", "Julia.gitignore"),
    ("kotlin", "Kotlin.gitignore"),
    ("laravel", "Laravel.gitignore"),
    ("lua", "Lua.gitignore"),
    ("maven", "Maven.gitignore"),
    ("nextjs", "Nextjs.gitignore"),
    ("node", "Node.gitignore"),
    ("objective-c", "Objective-C.gitignore"),
    ("ocaml", "OCaml.gitignore"),
    ("perl", "Perl.gitignore"),
    ("python", "Python.gitignore"),
    ("r", "R.gitignore"),
    ("rails", "Rails.gitignore"),
    ("ruby", "Ruby.gitignore"),
    ("rust", "Rust.gitignore"),
    ("scala", "Scala.gitignore"),
    ("swift", "Swift.gitignore"),
    ("terraform", "Terraform.gitignore"),
    ("tex", "TeX.gitignore"),
    ("unity", "Unity.gitignore"),
    ("unrealengine", "UnrealEngine.gitignore"),
    ("visualstudio", "VisualStudio.gitignore"),
    ("zig", "Zig.gitignore"),
    // Global templates: editors and operating systems
    ("emacs", "Global/Emacs.gitignore"),
    ("jetbrains", "Global/JetBrains.gitignore"),
    ("linux", "Global/Linux.gitignore"),
    ("macos", "Global/macOS.gitignore"),
    ("vim", "Global/Vim.gitignore"),
    ("visualstudiocode", "Global/VisualStudioCode.gitignore"),
    ("vscode", "Global/VisualStudioCode.gitignore"),
    ("windows", "Global/Windows.gitignore"),
];

/// Template path for a language or platform name, case-insensitive.
pub fn lookup(key: &str) -> Option<&'static str> {
    let key = key.trim().to_lowercase();
    IGNORE_TEMPLATES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, path)| *path)
}

/// All known template keys, in table order.
pub fn keys() -> impl Iterator<Item = &'static str> {
    IGNORE_TEMPLATES.iter().map(|(k, _)| *k)
}

/// Split comma separated user input into template keys.
///
/// Whitespace is removed, empty entries are dropped, and repeated keys
/// (compared case-insensitively) keep only their first occurrence.
pub fn parse_ignore_keys(input: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for raw in input.split(',') {
        let key: String = raw.split_whitespace().collect();
        if key.is_empty() {
            continue;
        }
        if keys.iter().any(|k| k.eq_ignore_ascii_case(&key)) {
            continue;
        }
        keys.push(key);
    }
    keys
}

// ---------------------------------------------------------------------------
// Licenses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct License {
    /// Identifier understood by the hosting licenses API.
    pub id: &'static str,
    pub display_name: &'static str,
}

pub const LICENSES: &[License] = &[
    License {
        id: "mit",
        display_name: "MIT",
    },
    License {
        id: "apache-2.0",
        display_name: "Apache 2.0",
    },
    License {
        id: "gpl-3.0",
        display_name: "GNU GPLv3",
    },
    License {
        id: "bsd-3-clause",
        display_name: "BSD 3-Clause",
    },
    License {
        id: "unlicense",
        display_name: "Unlicense",
    },
];

pub fn license_at(index: usize) -> Result<License> {
    LICENSES
        .get(index)
        .copied()
        .ok_or_else(|| PronitError::InvalidLicenseIndex(index.to_string()))
}

/// Parse the license answer typed by the user.
///
/// Empty input means "no license" (`Ok(None)`); anything that isn't a valid
/// index is an `InvalidLicenseIndex` error.
pub fn parse_license_choice(input: &str) -> Result<Option<License>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    let index: usize = input
        .parse()
        .map_err(|_| PronitError::InvalidLicenseIndex(input.to_string()))?;
    license_at(index).map(Some)
}

/// `[0 - MIT, 1 - Apache 2.0, ...]`, used in the license question.
pub fn license_menu() -> String {
    let entries: Vec<String> = LICENSES
        .iter()
        .enumerate()
        .map(|(i, l)| format!("{i} - {}", l.display_name))
        .collect();
    format!("[{}]", entries.join(", "))
}
