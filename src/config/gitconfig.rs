//! Gitconfig document model: parser, serializer and programmatic mutation.
//!
//! This is not a general gitconfig implementation. It accepts exactly the
//! subset this tool writes (plain `[section]` blocks with `key = value`
//! entries, and `[includeIf "kind:value"]` directives each followed by one
//! `path = …` line) and treats every structural deviation as a fatal parse
//! error. Comments, multi-line values and nested includes are out of scope.
//!
//! Documents produced by [`GitConfig::serialize`] round-trip exactly through
//! [`GitConfig::parse`]: same sections, entries, include rules and order.

use std::path::{Path, PathBuf};

use super::expand_tilde;
use crate::error::ConfigError;

/// A named group of `key = value` settings.
///
/// Entries keep their order; writing an existing key updates it in place,
/// writing a new key appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    /// Section header (e.g. `"user"` or a dotted identifier).
    pub header: String,
    /// Ordered key-value entries.
    pub entries: Vec<(String, String)>,
}

impl Section {
    /// Look up a setting by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.entries.push((key.to_string(), value.to_string()));
        }
    }
}

/// One conditional-include condition: "if `kind` matches `value`".
///
/// `kind` is `gitdir`, `onbranch`, or a compound kind containing a colon
/// (e.g. `hasconfig:remote.*.url`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeRule {
    pub kind: String,
    pub value: String,
}

impl IncludeRule {
    #[must_use]
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// All include rules pulling in the config fragment at one target path.
///
/// A path may carry many rules; git treats repeated directives for the same
/// path as alternative activation conditions, so rule order is preserved
/// verbatim and duplicates are never collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeGroup {
    /// Tilde-expanded target path of the included fragment.
    pub path: PathBuf,
    /// Conditions, in document order.
    pub rules: Vec<IncludeRule>,
}

/// The parsed representation of one gitconfig document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitConfig {
    /// Plain sections, in first-appearance order. Duplicate headers merge.
    pub sections: Vec<Section>,
    /// Include groups, keyed by target path, in first-appearance order.
    pub includes: Vec<IncludeGroup>,
}

/// Which kind of block the parser is currently inside.
enum Block {
    /// Before the first header.
    None,
    /// A plain section, by index into `sections`.
    Section(usize),
    /// An includeIf directive.
    Include,
}

impl GitConfig {
    /// Read and parse the document at `path`.
    ///
    /// A missing file is the empty document, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file exists but cannot be read, or
    /// a parse error from [`GitConfig::parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Serialize and write the whole document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.serialize()).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse document text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedSection`] or
    /// [`ConfigError::MalformedInclude`] on the first structural violation;
    /// there is no recovery mode.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut doc = Self::default();
        let mut block = Block::None;
        // Condition parsed from the most recent includeIf header, consumed by
        // its path line. One header carries exactly one path line.
        let mut pending: Option<IncludeRule> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let lineno = idx + 1;

            if line.starts_with("[includeIf") {
                let rule =
                    parse_include_header(line).ok_or_else(|| ConfigError::MalformedInclude {
                        line: lineno,
                        text: line.to_string(),
                    })?;
                pending = Some(rule);
                block = Block::Include;
            } else if line.starts_with('[') {
                let header =
                    parse_section_header(line).ok_or_else(|| ConfigError::MalformedSection {
                        line: lineno,
                        text: line.to_string(),
                    })?;
                // A dangling include header with no path line is dropped.
                pending = None;
                block = Block::Section(doc.section_index(&header));
            } else {
                match block {
                    Block::None => {
                        return Err(ConfigError::MalformedSection {
                            line: lineno,
                            text: line.to_string(),
                        });
                    }
                    Block::Include => {
                        let Some(rule) = pending.take() else {
                            // Second path line under one header.
                            return Err(ConfigError::MalformedInclude {
                                line: lineno,
                                text: line.to_string(),
                            });
                        };
                        let Some((_, target)) = split_setting(line) else {
                            return Err(ConfigError::MalformedInclude {
                                line: lineno,
                                text: line.to_string(),
                            });
                        };
                        doc.include_rules_mut(&expand_tilde(target)).push(rule);
                    }
                    Block::Section(index) => {
                        let Some((key, value)) = split_setting(line) else {
                            return Err(ConfigError::MalformedSection {
                                line: lineno,
                                text: line.to_string(),
                            });
                        };
                        doc.sections[index].set(key, value);
                    }
                }
            }
        }

        Ok(doc)
    }

    /// Serialize to canonical text: every include group first (one header and
    /// one path line per rule), then every section. Trailing newline always
    /// present for non-empty documents. This normalized layout is what the
    /// round-trip contract is defined against; an arbitrary source file's
    /// interleaving is not reproduced.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut lines = Vec::new();
        for group in &self.includes {
            for rule in &group.rules {
                lines.push(format!("[includeIf \"{}:{}\"]", rule.kind, rule.value));
                lines.push(format!("    path = {}", group.path.display()));
            }
        }
        for section in &self.sections {
            lines.push(format!("[{}]", section.header));
            for (key, value) in &section.entries {
                lines.push(format!("    {key} = {value}"));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }

    /// Set `key = value` in the named section, creating the section if
    /// needed. An existing key is updated in place.
    pub fn set(&mut self, header: &str, key: &str, value: &str) {
        let index = self.section_index(header);
        self.sections[index].set(key, value);
    }

    /// Look up a section by header.
    #[must_use]
    pub fn section(&self, header: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.header == header)
    }

    /// The rule list for `path`, creating an empty group if absent.
    pub fn include_rules_mut(&mut self, path: &Path) -> &mut Vec<IncludeRule> {
        let index = match self.includes.iter().position(|g| g.path == path) {
            Some(index) => index,
            None => {
                self.includes.push(IncludeGroup {
                    path: path.to_path_buf(),
                    rules: Vec::new(),
                });
                self.includes.len() - 1
            }
        };
        &mut self.includes[index].rules
    }

    /// Whether any include group targets `path`.
    #[must_use]
    pub fn has_include(&self, path: &Path) -> bool {
        self.includes.iter().any(|g| g.path == path)
    }

    /// Target paths of all include groups, in document order.
    pub fn include_paths(&self) -> impl Iterator<Item = &Path> {
        self.includes.iter().map(|g| g.path.as_path())
    }

    /// Index of the section with `header`, creating it if absent.
    fn section_index(&mut self, header: &str) -> usize {
        match self.sections.iter().position(|s| s.header == header) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    header: header.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

/// Parse an `[includeIf "kind:value"]` header line.
///
/// The line must carry exactly one double-quoted payload, and the payload
/// must split on `:` into exactly 2 tokens (simple kind) or 4 tokens
/// (compound kind, e.g. `hasconfig:remote.*.url:https://…`). Both halves of
/// the resulting condition must be non-empty.
fn parse_include_header(line: &str) -> Option<IncludeRule> {
    let parts: Vec<&str> = line.split('"').collect();
    if parts.len() != 3 {
        return None;
    }
    let tokens: Vec<&str> = parts[1].split(':').collect();
    let rule = match tokens.as_slice() {
        [kind, value] => IncludeRule::new(*kind, *value),
        [k1, k2, v1, v2] => IncludeRule::new(format!("{k1}:{k2}"), format!("{v1}:{v2}")),
        _ => return None,
    };
    if rule.kind.is_empty() || rule.value.is_empty() {
        return None;
    }
    Some(rule)
}

/// Parse a `[header]` line, preserving case.
fn parse_section_header(line: &str) -> Option<String> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    if inner.is_empty() {
        return None;
    }
    Some(inner.to_string())
}

/// Split a setting line on its single `=`. More or fewer than exactly one
/// `=` is a structural violation.
fn split_setting(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split('=');
    let key = parts.next()?;
    let value = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((key.trim(), value.trim()))
}
