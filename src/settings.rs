//! Snapshot settings.
//!
//! Settings arrive as loosely typed JSON. Every key is read on its own: an unknown
//! key is dropped and a key of the wrong type falls back to its default, both with a
//! [`SettingsWarning`]. Nothing here is fatal.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Arc, RwLock};

use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

/// How void elements are closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoidElements {
    /// `<input>`
    Html,
    /// `<input />`
    #[default]
    Xhtml,
    /// `<input></input>`
    Xml,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattingConfig {
    /// Attributes are put one per line once an element has more than this many
    pub attributes_per_line: usize,
    /// Classes are put one per line once a `class` has more than this many
    pub classes_per_line: usize,
    /// Print `attr=""` rather than a bare `attr`
    pub empty_attributes: bool,
    /// Close empty non-void elements as `<tag />`
    pub self_closing_tag: bool,
    pub void_elements: VoidElements,
    pub tags_with_whitespace_preserved: BTreeSet<String>,
    pub escape_attributes: bool,
    pub escape_inner_text: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            attributes_per_line: 1,
            classes_per_line: 1,
            empty_attributes: true,
            self_closing_tag: false,
            void_elements: VoidElements::Xhtml,
            tags_with_whitespace_preserved: ["a", "pre"].map(String::from).into(),
            escape_attributes: false,
            escape_inner_text: true,
        }
    }
}

/// Returns the formatted text, or `None` when it cannot produce any
pub type CustomFormatter = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

#[derive(Clone)]
pub enum Formatting {
    /// Serialize the transformed tree back to markup without reformatting it
    None,
    Diffable(FormattingConfig),
    Custom(CustomFormatter),
}

impl Default for Formatting {
    fn default() -> Self {
        Formatting::Diffable(FormattingConfig::default())
    }
}

impl fmt::Debug for Formatting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatting::None => f.write_str("None"),
            Formatting::Diffable(config) => f.debug_tuple("Diffable").field(config).finish(),
            Formatting::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AttributeRemoval {
    All(bool),
    Named(Vec<String>),
}

impl Default for AttributeRemoval {
    fn default() -> Self {
        AttributeRemoval::All(false)
    }
}

/// How a stubbed element is rewritten. Unset fields leave that aspect alone.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StubSpec {
    pub remove_inner_html: bool,
    pub remove_attributes: AttributeRemoval,
    pub tag_name: Option<String>,
}

impl StubSpec {
    /// Drop both children and attributes
    pub fn full(tag_name: Option<String>) -> Self {
        Self {
            remove_inner_html: true,
            remove_attributes: AttributeRemoval::All(true),
            tag_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    pub remove_server_rendered: bool,
    pub remove_data_test: bool,
    pub remove_data_testid: bool,
    pub remove_data_test_id: bool,
    pub remove_data_qa: bool,
    pub remove_data_cy: bool,
    pub remove_data_pw: bool,
    pub remove_id_test: bool,
    pub remove_class_test: bool,
    pub remove_data_v_id: bool,
    pub attributes_to_clear: Vec<String>,
    pub clear_inline_functions: bool,
    pub stringify_attributes: bool,
    pub attributes_not_to_stringify: Vec<String>,
    pub add_input_values: bool,
    /// Selector to stub, in configuration order
    pub stubs: Vec<(String, StubSpec)>,
    pub remove_comments: bool,
    pub sort_attributes: bool,
    pub sort_classes: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            remove_server_rendered: true,
            remove_data_test: true,
            remove_data_testid: true,
            remove_data_test_id: true,
            remove_data_qa: false,
            remove_data_cy: false,
            remove_data_pw: false,
            remove_id_test: false,
            remove_class_test: false,
            remove_data_v_id: true,
            attributes_to_clear: Vec::new(),
            clear_inline_functions: false,
            stringify_attributes: true,
            attributes_not_to_stringify: vec!["style".to_string()],
            add_input_values: true,
            stubs: Vec::new(),
            remove_comments: false,
            sort_attributes: true,
            sort_classes: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub transform: TransformConfig,
    pub formatting: Formatting,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transform: TransformConfig::default(),
            formatting: Formatting::default(),
            verbose: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsWarning {
    #[error("settings must be an object, using the defaults")]
    NotAnObject,
    #[error("unrecognized setting `{key}` was ignored")]
    UnknownKey { key: String },
    #[error("setting `{key}` expects {expected}, using the default")]
    WrongType { key: String, expected: &'static str },
}

lazy_static! {
    static ref GLOBAL: RwLock<Settings> = RwLock::new(Settings::default());
}

/// Replace the process-wide settings
pub fn install(settings: Settings) {
    match GLOBAL.write() {
        Ok(mut global) => *global = settings,
        Err(poisoned) => *poisoned.into_inner() = settings,
    }
}

/// A private copy of the process-wide settings. Formatting works from one snapshot for
/// a whole invocation, so a concurrent [`install`] never shows up halfway through.
pub fn snapshot() -> Settings {
    match GLOBAL.read() {
        Ok(global) => global.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// Reads typed values out of a JSON object, recording a warning for each key it
/// cannot use
struct Reader<'a> {
    object: &'a Map<String, Value>,
    prefix: &'static str,
    warnings: Vec<SettingsWarning>,
}

impl<'a> Reader<'a> {
    fn new(object: &'a Map<String, Value>, prefix: &'static str) -> Self {
        Self {
            object,
            prefix,
            warnings: Vec::new(),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn read<T: DeserializeOwned>(&mut self, key: &str, expected: &'static str, default: T) -> T {
        let Some(value) = self.object.get(key) else {
            return default;
        };
        match T::deserialize(value) {
            Ok(v) => v,
            Err(_) => {
                self.warnings.push(SettingsWarning::WrongType {
                    key: self.key(key),
                    expected,
                });
                default
            }
        }
    }

    fn flag(&mut self, key: &str, default: bool) -> bool {
        self.read(key, "a boolean", default)
    }

    fn names(&mut self, key: &str, default: Vec<String>) -> Vec<String> {
        self.read(key, "a list of strings", default)
    }

    fn wrong_type(&mut self, key: &str, expected: &'static str) {
        self.warnings.push(SettingsWarning::WrongType {
            key: self.key(key),
            expected,
        });
    }

    /// Warn about every key not in `known`
    fn reject_unknown(&mut self, known: &[&str]) {
        for key in self.object.keys() {
            if !known.contains(&key.as_str()) {
                self.warnings.push(SettingsWarning::UnknownKey { key: self.key(key) });
            }
        }
    }
}

static SETTINGS_KEYS: &[&str] = &[
    "addInputValues",
    "attributesNotToStringify",
    "attributesToClear",
    "clearInlineFunctions",
    "formatting",
    "removeClassTest",
    "removeComments",
    "removeDataCy",
    "removeDataPw",
    "removeDataQa",
    "removeDataTest",
    "removeDataTestId",
    "removeDataTestid",
    "removeDataVId",
    "removeIdTest",
    "removeServerRendered",
    "sortAttributes",
    "sortClasses",
    "stringifyAttributes",
    "stubs",
    "verbose",
];

static FORMATTING_KEYS: &[&str] = &[
    "attributesPerLine",
    "classesPerLine",
    "emptyAttributes",
    "escapeAttributes",
    "escapeInnerText",
    "selfClosingTag",
    "tagsWithWhitespacePreserved",
    "voidElements",
];

impl Settings {
    /// Build settings from JSON, logging every warning when the result is verbose
    pub fn from_json(value: &Value) -> Self {
        let (settings, warnings) = Self::parse(value);
        if settings.verbose {
            for warning in &warnings {
                warn!("{warning}");
            }
        }
        settings
    }

    /// Build settings from JSON, returning the warnings instead of logging them
    pub fn parse(value: &Value) -> (Self, Vec<SettingsWarning>) {
        let Value::Object(object) = value else {
            return (Self::default(), vec![SettingsWarning::NotAnObject]);
        };
        let defaults = TransformConfig::default();
        let mut reader = Reader::new(object, "");
        reader.reject_unknown(SETTINGS_KEYS);
        let transform = TransformConfig {
            remove_server_rendered: reader
                .flag("removeServerRendered", defaults.remove_server_rendered),
            remove_data_test: reader.flag("removeDataTest", defaults.remove_data_test),
            remove_data_testid: reader.flag("removeDataTestid", defaults.remove_data_testid),
            remove_data_test_id: reader.flag("removeDataTestId", defaults.remove_data_test_id),
            remove_data_qa: reader.flag("removeDataQa", defaults.remove_data_qa),
            remove_data_cy: reader.flag("removeDataCy", defaults.remove_data_cy),
            remove_data_pw: reader.flag("removeDataPw", defaults.remove_data_pw),
            remove_id_test: reader.flag("removeIdTest", defaults.remove_id_test),
            remove_class_test: reader.flag("removeClassTest", defaults.remove_class_test),
            remove_data_v_id: reader.flag("removeDataVId", defaults.remove_data_v_id),
            attributes_to_clear: reader.names("attributesToClear", defaults.attributes_to_clear),
            clear_inline_functions: reader
                .flag("clearInlineFunctions", defaults.clear_inline_functions),
            stringify_attributes: reader.flag("stringifyAttributes", defaults.stringify_attributes),
            attributes_not_to_stringify: reader.names(
                "attributesNotToStringify",
                defaults.attributes_not_to_stringify,
            ),
            add_input_values: reader.flag("addInputValues", defaults.add_input_values),
            stubs: read_stubs(&mut reader),
            remove_comments: reader.flag("removeComments", defaults.remove_comments),
            sort_attributes: reader.flag("sortAttributes", defaults.sort_attributes),
            sort_classes: reader.flag("sortClasses", defaults.sort_classes),
        };
        let formatting = read_formatting(&mut reader);
        let verbose = reader.flag("verbose", true);
        let settings = Self {
            transform,
            formatting,
            verbose,
        };
        (settings, reader.warnings)
    }
}

/// `["sel", ...]`, or `{"sel": "tag-name" | StubSpec, ...}`
fn read_stubs(reader: &mut Reader) -> Vec<(String, StubSpec)> {
    const EXPECTED: &str = "a list of selectors or an object of stub definitions";
    let object = reader.object;
    let mut stubs = Vec::new();
    match object.get("stubs") {
        None => {}
        Some(Value::Array(selectors)) => {
            for selector in selectors {
                match selector {
                    Value::String(s) => stubs.push((s.clone(), StubSpec::full(None))),
                    _ => reader.wrong_type("stubs", EXPECTED),
                }
            }
        }
        Some(Value::Object(definitions)) => {
            for (selector, definition) in definitions {
                let spec = match definition {
                    Value::String(tag) => StubSpec::full(Some(tag.clone())),
                    other => match StubSpec::deserialize(other) {
                        Ok(spec) => spec,
                        Err(_) => {
                            reader.warnings.push(SettingsWarning::WrongType {
                                key: format!("stubs.{selector}"),
                                expected: "a tag name or a stub definition",
                            });
                            continue;
                        }
                    },
                };
                stubs.push((selector.clone(), spec));
            }
        }
        Some(_) => reader.wrong_type("stubs", EXPECTED),
    }
    stubs
}

/// `"none"`, `"diffable"` or an object of formatting options
fn read_formatting(reader: &mut Reader) -> Formatting {
    const EXPECTED: &str = "\"none\", \"diffable\" or an object of formatting options";
    let object = reader.object;
    match object.get("formatting") {
        None => Formatting::default(),
        Some(Value::String(s)) if s == "none" => Formatting::None,
        Some(Value::String(s)) if s == "diffable" => Formatting::default(),
        Some(Value::Object(options)) => {
            let defaults = FormattingConfig::default();
            let mut inner = Reader::new(options, "formatting.");
            inner.reject_unknown(FORMATTING_KEYS);
            let config = FormattingConfig {
                attributes_per_line: inner.read(
                    "attributesPerLine",
                    "a non-negative integer",
                    defaults.attributes_per_line,
                ),
                classes_per_line: inner.read(
                    "classesPerLine",
                    "a non-negative integer",
                    defaults.classes_per_line,
                ),
                empty_attributes: inner.flag("emptyAttributes", defaults.empty_attributes),
                self_closing_tag: inner.flag("selfClosingTag", defaults.self_closing_tag),
                void_elements: inner.read(
                    "voidElements",
                    "one of \"html\", \"xhtml\" or \"xml\"",
                    defaults.void_elements,
                ),
                tags_with_whitespace_preserved: inner.read(
                    "tagsWithWhitespacePreserved",
                    "a list of tag names",
                    defaults.tags_with_whitespace_preserved,
                ),
                escape_attributes: inner.flag("escapeAttributes", defaults.escape_attributes),
                escape_inner_text: inner.flag("escapeInnerText", defaults.escape_inner_text),
            };
            reader.warnings.extend(inner.warnings);
            Formatting::Diffable(config)
        }
        Some(_) => {
            reader.wrong_type("formatting", EXPECTED);
            Formatting::default()
        }
    }
}
