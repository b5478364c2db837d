//! Transcription specification for one language.
//!
//! A [`Spec`] is parsed once from an [`Hgl`] document and is immutable
//! afterwards. Its rules are compiled during parsing, so a `Spec` can be
//! shared between threads and used for any number of words without
//! recompiling anything.
//!
//! # Sections
//!
//! | section     | kind | required | contents                                    |
//! |-------------|------|----------|---------------------------------------------|
//! | `lang`      | dict | yes      | `id`, `code`, `english`, `korean`, `script`, `pronounce` |
//! | `config`    | dict | yes      | `authors`, `stage`, `markers`               |
//! | `vars`      | dict | no       | variable name to alternatives               |
//! | `rewrite`   | list | yes      | normalization rules                         |
//! | `hangulize` | list | yes      | script-mapping rules                        |
//! | `test`      | list | no       | input to expected output                    |

use std::fmt;

use log::debug;

use crate::error::{Result, SpecError, Stage};
use crate::hgl::{DictSection, Hgl, ListSection, Pair, Section};
use crate::rule::{Rule, Vars};

/// Identity of a natural language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Language {
    id: String,
    codes: Vec<String>,
    english: String,
    korean: String,
    script: String,
    pronounce: Option<String>,
}

impl Language {
    /// The language identifier, e.g. `ita`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Locale codes, e.g. `["it", "ita"]`.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// English name.
    pub fn english(&self) -> &str {
        &self.english
    }

    /// Korean name.
    pub fn korean(&self) -> &str {
        &self.korean
    }

    /// Name of the source script, e.g. `latin`.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Identifier of the pronouncer the language wants, if any.
    pub fn pronounce(&self) -> Option<&str> {
        self.pronounce.as_deref()
    }
}

/// Per-language configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    authors: Vec<String>,
    stage: String,
    markers: Vec<char>,
}

impl Config {
    /// Authors of the spec.
    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    /// Maturity label of the spec (`draft`, `candidate`, ...). Informational.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    /// Reserved single-character markers usable in rules.
    pub fn markers(&self) -> &[char] {
        &self.markers
    }

    /// Whether `ch` is one of the markers.
    #[inline]
    pub fn is_marker(&self, ch: char) -> bool {
        self.markers.contains(&ch)
    }
}

/// A complete, validated transcription specification.
#[derive(Debug, Clone)]
pub struct Spec {
    lang: Language,
    config: Config,
    vars: Vars,
    rewrite: Vec<Rule>,
    hangulize: Vec<Rule>,
    test: Vec<Pair>,
}

impl Spec {
    /// Parse and compile a spec.
    ///
    /// # Errors
    ///
    /// Fails on the first structural problem (missing or mistyped section,
    /// missing `lang.id`, malformed marker) or the first rule that does not
    /// compile. No partial spec is ever returned.
    pub fn parse(hgl: &Hgl) -> Result<Self> {
        let lang = build_language(required_dict(hgl, "lang")?)?;
        let config = build_config(required_dict(hgl, "config")?)?;

        let vars = match optional(hgl, "vars", Section::as_dict, "dict")? {
            Some(dict) => dict.map().clone(),
            None => Vars::default(),
        };

        let rewrite = build_rules(required_list(hgl, Stage::Rewrite)?, Stage::Rewrite, &vars)?;
        let hangulize = build_rules(
            required_list(hgl, Stage::Hangulize)?,
            Stage::Hangulize,
            &vars,
        )?;

        let test = match optional(hgl, "test", Section::as_list, "list")? {
            Some(list) => list.array().to_vec(),
            None => Vec::new(),
        };

        debug!(
            "built spec lang={} rewrite={} hangulize={} tests={}",
            lang.id,
            rewrite.len(),
            hangulize.len(),
            test.len()
        );

        Ok(Spec {
            lang,
            config,
            vars,
            rewrite,
            hangulize,
            test,
        })
    }

    /// Decode an HGL document from JSON and parse it.
    #[cfg(feature = "serialization")]
    pub fn from_json(json: &str) -> Result<Self> {
        Self::parse(&Hgl::from_json(json)?)
    }

    /// The language identity.
    pub fn lang(&self) -> &Language {
        &self.lang
    }

    /// The language configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Pattern variables.
    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    /// Compiled normalization rules in declaration order.
    pub fn rewrite(&self) -> &[Rule] {
        &self.rewrite
    }

    /// Compiled script-mapping rules in declaration order.
    pub fn hangulize(&self) -> &[Rule] {
        &self.hangulize
    }

    /// The rules of one stage.
    pub fn rules(&self, stage: Stage) -> &[Rule] {
        match stage {
            Stage::Rewrite => &self.rewrite,
            Stage::Hangulize => &self.hangulize,
        }
    }

    /// Self-test examples: input to expected output.
    pub fn test(&self) -> &[Pair] {
        &self.test
    }
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Spec lang={}>", self.lang.id)
    }
}

fn optional<'h, T: ?Sized>(
    hgl: &'h Hgl,
    name: &str,
    shape: fn(&'h Section) -> Option<&'h T>,
    expected: &'static str,
) -> Result<Option<&'h T>> {
    match hgl.get(name) {
        None => Ok(None),
        Some(section) => shape(section)
            .map(Some)
            .ok_or_else(|| SpecError::WrongSectionKind {
                section: name.to_string(),
                expected,
            }),
    }
}

fn required_dict<'h>(hgl: &'h Hgl, name: &'static str) -> Result<&'h DictSection> {
    optional(hgl, name, Section::as_dict, "dict")?
        .ok_or(SpecError::MissingSection { section: name })
}

fn required_list(hgl: &Hgl, stage: Stage) -> Result<&ListSection> {
    let name = stage.section();
    optional(hgl, name, Section::as_list, "list")?
        .ok_or(SpecError::MissingSection { section: name })
}

fn build_language(dict: &DictSection) -> Result<Language> {
    let id = match dict.one("id") {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return Err(SpecError::MissingField {
                section: "lang",
                field: "id",
            })
        }
    };

    let single = |key: &str| dict.one(key).unwrap_or_default().to_string();

    Ok(Language {
        id,
        codes: dict.all("code").to_vec(),
        english: single("english"),
        korean: single("korean"),
        script: single("script"),
        pronounce: dict.one("pronounce").filter(|p| !p.is_empty()).map(String::from),
    })
}

fn build_config(dict: &DictSection) -> Result<Config> {
    // A marker must be 1-character.
    let markers = dict
        .all("markers")
        .iter()
        .map(|marker| {
            let mut chars = marker.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Ok(ch),
                _ => Err(SpecError::InvalidMarker {
                    marker: marker.clone(),
                }),
            }
        })
        .collect::<Result<Vec<char>>>()?;

    Ok(Config {
        authors: dict.all("authors").to_vec(),
        stage: dict.one("stage").unwrap_or_default().to_string(),
        markers,
    })
}

fn build_rules(list: &ListSection, stage: Stage, vars: &Vars) -> Result<Vec<Rule>> {
    list.array()
        .iter()
        .enumerate()
        .map(|(index, pair)| Rule::compile(stage, index, pair, vars))
        .collect()
}
