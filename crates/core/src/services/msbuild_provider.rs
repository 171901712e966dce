//! Static evaluator for MSBuild project documents
//!
//! Reads properties from `PropertyGroup` blocks and the `Include` of
//! `ProjectReference` / `ProjectFile` items. Imports, SDKs and conditions
//! are not evaluated; a conditional property only supplies a value the
//! document has not defined yet, which covers the usual
//! `Condition=" '$(Platform)' == '' "` default pattern.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use regex::Regex;
use std::collections::HashMap;
use std::env;
use std::fmt::Display;
use std::fs;
use std::path::{MAIN_SEPARATOR, Path};
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::interfaces::{ProjectModel, ProjectModelProvider};

const PROJECT_GUID_PROPERTY: &str = "projectguid";
const PLATFORM_PROPERTY: &str = "platform";

static PROPERTY_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\(([A-Za-z_][\w.\-]*)\)").expect("valid property reference pattern")
});

/// Evaluates `*.*proj` files written in the MSBuild XML dialect
#[derive(Debug, Default, Clone, Copy)]
pub struct MsBuildProjectProvider;

impl MsBuildProjectProvider {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate already-read document text as if it lived at `path`
    pub fn evaluate_source(&self, path: &Path, source: &str) -> Result<ProjectModel> {
        let malformed = |reason: &dyn Display| Error::ProjectEvaluation {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        };

        let mut reader = Reader::from_str(source);
        let mut properties = Properties::new(path);
        let mut includes = Vec::new();
        let mut open: Vec<Element> = Vec::new();
        // Text of the property element currently being read
        let mut value: Option<String> = None;
        let mut seen_root = false;

        loop {
            let event = reader.read_event().map_err(|e| malformed(&e))?;
            match event {
                Event::Start(ref start) | Event::Empty(ref start) => {
                    let self_closing = matches!(event, Event::Empty(_));
                    let element = Element::read(start).map_err(|e| malformed(&e))?;

                    if !seen_root {
                        if !element.is("Project") {
                            return Err(malformed(&"not an MSBuild project document"));
                        }
                        seen_root = true;
                    }

                    if element.is("ProjectReference") || element.is("ProjectFile") {
                        if let Some(include) = &element.include {
                            includes.push(include.clone());
                        }
                    }

                    if let Some(group) = property_group(&open) {
                        if self_closing {
                            properties.define(
                                &element.name,
                                "",
                                group.conditional || element.conditional,
                            );
                        } else {
                            value = Some(String::new());
                        }
                    }

                    if !self_closing {
                        open.push(element);
                    }
                }
                Event::Text(text) => {
                    if open.len() == 3 {
                        if let Some(value) = value.as_mut() {
                            value.push_str(&text.unescape().map_err(|e| malformed(&e))?);
                        }
                    }
                }
                Event::CData(data) => {
                    if open.len() == 3 {
                        if let Some(value) = value.as_mut() {
                            value.push_str(&String::from_utf8_lossy(&data));
                        }
                    }
                }
                Event::End(_) => {
                    let Some(element) = open.pop() else {
                        continue;
                    };
                    if let Some(group) = property_group(&open) {
                        if let Some(raw) = value.take() {
                            let conditional = group.conditional || element.conditional;
                            properties.define(&element.name, &raw, conditional);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !seen_root {
            return Err(malformed(&"not an MSBuild project document"));
        }

        let references = includes
            .iter()
            .flat_map(|include| {
                properties
                    .expand(include)
                    .split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(to_host_separators)
                    .collect::<Vec<_>>()
            })
            .collect();

        Ok(ProjectModel {
            identifier: properties.get(PROJECT_GUID_PROPERTY),
            platform: properties.get(PLATFORM_PROPERTY),
            references,
        })
    }
}

impl ProjectModelProvider for MsBuildProjectProvider {
    fn evaluate(&self, path: &Path) -> Result<ProjectModel> {
        let source = fs::read_to_string(path).map_err(|e| Error::ProjectEvaluation {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.evaluate_source(path, &source)
    }
}

/// An open element and the attributes evaluation cares about
struct Element {
    name: String,
    conditional: bool,
    include: Option<String>,
}

impl Element {
    fn read(start: &BytesStart) -> std::result::Result<Self, String> {
        let mut element = Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            conditional: false,
            include: None,
        };

        for attribute in start.attributes() {
            let attribute = attribute.map_err(|e| e.to_string())?;
            match attribute.key.local_name().as_ref() {
                b"Condition" => element.conditional = true,
                b"Include" => {
                    let include = attribute.unescape_value().map_err(|e| e.to_string())?;
                    element.include = Some(include.into_owned());
                }
                _ => {}
            }
        }

        Ok(element)
    }

    fn is(&self, name: &str) -> bool {
        self.name == name
    }
}

/// The `PropertyGroup` directly below the root, if that is where `open`
/// currently points
fn property_group(open: &[Element]) -> Option<&Element> {
    match open {
        [_, group] if group.is("PropertyGroup") => Some(group),
        _ => None,
    }
}

/// Property bag keyed by lower-cased name; MSBuild property names are
/// case-insensitive
struct Properties {
    values: HashMap<String, String>,
    reserved: HashMap<&'static str, String>,
}

impl Properties {
    fn new(path: &Path) -> Self {
        Self {
            values: HashMap::new(),
            reserved: reserved_properties(path),
        }
    }

    fn define(&mut self, name: &str, raw: &str, conditional: bool) {
        let name = name.to_lowercase();
        if conditional && self.values.contains_key(&name) {
            return;
        }

        let value = self.expand(raw).trim().to_string();
        tracing::trace!("Property {} = {:?}", name, value);
        self.values.insert(name, value);
    }

    fn get(&self, name: &str) -> Option<String> {
        self.values
            .get(name)
            .filter(|value| !value.is_empty())
            .cloned()
    }

    fn lookup(&self, name: &str) -> String {
        let key = name.to_lowercase();
        if let Some(value) = self.values.get(&key) {
            return value.clone();
        }
        if let Some(value) = self.reserved.get(key.as_str()) {
            return value.clone();
        }
        env::var(name).unwrap_or_default()
    }

    /// Replace every `$(Name)` with its value; unknown names expand to
    /// nothing, as in MSBuild
    fn expand(&self, text: &str) -> String {
        PROPERTY_REF_RE
            .replace_all(text, |caps: &regex::Captures| self.lookup(&caps[1]))
            .into_owned()
    }
}

fn reserved_properties(path: &Path) -> HashMap<&'static str, String> {
    let directory = path
        .parent()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut reserved = HashMap::new();
    reserved.insert("msbuildthisfiledirectory", format!("{directory}{MAIN_SEPARATOR}"));
    reserved.insert("msbuildprojectdirectory", directory);
    reserved.insert("msbuildprojectname", name);
    reserved
}

fn to_host_separators(include: &str) -> String {
    crate::utils::path::from_project_path(include)
        .to_string_lossy()
        .into_owned()
}
