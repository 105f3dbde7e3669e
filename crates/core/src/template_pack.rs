//! Template pack loading: JSON documents of template definitions validated
//! one by one into an ordered, name-unique pack.
//!
//! A pack file looks like `{ "templates": [ { "name": ..., ... }, ... ] }`.
//! Invalid templates are skipped and reported; they never abort the load.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{PackLoadError, TemplateError};
use crate::template::{SegmentTemplate, TemplateDefinition};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackDocument {
    pub templates: Vec<TemplateDefinition>,
}

/// One template definition that was rejected while building a pack.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateFailure {
    /// Position of the definition in the source document.
    pub index: usize,
    pub name: String,
    pub error: TemplateError,
}

#[derive(Debug, Clone)]
pub struct LoadedPack {
    pub pack: TemplatePack,
    pub failures: Vec<TemplateFailure>,
}

/// Ordered collection of validated templates with unique names. Pack order
/// is part of the generator's input: the same seed over the same order
/// reproduces the same layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplatePack {
    templates: Vec<Arc<SegmentTemplate>>,
}

impl TemplatePack {
    /// Builds a pack from already validated templates, rejecting duplicate names.
    pub fn new(templates: Vec<SegmentTemplate>) -> Result<Self, TemplateError> {
        let mut names = BTreeSet::new();
        for template in &templates {
            if !names.insert(template.name().to_string()) {
                return Err(TemplateError::DuplicateName { name: template.name().to_string() });
            }
        }
        Ok(Self { templates: templates.into_iter().map(Arc::new).collect() })
    }

    pub fn from_definitions(definitions: Vec<TemplateDefinition>) -> LoadedPack {
        let mut names = BTreeSet::new();
        let mut templates = Vec::with_capacity(definitions.len());
        let mut failures = Vec::new();

        for (index, definition) in definitions.into_iter().enumerate() {
            let name = definition.name.clone();
            let validated = SegmentTemplate::from_definition(definition).and_then(|template| {
                if names.contains(template.name()) {
                    Err(TemplateError::DuplicateName { name: template.name().to_string() })
                } else {
                    Ok(template)
                }
            });

            match validated {
                Ok(template) => {
                    names.insert(template.name().to_string());
                    templates.push(Arc::new(template));
                }
                Err(error) => {
                    warn!(index, template = %name, %error, "skipping invalid segment template");
                    failures.push(TemplateFailure { index, name, error });
                }
            }
        }

        LoadedPack { pack: Self { templates }, failures }
    }

    pub fn from_json_str(json: &str) -> Result<LoadedPack, PackLoadError> {
        let document: PackDocument = serde_json::from_str(json)?;
        Ok(Self::from_definitions(document.templates))
    }

    pub fn load(path: &Path) -> Result<LoadedPack, PackLoadError> {
        let content = fs::read_to_string(path)
            .map_err(|source| PackLoadError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&content)
    }

    pub fn templates(&self) -> &[Arc<SegmentTemplate>] {
        &self.templates
    }

    pub fn get(&self, name: &str) -> Option<&Arc<SegmentTemplate>> {
        self.templates.iter().find(|template| template.name() == name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn hub_count(&self) -> usize {
        self.templates.iter().filter(|template| template.is_hub()).count()
    }
}
