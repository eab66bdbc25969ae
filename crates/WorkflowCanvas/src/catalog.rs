//! # Module Catalog
//!
//! Static definitions of the node types a user can place, and the fields each one
//! exposes to the property editor. The catalog is read-only lookup data for the editor;
//! it is loaded from YAML, and a built-in catalog ships with the crate.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::CatalogError;
use crate::model::FieldValue;

const BUILTIN_CATALOG: &str = include_str!("../catalog/modules.yaml");

/// How the property editor renders a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldInputType {
    Text,
    Textarea,
    Select,
    Multiselect,
    Slider,
    File,
}

impl FieldInputType {
    /// Choice fields must list their options.
    pub fn needs_options(self) -> bool {
        matches!(self, FieldInputType::Select | FieldInputType::Multiselect)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleField {
    pub name: String,
    pub required: bool,
    pub input_type: FieldInputType,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ModuleField {
    /// The value a freshly placed node shows for this field.
    ///
    /// Numeric slider defaults become numbers, everything else stays text.
    pub fn default_field_value(&self) -> Option<FieldValue> {
        let raw = self.default_value.as_deref()?;
        match self.input_type {
            FieldInputType::Slider => Some(
                raw.parse::<f64>()
                    .map(FieldValue::Number)
                    .unwrap_or_else(|_| FieldValue::from(raw)),
            ),
            FieldInputType::Multiselect => Some(FieldValue::List(vec![raw.to_string()])),
            _ => Some(FieldValue::from(raw)),
        }
    }
}

/// A node "type" the user can drag onto the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    pub id: String,
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<ModuleField>,
}

impl ModuleDefinition {
    pub fn field(&self, name: &str) -> Option<&ModuleField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModuleCatalog {
    modules: Vec<ModuleDefinition>,
}

impl ModuleCatalog {
    /// Builds a catalog, rejecting duplicate ids and choice fields without options.
    pub fn new(modules: Vec<ModuleDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.id.as_str()) {
                return Err(CatalogError::DuplicateModule(module.id.clone()));
            }
            if let Some(field) = module
                .fields
                .iter()
                .find(|f| f.input_type.needs_options() && f.options.is_empty())
            {
                return Err(CatalogError::MissingOptions {
                    module: module.id.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(Self { modules })
    }

    /// Parses a YAML list of module definitions.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let modules: Vec<ModuleDefinition> = serde_yaml::from_str(yaml)?;
        Self::new(modules)
    }

    /// The catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    pub fn get(&self, id: &str) -> Option<&ModuleDefinition> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModuleDefinition> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules grouped by category, categories in order of first appearance.
    pub fn by_category(&self) -> Vec<(&str, Vec<&ModuleDefinition>)> {
        let mut groups: Vec<(&str, Vec<&ModuleDefinition>)> = Vec::new();
        for module in &self.modules {
            match groups.iter().position(|(c, _)| *c == module.category) {
                Some(idx) => groups[idx].1.push(module),
                None => groups.push((module.category.as_str(), vec![module])),
            }
        }
        groups
    }
}
