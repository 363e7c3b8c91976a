use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::model::formula::CORE_DIMENSIONS;
use crate::model::item::{DEFAULT_WEIGHT, ScoredItem};

/// Mid-scale score; keeps every template dimension away from the bounds.
pub const TEMPLATE_SCORE: u8 = 2;
pub const TEMPLATE_JUSTIFICATION: &str = "template";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateSystem {
    pub name: String,
    pub description: String,
    pub context: String,
}

/// Canonical neutral input: one item per core dimension.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub system: TemplateSystem,
    pub items: Vec<ScoredItem>,
}

impl Template {
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn neutral_template(name: &str) -> Template {
    let items = CORE_DIMENSIONS
        .iter()
        .map(|&dimension| {
            ScoredItem::new(dimension, TEMPLATE_SCORE)
                .with_weight(DEFAULT_WEIGHT)
                .with_justification(TEMPLATE_JUSTIFICATION)
        })
        .collect();

    Template {
        system: TemplateSystem {
            name: name.to_string(),
            description: "template".to_string(),
            context: "cli".to_string(),
        },
        items,
    }
}

pub fn write_template(path: &Path, name: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = neutral_template(name).to_json_pretty()?;
    fs::write(path, json)
}

#[cfg(test)]
#[path = "../tests/src_inline/template.rs"]
mod tests;
