use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use super::Prediction;

#[derive(Deserialize)]
struct ModelConfigFile {
    id2label: HashMap<String, String>,
}

/// Index to label mapping bundled with the model.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new(labels: Vec<String>) -> anyhow::Result<Self> {
        if labels.is_empty() {
            bail!("label table is empty");
        }
        Ok(Self { labels })
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_model_config(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parses the `id2label` map of a model `config.json`.
    pub fn from_model_config(json: &str) -> anyhow::Result<Self> {
        let config: ModelConfigFile = serde_json::from_str(json)?;

        let mut entries = config
            .id2label
            .into_iter()
            .map(|(id, label)| {
                id.parse::<usize>()
                    .map(|id| (id, label))
                    .with_context(|| format!("label id {id:?} is not an integer"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        entries.sort_by_key(|(id, _)| *id);

        for (expected, (id, _)) in entries.iter().enumerate() {
            if *id != expected {
                bail!("label ids are not contiguous: expected {expected}, found {id}");
            }
        }

        Self::new(entries.into_iter().map(|(_, label)| label).collect())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Picks the highest score. Ties keep the earliest index.
    pub fn best(&self, scores: &[f32]) -> anyhow::Result<Prediction> {
        if scores.len() != self.labels.len() {
            bail!(
                "model produced {} scores but the label table has {} entries",
                scores.len(),
                self.labels.len()
            );
        }

        let mut index = 0;
        let mut score = f32::NEG_INFINITY;
        for (i, &s) in scores.iter().enumerate() {
            if s > score {
                index = i;
                score = s;
            }
        }

        Ok(Prediction {
            index,
            label: self.labels[index].clone(),
            score,
        })
    }
}
