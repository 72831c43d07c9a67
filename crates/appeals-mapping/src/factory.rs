//! Mapper composition
//!
//! [`MapperDefinition`] describes one page mapper: how to pick the submapper
//! registry for a request, and how to build the shared context.
//! [`initialise_and_map_data`] runs it.

use crate::error::MappingError;
use crate::registry::SubmapperRegistry;
use appeals_components::FieldInstruction;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt::Debug;

/// One page mapper
///
/// The category selects a registry through an exhaustive match in the
/// implementation; there is no string lookup that can come back empty.
#[async_trait]
pub trait MapperDefinition: Send + Sync {
    /// Request-level inputs (already-loaded aggregate, route, session)
    type Params: Send + Sync;

    /// Shared context handed to every submapper
    type Context: Send + Sync;

    /// Registry discriminator (appeal type, questionnaire variant, ...)
    type Category: Copy + Debug + Send + Sync;

    /// Key the instructions are returned under
    fn target_key(&self) -> &str;

    /// Decide which registry applies to this request
    fn category(&self, params: &Self::Params) -> Self::Category;

    /// Registry for a category
    fn submappers(&self, category: Self::Category) -> &SubmapperRegistry<Self::Context>;

    /// Build the shared context; the only place a mapper may await
    ///
    /// # Errors
    /// [`MappingError::ContextResolution`] when side-loaded data is unavailable.
    async fn submapper_params(&self, params: &Self::Params) -> Result<Self::Context, MappingError>;
}

/// Field id to instruction, for one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MappedInstructions(IndexMap<String, FieldInstruction>);

impl MappedInstructions {
    /// Create empty mapping
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an instruction under its own id
    #[inline]
    pub fn insert(&mut self, instruction: FieldInstruction) {
        self.0.insert(instruction.id.clone(), instruction);
    }

    /// Look up by field id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FieldInstruction> {
        self.0.get(id)
    }

    /// Check if a field id is present
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Field ids present
    #[inline]
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Number of instructions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if mapping is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate instructions
    pub fn iter(&self) -> impl Iterator<Item = &FieldInstruction> {
        self.0.values()
    }
}

/// Instructions wrapped under the mapper's target key
///
/// Serializes as `{"<targetKey>": {"<id>": {...}}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedData {
    /// Target key
    pub target_key: String,

    /// Instructions
    pub instructions: MappedInstructions,
}

impl Serialize for MappedData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.target_key, &self.instructions)?;
        map.end()
    }
}

/// Run every submapper of the request's registry against one shared context
///
/// With `filter_keys`, only the listed ids are mapped; unknown ids are logged
/// and ignored. The context is resolved once, before any submapper runs, so
/// all fields see the same snapshot.
///
/// # Errors
/// The first submapper error aborts the whole mapping; there is no per-field
/// fallback.
#[tracing::instrument(skip_all, fields(target_key = definition.target_key()))]
pub async fn initialise_and_map_data<D>(
    definition: &D,
    params: &D::Params,
    filter_keys: Option<&[&str]>,
) -> Result<MappedData, MappingError>
where
    D: MapperDefinition + ?Sized,
{
    let category = definition.category(params);
    let registry = definition.submappers(category);
    tracing::debug!(?category, registered = registry.len(), "resolved submapper registry");

    if let Some(keys) = filter_keys {
        for key in keys.iter().copied().filter(|k| !registry.contains(k)) {
            tracing::warn!(key, ?category, "filter key names no registered submapper");
        }
    }

    let context = definition.submapper_params(params).await?;

    let mut instructions = MappedInstructions::new();
    for (id, submapper) in registry.iter() {
        if filter_keys.is_some_and(|keys| !keys.contains(&id)) {
            continue;
        }
        let instruction = submapper.map(&context).map_err(|e| {
            tracing::error!(submapper = id, error = %e, "submapper failed");
            e
        })?;
        instructions.insert(FieldInstruction {
            id: id.to_string(),
            display: instruction.display,
        });
    }

    tracing::debug!(
        mapped = instructions.len(),
        skipped = registry.len() - instructions.len(),
        "mapping complete"
    );

    Ok(MappedData {
        target_key: definition.target_key().to_string(),
        instructions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use appeals_components::{text_summary_list_item, RowOptions};

    #[derive(Debug, Clone, Copy)]
    enum Kind {
        Short,
    }

    struct Single {
        registry: SubmapperRegistry<String>,
    }

    #[async_trait]
    impl MapperDefinition for Single {
        type Params = String;
        type Context = String;
        type Category = Kind;

        fn target_key(&self) -> &str {
            "page"
        }

        fn category(&self, _params: &String) -> Kind {
            Kind::Short
        }

        fn submappers(&self, category: Kind) -> &SubmapperRegistry<String> {
            match category {
                Kind::Short => &self.registry,
            }
        }

        async fn submapper_params(&self, params: &String) -> Result<String, MappingError> {
            Ok(params.to_uppercase())
        }
    }

    #[test]
    fn registry_id_wins_over_instruction_id() {
        let registry = SubmapperRegistry::<String>::new()
            .with(
                "registered",
                |ctx: &String| -> Result<FieldInstruction, MappingError> {
                    Ok(text_summary_list_item(
                        RowOptions::new("other", "Label"),
                        ctx.as_str(),
                    ))
                },
            )
            .unwrap();
        let mapper = Single { registry };
        let data =
            tokio_test::block_on(initialise_and_map_data(&mapper, &"x".to_string(), None)).unwrap();
        assert_eq!(data.target_key, "page");
        assert!(data.instructions.contains("registered"));
        assert_eq!(data.instructions.get("registered").unwrap().id, "registered");
    }

    #[test]
    fn mapped_data_serializes_under_target_key() {
        let mut instructions = MappedInstructions::new();
        instructions.insert(FieldInstruction::empty("hearing"));
        let data = MappedData {
            target_key: "appeal".to_string(),
            instructions,
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({"appeal": {"hearing": {"id": "hearing", "display": {}}}})
        );
    }
}
