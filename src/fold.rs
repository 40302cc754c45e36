//! Folding one-row-per-triple query results into component records.
//!
//! A SPARQL `SELECT ?s ?p ?o` returns one row per statement, so a component
//! with five properties arrives as five rows. Folding groups rows by subject and
//! merges them: scalar predicates are last-write-wins, `hasInput`/`hasOutput`
//! accumulate into sets. The output never holds two records for one subject.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Component, Triple, Value};
use crate::vocab::{self, ComponentClass, Predicate};

/// Accumulator for one subject while folding.
#[derive(Debug, Default)]
struct Draft {
    label: Option<String>,
    class: Option<ComponentClass>,
    description: Option<String>,
    inputs: BTreeSet<String>,
    outputs: BTreeSet<String>,
    update_rate: Option<String>,
    package: Option<String>,
    node_type: Option<String>,
    attributes: BTreeMap<String, String>,
}

impl Draft {
    fn absorb(&mut self, predicate: &str, object: &Value) {
        let value = object.as_str().to_string();
        let Some(known) = Predicate::from_iri(predicate) else {
            self.attributes
                .insert(vocab::local_name(predicate).to_string(), value);
            return;
        };

        match known {
            Predicate::HasInput => {
                self.inputs.insert(value);
            }
            Predicate::HasOutput => {
                self.outputs.insert(value);
            }
            Predicate::Type => {
                // Extra types (owl:NamedIndividual, superclasses) are ignored.
                if let Some(class) = ComponentClass::from_iri(&value) {
                    self.class = Some(class);
                }
            }
            Predicate::Label => self.label = Some(value),
            Predicate::Description => self.description = Some(value),
            Predicate::UpdateRate => self.update_rate = Some(value),
            Predicate::Package => self.package = Some(value),
            Predicate::NodeType => self.node_type = Some(value),
            Predicate::SensorType | Predicate::Algorithm => {
                self.attributes.insert(known.local_name().to_string(), value);
            }
        }
    }

    /// Finish the record. Subjects without a known class are not components.
    fn finish(self, id: String) -> Option<Component> {
        let class = self.class?;
        let label = self
            .label
            .unwrap_or_else(|| vocab::local_name(&id).to_string());
        Some(Component {
            id,
            label,
            class,
            description: self.description,
            inputs: self.inputs,
            outputs: self.outputs,
            update_rate: self.update_rate,
            package: self.package,
            node_type: self.node_type,
            attributes: self.attributes,
        })
    }
}

/// Fold an unordered sequence of triples into one component per subject.
///
/// Results are sorted by label, then id.
pub fn fold_triples<'a, I>(triples: I) -> Vec<Component>
where
    I: IntoIterator<Item = &'a Triple>,
{
    let mut drafts: BTreeMap<&str, Draft> = BTreeMap::new();
    let mut rows = 0usize;
    for triple in triples {
        rows += 1;
        drafts
            .entry(triple.subject.as_str())
            .or_default()
            .absorb(&triple.predicate, &triple.object);
    }

    let subjects = drafts.len();
    let mut components: Vec<Component> = drafts
        .into_iter()
        .filter_map(|(id, draft)| draft.finish(id.to_string()))
        .collect();
    components.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.id.cmp(&b.id)));

    tracing::debug!(
        rows,
        subjects,
        components = components.len(),
        "folded triples into components"
    );
    components
}

/// Fold the statements of one known subject (`?p ?o` rows).
pub fn fold_subject<'a, I>(subject: &str, statements: I) -> Option<Component>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut draft = Draft::default();
    for (predicate, object) in statements {
        draft.absorb(predicate, object);
    }
    draft.finish(subject.to_string())
}
