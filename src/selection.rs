// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};

/// A field node of the executing query, as exposed by the executor.
///
/// Implement this for the executor's own AST type to run [`selected_fields`]
/// over it directly.
pub trait Selection: Sized {
    fn name(&self) -> &str;

    /// Immediate sub-selection, if the field has one.
    fn selections(&self) -> Option<&[Self]>;
}

/// Field node of a query AST: `name { sub selection }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAst {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_set: Option<Vec<FieldAst>>,
}

impl FieldAst {
    /// A leaf field.
    pub fn leaf(name: impl Into<String>) -> Self {
        FieldAst {
            name: name.into(),
            selection_set: None,
        }
    }

    /// A field with a sub-selection.
    pub fn with_selections(name: impl Into<String>, selections: Vec<FieldAst>) -> Self {
        FieldAst {
            name: name.into(),
            selection_set: Some(selections),
        }
    }
}

impl Selection for FieldAst {
    fn name(&self) -> &str {
        &self.name
    }

    fn selections(&self) -> Option<&[Self]> {
        self.selection_set.as_deref()
    }
}

/// Returns the names of the fields selected at `path`, in request order.
///
/// The walk starts at `fields`, the AST nodes of the executing field. Each path
/// segment descends into the first field of that name that has a non-empty
/// sub-selection. If a segment cannot be matched the result is empty; there is
/// no partial match. An empty path returns the names of `fields` themselves.
///
/// Resolvers use this to learn which sub-fields a query asked for:
///
/// ```rust,ignore
/// // query { s { a b d { x } } }, resolving `s`
/// assert_eq!(info.selected_fields(&[]), ["s"]);
/// assert_eq!(info.selected_fields(&["s"]), ["a", "b", "d"]);
/// assert_eq!(info.selected_fields(&["s", "d"]), ["x"]);
/// assert!(info.selected_fields(&["xxx"]).is_empty());
/// ```
pub fn selected_fields<S: Selection>(path: &[&str], fields: &[S]) -> Vec<String> {
    let mut current = fields;
    for segment in path {
        let next = current.iter().find_map(|field| match field.selections() {
            Some(sub) if field.name() == *segment && !sub.is_empty() => Some(sub),
            _ => None,
        });
        match next {
            Some(sub) => current = sub,
            None => return Vec::new(),
        }
    }
    current.iter().map(|f| f.name().to_string()).collect()
}
