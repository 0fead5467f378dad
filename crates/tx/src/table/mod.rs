// Path: crates/tx/src/table/mod.rs
//! The field specification table.
//!
//! Rows live behind their own locks so resolution can update one field while
//! the operator edits another. The row list and its name index share one lock
//! and are only ever changed together.

use cryptonym_api::diagnostics::Diagnostics;
use cryptonym_api::error::PayloadError;
use cryptonym_types::config::ActionSpec;
use cryptonym_types::field::{is_slice_type, FieldSpec, FieldValue, GenerationMode, LengthSelector};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// A shared handle to one row.
pub type FieldRow = Arc<RwLock<FieldSpec>>;

#[derive(Default)]
struct Rows {
    ordered: Vec<FieldRow>,
    index: HashMap<String, usize>,
}

/// An ordered, name-indexed set of field specifications for one action.
pub struct FieldSpecTable {
    contract: String,
    action: String,
    rows: RwLock<Rows>,
    diagnostics: Diagnostics,
}

impl std::fmt::Debug for FieldSpecTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpecTable")
            .field("contract", &self.contract)
            .field("action", &self.action)
            .field("fields", &self.len())
            .finish()
    }
}

impl FieldSpecTable {
    /// Creates an empty table for `contract::action`.
    pub fn new(contract: impl Into<String>, action: impl Into<String>) -> Self {
        Self::with_diagnostics(contract, action, Diagnostics::log_only())
    }

    /// Creates an empty table reporting duplicates to `diagnostics`.
    pub fn with_diagnostics(
        contract: impl Into<String>,
        action: impl Into<String>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            contract: contract.into(),
            action: action.into(),
            rows: RwLock::new(Rows::default()),
            diagnostics,
        }
    }

    /// Builds a table from a parsed action spec file.
    ///
    /// Mode, variant and length labels are parsed here; a bad label is a
    /// field-named error.
    pub fn from_action_spec(spec: &ActionSpec) -> Result<Self, PayloadError> {
        let table = Self::new(&spec.contract, &spec.action);
        for f in &spec.fields {
            table.append(&f.name, &f.declared_type);
            table.set_mode_labels(&f.name, &f.mode, &f.variant)?;
            let length = match f.length.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(text) => Some(text.parse::<LengthSelector>().map_err(|_| {
                    PayloadError::InvalidLength {
                        field: f.name.clone(),
                        value: text.to_string(),
                    }
                })?),
            };
            table.update_length(&f.name, length);
            table.update_input(&f.name, &f.input);
        }
        Ok(table)
    }

    /// A new table holding a copy of every row, for resolving one attempt
    /// without disturbing other users of this table.
    pub fn detached_copy(&self) -> Self {
        let copy = Self::with_diagnostics(&self.contract, &self.action, self.diagnostics.clone());
        {
            let mut rows = copy.rows.write();
            for (i, spec) in self.snapshot().into_iter().enumerate() {
                rows.index.insert(spec.name.clone(), i);
                rows.ordered.push(Arc::new(RwLock::new(spec)));
            }
        }
        copy
    }

    /// The contract account.
    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// The action name.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.rows.read().ordered.len()
    }

    /// Whether the table has no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a field at the next position. Returns false, leaving the
    /// table unchanged, if the name is already present.
    pub fn append(&self, name: &str, initial_type: &str) -> bool {
        let mut rows = self.rows.write();
        if rows.index.contains_key(name) {
            drop(rows);
            self.diagnostics.report(
                "table",
                format!("{}::{}: field '{name}' already exists", self.contract, self.action),
            );
            return false;
        }
        let order = rows.ordered.len();
        rows.ordered
            .push(Arc::new(RwLock::new(FieldSpec::new(name, initial_type, order))));
        rows.index.insert(name.to_string(), order);
        tracing::debug!(target: "table", field = name, order, "appended field");
        true
    }

    /// The row handle for `name`.
    pub fn row(&self, name: &str) -> Option<FieldRow> {
        let rows = self.rows.read();
        rows.index
            .get(name)
            .and_then(|i| rows.ordered.get(*i))
            .cloned()
    }

    /// All row handles, in order.
    pub fn rows(&self) -> Vec<FieldRow> {
        self.rows.read().ordered.clone()
    }

    /// A copy of the field named `name`.
    pub fn get(&self, name: &str) -> Option<FieldSpec> {
        self.row(name).map(|r| r.read().clone())
    }

    /// A copy of every field, in order.
    pub fn snapshot(&self) -> Vec<FieldSpec> {
        self.rows().iter().map(|r| r.read().clone()).collect()
    }

    fn with_row(&self, name: &str, f: impl FnOnce(&mut FieldSpec)) -> bool {
        match self.row(name) {
            Some(row) => {
                f(&mut row.write());
                true
            }
            None => false,
        }
    }

    /// Sets the generation mode.
    pub fn update_mode(&self, name: &str, mode: GenerationMode) -> bool {
        self.with_row(name, |f| f.mode = mode)
    }

    /// Sets the generation mode from its display labels.
    ///
    /// Unknown field names are a no-op; unknown labels are a field-named error.
    pub fn set_mode_labels(&self, name: &str, mode: &str, variant: &str) -> Result<bool, PayloadError> {
        let parsed = GenerationMode::from_labels(mode, variant)
            .map_err(|reason| PayloadError::invalid(name, reason))?;
        Ok(self.update_mode(name, parsed))
    }

    /// Sets the declared type, which also decides whether the field is a slice.
    pub fn update_declared_type(&self, name: &str, declared_type: &str) -> bool {
        self.with_row(name, |f| {
            f.declared_type = declared_type.to_string();
            f.is_slice = is_slice_type(declared_type);
        })
    }

    /// Sets or clears the encoding type override.
    pub fn update_type_override(&self, name: &str, type_override: Option<String>) -> bool {
        self.with_row(name, |f| f.type_override = type_override)
    }

    /// Sets or clears the length selector.
    pub fn update_length(&self, name: &str, length: Option<LengthSelector>) -> bool {
        self.with_row(name, |f| f.length = length)
    }

    /// Sets the literal input.
    pub fn update_input(&self, name: &str, input: &str) -> bool {
        self.with_row(name, |f| f.raw_input = input.to_string())
    }

    /// Stores a resolved value.
    pub fn update_value(&self, name: &str, value: FieldValue, emit_raw: bool) -> bool {
        self.with_row(name, |f| {
            f.value = Some(value);
            f.emit_raw = emit_raw;
        })
    }

    /// Stores resolved slice elements.
    pub fn update_values(&self, name: &str, values: Vec<String>) -> bool {
        self.with_row(name, |f| f.values = values)
    }
}
