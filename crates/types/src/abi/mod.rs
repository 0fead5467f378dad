// Path: crates/types/src/abi/mod.rs
//! Contract schema (ABI) structures.
//!
//! Only the parts of the schema that drive action encoding are modelled
//! strictly; the remaining sections are carried through as opaque JSON so a
//! fetched schema can be re-serialized without loss.

use serde::{Deserialize, Serialize};

/// A type alias declaration (`new_type_name` is an alias of `type`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TypeDef {
    /// The alias being declared.
    pub new_type_name: String,
    /// The aliased type.
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One named, typed field within a struct definition.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// The field name.
    pub name: String,
    /// The wire type of the field.
    #[serde(rename = "type")]
    pub type_name: String,
}

impl FieldDef {
    /// Creates a new field definition.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A struct definition with an optional base struct.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct StructDef {
    /// The struct name.
    pub name: String,
    /// The name of the base struct, or an empty string.
    #[serde(default)]
    pub base: String,
    /// The ordered fields of the struct.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// Binds an action name to the struct describing its data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ActionDef {
    /// The action name.
    pub name: String,
    /// The struct type of the action data.
    #[serde(rename = "type")]
    pub type_name: String,
    /// The ricardian contract text, usually empty.
    #[serde(default)]
    pub ricardian_contract: String,
}

/// A contract's application binary interface.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AbiDef {
    /// The ABI version string, e.g. `eosio::abi/1.0`.
    #[serde(default)]
    pub version: String,
    /// Type aliases.
    #[serde(default)]
    pub types: Vec<TypeDef>,
    /// Struct definitions.
    #[serde(default)]
    pub structs: Vec<StructDef>,
    /// Action bindings.
    #[serde(default)]
    pub actions: Vec<ActionDef>,
    /// Table definitions, carried opaquely.
    #[serde(default)]
    pub tables: Vec<serde_json::Value>,
    /// Ricardian clauses, carried opaquely.
    #[serde(default)]
    pub ricardian_clauses: Vec<serde_json::Value>,
    /// Error messages, carried opaquely.
    #[serde(default)]
    pub error_messages: Vec<serde_json::Value>,
    /// ABI extensions, carried opaquely.
    #[serde(default)]
    pub abi_extensions: Vec<serde_json::Value>,
}

impl AbiDef {
    /// Looks up a struct definition by name.
    pub fn find_struct(&self, name: &str) -> Option<&StructDef> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Looks up an action binding by name.
    pub fn find_action(&self, name: &str) -> Option<&ActionDef> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Resolves a type alias, returning the input unchanged if none matches.
    pub fn resolve_alias<'a>(&'a self, type_name: &'a str) -> &'a str {
        let mut current = type_name;
        // Aliases may chain; bound the walk so a cyclic ABI cannot spin forever.
        for _ in 0..32 {
            match self.types.iter().find(|t| t.new_type_name == current) {
                Some(t) => current = &t.type_name,
                None => break,
            }
        }
        current
    }

    /// Returns the struct name that describes the data of `action`.
    ///
    /// Falls back to the action name itself, which is the convention used by
    /// almost every contract.
    pub fn action_struct_name<'a>(&'a self, action: &'a str) -> &'a str {
        self.find_action(action)
            .map(|a| a.type_name.as_str())
            .unwrap_or(action)
    }

    /// Replaces the struct describing `action` with `fragment`.
    ///
    /// If the schema has no such struct the fragment is appended, and a missing
    /// action binding is added, so ad hoc actions can still be encoded.
    pub fn merge_action_struct(&mut self, action: &str, mut fragment: StructDef) {
        let struct_name = self.action_struct_name(action).to_string();
        fragment.name = struct_name.clone();
        match self.structs.iter_mut().find(|s| s.name == struct_name) {
            Some(existing) => *existing = fragment,
            None => self.structs.push(fragment),
        }
        if self.find_action(action).is_none() {
            self.actions.push(ActionDef {
                name: action.to_string(),
                type_name: struct_name,
                ricardian_contract: String::new(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer_abi() -> AbiDef {
        serde_json::from_str(
            r#"{
                "version": "eosio::abi/1.0",
                "types": [{"new_type_name": "account_name", "type": "name"}],
                "structs": [{
                    "name": "trnsfiopubky",
                    "base": "",
                    "fields": [
                        {"name": "payee_public_key", "type": "string"},
                        {"name": "amount", "type": "int64"}
                    ]
                }],
                "actions": [{"name": "trnsfiopubky", "type": "trnsfiopubky", "ricardian_contract": ""}],
                "tables": []
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn merge_replaces_existing_struct() {
        let mut abi = transfer_abi();
        let fragment = StructDef {
            name: String::new(),
            base: String::new(),
            fields: vec![
                FieldDef::new("payee_public_key", "string"),
                FieldDef::new("amount", "string"),
                FieldDef::new("extra", "uint8"),
            ],
        };
        abi.merge_action_struct("trnsfiopubky", fragment);
        assert_eq!(abi.structs.len(), 1);
        let s = abi.find_struct("trnsfiopubky").unwrap();
        assert_eq!(s.fields.len(), 3);
        assert_eq!(s.fields[1].type_name, "string");
    }

    #[test]
    fn merge_appends_unknown_action() {
        let mut abi = transfer_abi();
        abi.merge_action_struct("adhoc", StructDef::default());
        assert!(abi.find_struct("adhoc").is_some());
        assert_eq!(abi.action_struct_name("adhoc"), "adhoc");
        assert_eq!(abi.actions.len(), 2);
    }

    #[test]
    fn alias_resolution_follows_chain() {
        let abi = transfer_abi();
        assert_eq!(abi.resolve_alias("account_name"), "name");
        assert_eq!(abi.resolve_alias("uint64"), "uint64");
    }
}
