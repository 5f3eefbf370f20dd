//! Document model produced by the parser.
//!
//! Type references are kept as canonical signature strings (`i32`,
//! `list<string>`, `map<string,list<i64>>`) rather than a type tree. Doc text
//! fields hold the trimmed contents of the `/** ... */` comments that preceded
//! a declaration; an empty string means there was none.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Document {
    /// Scope key (`java`, `py`, `*`, ...) to namespace. Last write wins.
    pub namespaces: BTreeMap<String, String>,
    /// Include paths with their quotes removed.
    pub includes: Vec<String>,
    pub consts: Vec<Constant>,
    pub typedefs: Vec<Typedef>,
    pub enums: Vec<Enum>,
    pub structs: Vec<Struct>,
    pub exceptions: Vec<Struct>,
    pub services: Vec<Service>,
    pub doc_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Constant {
    pub name: String,
    pub field_type: String,
    /// Raw literal text; string values keep their quotes.
    pub value: String,
    pub doc_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Typedef {
    pub name: String,
    pub field_type: String,
    pub doc_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Enum {
    pub name: String,
    /// Members in declaration order.
    pub members: Vec<EnumMember>,
    pub doc_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct EnumMember {
    pub name: String,
    pub value: i32,
}

/// Shared by `struct` and `exception` declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Struct {
    pub name: String,
    pub fields: Vec<Field>,
    pub doc_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Field {
    pub index: i32,
    pub name: String,
    pub field_type: String,
    /// Raw literal text of the `= value` default, if any.
    pub default_value: Option<String>,
    pub required: bool,
    pub doc_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Service {
    pub name: String,
    /// Name of the parent service. Not resolved; see [`Document::service_chain`].
    pub extends: Option<String>,
    pub functions: Vec<Function>,
    pub doc_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Function {
    pub name: String,
    pub oneway: bool,
    /// `void` or a type signature.
    pub return_type: String,
    /// Arguments.
    pub fields: Vec<Field>,
    pub throws: Vec<Field>,
    pub doc_text: String,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the document declares nothing beyond its header.
    pub fn is_empty(&self) -> bool {
        self.consts.is_empty()
            && self.typedefs.is_empty()
            && self.enums.is_empty()
            && self.structs.is_empty()
            && self.exceptions.is_empty()
            && self.services.is_empty()
    }

    pub fn find_const(&self, name: &str) -> Option<&Constant> {
        self.consts.iter().find(|c| c.name == name)
    }

    pub fn find_typedef(&self, name: &str) -> Option<&Typedef> {
        self.typedefs.iter().find(|t| t.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn find_struct(&self, name: &str) -> Option<&Struct> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn find_exception(&self, name: &str) -> Option<&Struct> {
        self.exceptions.iter().find(|s| s.name == name)
    }

    pub fn find_service(&self, name: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Follows `extends` links inside this document, starting at `name`.
    ///
    /// The result begins with the named service and ends at the first service
    /// without a parent, or just before a parent that is not declared here or
    /// that was already visited.
    pub fn service_chain(&self, name: &str) -> Vec<&Service> {
        let mut chain: Vec<&Service> = Vec::new();
        let mut current = self.find_service(name);

        while let Some(service) = current {
            if chain.iter().any(|s| s.name == service.name) {
                break;
            }
            chain.push(service);
            current = service.extends.as_deref().and_then(|parent| self.find_service(parent));
        }

        chain
    }
}

impl Enum {
    /// Appends a member. A repeated name drops the earlier entry, so the
    /// last declaration wins and values stay in ascending order.
    pub fn insert(&mut self, name: String, value: i32) {
        self.members.retain(|m| m.name != name);
        self.members.push(EnumMember { name, value });
    }

    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.members.iter().find(|m| m.name == name).map(|m| m.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.members.iter().map(|m| (m.name.as_str(), m.value))
    }
}

impl Struct {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_index(&self, index: i32) -> Option<&Field> {
        self.fields.iter().find(|f| f.index == index)
    }
}

impl Service {
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(name: &str, extends: Option<&str>) -> Service {
        Service {
            name: name.to_string(),
            extends: extends.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_enum_insert_moves_redeclared_member_last() {
        let mut e = Enum::default();
        e.insert("B".to_string(), 1);
        e.insert("A".to_string(), 2);
        e.insert("B".to_string(), 3);

        let members: Vec<_> = e.iter().collect();
        assert_eq!(members, vec![("A", 2), ("B", 3)]);
        assert_eq!(e.value_of("A"), Some(2));
        assert_eq!(e.value_of("C"), None);
    }

    #[test]
    fn test_service_chain_follows_extends() {
        let doc = Document {
            services: vec![service("Base", None), service("Mid", Some("Base")), service("Leaf", Some("Mid"))],
            ..Default::default()
        };

        let names: Vec<_> = doc.service_chain("Leaf").iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Leaf", "Mid", "Base"]);
    }

    #[test]
    fn test_service_chain_stops_on_missing_parent_and_cycles() {
        let doc = Document {
            services: vec![
                service("Orphan", Some("Elsewhere")),
                service("Ping", Some("Pong")),
                service("Pong", Some("Ping")),
            ],
            ..Default::default()
        };

        assert_eq!(doc.service_chain("Orphan").len(), 1);
        assert_eq!(doc.service_chain("Ping").len(), 2);
        assert!(doc.service_chain("Missing").is_empty());
    }

    #[test]
    fn test_is_empty_ignores_header() {
        let mut doc = Document::new();
        doc.namespaces.insert("*".to_string(), "ns".to_string());
        doc.includes.push("shared.thrift".to_string());
        assert!(doc.is_empty());

        doc.typedefs.push(Typedef::default());
        assert!(!doc.is_empty());
    }
}
