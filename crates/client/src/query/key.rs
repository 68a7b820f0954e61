//! Structured query keys.
//!
//! A key is the tuple `(domain, resource, operation, params)`. `params` is a
//! canonical JSON string: object members sorted by name, `null` members
//! dropped at every depth, compact separators. Two filters that differ only
//! in field order or in explicit `None`s therefore produce the same key.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::ClientResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Master,
    Auth,
    Inventory,
    Sales,
    Finance,
    Report,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Master => "master",
            Domain::Auth => "auth",
            Domain::Inventory => "inventory",
            Domain::Sales => "sales",
            Domain::Finance => "finance",
            Domain::Report => "report",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Branch,
    User,
    Profile,
    Item,
    FrontStockItem,
    Member,
    Supplier,
    Unit,
    Category,
    CashFlow,
    StockTransfer,
    SellReturn,
    StockAdjustment,
    Overview,
    Receipt,
    Label,
}

impl Resource {
    pub const ALL: [Resource; 16] = [
        Resource::Branch,
        Resource::User,
        Resource::Profile,
        Resource::Item,
        Resource::FrontStockItem,
        Resource::Member,
        Resource::Supplier,
        Resource::Unit,
        Resource::Category,
        Resource::CashFlow,
        Resource::StockTransfer,
        Resource::SellReturn,
        Resource::StockAdjustment,
        Resource::Overview,
        Resource::Receipt,
        Resource::Label,
    ];

    pub fn domain(&self) -> Domain {
        match self {
            Resource::Branch
            | Resource::User
            | Resource::Member
            | Resource::Supplier
            | Resource::Unit
            | Resource::Category => Domain::Master,
            Resource::Profile => Domain::Auth,
            Resource::Item
            | Resource::FrontStockItem
            | Resource::StockTransfer
            | Resource::StockAdjustment => Domain::Inventory,
            Resource::SellReturn => Domain::Sales,
            Resource::CashFlow | Resource::Overview => Domain::Finance,
            Resource::Receipt | Resource::Label => Domain::Report,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Branch => "branch",
            Resource::User => "user",
            Resource::Profile => "profile",
            Resource::Item => "item",
            Resource::FrontStockItem => "front-stock",
            Resource::Member => "member",
            Resource::Supplier => "supplier",
            Resource::Unit => "unit",
            Resource::Category => "category",
            Resource::CashFlow => "cash-flow",
            Resource::StockTransfer => "stock-transfer",
            Resource::SellReturn => "sell-return",
            Resource::StockAdjustment => "stock-adjustment",
            Resource::Overview => "overview",
            Resource::Receipt => "receipt",
            Resource::Label => "label",
        }
    }

    /// Human label used in notifications.
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Branch => "Branch",
            Resource::User => "User",
            Resource::Profile => "Profile",
            Resource::Item => "Item",
            Resource::FrontStockItem => "Front stock",
            Resource::Member => "Member",
            Resource::Supplier => "Supplier",
            Resource::Unit => "Unit",
            Resource::Category => "Category",
            Resource::CashFlow => "Cash flow",
            Resource::StockTransfer => "Stock transfer",
            Resource::SellReturn => "Sell return",
            Resource::StockAdjustment => "Stock adjustment",
            Resource::Overview => "Overview",
            Resource::Receipt => "Receipt",
            Resource::Label => "Label",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    List,
    Detail,
    Summary,
    Report,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Detail => "detail",
            Operation::Summary => "summary",
            Operation::Report => "report",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey {
    domain: Domain,
    resource: Resource,
    operation: Operation,
    params: String,
}

impl QueryKey {
    pub fn new(resource: Resource, operation: Operation, params: &impl Serialize) -> ClientResult<Self> {
        Ok(Self::from_value(resource, operation, &serde_json::to_value(params)?))
    }

    /// Build from an already-serialized params value.
    pub fn from_value(resource: Resource, operation: Operation, params: &Value) -> Self {
        Self {
            domain: resource.domain(),
            resource,
            operation,
            params: canonical_json(params),
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn params(&self) -> &str {
        &self.params
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.domain.as_str(),
            self.resource.name(),
            self.operation.as_str(),
            self.params
        )
    }
}

/// Matches every key of a resource, optionally narrowed to one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPrefix {
    pub resource: Resource,
    pub operation: Option<Operation>,
}

impl KeyPrefix {
    pub const fn all(resource: Resource) -> Self {
        Self {
            resource,
            operation: None,
        }
    }

    pub const fn new(resource: Resource, operation: Operation) -> Self {
        Self {
            resource,
            operation: Some(operation),
        }
    }

    pub const fn list(resource: Resource) -> Self {
        Self::new(resource, Operation::List)
    }

    pub const fn detail(resource: Resource) -> Self {
        Self::new(resource, Operation::Detail)
    }

    pub fn matches(&self, key: &QueryKey) -> bool {
        self.resource == key.resource && self.operation.is_none_or(|op| op == key.operation)
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource.domain().as_str(), self.resource.name())?;
        if let Some(op) = self.operation {
            write!(f, "/{}", op.as_str())?;
        }
        Ok(())
    }
}

/// Drop `null` object members recursively.
pub fn strip_nulls(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(strip_nulls).collect()),
        other => other.clone(),
    }
}

/// Compact JSON with sorted object members and no `null` members.
///
/// Sorting happens here rather than relying on `serde_json::Map` ordering,
/// which changes when `preserve_order` is enabled anywhere in the build.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(&strip_nulls(value), &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (k, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(k.clone()).to_string());
                out.push(':');
                write_canonical(v, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(v, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Turn a params object into sorted query-string pairs.
///
/// Arrays become repeated keys; nested objects are sent as JSON.
pub fn query_pairs(value: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = value else {
        return Vec::new();
    };
    let mut pairs = Vec::new();
    for (k, v) in map {
        match v {
            Value::Null => {}
            Value::Array(items) => {
                for item in items.iter().filter(|i| !i.is_null()) {
                    pairs.push((k.clone(), scalar_param(item)));
                }
            }
            other => pairs.push((k.clone(), scalar_param(other))),
        }
    }
    pairs.sort();
    pairs
}

fn scalar_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => canonical_json(other),
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::{Map, json};

    use super::*;

    #[test]
    fn insertion_order_and_explicit_nulls_do_not_change_the_key() {
        let a = QueryKey::from_value(
            Resource::Item,
            Operation::List,
            &json!({"search": "kopi", "page": 1, "perPage": 10, "categoryId": null}),
        );
        let b = QueryKey::from_value(
            Resource::Item,
            Operation::List,
            &json!({"perPage": 10, "page": 1, "search": "kopi"}),
        );
        assert_eq!(a, b);
        assert_eq!(a.params(), r#"{"page":1,"perPage":10,"search":"kopi"}"#);
    }

    #[test]
    fn different_params_give_different_keys() {
        let a = QueryKey::from_value(Resource::Item, Operation::List, &json!({"page": 1}));
        let b = QueryKey::from_value(Resource::Item, Operation::List, &json!({"page": 2}));
        assert_ne!(a, b);
    }

    #[test]
    fn domain_is_derived_from_resource() {
        let key = QueryKey::new(Resource::CashFlow, Operation::List, &()).unwrap();
        assert_eq!(key.domain(), Domain::Finance);
        assert_eq!(key.to_string(), "finance/cash-flow/list/null");
        assert_eq!(Resource::Profile.domain(), Domain::Auth);
        assert_eq!(Resource::Label.domain(), Domain::Report);
    }

    #[test]
    fn prefix_matches_resource_and_optional_operation() {
        let list = QueryKey::from_value(Resource::Item, Operation::List, &json!({}));
        let detail = QueryKey::from_value(Resource::Item, Operation::Detail, &json!({"id": "x"}));
        let other = QueryKey::from_value(Resource::Unit, Operation::List, &json!({}));

        assert!(KeyPrefix::all(Resource::Item).matches(&list));
        assert!(KeyPrefix::all(Resource::Item).matches(&detail));
        assert!(KeyPrefix::list(Resource::Item).matches(&list));
        assert!(!KeyPrefix::list(Resource::Item).matches(&detail));
        assert!(!KeyPrefix::all(Resource::Item).matches(&other));
    }

    #[test]
    fn nested_nulls_are_dropped_but_array_order_is_kept() {
        let v = json!({"b": {"y": null, "x": 1}, "a": [3, 1, 2]});
        assert_eq!(canonical_json(&v), r#"{"a":[3,1,2],"b":{"x":1}}"#);
    }

    #[test]
    fn query_pairs_are_sorted_and_skip_nulls() {
        let pairs = query_pairs(&json!({"search": "teh", "page": 2, "unitId": null, "tag": ["a", "b"]}));
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("search".to_string(), "teh".to_string()),
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
            ]
        );
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::String),
        ]
    }

    proptest! {
        #[test]
        fn key_is_independent_of_member_order(
            fields in proptest::collection::btree_map("[a-zA-Z]{1,6}", scalar(), 0..8),
            seed in any::<u64>(),
        ) {
            let forward: Map<String, Value> = fields.iter().map(|(k, v)| (k.clone(), v.clone())).collect();

            let mut shuffled: Vec<(String, Value)> = fields.into_iter().collect();
            let len = shuffled.len().max(1);
            shuffled.rotate_left((seed as usize) % len);
            shuffled.reverse();
            let backward: Map<String, Value> = shuffled.into_iter().collect();

            let a = QueryKey::from_value(Resource::Member, Operation::List, &Value::Object(forward));
            let b = QueryKey::from_value(Resource::Member, Operation::List, &Value::Object(backward));
            prop_assert_eq!(a, b);
        }

        #[test]
        fn null_members_never_affect_the_key(
            fields in proptest::collection::btree_map("[a-z]{1,6}", "[a-z]{0,6}", 0..6),
            nulls in proptest::collection::vec("[A-Z]{1,6}", 0..4),
        ) {
            let plain: Map<String, Value> = fields.iter().map(|(k, v)| (k.clone(), Value::from(v.clone()))).collect();
            let mut padded = plain.clone();
            for name in nulls {
                padded.insert(name, Value::Null);
            }
            prop_assert_eq!(
                canonical_json(&Value::Object(plain)),
                canonical_json(&Value::Object(padded))
            );
        }
    }
}
