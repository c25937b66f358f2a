//! Declarative descriptor contracts.
//!
//! Two contracts are shipped because deployed callers rely on two different
//! document layouts. Which one a relay enforces is a configuration choice
//! (`relay.schema`), see [`SchemaVariant`].

use serde::{Deserialize, Serialize};

/// Allowed values of `meta.method` under the strict contract.
pub const METHODS: &[&str] = &["get", "post", "put", "delete"];

/// Allowed values of `meta.post_type` under the strict contract.
pub const POST_TYPES: &[&str] = &["form", "json"];

/// Shape a single value must have.
#[derive(Debug)]
pub enum Shape {
    /// Object with declared fields.
    Object(&'static ObjectShape),
    /// Any string.
    String,
    /// A string drawn from a fixed set.
    StringEnum(&'static [&'static str]),
    /// Integer >= 0.
    NonNegativeInteger,
    /// Object whose values are all strings.
    StringMap,
    /// Any object, contents unchecked.
    AnyObject,
}

/// A named property inside an [`ObjectShape`].
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub shape: Shape,
    pub required: bool,
}

impl Field {
    pub const fn required(name: &'static str, shape: Shape) -> Self {
        Self { name, shape, required: true }
    }

    pub const fn optional(name: &'static str, shape: Shape) -> Self {
        Self { name, shape, required: false }
    }
}

/// Object shape: fields are checked in declaration order.
#[derive(Debug)]
pub struct ObjectShape {
    pub fields: &'static [Field],
    /// When set, exactly one of these keys must be present.
    pub exactly_one_of: Option<&'static [&'static str]>,
}

/// A complete descriptor contract.
#[derive(Debug)]
pub struct Contract {
    pub name: &'static str,
    pub root: ObjectShape,
}

const STRICT_META: ObjectShape = ObjectShape {
    fields: &[
        Field::required("method", Shape::StringEnum(METHODS)),
        Field::required("url", Shape::String),
        Field::optional("timeout", Shape::NonNegativeInteger),
        Field::optional("post_type", Shape::StringEnum(POST_TYPES)),
    ],
    exactly_one_of: None,
};

/// Variant A: enumerated methods, flat `data` selected by `meta.post_type`.
pub static STRICT: Contract = Contract {
    name: "strict",
    root: ObjectShape {
        fields: &[
            Field::required("meta", Shape::Object(&STRICT_META)),
            Field::optional("headers", Shape::StringMap),
            Field::optional("data", Shape::AnyObject),
            Field::optional("body", Shape::String),
        ],
        exactly_one_of: None,
    },
};

const LENIENT_META: ObjectShape = ObjectShape {
    fields: &[
        Field::required("method", Shape::String),
        Field::required("url", Shape::String),
    ],
    exactly_one_of: None,
};

const LENIENT_DATA: ObjectShape = ObjectShape {
    fields: &[
        Field::optional("forms", Shape::AnyObject),
        Field::optional("json", Shape::AnyObject),
    ],
    exactly_one_of: Some(&["forms", "json"]),
};

/// Variant B: method not enumerated, `data.forms` / `data.json` payloads.
pub static LENIENT: Contract = Contract {
    name: "lenient",
    root: ObjectShape {
        fields: &[
            Field::required("meta", Shape::Object(&LENIENT_META)),
            Field::optional("headers", Shape::StringMap),
            Field::optional("data", Shape::Object(&LENIENT_DATA)),
        ],
        exactly_one_of: None,
    },
};

/// Which contract a relay enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVariant {
    #[default]
    Strict,
    Lenient,
}

impl SchemaVariant {
    pub fn contract(self) -> &'static Contract {
        match self {
            SchemaVariant::Strict => &STRICT,
            SchemaVariant::Lenient => &LENIENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_selects_contract() {
        assert_eq!(SchemaVariant::default(), SchemaVariant::Strict);
        assert_eq!(SchemaVariant::Strict.contract().name, "strict");
        assert_eq!(SchemaVariant::Lenient.contract().name, "lenient");
    }

    #[test]
    fn test_variant_deserializes_lowercase() {
        let v: SchemaVariant = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(v, SchemaVariant::Lenient);
        assert!(serde_json::from_str::<SchemaVariant>("\"Strict\"").is_err());
    }
}
