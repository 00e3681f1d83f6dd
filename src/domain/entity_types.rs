//! Entity and relationship catalogs for each prompt mode
//!
//! The service answers with one of these lists depending on the active mode.
//! The panel only ever shows the first [`MAX_VISIBLE_ENTITY_TYPES`] of them.

/// Entity types of the general knowledge-graph profile
pub const GENERAL_ENTITY_TYPES: &[&str] = &[
    "person",
    "organization",
    "location",
    "event",
    "concept",
    "equipment",
    "product",
    "category",
    "other",
];

/// Ontology for technical standards and material specifications
pub const ENGINEERING_ENTITY_TYPES: &[&str] = &[
    // Specifications
    "Specification",
    "Standard",
    "Grade",
    // Materials
    "Material",
    "Composition Element",
    // Properties
    "Mechanical Property",
    "Chemical Property",
    "Physical Property",
    "Property Value",
    // Processes
    "Process",
    "Test Method",
    // Application & context
    "Application",
    "Requirement",
    "Organization",
    "Other",
];

/// Reduced engineering list used when the full catalog is disabled
pub const ENGINEERING_FALLBACK_ENTITY_TYPES: &[&str] =
    &["Specification", "Standard", "Grade", "Material", "Other"];

/// Relationship types of the engineering profile: (name, description)
pub const ENGINEERING_RELATIONSHIP_TYPES: &[(&str, &str)] = &[
    ("REFERENCES", "Specification references another specification"),
    ("SUPERSEDES", "Specification replaces an older specification"),
    ("SUPPLEMENTS", "Specification adds to another specification"),
    ("REQUIRES", "Specification mandates compliance with another spec"),
    ("SUBSTITUTES_FOR", "Material/spec can replace another"),
    ("EQUIVALENT_TO", "Material/spec is equivalent to another"),
    ("APPROVED_BY", "Substitution is approved by specification"),
    ("HAS_COMPOSITION", "Material contains element/component"),
    ("HAS_RANGE", "Element/property has value range"),
    ("HAS_LIMIT", "Property has maximum or minimum limit"),
    ("HAS_PROPERTY", "Material has mechanical/chemical/physical property"),
    ("HAS_VALUE", "Property has specific value"),
    ("HAS_MINIMUM_VALUE", "Property has minimum acceptable value"),
    ("HAS_MAXIMUM_VALUE", "Property has maximum acceptable value"),
    ("REQUIRES_PROCESS", "Material requires specific process"),
    ("TESTED_BY", "Property measured by test method"),
    ("APPLIES_PROCESS", "Process applied to material"),
    ("COMPLIES_WITH", "Material/process complies with standard"),
    ("DEFINED_BY", "Requirement defined by standard"),
    ("ISSUED_BY", "Standard issued by organization"),
    ("HAS_GRADE", "Standard includes grade designation"),
    ("USED_IN", "Material used in application"),
    ("APPLIES_TO", "Specification applies to application/context"),
    ("SUITABLE_FOR", "Material suitable for application"),
    ("RELATED_TO", "General relationship between entities"),
];

/// Prompt templates of the engineering profile
pub const ENGINEERING_PROMPT_NAMES: &[&str] = &[
    "DEFAULT_TUPLE_DELIMITER",
    "DEFAULT_COMPLETION_DELIMITER",
    "entity_extraction_system_prompt",
    "entity_extraction_user_prompt",
    "entity_continue_extraction_user_prompt",
    "entity_extraction_examples",
    "fail_response",
    "prompt_template",
    "kg_query_context",
    "naive_query_context",
    "keywords_extraction",
    "keywords_extraction_examples",
];

/// How many entity-type badges the panel renders before collapsing the rest
pub const MAX_VISIBLE_ENTITY_TYPES: usize = 8;

/// Entity types split into rendered badges and a collapsed remainder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityBadges<'a> {
    pub shown: &'a [String],
    /// Number of types hidden behind the "+N more" badge, if any
    pub overflow: Option<usize>,
}

impl EntityBadges<'_> {
    /// Total number of badges rendered, including the overflow badge
    pub fn badge_count(&self) -> usize {
        self.shown.len() + usize::from(self.overflow.is_some())
    }

    pub fn overflow_label(&self) -> Option<String> {
        self.overflow.map(|n| format!("+{} more", n))
    }
}

/// Select the badges to render: at most `limit` types plus one overflow indicator
pub fn visible_entity_types(types: &[String], limit: usize) -> EntityBadges<'_> {
    if types.len() > limit {
        EntityBadges {
            shown: &types[..limit],
            overflow: Some(types.len() - limit),
        }
    } else {
        EntityBadges {
            shown: types,
            overflow: None,
        }
    }
}
