//! Domain registry.
//!
//! Each entry describes one REST domain: its URL slug, the configuration key
//! for its backing collection, the generated pattern it follows, and the
//! fields clients may sort by. The services and routers are generic over
//! these entries, so adding a domain is one more row here plus a collection
//! name in the configuration.

/// Which generated pattern a domain follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainStyle {
    /// Read-only: list and get-by-id.
    Consume,
    /// Create, list, and get-by-id (no update).
    Create,
    /// Create, list, get-by-id, and update. No delete.
    Control,
}

impl DomainStyle {
    pub fn supports_create(&self) -> bool {
        matches!(self, DomainStyle::Create | DomainStyle::Control)
    }

    pub fn supports_update(&self) -> bool {
        matches!(self, DomainStyle::Control)
    }

    /// Control-style documents carry a `saved` stamp on every write;
    /// create-style documents only ever carry `created`.
    pub fn stamps_saved(&self) -> bool {
        matches!(self, DomainStyle::Control)
    }
}

#[derive(Debug)]
pub struct DomainSpec {
    pub slug: &'static str,
    pub display_name: &'static str,
    pub style: DomainStyle,
    pub sort_fields: &'static [&'static str],
}

const CONSUME_SORT_FIELDS: &[&str] = &["name", "description"];
const CREATE_SORT_FIELDS: &[&str] = &["name", "description", "created.at_time"];
const CONTROL_SORT_FIELDS: &[&str] =
    &["name", "description", "status", "created.at_time", "saved.at_time"];

pub const DOMAINS: &[DomainSpec] = &[
    DomainSpec {
        slug: "control",
        display_name: "Control",
        style: DomainStyle::Control,
        sort_fields: CONTROL_SORT_FIELDS,
    },
    DomainSpec {
        slug: "create",
        display_name: "Create",
        style: DomainStyle::Create,
        sort_fields: CREATE_SORT_FIELDS,
    },
    DomainSpec {
        slug: "consume",
        display_name: "Consume",
        style: DomainStyle::Consume,
        sort_fields: CONSUME_SORT_FIELDS,
    },
    DomainSpec {
        slug: "event",
        display_name: "Event",
        style: DomainStyle::Create,
        sort_fields: CREATE_SORT_FIELDS,
    },
    DomainSpec {
        slug: "identity",
        display_name: "Identity",
        style: DomainStyle::Consume,
        sort_fields: CONSUME_SORT_FIELDS,
    },
    DomainSpec {
        slug: "organization",
        display_name: "Organization",
        style: DomainStyle::Control,
        sort_fields: CONTROL_SORT_FIELDS,
    },
    DomainSpec {
        slug: "profile",
        display_name: "Profile",
        style: DomainStyle::Control,
        sort_fields: CONTROL_SORT_FIELDS,
    },
];

pub fn find(slug: &str) -> Option<&'static DomainSpec> {
    DOMAINS.iter().find(|d| d.slug == slug)
}
