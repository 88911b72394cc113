//! Constraint descriptor catalog
//!
//! This module defines the validation constraints the transformer understands.
//! Every constraint has a kind, and kinds form a single-rooted specialization
//! hierarchy: walking [`ConstraintKind::parent`] from any catalog kind ends at
//! [`ConstraintKind::Constraint`]. Applications extend the catalog with
//! [`Specialized`] descriptors, which inherit the kind and attributes of the
//! constraint they wrap.

use std::fmt;

// ============================================================================
// Constraint Kinds
// ============================================================================

/// Kind of a constraint within the specialization hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Universal root kind (carries no schema meaning)
    Constraint,
    /// Abstract parent of constraints holding nested constraints
    Composite,
    /// String length range
    Length,
    /// Regular expression the value must match
    Regex,
    /// Email address format
    Email,
    /// URL format
    Url,
    /// ULID format
    Ulid,
    /// Named fields with nested constraints
    Collection,
    /// Constraints applied to each element of a list
    All,
    /// Value must not be blank
    NotBlank,
    /// Value must not be null
    NotNull,
    /// Value must be blank
    Blank,
    /// Declared primitive type
    Type,
    /// Application-defined specialization of another constraint
    Custom,
}

impl ConstraintKind {
    /// Parent kind in the built-in catalog
    ///
    /// Returns `None` for the root. `Custom` has no static parent either: the
    /// specialized kind is carried by the [`Specialized`] descriptor itself, so
    /// use [`Constraint::lineage`] to walk a concrete constraint's ancestry.
    pub fn parent(self) -> Option<ConstraintKind> {
        match self {
            Self::Constraint | Self::Custom => None,
            Self::Collection | Self::All => Some(Self::Composite),
            Self::Composite
            | Self::Length
            | Self::Regex
            | Self::Email
            | Self::Url
            | Self::Ulid
            | Self::NotBlank
            | Self::NotNull
            | Self::Blank
            | Self::Type => Some(Self::Constraint),
        }
    }

    /// Catalog name used in diagnostics
    pub fn name(self) -> &'static str {
        match self {
            Self::Constraint => "Constraint",
            Self::Composite => "Composite",
            Self::Length => "Length",
            Self::Regex => "Regex",
            Self::Email => "Email",
            Self::Url => "Url",
            Self::Ulid => "Ulid",
            Self::Collection => "Collection",
            Self::All => "All",
            Self::NotBlank => "NotBlank",
            Self::NotNull => "NotNull",
            Self::Blank => "Blank",
            Self::Type => "Type",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Constraint Descriptor
// ============================================================================

/// A single validation constraint attached to a field or structure
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// String length range
    Length(Length),
    /// Value must match a regular expression
    Regex(Regex),
    /// Value must be an email address
    Email,
    /// Value must be a URL
    Url,
    /// Value must be a ULID
    Ulid,
    /// Structure with named fields
    Collection(Collection),
    /// Constraints applied to every element
    All(All),
    /// Value must not be blank
    NotBlank,
    /// Value must not be null
    NotNull,
    /// Value must be blank
    Blank,
    /// Value must be of a declared primitive type
    Type(TypeConstraint),
    /// Application kind specializing another constraint
    Specialized(Specialized),
}

impl Constraint {
    /// Concrete kind of this constraint
    pub fn kind(&self) -> ConstraintKind {
        match self {
            Self::Length(_) => ConstraintKind::Length,
            Self::Regex(_) => ConstraintKind::Regex,
            Self::Email => ConstraintKind::Email,
            Self::Url => ConstraintKind::Url,
            Self::Ulid => ConstraintKind::Ulid,
            Self::Collection(_) => ConstraintKind::Collection,
            Self::All(_) => ConstraintKind::All,
            Self::NotBlank => ConstraintKind::NotBlank,
            Self::NotNull => ConstraintKind::NotNull,
            Self::Blank => ConstraintKind::Blank,
            Self::Type(_) => ConstraintKind::Type,
            Self::Specialized(_) => ConstraintKind::Custom,
        }
    }

    /// Name identifying this constraint in error messages
    pub fn name(&self) -> &str {
        match self {
            Self::Specialized(specialized) => specialized.name.as_str(),
            other => other.kind().name(),
        }
    }

    /// Walk the kinds of this constraint from its concrete kind up to the root
    ///
    /// # Example
    /// ```
    /// use ouroboros_schema::constraints::{All, Constraint, ConstraintKind};
    ///
    /// let each = Constraint::from(All::new(vec![]));
    /// let kinds: Vec<_> = each.lineage().collect();
    /// assert_eq!(
    ///     kinds,
    ///     vec![ConstraintKind::All, ConstraintKind::Composite, ConstraintKind::Constraint]
    /// );
    /// ```
    pub fn lineage(&self) -> Lineage<'_> {
        Lineage {
            pending: Some(self),
            next_kind: None,
        }
    }

    /// Check whether this constraint is of `kind` or specializes it
    pub fn conforms_to(&self, kind: ConstraintKind) -> bool {
        self.lineage().any(|ancestor| ancestor == kind)
    }

    /// Built-in constraint carrying the attributes, looking through specializations
    pub fn base(&self) -> &Constraint {
        let mut current = self;
        while let Self::Specialized(specialized) = current {
            current = &*specialized.base;
        }
        current
    }

    /// Wrap this constraint in an application-defined specialization
    pub fn specialize(self, name: impl Into<String>) -> Constraint {
        Self::Specialized(Specialized {
            name: name.into(),
            base: Box::new(self),
        })
    }

    /// Length attributes, if this constraint is (or specializes) a length range
    pub fn as_length(&self) -> Option<&Length> {
        match self.base() {
            Self::Length(length) => Some(length),
            _ => None,
        }
    }

    /// Regex attributes, if this constraint is (or specializes) a regex
    pub fn as_regex(&self) -> Option<&Regex> {
        match self.base() {
            Self::Regex(regex) => Some(regex),
            _ => None,
        }
    }

    /// Collection attributes, if this constraint is (or specializes) a collection
    pub fn as_collection(&self) -> Option<&Collection> {
        match self.base() {
            Self::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// Each-element attributes, if this constraint is (or specializes) `All`
    pub fn as_all(&self) -> Option<&All> {
        match self.base() {
            Self::All(all) => Some(all),
            _ => None,
        }
    }

    /// Declared type, if this constraint is (or specializes) a type declaration
    pub fn as_type(&self) -> Option<&TypeConstraint> {
        match self.base() {
            Self::Type(declared) => Some(declared),
            _ => None,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Iterator over a constraint's kinds, from concrete kind to root
///
/// Created by [`Constraint::lineage`].
#[derive(Debug, Clone)]
pub struct Lineage<'a> {
    pending: Option<&'a Constraint>,
    next_kind: Option<ConstraintKind>,
}

impl Iterator for Lineage<'_> {
    type Item = ConstraintKind;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(constraint) = self.pending.take() {
            if let Constraint::Specialized(specialized) = constraint {
                self.pending = Some(&*specialized.base);
                return Some(ConstraintKind::Custom);
            }
            let kind = constraint.kind();
            self.next_kind = kind.parent();
            return Some(kind);
        }

        let kind = self.next_kind?;
        self.next_kind = kind.parent();
        Some(kind)
    }
}

// ============================================================================
// Constraint Attributes
// ============================================================================

/// Length range for string values (either bound may be absent)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Length {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
}

impl Length {
    /// Create a length range from optional bounds
    pub fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// Lower bound only
    pub fn at_least(min: usize) -> Self {
        Self::new(Some(min), None)
    }

    /// Upper bound only
    pub fn at_most(max: usize) -> Self {
        Self::new(None, Some(max))
    }

    /// Both bounds
    pub fn between(min: usize, max: usize) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// Exact length
    pub fn exactly(length: usize) -> Self {
        Self::between(length, length)
    }
}

/// Regular expression a value must match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    /// Raw pattern text
    pub pattern: String,
}

impl Regex {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }
}

/// Declared primitive type (e.g. "string", "int", "bool")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConstraint {
    /// Declared type name
    pub type_name: String,
}

impl TypeConstraint {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

/// Constraints applied to each element of a list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct All {
    /// Nested constraints for every element
    pub constraints: Vec<Constraint>,
}

impl All {
    pub fn new(constraints: Vec<Constraint>) -> Self {
        Self { constraints }
    }
}

/// Application-defined kind specializing another constraint
#[derive(Debug, Clone, PartialEq)]
pub struct Specialized {
    /// Name of the application kind
    pub name: String,
    /// Constraint being specialized
    pub base: Box<Constraint>,
}

// ============================================================================
// Collection (for Object schemas)
// ============================================================================

/// Constraints for a structure with named fields
///
/// Fields keep their declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    /// Field name and its constraints, in declaration order
    pub fields: Vec<(String, FieldConstraints)>,
    /// Whether fields not listed here are accepted
    pub allow_extra_fields: bool,
    /// Whether listed fields may be absent
    pub allow_missing_fields: bool,
}

impl Collection {
    /// Create an empty collection (extra and missing fields disallowed)
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field
    pub fn field(mut self, name: impl Into<String>, constraints: impl Into<FieldConstraints>) -> Self {
        self.fields.push((name.into(), constraints.into()));
        self
    }

    /// Accept fields not declared in this collection
    pub fn allow_extra_fields(mut self, allow: bool) -> Self {
        self.allow_extra_fields = allow;
        self
    }

    /// Accept declared fields being absent
    pub fn allow_missing_fields(mut self, allow: bool) -> Self {
        self.allow_missing_fields = allow;
        self
    }
}

/// Constraints attached to one collection field
///
/// `Optional` and `Required` only ever appear inside a [`Collection`]; they
/// carry no schema meaning of their own beyond the required mark.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldConstraints {
    /// Constraints without an explicit presence wrapper
    Plain(Vec<Constraint>),
    /// Field may be absent
    Optional(Vec<Constraint>),
    /// Field must be present
    Required(Vec<Constraint>),
}

impl FieldConstraints {
    /// Mark constraints as optional
    ///
    /// The outer wrapper wins: rewrapping `required(..)` yields an optional
    /// field over the same constraints.
    pub fn optional(constraints: impl Into<FieldConstraints>) -> Self {
        Self::Optional(constraints.into().into_constraints())
    }

    /// Mark constraints as required
    ///
    /// Replaces any presence wrapper already on `constraints`.
    pub fn required(constraints: impl Into<FieldConstraints>) -> Self {
        Self::Required(constraints.into().into_constraints())
    }

    /// Unwrapped constraint list
    pub fn constraints(&self) -> &[Constraint] {
        match self {
            Self::Plain(constraints) | Self::Optional(constraints) | Self::Required(constraints) => {
                constraints
            }
        }
    }

    /// Consume the wrapper, returning the constraint list
    pub fn into_constraints(self) -> Vec<Constraint> {
        match self {
            Self::Plain(constraints) | Self::Optional(constraints) | Self::Required(constraints) => {
                constraints
            }
        }
    }

    /// Whether the field carries an explicit required wrapper
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required(_))
    }

    /// Whether the field carries an explicit optional wrapper
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<Constraint> for FieldConstraints {
    fn from(constraint: Constraint) -> Self {
        Self::Plain(vec![constraint])
    }
}

impl From<Vec<Constraint>> for FieldConstraints {
    fn from(constraints: Vec<Constraint>) -> Self {
        Self::Plain(constraints)
    }
}

impl From<Length> for Constraint {
    fn from(length: Length) -> Self {
        Self::Length(length)
    }
}

impl From<Regex> for Constraint {
    fn from(regex: Regex) -> Self {
        Self::Regex(regex)
    }
}

impl From<Collection> for Constraint {
    fn from(collection: Collection) -> Self {
        Self::Collection(collection)
    }
}

impl From<All> for Constraint {
    fn from(all: All) -> Self {
        Self::All(all)
    }
}

impl From<TypeConstraint> for Constraint {
    fn from(declared: TypeConstraint) -> Self {
        Self::Type(declared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_reaches_root() {
        let kinds = [
            ConstraintKind::Composite,
            ConstraintKind::Length,
            ConstraintKind::Regex,
            ConstraintKind::Email,
            ConstraintKind::Url,
            ConstraintKind::Ulid,
            ConstraintKind::Collection,
            ConstraintKind::All,
            ConstraintKind::NotBlank,
            ConstraintKind::NotNull,
            ConstraintKind::Blank,
            ConstraintKind::Type,
        ];

        for kind in kinds {
            let mut current = kind;
            while let Some(parent) = current.parent() {
                current = parent;
            }
            assert_eq!(current, ConstraintKind::Constraint, "{kind} does not reach the root");
        }
    }

    #[test]
    fn test_lineage_of_builtin() {
        let collection = Constraint::from(Collection::new());
        let kinds: Vec<_> = collection.lineage().collect();
        assert_eq!(
            kinds,
            vec![
                ConstraintKind::Collection,
                ConstraintKind::Composite,
                ConstraintKind::Constraint,
            ]
        );

        let email = Constraint::Email;
        let kinds: Vec<_> = email.lineage().collect();
        assert_eq!(kinds, vec![ConstraintKind::Email, ConstraintKind::Constraint]);
    }

    #[test]
    fn test_lineage_of_specialization() {
        let username = Constraint::from(Length::between(3, 16))
            .specialize("UsernameLength")
            .specialize("AdminUsernameLength");

        let kinds: Vec<_> = username.lineage().collect();
        assert_eq!(
            kinds,
            vec![
                ConstraintKind::Custom,
                ConstraintKind::Custom,
                ConstraintKind::Length,
                ConstraintKind::Constraint,
            ]
        );
        assert_eq!(username.name(), "AdminUsernameLength");
        assert!(username.conforms_to(ConstraintKind::Length));
        assert!(!username.conforms_to(ConstraintKind::Regex));
        assert_eq!(username.as_length(), Some(&Length::between(3, 16)));
    }

    #[test]
    fn test_accessors_reject_other_kinds() {
        let regex = Constraint::from(Regex::new("^a$"));
        assert!(regex.as_length().is_none());
        assert!(regex.as_collection().is_none());
        assert_eq!(regex.as_regex().map(|r| r.pattern.as_str()), Some("^a$"));
    }

    #[test]
    fn test_field_constraints_normalization() {
        let single: FieldConstraints = Constraint::Email.into();
        assert_eq!(single.constraints(), &[Constraint::Email]);
        assert!(!single.is_required());
        assert!(!single.is_optional());

        let required = FieldConstraints::required(Constraint::NotBlank);
        assert!(required.is_required());
        assert_eq!(required.constraints(), &[Constraint::NotBlank]);

        let optional = FieldConstraints::optional(vec![Constraint::Email, Constraint::NotBlank]);
        assert!(optional.is_optional());
        assert_eq!(optional.constraints().len(), 2);
    }

    #[test]
    fn test_outer_presence_wrapper_wins() {
        let rewrapped = FieldConstraints::optional(FieldConstraints::required(Constraint::Email));
        assert_eq!(rewrapped, FieldConstraints::Optional(vec![Constraint::Email]));

        let rewrapped = FieldConstraints::required(FieldConstraints::optional(vec![
            Constraint::Url,
            Constraint::NotBlank,
        ]));
        assert!(rewrapped.is_required());
        assert_eq!(rewrapped.constraints(), &[Constraint::Url, Constraint::NotBlank]);
    }

    #[test]
    fn test_collection_keeps_declaration_order() {
        let collection = Collection::new()
            .field("zeta", Constraint::Email)
            .field("alpha", Constraint::Url)
            .allow_extra_fields(true);

        let names: Vec<_> = collection.fields.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
        assert!(collection.allow_extra_fields);
        assert!(!collection.allow_missing_fields);
    }
}
