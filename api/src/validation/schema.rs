//! Declarative payload schemas
//!
//! A [`Schema`] is a table of [`FieldRule`]s plus [`CrossFieldRule`]s.
//! Schemas are plain data; [`super::evaluate::validate`] interprets them.

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::sanitizers::Sanitizer;

/// Where in the request a payload came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Body,
    Query,
    Params,
}

impl Location {
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Body => "body",
            Location::Query => "query",
            Location::Params => "params",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every payload kind the service understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaName {
    Register,
    Login,
    Product,
    Order,
    OrderStatus,
    SoilReport,
    Scheme,
    Notification,
    DiseaseDetection,
    Pagination,
    CropSuggestion,
    IdParam,
}

impl SchemaName {
    pub const ALL: [SchemaName; 12] = [
        SchemaName::Register,
        SchemaName::Login,
        SchemaName::Product,
        SchemaName::Order,
        SchemaName::OrderStatus,
        SchemaName::SoilReport,
        SchemaName::Scheme,
        SchemaName::Notification,
        SchemaName::DiseaseDetection,
        SchemaName::Pagination,
        SchemaName::CropSuggestion,
        SchemaName::IdParam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaName::Register => "register",
            SchemaName::Login => "login",
            SchemaName::Product => "product",
            SchemaName::Order => "order",
            SchemaName::OrderStatus => "orderStatus",
            SchemaName::SoilReport => "soilReport",
            SchemaName::Scheme => "scheme",
            SchemaName::Notification => "notification",
            SchemaName::DiseaseDetection => "diseaseDetection",
            SchemaName::Pagination => "pagination",
            SchemaName::CropSuggestion => "cropSuggestion",
            SchemaName::IdParam => "idParam",
        }
    }
}

impl std::fmt::Display for SchemaName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SchemaName {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SchemaError::Unknown(s.to_string()))
    }
}

/// Schema wiring mistakes. These are programming errors, not user input errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("unknown schema name `{0}`")]
    Unknown(String),

    #[error("no schema registered for `{0}`")]
    NotRegistered(SchemaName),
}

/// Declared type of a field
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Date,
    Object(Vec<FieldRule>),
    Array(Box<FieldRule>),
}

/// Constraint checked after a value has its declared type
#[derive(Debug, Clone)]
pub enum Constraint {
    MinLength(usize),
    MaxLength(usize),
    Min(f64),
    Max(f64),
    MinItems(usize),
    MaxItems(usize),
    OneOf(&'static [&'static str]),
    Pattern {
        regex: &'static Regex,
        message: &'static str,
    },
    Email,
    NoXss,
}

#[derive(Debug, Clone)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<Value>,
    pub constraints: Vec<Constraint>,
    pub sanitizers: Vec<Sanitizer>,
}

impl FieldRule {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        let sanitizers = match kind {
            FieldKind::String => vec![Sanitizer::RemoveControlChars, Sanitizer::Trim],
            _ => vec![],
        };
        Self {
            name,
            kind,
            required: false,
            default: None,
            constraints: vec![],
            sanitizers,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn object(name: &'static str, fields: Vec<FieldRule>) -> Self {
        Self::new(name, FieldKind::Object(fields))
    }

    /// Array whose elements all follow `item` (the item's name is unused)
    pub fn array(name: &'static str, item: FieldRule) -> Self {
        Self::new(name, FieldKind::Array(Box::new(item)))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value inserted when the field is absent
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn min_len(self, n: usize) -> Self {
        self.constraint(Constraint::MinLength(n))
    }

    pub fn max_len(self, n: usize) -> Self {
        self.constraint(Constraint::MaxLength(n))
    }

    pub fn min(self, n: f64) -> Self {
        self.constraint(Constraint::Min(n))
    }

    pub fn max(self, n: f64) -> Self {
        self.constraint(Constraint::Max(n))
    }

    pub fn min_items(self, n: usize) -> Self {
        self.constraint(Constraint::MinItems(n))
    }

    pub fn max_items(self, n: usize) -> Self {
        self.constraint(Constraint::MaxItems(n))
    }

    pub fn one_of(self, allowed: &'static [&'static str]) -> Self {
        self.constraint(Constraint::OneOf(allowed))
    }

    pub fn pattern(self, regex: &'static Regex, message: &'static str) -> Self {
        self.constraint(Constraint::Pattern { regex, message })
    }

    pub fn email(self) -> Self {
        self.constraint(Constraint::Email).sanitize(Sanitizer::Lowercase)
    }

    pub fn no_xss(self) -> Self {
        self.constraint(Constraint::NoXss)
    }

    /// Strip tags and collapse whitespace; for free text shown back to users
    pub fn clean_text(self) -> Self {
        self.sanitize(Sanitizer::StripHtml)
            .sanitize(Sanitizer::CollapseWhitespace)
    }

    /// Keep the string exactly as sent (passwords)
    pub fn raw(mut self) -> Self {
        self.sanitizers.clear();
        self
    }

    fn sanitize(mut self, sanitizer: Sanitizer) -> Self {
        if !self.sanitizers.contains(&sanitizer) {
            self.sanitizers.push(sanitizer);
        }
        self
    }

    fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

/// Rule spanning two top-level fields. Errors are attributed to `field`.
#[derive(Debug, Clone)]
pub enum CrossFieldRule {
    /// Numeric `field >= other`
    GreaterOrEqual {
        field: &'static str,
        other: &'static str,
    },
    /// Date `field > other`
    After {
        field: &'static str,
        other: &'static str,
    },
    /// `field` must be present when `when == equals`
    RequiredWhen {
        field: &'static str,
        when: &'static str,
        equals: &'static str,
    },
    /// `field` must equal `other`
    Matches {
        field: &'static str,
        other: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Schema {
    pub name: SchemaName,
    pub location: Location,
    pub fields: Vec<FieldRule>,
    pub cross_rules: Vec<CrossFieldRule>,
}

impl Schema {
    pub fn new(name: SchemaName, location: Location) -> Self {
        Self {
            name,
            location,
            fields: vec![],
            cross_rules: vec![],
        }
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.fields.push(rule);
        self
    }

    pub fn cross(mut self, rule: CrossFieldRule) -> Self {
        self.cross_rules.push(rule);
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_name_round_trips_through_str() {
        for name in SchemaName::ALL {
            assert_eq!(name.as_str().parse::<SchemaName>(), Ok(name));
        }
    }

    #[test]
    fn test_unknown_schema_name() {
        assert_eq!(
            "harvest".parse::<SchemaName>(),
            Err(SchemaError::Unknown("harvest".to_string()))
        );
    }

    #[test]
    fn test_string_fields_trim_by_default() {
        let rule = FieldRule::string("name");
        assert!(rule.sanitizers.contains(&Sanitizer::Trim));
        assert!(FieldRule::string("password").raw().sanitizers.is_empty());
        assert!(FieldRule::number("price").sanitizers.is_empty());
    }

    #[test]
    fn test_email_lowercases() {
        let rule = FieldRule::string("email").email();
        assert!(rule.sanitizers.contains(&Sanitizer::Lowercase));
        assert!(matches!(rule.constraints[0], Constraint::Email));
    }

    #[test]
    fn test_builder_collects_rules() {
        let schema = Schema::new(SchemaName::Login, Location::Body)
            .field(FieldRule::string("email").required())
            .field(FieldRule::boolean("rememberMe").default(false))
            .cross(CrossFieldRule::Matches { field: "a", other: "b" });
        assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["email", "rememberMe"]);
        assert_eq!(schema.cross_rules.len(), 1);
        assert_eq!(schema.fields[1].default, Some(Value::Bool(false)));
    }
}
