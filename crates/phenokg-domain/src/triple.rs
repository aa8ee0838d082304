//! Triples and the terms they are made of

use crate::sanitize::{escape_literal, mint_local_name};
use std::fmt;

/// XML Schema datatypes used for typed literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XsdType {
    /// `xsd:string`
    String,
    /// `xsd:integer`
    Integer,
    /// `xsd:boolean`
    Boolean,
    /// `xsd:dateTime`
    DateTime,
}

impl XsdType {
    /// Prefixed name of the datatype
    pub fn as_str(&self) -> &'static str {
        match self {
            XsdType::String => "xsd:string",
            XsdType::Integer => "xsd:integer",
            XsdType::Boolean => "xsd:boolean",
            XsdType::DateTime => "xsd:dateTime",
        }
    }
}

/// A literal value
///
/// The lexical form is stored raw and escaped only when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Unescaped lexical form
    pub value: String,

    /// Datatype, `None` for a plain literal
    pub datatype: Option<XsdType>,
}

impl Literal {
    /// Plain string literal
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
        }
    }

    /// Typed literal
    pub fn typed(value: impl Into<String>, datatype: XsdType) -> Self {
        Self {
            value: value.into(),
            datatype: Some(datatype),
        }
    }

    /// `xsd:integer` literal
    pub fn integer(value: u64) -> Self {
        Self::typed(value.to_string(), XsdType::Integer)
    }

    /// `xsd:boolean` literal
    pub fn boolean(value: bool) -> Self {
        Self::typed(value.to_string(), XsdType::Boolean)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape_literal(&self.value))?;
        if let Some(datatype) = self.datatype {
            write!(f, "^^{}", datatype.as_str())?;
        }
        Ok(())
    }
}

/// A node or predicate in a triple
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// Prefixed name such as `rdf:type` or `:Cohort42`, already legal Turtle
    Name(String),

    /// Absolute IRI, rendered inside angle brackets
    Iri(String),

    /// Literal value
    Literal(Literal),
}

impl Term {
    /// A fixed prefixed name (vocabulary terms known at compile time)
    pub fn name(name: impl Into<String>) -> Self {
        Term::Name(name.into())
    }

    /// Mint a prefixed name from free text
    ///
    /// `prefix` includes the trailing colon (`":"`, `"snomed:"`); `local` is
    /// passed through [`mint_local_name`].
    pub fn minted(prefix: &str, local: &str) -> Self {
        Term::Name(format!("{}{}", prefix, mint_local_name(local)))
    }

    /// Mint a name in the default cohort namespace
    pub fn local(local: &str) -> Self {
        Self::minted(":", local)
    }

    /// Absolute IRI
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    /// Plain literal
    pub fn text(value: impl Into<String>) -> Self {
        Term::Literal(Literal::plain(value))
    }

    /// Typed literal
    pub fn typed(value: impl Into<String>, datatype: XsdType) -> Self {
        Term::Literal(Literal::typed(value, datatype))
    }

    /// `xsd:integer` literal
    pub fn integer(value: u64) -> Self {
        Term::Literal(Literal::integer(value))
    }

    /// `xsd:boolean` literal
    pub fn boolean(value: bool) -> Self {
        Term::Literal(Literal::boolean(value))
    }

    /// Whether this term is a literal
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Name(name) => f.write_str(name),
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Literal(literal) => literal.fmt(f),
        }
    }
}

/// A single RDF statement
///
/// Displays as one terminated Turtle line: `subject predicate object .`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject
    pub subject: Term,

    /// Predicate
    pub predicate: Term,

    /// Object
    pub object: Term,
}

impl Triple {
    /// Create a new triple
    pub fn new(subject: Term, predicate: impl Into<Term>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

impl From<&str> for Term {
    fn from(name: &str) -> Self {
        Term::Name(name.to_string())
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_display() {
        let triple = Triple::new(Term::local("Cohort42"), "rdf:type", Term::name(":Cohort"));
        assert_eq!(triple.to_string(), ":Cohort42 rdf:type :Cohort .");
    }

    #[test]
    fn test_literal_is_escaped_on_render() {
        let triple = Triple::new(
            Term::local("Cohort42"),
            "rdfs:label",
            Term::text("He said \"no\"\nthen left"),
        );
        assert_eq!(
            triple.to_string(),
            ":Cohort42 rdfs:label \"He said \\\"no\\\"\\nthen left\" ."
        );
    }

    #[test]
    fn test_typed_literals() {
        assert_eq!(Term::integer(12).to_string(), "\"12\"^^xsd:integer");
        assert_eq!(Term::boolean(true).to_string(), "\"true\"^^xsd:boolean");
        assert_eq!(
            Term::typed("2020-01-01T00:00:00Z", XsdType::DateTime).to_string(),
            "\"2020-01-01T00:00:00Z\"^^xsd:dateTime"
        );
    }

    #[test]
    fn test_minted_names_are_sanitized() {
        assert_eq!(Term::minted("snomed:", "123 45").to_string(), "snomed:123_45");
        assert_eq!(Term::local("Disease_Crohn's").to_string(), ":Disease_Crohn_s");
    }

    #[test]
    fn test_iri_display() {
        assert_eq!(
            Term::iri("https://atlas.example.org/#/cohortdefinition/1").to_string(),
            "<https://atlas.example.org/#/cohortdefinition/1>"
        );
    }

    #[test]
    fn test_literal_values_are_not_sanitized() {
        assert_eq!(Term::text("a/b c").to_string(), "\"a/b c\"");
    }
}
