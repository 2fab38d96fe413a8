//! Named-slot templates.
//!
//! A fragment's template text is parsed once into literal text and slots.
//! `{ident}` is a slot only when `ident` names a [`Slot`]; every other brace
//! is ordinary text, so C-family bodies such as `{\n}` need no escaping.
//! Slot values are inserted as-is and never scanned again.

use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

/// Placeholders a fragment template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Name,
    ClassName,
    Scope,
    Body,
    Params,
    Variables,
    Methods,
    ReturnType,
    Type,
    Field,
    FieldCap,
    Visibility,
}

impl Slot {
    pub const ALL: [Slot; 12] = [
        Slot::Name,
        Slot::ClassName,
        Slot::Scope,
        Slot::Body,
        Slot::Params,
        Slot::Variables,
        Slot::Methods,
        Slot::ReturnType,
        Slot::Type,
        Slot::Field,
        Slot::FieldCap,
        Slot::Visibility,
    ];

    /// Identifier used inside braces.
    pub fn ident(self) -> &'static str {
        match self {
            Slot::Name => "name",
            Slot::ClassName => "class_name",
            Slot::Scope => "scope",
            Slot::Body => "body",
            Slot::Params => "params",
            Slot::Variables => "variables",
            Slot::Methods => "methods",
            Slot::ReturnType => "return_type",
            Slot::Type => "type",
            Slot::Field => "field",
            Slot::FieldCap => "field_cap",
            Slot::Visibility => "visibility",
        }
    }

    pub fn from_ident(ident: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.ident() == ident)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.ident())
    }
}

/// Values bound to slots for one render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots(IndexMap<Slot, String>);

impl Slots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style bind.
    pub fn with(mut self, slot: Slot, value: impl Into<String>) -> Self {
        self.set(slot, value);
        self
    }

    pub fn set(&mut self, slot: Slot, value: impl Into<String>) {
        self.0.insert(slot, value.into());
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.0.get(&slot).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Slot(Slot),
}

/// A parsed fragment template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = text;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let slot = after
                .find('}')
                .and_then(|close| Slot::from_ident(&after[..close]).map(|slot| (slot, close)));

            match slot {
                Some((slot, close)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Text(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(slot));
                    rest = &after[close + 1..];
                }
                None => {
                    literal.push('{');
                    rest = after;
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Text(literal));
        }

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Slots referenced by the template, in order of appearance.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.segments.iter().filter_map(|s| match s {
            Segment::Slot(slot) => Some(*slot),
            Segment::Text(_) => None,
        })
    }

    /// Substitute bound values. An unbound slot is left as `{ident}`.
    pub fn render(&self, slots: &Slots) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(slot) => match slots.get(*slot) {
                    Some(value) => out.push_str(value),
                    None => {
                        debug!(slot = slot.ident(), "unbound template slot");
                        out.push_str(&slot.to_string());
                    }
                },
            }
        }
        out
    }
}

/// Parse and render in one go.
pub fn render(text: &str, slots: &Slots) -> String {
    Template::parse(text).render(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_known_slots() {
        let slots = Slots::new()
            .with(Slot::ClassName, "Point")
            .with(Slot::Scope, "Point::")
            .with(Slot::Body, ";");
        assert_eq!(
            render("{class_name}& {scope}operator=(const {class_name}& object){body}", &slots),
            "Point& Point::operator=(const Point& object);"
        );
    }

    #[test]
    fn test_other_braces_are_literal() {
        let slots = Slots::new().with(Slot::Name, "Point");
        assert_eq!(
            render("public class {name}\n{\n  {}\n  { x }\n  {unknown}\n}", &slots),
            "public class Point\n{\n  {}\n  { x }\n  {unknown}\n}"
        );
    }

    #[test]
    fn test_brace_directly_before_slot() {
        let slots = Slots::new().with(Slot::Name, "x");
        assert_eq!(render("{{name}}", &slots), "{x}");
    }

    #[test]
    fn test_unclosed_brace() {
        assert_eq!(render("void f() {", &Slots::new()), "void f() {");
    }

    #[test]
    fn test_unbound_slot_renders_verbatim() {
        assert_eq!(render("class {name}: {body}", &Slots::new()), "class {name}: {body}");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let slots = Slots::new()
            .with(Slot::Name, "{body}")
            .with(Slot::Body, "BODY");
        assert_eq!(render("{name}|{body}", &slots), "{body}|BODY");
    }

    #[test]
    fn test_slots_in_order() {
        let template = Template::parse("{type} {scope}get{field_cap}() const{body}");
        assert_eq!(
            template.slots().collect::<Vec<_>>(),
            vec![Slot::Type, Slot::Scope, Slot::FieldCap, Slot::Body]
        );
        assert_eq!(template.segments().len(), 7);
    }

    #[test]
    fn test_slot_idents_round_trip() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_ident(slot.ident()), Some(slot));
        }
        assert_eq!(Slot::from_ident("cppVersion"), None);
    }
}
