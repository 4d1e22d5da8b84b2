//! Diagram model
//!
//! Plain data structures for classes, members and relations. The parser
//! fills these in; layout and rendering only read them.

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
}

impl Visibility {
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Visibility::Public),
            '-' => Some(Visibility::Private),
            '#' => Some(Visibility::Protected),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
        }
    }

    /// Keyword used when rendering member lines
    pub fn keyword(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
        }
    }
}

/// A class member (attribute or method)
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// `None` means the declaration carried no recognized visibility symbol
    pub visibility: Option<Visibility>,
    pub name: String,
    pub member_type: String,
    /// True when the declaration included call-parentheses
    pub is_method: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, member_type: impl Into<String>) -> Self {
        Self {
            visibility: None,
            name: name.into(),
            member_type: member_type.into(),
            is_method: false,
        }
    }

    pub fn with_visibility(mut self, v: Visibility) -> Self {
        self.visibility = Some(v);
        self
    }

    pub fn as_method(mut self) -> Self {
        self.is_method = true;
        self
    }
}

/// A class in the diagram
#[derive(Debug, Clone, PartialEq)]
pub struct Class {
    pub name: String,
    /// Insertion order is declaration order
    pub members: Vec<Member>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }
}

/// Relation kind, one per recognized edge token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Generalization,      // <|--
    Association,         // -->
    ReverseAssociation,  // <--
}

impl RelationKind {
    pub fn token(self) -> &'static str {
        match self {
            RelationKind::Generalization => "<|--",
            RelationKind::Association => "-->",
            RelationKind::ReverseAssociation => "<--",
        }
    }
}

/// A relation between two class names
///
/// Endpoints are stored verbatim and never validated against declared
/// classes; rendering simply skips relations whose endpoints were never
/// placed.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub from: String,
    pub to: String,
    pub kind: RelationKind,
}

impl Relation {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RelationKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }
}

/// The aggregate root: classes and relations in declaration order
///
/// A repeated `class` line produces a second, independent `Class` entry
/// with the same name; the parser deliberately does not merge or
/// deduplicate them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    classes: Vec<Class>,
    relations: Vec<Relation>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_class(&mut self, class: Class) {
        self.classes.push(class);
    }

    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub(crate) fn classes_mut(&mut self) -> &mut [Class] {
        &mut self.classes
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// First class with the given name, in declaration order
    pub fn get_class(&self, name: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.relations.is_empty()
    }
}
