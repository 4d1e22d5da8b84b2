//! Class notation parser
//!
//! Recovers a [`Diagram`] from loosely structured, line-oriented text.
//! Parsing is best-effort and never fails: every line either matches one
//! of the grammar rules or is silently dropped.
//!
//! Grammar, one rule per line (first match wins):
//!
//! ```text
//! class <Identifier>
//! <Identifier> : <+|-|#><Identifier>[()] : <Identifier>
//! <Identifier> <|-- <Identifier>
//! <Identifier> --> <Identifier>
//! <Identifier> <-- <Identifier>
//! ```

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::diagram::{Class, Diagram, Member, Relation, RelationKind, Visibility};

/// Parse class notation into a diagram
///
/// Never fails; unrecognized or malformed lines are skipped. Member lines
/// attach to the most recent `class` declaration of their name, so a member
/// that precedes its class declaration is dropped.
pub fn parse(input: &str) -> Diagram {
    let mut diagram = Diagram::new();
    // Most recent declaration index per name. A repeated `class` line
    // shadows the earlier entry here while both stay in the diagram.
    let mut registry: HashMap<String, usize> = HashMap::new();

    for raw_line in input.split(['\r', '\n']) {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix("class ") {
            let name = rest.trim();
            debug!(class = name, "declared class");
            registry.insert(name.to_string(), diagram.class_count());
            diagram.add_class(Class::new(name));
        } else if let Some(relation) = parse_relation(line) {
            debug!(
                from = %relation.from,
                to = %relation.to,
                token = relation.kind.token(),
                "declared relation"
            );
            diagram.add_relation(relation);
        } else if let Some((class_name, member)) = parse_member(line) {
            match registry.get(class_name) {
                Some(&index) => {
                    debug!(class = class_name, member = %member.name, "declared member");
                    diagram.classes_mut()[index].add_member(member);
                }
                None => trace!(class = class_name, "member for undeclared class dropped"),
            }
        } else {
            trace!(line, "unrecognized line skipped");
        }
    }

    diagram
}

/// Relation tokens in match priority order. `<|--` must be tested before
/// `<--`, which it contains.
const RELATION_TOKENS: [(&str, RelationKind); 3] = [
    ("<|--", RelationKind::Generalization),
    ("-->", RelationKind::Association),
    ("<--", RelationKind::ReverseAssociation),
];

/// Parse a relation line like `Dog <|-- Animal` or `A --> B`
///
/// The line is split at the first occurrence of the matched token; both
/// halves must be non-empty after trimming or the line is discarded.
fn parse_relation(line: &str) -> Option<Relation> {
    for (token, kind) in RELATION_TOKENS {
        if line.contains(token) {
            let (from, to) = line.split_once(token)?;
            let from = from.trim();
            let to = to.trim();
            if from.is_empty() || to.is_empty() {
                return None;
            }
            return Some(Relation::new(from, to, kind));
        }
    }
    None
}

/// Parse a member line like `Animal : +name : string` or `Dog : -bark() : void`
///
/// Returns the target class name and the member. The visibility symbol must
/// immediately precede the member name; optional `()` sits between the name
/// and the type separator. `is_method` is true iff the literal `()` appears
/// anywhere in the line.
fn parse_member(line: &str) -> Option<(&str, Member)> {
    let (class_part, rest) = line.split_once(':')?;
    let class_name = class_part.trim();
    if !is_identifier(class_name) {
        return None;
    }

    let rest = rest.trim_start();
    let mut chars = rest.chars();
    let visibility = Visibility::from_symbol(chars.next()?)?;
    let rest = chars.as_str();

    let name_len = rest
        .find(|c: char| !is_identifier_char(c))
        .unwrap_or(rest.len());
    if name_len == 0 {
        return None;
    }
    let (name, tail) = rest.split_at(name_len);

    // Optional call-parentheses directly after the name
    let tail = tail.strip_prefix('(').unwrap_or(tail);
    let tail = tail.strip_prefix(')').unwrap_or(tail);

    let member_type = tail.trim_start().strip_prefix(':')?.trim();
    if !is_identifier(member_type) {
        return None;
    }

    let mut member =
        Member::new(name, member_type).with_visibility(visibility);
    member.is_method = line.contains("()");
    Some((class_name, member))
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_identifier_char)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_class_declaration() {
        let diagram = parse("class Animal");
        assert_eq!(diagram.class_count(), 1);
        assert_eq!(diagram.classes()[0].name, "Animal");
    }

    #[test]
    fn test_parse_class_name_trimmed() {
        let diagram = parse("   class   Animal  ");
        assert_eq!(diagram.classes()[0].name, "Animal");
    }

    #[test]
    fn test_parse_members_attach_in_order() {
        let diagram = parse("class A\nA : +name : string\nA : -id : int");

        assert_eq!(diagram.class_count(), 1);
        let class = &diagram.classes()[0];
        assert_eq!(class.members.len(), 2);
        assert_eq!(class.members[0].name, "name");
        assert_eq!(class.members[0].visibility, Some(Visibility::Public));
        assert_eq!(class.members[0].member_type, "string");
        assert!(!class.members[0].is_method);
        assert_eq!(class.members[1].visibility, Some(Visibility::Private));
    }

    #[test]
    fn test_parse_method_member() {
        let diagram = parse("class Dog\nDog : #bark() : void");

        let member = &diagram.classes()[0].members[0];
        assert_eq!(member.name, "bark");
        assert_eq!(member.visibility, Some(Visibility::Protected));
        assert_eq!(member.member_type, "void");
        assert!(member.is_method);
    }

    #[test]
    fn test_member_before_declaration_dropped() {
        let diagram = parse("A : +name : string\nclass A");

        assert_eq!(diagram.class_count(), 1);
        assert!(diagram.classes()[0].members.is_empty());
    }

    #[test]
    fn test_member_for_unknown_class_dropped() {
        let diagram = parse("class A\nB : +name : string");
        assert!(diagram.classes()[0].members.is_empty());
    }

    #[test]
    fn test_member_without_visibility_symbol_dropped() {
        let diagram = parse("class A\nA : name : string");
        assert!(diagram.classes()[0].members.is_empty());
    }

    #[test]
    fn test_member_with_space_before_name_dropped() {
        let diagram = parse("class A\nA : + name : string");
        assert!(diagram.classes()[0].members.is_empty());
    }

    #[test]
    fn test_parse_relation_kinds() {
        let diagram = parse("A --> B\nC <-- D\nDog <|-- Animal");

        assert_eq!(diagram.relation_count(), 3);
        assert_eq!(diagram.relations()[0].kind, RelationKind::Association);
        assert_eq!(diagram.relations()[1].kind, RelationKind::ReverseAssociation);
        assert_eq!(diagram.relations()[2].kind, RelationKind::Generalization);
        assert_eq!(diagram.relations()[2].from, "Dog");
        assert_eq!(diagram.relations()[2].to, "Animal");
    }

    #[test]
    fn test_generalization_wins_over_backward_association() {
        // "<|--" does not contain "<--" literally, but priority is still
        // part of the contract when a line carries multiple tokens.
        let diagram = parse("A <|-- B --> C");
        assert_eq!(diagram.relation_count(), 1);
        let rel = &diagram.relations()[0];
        assert_eq!(rel.kind, RelationKind::Generalization);
        assert_eq!(rel.from, "A");
        assert_eq!(rel.to, "B --> C");
    }

    #[test]
    fn test_relation_with_empty_side_dropped() {
        let diagram = parse("--> B\nA -->\n-->");
        assert_eq!(diagram.relation_count(), 0);
    }

    #[test]
    fn test_relation_endpoints_not_validated() {
        let diagram = parse("Foo --> Bar");
        assert_eq!(diagram.class_count(), 0);
        assert_eq!(diagram.relation_count(), 1);
        assert_eq!(diagram.relations()[0].from, "Foo");
        assert_eq!(diagram.relations()[0].to, "Bar");
    }

    #[test]
    fn test_duplicate_class_shadows_member_lookup() {
        let input = "class Foo\nFoo : +a : int\nclass Foo\nFoo : +b : int";
        let diagram = parse(input);

        // Two independent entities; members after the shadowing point
        // attach only to the most recent declaration.
        assert_eq!(diagram.class_count(), 2);
        assert_eq!(diagram.classes()[0].members.len(), 1);
        assert_eq!(diagram.classes()[0].members[0].name, "a");
        assert_eq!(diagram.classes()[1].members.len(), 1);
        assert_eq!(diagram.classes()[1].members[0].name, "b");
    }

    #[test]
    fn test_unrecognized_lines_skipped() {
        let input = "hello world\nclass A\n!!!\n// comment\nA : +x : int";
        let diagram = parse(input);

        assert_eq!(diagram.class_count(), 1);
        assert_eq!(diagram.classes()[0].members.len(), 1);
        assert_eq!(diagram.relation_count(), 0);
    }

    #[test]
    fn test_mixed_line_endings() {
        let diagram = parse("class A\r\nclass B\rclass C\n");
        assert_eq!(diagram.class_count(), 3);
    }

    #[test]
    fn test_empty_input_gives_empty_diagram() {
        assert!(parse("").is_empty());
        assert!(parse("\n\r\n  \n").is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = "class Animal\nAnimal : +name : string\nclass Dog\nDog <|-- Animal";
        assert_eq!(parse(input), parse(input));
    }

    #[test]
    fn test_member_trailing_junk_dropped() {
        let diagram = parse("class A\nA : +x : int extra");
        assert!(diagram.classes()[0].members.is_empty());
    }
}
