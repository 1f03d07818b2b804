//! Translation of sequence diagrams into architecture diagrams.
//!
//! Every participant becomes an aggregate in its own package. The labels of
//! messages a participant receives become its methods, and every distinct
//! sender/receiver pair becomes a dependency.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use log::{debug, trace};
use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{alt, opt, preceded},
    error::ModalResult,
    token::take_while,
};

use blueprint_core::naming;

use crate::{
    parser::{identifier, is_note_end, opens_multiline_note, quoted, remainder, whole_line},
    scanner::scan,
};

type Input<'src> = &'src str;
type IResult<O> = ModalResult<O>;

/// A participant name as written: quoted or a bare identifier.
#[derive(Debug, Clone, Copy)]
struct NameRef<'src> {
    text: &'src str,
    quoted: bool,
}

fn name_ref<'src>(input: &mut Input<'src>) -> IResult<NameRef<'src>> {
    alt((
        quoted.map(|text| NameRef { text, quoted: true }),
        identifier.map(|text| NameRef { text, quoted: false }),
    ))
    .parse_next(input)
}

fn participant_kind<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    alt((
        "actor",
        "participant",
        "boundary",
        "control",
        "entity",
        "database",
        "collections",
        "queue",
    ))
    .parse_next(input)
}

/// `participant "Display" as Key ...`, returning `(key, display)`.
fn participant<'src>(input: &mut Input<'src>) -> IResult<(&'src str, &'src str)> {
    (participant_kind, space1).parse_next(input)?;
    let name = name_ref.parse_next(input)?;
    let alias = opt(preceded((space1, "as", space1), name_ref)).parse_next(input)?;
    // Stereotypes, colors and `order` clauses are irrelevant here.
    remainder.parse_next(input)?;

    Ok(match alias {
        Some(alias) if alias.quoted => (name.text, alias.text),
        Some(alias) => (alias.text, name.text),
        None => (name.text, name.text),
    })
}

#[derive(Debug)]
struct Message<'src> {
    sender: &'src str,
    receiver: &'src str,
    label: Option<&'src str>,
}

fn arrow<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., ['-', '<', '>', '/', '\\'])
        .verify(|arrow: &str| arrow.contains('-'))
        .parse_next(input)
}

/// `A -> B : label`, also `->>`, `-->`, `<-` and `<--`.
fn message<'src>(input: &mut Input<'src>) -> IResult<Message<'src>> {
    let left = name_ref.parse_next(input)?;
    let arrow = preceded(space0, arrow).parse_next(input)?;
    let right = preceded(space0, name_ref).parse_next(input)?;
    // Activation shorthands: `++`, `--`, `**`, `!!`.
    opt(preceded(space0, take_while(1.., ['+', '-', '*', '!']))).parse_next(input)?;
    let label = opt(preceded((space0, ':', space0), remainder.map(str::trim))).parse_next(input)?;

    let reversed = arrow.starts_with('<') && !arrow.ends_with('>');
    let (sender, receiver) = if reversed {
        (right.text, left.text)
    } else {
        (left.text, right.text)
    };
    Ok(Message {
        sender,
        receiver,
        label: label.filter(|label| !label.is_empty()),
    })
}

/// Method name for a message label: `place order(items)` → `PlaceOrder`.
fn method_name(label: &str) -> Option<String> {
    let head = label.split('(').next().unwrap_or(label);
    let name: String = naming::to_pascal_case(head)
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    name.starts_with(|c: char| c.is_alphabetic()).then_some(name)
}

/// Class name for a participant display name.
fn class_name(display: &str, key: &str) -> String {
    let name: String = naming::to_pascal_case(display)
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.starts_with(|c: char| c.is_alphabetic()) {
        name
    } else {
        naming::to_pascal_case(key)
    }
}

#[derive(Debug)]
struct Participant {
    class_name: String,
    methods: Vec<String>,
}

/// Translate a sequence diagram into a synthetic architecture diagram.
///
/// Participants that only appear in messages are declared implicitly. Lines
/// that are neither declarations nor messages (activations, groups,
/// dividers, notes) are ignored.
///
/// # Example
///
/// ```
/// # use blueprint_parser::{parse_content, translate_sequence};
/// let architecture = translate_sequence(
///     "@startuml\nactor Customer\nCustomer -> Checkout : place order\n@enduml",
///     "Shop",
/// );
///
/// let document = parse_content(&architecture, None);
/// assert_eq!(document.packages.len(), 2);
/// assert!(document.all_classes().all(|class| class.is_aggregate()));
/// ```
pub fn translate_sequence(source: &str, solution_name: &str) -> String {
    let mut participants: IndexMap<&str, Participant> = IndexMap::new();
    let mut dependencies: IndexSet<(&str, &str)> = IndexSet::new();
    let mut in_note = false;
    let mut in_ref = false;

    for line in scan(source) {
        let text = line.text;

        if in_note {
            in_note = !is_note_end(text);
            continue;
        }
        if in_ref {
            in_ref = !(text.starts_with("end ref") || text == "endref");
            continue;
        }
        if opens_multiline_note(text) {
            in_note = true;
            continue;
        }
        if text.starts_with("ref ") && !text.contains(':') {
            in_ref = true;
            continue;
        }

        if let Some((key, display)) = whole_line(text, participant) {
            participants.entry(key).or_insert_with(|| Participant {
                class_name: class_name(display, key),
                methods: Vec::new(),
            });
        } else if let Some(message) = whole_line(text, message) {
            for key in [message.sender, message.receiver] {
                participants.entry(key).or_insert_with(|| Participant {
                    class_name: class_name(key, key),
                    methods: Vec::new(),
                });
            }

            if let (Some(method), Some(receiver)) = (
                message.label.and_then(method_name),
                participants.get_mut(message.receiver),
            ) {
                if !receiver.methods.contains(&method) {
                    receiver.methods.push(method);
                }
            }
            if message.sender != message.receiver {
                dependencies.insert((message.sender, message.receiver));
            }
        } else {
            trace!(line = line.number, text = text; "Ignoring sequence line");
        }
    }

    debug!(
        participants = participants.len(),
        dependencies = dependencies.len();
        "Sequence diagram translated",
    );
    render(solution_name, &participants, &dependencies)
}

fn render(
    solution_name: &str,
    participants: &IndexMap<&str, Participant>,
    dependencies: &IndexSet<(&str, &str)>,
) -> String {
    Architecture {
        solution_name,
        participants,
        dependencies,
    }
    .to_string()
}

/// PlantUML text of the synthetic architecture diagram.
struct Architecture<'a, 'src> {
    solution_name: &'a str,
    participants: &'a IndexMap<&'src str, Participant>,
    dependencies: &'a IndexSet<(&'src str, &'src str)>,
}

impl fmt::Display for Architecture<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution_name = self.solution_name;
        writeln!(f, "@startuml")?;
        writeln!(f, "title {solution_name} Architecture")?;

        for participant in self.participants.values() {
            let name = &participant.class_name;
            writeln!(f)?;
            writeln!(
                f,
                "package \"{solution_name}.{}.{name}\" {{",
                naming::AGGREGATES_SEGMENT
            )?;
            writeln!(f, "  class {name} <<Aggregate>> {{")?;
            writeln!(f, "    {name}Id : Guid")?;
            writeln!(f, "    Name : string")?;
            if !participant.methods.is_empty() {
                writeln!(f, "    __")?;
                for method in &participant.methods {
                    writeln!(f, "    +{method}()")?;
                }
            }
            writeln!(f, "  }}")?;
            writeln!(f, "}}")?;
        }

        if !self.dependencies.is_empty() {
            writeln!(f)?;
        }
        for (sender, receiver) in self.dependencies {
            let (Some(source), Some(target)) =
                (self.participants.get(sender), self.participants.get(receiver))
            else {
                continue;
            };
            writeln!(f, "{} ..> {}", source.class_name, target.class_name)?;
        }

        writeln!(f, "@enduml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::diagram::RelationshipType;

    use crate::parse_content;

    const CHECKOUT: &str = r#"
@startuml
actor Customer
participant "Order Service" as orders
database Inventory
Customer -> orders : place order(items)
orders -> Inventory : reserve stock
orders -> Inventory : reserve stock
Inventory --> orders : stock reserved
orders ->> Payment : charge
Customer <- orders : confirmation
note over orders
  Customer -> Ghost : not a message
end note
alt out of stock
  orders -> Customer : apologize
end
@enduml
"#;

    #[test]
    fn test_participants_become_aggregates() {
        let output = translate_sequence(CHECKOUT, "Shop");
        let document = parse_content(&output, None);

        let names: Vec<&str> = document.all_classes().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Customer", "OrderService", "Inventory", "Payment"]);
        assert_eq!(document.packages.len(), 4);
        assert_eq!(document.packages[1].name, "Shop.Aggregates.OrderService");
        assert!(document.all_classes().all(|class| class.is_aggregate()));
        assert!(document.all_classes().all(|class| class.key_property().is_some()));
        assert_eq!(document.title.as_deref(), Some("Shop Architecture"));
    }

    #[test]
    fn test_received_labels_become_methods() {
        let output = translate_sequence(CHECKOUT, "Shop");
        let document = parse_content(&output, None);
        let methods = |name: &str| -> Vec<String> {
            document
                .all_classes()
                .find(|class| class.name == name)
                .map(|class| class.methods.iter().map(|m| m.name.clone()).collect())
                .unwrap_or_default()
        };

        assert_eq!(methods("OrderService"), ["PlaceOrder", "StockReserved"]);
        assert_eq!(methods("Inventory"), ["ReserveStock"]);
        assert_eq!(methods("Customer"), ["Confirmation", "Apologize"]);
        assert_eq!(methods("Payment"), ["Charge"]);
    }

    #[test]
    fn test_distinct_pairs_become_dependencies() {
        let output = translate_sequence(CHECKOUT, "Shop");
        let document = parse_content(&output, None);

        let pairs: Vec<(&str, &str)> = document
            .relationships
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("Customer", "OrderService"),
                ("OrderService", "Inventory"),
                ("Inventory", "OrderService"),
                ("OrderService", "Payment"),
                ("OrderService", "Customer"),
            ]
        );
        assert!(
            document
                .relationships
                .iter()
                .all(|edge| edge.relationship_type == RelationshipType::Dependency)
        );
    }

    #[test]
    fn test_output_validates_cleanly() {
        let output = translate_sequence(CHECKOUT, "Shop");
        let result = crate::Validator::default().validate_content(&output, None);
        assert!(result.is_valid(), "{:?}", result.issues);
    }

    #[test]
    fn test_empty_sequence() {
        let output = translate_sequence("@startuml\n@enduml", "Shop");
        assert_eq!(output, "@startuml\ntitle Shop Architecture\n@enduml\n");
    }

    #[test]
    fn test_rendered_text() {
        let output = translate_sequence("Web -> Api : fetch items\nApi -> Api : cache", "Shop");
        let expected = "\
@startuml
title Shop Architecture

package \"Shop.Aggregates.Web\" {
  class Web <<Aggregate>> {
    WebId : Guid
    Name : string
  }
}

package \"Shop.Aggregates.Api\" {
  class Api <<Aggregate>> {
    ApiId : Guid
    Name : string
    __
    +FetchItems()
    +Cache()
  }
}

Web ..> Api
@enduml
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_participant_forms() {
        assert_eq!(whole_line("participant Api", participant), Some(("Api", "Api")));
        assert_eq!(
            whole_line("participant \"Web Api\" as api #pink", participant),
            Some(("api", "Web Api"))
        );
        assert_eq!(
            whole_line("queue jobs as \"Job Queue\"", participant),
            Some(("jobs", "Job Queue"))
        );
        assert!(whole_line("participants are here", participant).is_none());
    }

    #[test]
    fn test_method_names() {
        assert_eq!(method_name("place order(items)").as_deref(), Some("PlaceOrder"));
        assert_eq!(method_name("getTotal()").as_deref(), Some("GetTotal"));
        assert_eq!(method_name("200 OK"), None);
    }
}
