//! Parser for scanned PlantUML lines.
//!
//! This module walks the [`Line`]s produced by the [`scanner`](super::scanner)
//! and builds the statement tree defined in
//! [`parser_types`](super::parser_types). Block structure (packages, class and
//! enum bodies, notes) is tracked by recursive descent over lines; the shape
//! of each individual line is recognized with winnow grammars.
//!
//! The parser never fails. Lines that match no grammar are skipped.

use log::trace;
use winnow::{
    Parser as _,
    ascii::{space0, space1},
    combinator::{alt, delimited, opt, peek, preceded, terminated},
    error::ModalResult,
    token::{one_of, take_till, take_until, take_while},
};

use blueprint_core::{
    diagram::{
        HttpVerb, MethodSignature, Parameter, PropertyField, RelationshipEdge, RelationshipType,
        Stereotype, Visibility,
    },
    naming,
};

use crate::{
    parser_types::{
        ClassDecl, ComponentDecl, EnumDecl, NoteDecl, PackageDecl, RelationshipDecl, Statement,
    },
    scanner::{self, Line},
};

type Input<'src> = &'src str;
type IResult<O> = ModalResult<O>;

/// Arrow decorations that may appear at either end of a relationship line.
const ARROW_HEADS: [char; 9] = ['<', '>', '|', '*', 'o', '#', 'x', '+', '^'];

/// Characters forming the line of an arrow.
const ARROW_LINE: [char; 2] = ['-', '.'];

/// Run a line grammar over a whole line. Unconsumed text is a mismatch.
pub(crate) fn whole_line<'src, O>(
    text: &'src str,
    mut parser: impl FnMut(&mut Input<'src>) -> IResult<O>,
) -> Option<O> {
    let mut input = text;
    let output = parser(&mut input).ok()?;
    input.trim().is_empty().then_some(output)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_name_char(c: char) -> bool {
    is_ident_char(c) || c == '.'
}

/// Take whatever is left of the line.
pub(crate) fn remainder<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    Ok(std::mem::take(input))
}

pub(crate) fn identifier<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., is_ident_char).parse_next(input)
}

/// Dotted name such as `Shop.Sales.Aggregates.Order`.
fn qualified_name<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(1.., is_name_char).parse_next(input)
}

/// `"text"`
pub(crate) fn quoted<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    delimited('"', take_till(0.., '"'), '"').parse_next(input)
}

/// `[text]`
fn bracketed<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    delimited('[', take_till(1.., ']'), ']')
        .map(str::trim)
        .parse_next(input)
}

/// `<<Stereotype>>`
fn stereotype<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    delimited("<<", take_until(1.., ">>"), ">>")
        .map(str::trim)
        .parse_next(input)
}

/// Inline color such as `#pink`.
fn color<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    preceded('#', take_while(1.., is_ident_char)).parse_next(input)
}

/// Element reference: bracketed, quoted or dotted name.
fn element_ref<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    alt((bracketed, quoted, qualified_name)).parse_next(input)
}

// ============================================================================
// Headers
// ============================================================================

/// How a header line ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Brace {
    /// No brace: the element has no body.
    None,
    /// `{`: a body follows on the next lines.
    Open,
    /// `{}`: an empty body on the same line.
    Closed,
}

fn brace<'src>(input: &mut Input<'src>) -> IResult<Brace> {
    opt(preceded(
        space0,
        alt((
            ('{', space0, '}').value(Brace::Closed),
            '{'.value(Brace::Open),
        )),
    ))
    .map(|brace| brace.unwrap_or(Brace::None))
    .parse_next(input)
}

fn title<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    preceded(("title", space1), remainder)
        .map(str::trim)
        .parse_next(input)
}

#[derive(Debug)]
struct PackageHeader<'src> {
    name: &'src str,
    stereotype: Option<&'src str>,
    brace: Brace,
}

/// `package "Name" <<Stereo>> {`
fn package_header<'src>(input: &mut Input<'src>) -> IResult<PackageHeader<'src>> {
    ("package", space1).parse_next(input)?;
    let name = alt((quoted, qualified_name)).parse_next(input)?;
    let stereotype = opt(preceded(space0, stereotype)).parse_next(input)?;
    opt(preceded(space0, color)).parse_next(input)?;
    let brace = brace.parse_next(input)?;

    Ok(PackageHeader {
        name,
        stereotype,
        brace,
    })
}

#[derive(Debug)]
struct ClassHeader<'src> {
    name: &'src str,
    stereotype: Option<&'src str>,
    brace: Brace,
}

/// `class Name <<Stereo>> {`, also `abstract [class]` and `interface`.
///
/// Anything between the stereotype and the brace (generic parameters,
/// `extends` clauses, colors) is ignored.
fn class_header<'src>(input: &mut Input<'src>) -> IResult<ClassHeader<'src>> {
    alt((
        ("abstract", space1, opt(("class", space1))).void(),
        (alt(("class", "interface")), space1).void(),
    ))
    .parse_next(input)?;
    let name = alt((quoted, qualified_name)).parse_next(input)?;
    let stereotype = opt(preceded(space0, stereotype)).parse_next(input)?;
    take_till(0.., '{').parse_next(input)?;
    let brace = brace.parse_next(input)?;

    Ok(ClassHeader {
        name,
        stereotype,
        brace,
    })
}

#[derive(Debug, Clone)]
enum EnumBody<'src> {
    None,
    Open,
    Inline(&'src str),
}

#[derive(Debug)]
struct EnumHeader<'src> {
    name: &'src str,
    body: EnumBody<'src>,
}

/// `enum Name {`, `enum Name { A, B }` or a bodiless `enum Name`.
fn enum_header<'src>(input: &mut Input<'src>) -> IResult<EnumHeader<'src>> {
    ("enum", space1).parse_next(input)?;
    let name = alt((quoted, qualified_name)).parse_next(input)?;
    opt(preceded(space0, stereotype)).parse_next(input)?;
    take_till(0.., '{').parse_next(input)?;
    let body = opt(alt((
        delimited('{', take_till(0.., '}'), '}').map(EnumBody::Inline),
        '{'.value(EnumBody::Open),
    )))
    .parse_next(input)?;

    Ok(EnumHeader {
        name,
        body: body.unwrap_or(EnumBody::None),
    })
}

#[derive(Debug)]
struct ComponentHeader<'src> {
    name: &'src str,
    alias: Option<&'src str>,
    brace: Brace,
}

/// `component [Name] as alias`, `component Name` or `[Name] as alias`.
fn component_header<'src>(input: &mut Input<'src>) -> IResult<ComponentHeader<'src>> {
    let name = alt((
        preceded(("component", space1), alt((bracketed, quoted, qualified_name))),
        bracketed,
    ))
    .parse_next(input)?;
    let alias = opt(preceded((space1, "as", space1), alt((quoted, identifier)))).parse_next(input)?;
    opt(preceded(space0, stereotype)).parse_next(input)?;
    opt(preceded(space0, color)).parse_next(input)?;
    let brace = brace.parse_next(input)?;

    Ok(ComponentHeader { name, alias, brace })
}

#[derive(Debug, Default)]
struct NoteHeader<'src> {
    target: Option<&'src str>,
    /// Text of a single-line note.
    inline: Option<&'src str>,
}

/// `note "Title" as N`: a floating single-line note.
fn floating_titled_note<'src>(input: &mut Input<'src>) -> IResult<NoteHeader<'src>> {
    let title = preceded(space1, quoted).parse_next(input)?;
    (space1, "as", space1, identifier).parse_next(input)?;
    Ok(NoteHeader {
        target: None,
        inline: Some(title),
    })
}

/// `note as N`: a floating multi-line note.
fn floating_note<'src>(input: &mut Input<'src>) -> IResult<NoteHeader<'src>> {
    (space1, "as", space1, identifier).parse_next(input)?;
    Ok(NoteHeader::default())
}

/// `note right of Target [: text]`
fn positioned_note<'src>(input: &mut Input<'src>) -> IResult<NoteHeader<'src>> {
    opt(preceded(
        space1,
        alt(("right", "left", "top", "bottom", "over")),
    ))
    .parse_next(input)?;
    let target = opt(preceded((space1, "of", space1), element_ref)).parse_next(input)?;
    opt(preceded(space0, color)).parse_next(input)?;
    let inline = opt(preceded((space0, ':', space0), remainder.map(str::trim))).parse_next(input)?;
    Ok(NoteHeader { target, inline })
}

fn note_header<'src>(input: &mut Input<'src>) -> IResult<NoteHeader<'src>> {
    preceded(
        "note",
        alt((floating_titled_note, floating_note, positioned_note)),
    )
    .parse_next(input)
}

/// `end note` or `endnote`
fn note_end<'src>(input: &mut Input<'src>) -> IResult<()> {
    ("end", space0, "note").void().parse_next(input)
}

// ============================================================================
// Class members
// ============================================================================

fn visibility<'src>(input: &mut Input<'src>) -> IResult<Visibility> {
    opt(one_of(['+', '-', '#', '~']))
        .map(|symbol| {
            symbol
                .and_then(Visibility::from_symbol)
                .unwrap_or_default()
        })
        .parse_next(input)
}

/// `{static}`, `{abstract}`, `{field}`, `{method}`
fn modifier<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    delimited('{', take_till(0.., '}'), '}').parse_next(input)
}

/// Visibility and modifiers in front of a member.
fn member_prefix<'src>(input: &mut Input<'src>) -> IResult<Visibility> {
    let visibility = visibility.parse_next(input)?;
    (space0, opt(terminated(modifier, space0))).parse_next(input)?;
    Ok(visibility)
}

#[derive(Debug, PartialEq)]
struct TypeExpr<'src> {
    wrapper: Option<&'src str>,
    element: &'src str,
    nullable: bool,
}

/// `Type`, `Wrapper<Type>`, `Type[]`, each with an optional `?`.
fn type_expr<'src>(input: &mut Input<'src>) -> IResult<TypeExpr<'src>> {
    let outer = take_while(1.., |c: char| is_name_char(c) || c == '[' || c == ']')
        .parse_next(input)?;
    let inner = opt(delimited('<', take_till(1.., '>'), '>')).parse_next(input)?;
    let nullable = opt('?').parse_next(input)?.is_some();

    let expr = match inner {
        Some(inner) => TypeExpr {
            wrapper: Some(outer),
            element: inner.trim().trim_end_matches('?'),
            nullable,
        },
        None => match outer.strip_suffix("[]") {
            Some(element) if !element.is_empty() && outer != "byte[]" => TypeExpr {
                wrapper: Some("Array"),
                element,
                nullable,
            },
            _ => TypeExpr {
                wrapper: None,
                element: outer,
                nullable,
            },
        },
    };
    Ok(expr)
}

fn build_property(
    visibility: Visibility,
    name: &str,
    type_expr: Option<TypeExpr<'_>>,
    default_value: Option<&str>,
) -> PropertyField {
    let mut property = match type_expr {
        Some(TypeExpr {
            wrapper: Some(wrapper),
            element,
            nullable,
        }) => PropertyField::new(name, element)
            .wrapped_in(wrapper)
            .nullable(nullable),
        Some(TypeExpr {
            wrapper: None,
            element,
            nullable,
        }) => PropertyField::new(name, element).nullable(nullable),
        None => PropertyField::new(name, ""),
    };
    property.visibility = visibility;
    property.default_value = default_value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from);
    property
}

/// `[vis][{mod}]Name : Type [= default]`. The name may be empty.
fn property<'src>(input: &mut Input<'src>) -> IResult<PropertyField> {
    let visibility = member_prefix.parse_next(input)?;
    let name = take_while(0.., is_ident_char).parse_next(input)?;
    (space0, ':', space0).parse_next(input)?;
    let type_expr = opt(type_expr).parse_next(input)?;
    let default_value = opt(preceded((space0, '=', space0), remainder)).parse_next(input)?;

    Ok(build_property(visibility, name, type_expr, default_value))
}

/// `[vis]Type Name [= default]`
fn typed_property<'src>(input: &mut Input<'src>) -> IResult<PropertyField> {
    let visibility = member_prefix.parse_next(input)?;
    let type_expr = type_expr.parse_next(input)?;
    let name = preceded(space1, identifier).parse_next(input)?;
    let default_value = opt(preceded((space0, '=', space0), remainder)).parse_next(input)?;

    Ok(build_property(visibility, name, Some(type_expr), default_value))
}

/// `[vis]Name`: a property with an empty type.
fn bare_property<'src>(input: &mut Input<'src>) -> IResult<PropertyField> {
    let visibility = member_prefix.parse_next(input)?;
    let name = identifier.parse_next(input)?;

    Ok(build_property(visibility, name, None, None))
}

fn member_property(text: &str) -> Option<PropertyField> {
    whole_line(text, property)
        .or_else(|| whole_line(text, typed_property))
        .or_else(|| whole_line(text, bare_property))
}

/// One method parameter: `name: Type`, `Type name` or a lone `Type`.
fn parameter(text: &str) -> Option<Parameter> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some((name, type_name)) = text.split_once(':') {
        return Some(Parameter {
            name: name.trim().to_string(),
            type_name: type_name.trim().to_string(),
        });
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let parameter = match words.as_slice() {
        [type_name] => Parameter {
            name: naming::to_camel_case(type_name),
            type_name: (*type_name).to_string(),
        },
        [type_words @ .., name] => Parameter {
            name: (*name).to_string(),
            type_name: type_words.join(" "),
        },
        [] => return None,
    };
    Some(parameter)
}

/// `[vis][{mod}][ReturnType ]Name(params) [: ReturnType]`
fn method<'src>(input: &mut Input<'src>) -> IResult<MethodSignature> {
    let visibility = member_prefix.parse_next(input)?;
    let head = take_till(1.., '(').parse_next(input)?;
    let params = delimited('(', take_till(0.., ')'), ')').parse_next(input)?;
    let explicit_return =
        opt(preceded((space0, ':', space0), remainder.map(str::trim))).parse_next(input)?;

    let mut words: Vec<&str> = head.split_whitespace().collect();
    let name = words.pop().unwrap_or_default();
    let return_type = match explicit_return {
        Some(return_type) if !return_type.is_empty() => return_type.to_string(),
        _ if !words.is_empty() => words.join(" "),
        _ => "void".to_string(),
    };

    Ok(MethodSignature {
        name: name.to_string(),
        return_type,
        parameters: params.split(',').filter_map(parameter).collect(),
        visibility,
    })
}

/// A member line is a method when `(` opens before any `:` or `=`.
///
/// `Label : string = "(none)"` stays a property.
fn is_method_line(text: &str) -> bool {
    match (text.find('('), text.find([':', '='])) {
        (Some(paren), Some(colon)) => paren < colon,
        (Some(_), None) => true,
        (None, _) => false,
    }
}

/// Compartment separators inside a class body: `__`, `--`, `..`, `==`.
fn is_separator(text: &str) -> bool {
    ["__", "--", "..", "=="]
        .iter()
        .any(|separator| text.starts_with(separator))
}

/// Enum values of one line, comma and/or whitespace separated.
///
/// Anything after a value's leading identifier (`= 1`) is ignored.
fn enum_values(text: &str) -> Vec<String> {
    text.split(',')
        .filter_map(|piece| {
            let mut input = piece.trim();
            identifier.parse_next(&mut input).ok().map(String::from)
        })
        .collect()
}

// ============================================================================
// Relationships
// ============================================================================

/// Direction hint or style inside an arrow line: `-up->`, `-[#red]->`.
fn arrow_hint<'src>(input: &mut Input<'src>) -> IResult<()> {
    terminated(
        alt((
            alt(("up", "down", "left", "right", "u", "d", "l", "r")).void(),
            delimited('[', take_till(0.., ']'), ']').void(),
        )),
        peek(one_of(ARROW_LINE)),
    )
    .parse_next(input)
}

/// Arrow glyph with direction hints removed.
fn arrow<'src>(input: &mut Input<'src>) -> IResult<String> {
    let head = take_while(0.., ARROW_HEADS).parse_next(input)?;
    let line = take_while(1.., ARROW_LINE).parse_next(input)?;
    opt(arrow_hint).parse_next(input)?;
    let rest = take_while(0.., ARROW_LINE).parse_next(input)?;
    let tail = take_while(0.., ARROW_HEADS).parse_next(input)?;
    Ok(format!("{head}{line}{rest}{tail}"))
}

/// `A ["card"] <arrow> ["card"] B [: label]`
fn relationship<'src>(input: &mut Input<'src>) -> IResult<RelationshipEdge> {
    let source = element_ref.parse_next(input)?;
    space0.parse_next(input)?;
    let source_cardinality = opt(terminated(quoted, space0)).parse_next(input)?;
    let arrow = arrow.parse_next(input)?;
    space0.parse_next(input)?;
    let target_cardinality = opt(terminated(quoted, space0)).parse_next(input)?;
    let target = element_ref.parse_next(input)?;
    let label = opt(preceded((space0, ':', space0), remainder.map(str::trim))).parse_next(input)?;

    let mut edge = RelationshipEdge::new(source, target, RelationshipType::from_arrow(&arrow));
    edge.source_cardinality = source_cardinality.map(String::from);
    edge.target_cardinality = target_cardinality.map(String::from);
    edge.label = label.filter(|label| !label.is_empty()).map(String::from);
    Ok(edge)
}

// ============================================================================
// Note content
// ============================================================================

/// `**Key:** value`, `**Key**: value` or `Key: value`, optionally bulleted.
pub(crate) fn key_value<'src>(input: &mut Input<'src>) -> IResult<(&'src str, &'src str)> {
    opt((one_of(['-', '*']), space1)).parse_next(input)?;
    let key = alt((
        delimited("**", take_until(1.., ":**"), ":**"),
        delimited("**", take_until(1.., "**:"), "**:"),
        terminated(take_till(1.., ':'), ':'),
    ))
    .parse_next(input)?;
    let value = preceded(space0, remainder).parse_next(input)?;
    Ok((key.trim(), value.trim()))
}

/// `[-*] [**]VERB[**] /path [- description]`
pub(crate) fn endpoint_line<'src>(
    input: &mut Input<'src>,
) -> IResult<(HttpVerb, &'src str, Option<&'src str>)> {
    opt((one_of(['-', '*']), space1)).parse_next(input)?;
    let verb = alt((delimited("**", identifier, "**"), identifier))
        .verify_map(HttpVerb::from_text)
        .parse_next(input)?;
    let path = preceded(space1, take_till(1.., char::is_whitespace)).parse_next(input)?;
    let description = opt(preceded(
        (space0, one_of(['-', ':']), space0),
        remainder.map(str::trim),
    ))
    .parse_next(input)?;
    Ok((verb, path, description.filter(|text| !text.is_empty())))
}

// ============================================================================
// Line grammars shared with the raw structure checks
// ============================================================================

/// What a line opens, as far as brace balance is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    Package,
    Class,
    Enum,
    Component,
}

/// Classify a header line and report how it ends.
pub(crate) fn classify_header(text: &str) -> Option<(LineKind, Brace)> {
    if let Some(header) = whole_line(text, package_header) {
        return Some((LineKind::Package, header.brace));
    }
    if let Some(header) = whole_line(text, class_header) {
        return Some((LineKind::Class, header.brace));
    }
    if let Some(header) = whole_line(text, enum_header) {
        let brace = match header.body {
            EnumBody::None => Brace::None,
            EnumBody::Open => Brace::Open,
            EnumBody::Inline(_) => Brace::Closed,
        };
        return Some((LineKind::Enum, brace));
    }
    if let Some(header) = whole_line(text, component_header) {
        return Some((LineKind::Component, header.brace));
    }
    None
}

/// Whether the line opens a multi-line note.
pub(crate) fn opens_multiline_note(text: &str) -> bool {
    match whole_line(text, note_header) {
        Some(header) => header.inline.is_none(),
        None => is_note_keyword(text) && !text.contains(':'),
    }
}

pub(crate) fn is_note_end(text: &str) -> bool {
    whole_line(text, note_end).is_some()
}

pub(crate) fn is_title(text: &str) -> bool {
    whole_line(text, title).is_some()
}

fn is_note_keyword(text: &str) -> bool {
    text == "note" || text.starts_with("note ")
}

// ============================================================================
// Block walker
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Document,
    Package,
}

/// Parse PlantUML source into a statement tree.
pub(crate) fn parse(source: &str) -> Vec<Statement> {
    let lines = scanner::scan(source);
    LineWalker::new(&lines).block(Scope::Document)
}

struct LineWalker<'a, 'src> {
    lines: &'a [Line<'src>],
    position: usize,
}

impl<'a, 'src> LineWalker<'a, 'src> {
    fn new(lines: &'a [Line<'src>]) -> Self {
        Self { lines, position: 0 }
    }

    fn next_line(&mut self) -> Option<Line<'src>> {
        let line = self.lines.get(self.position).copied()?;
        self.position += 1;
        Some(line)
    }

    /// Statements up to the closing brace of a package, or to the end.
    fn block(&mut self, scope: Scope) -> Vec<Statement> {
        let mut statements = Vec::new();

        while let Some(line) = self.next_line() {
            if line.text == "}" {
                if scope == Scope::Package {
                    return statements;
                }
                trace!(line = line.number; "Skipping stray closing brace");
                continue;
            }

            if let Some(statement) = self.statement(line) {
                statements.push(statement);
            } else if line.text.ends_with('{') {
                // Grouping blocks (`together {`, `skinparam class {`) are
                // transparent: their content belongs to the enclosing scope.
                trace!(line = line.number, text = line.text; "Entering unrecognized block");
                statements.extend(self.block(Scope::Package));
            }
        }

        statements
    }

    fn statement(&mut self, line: Line<'src>) -> Option<Statement> {
        let text = line.text;

        if text.starts_with('@') {
            return None;
        }

        if let Some(title) = whole_line(text, title) {
            return Some(Statement::Title(title.to_string()));
        }

        if let Some(header) = whole_line(text, package_header) {
            let body = match header.brace {
                Brace::Open => self.block(Scope::Package),
                Brace::None | Brace::Closed => Vec::new(),
            };
            return Some(Statement::Package(PackageDecl {
                line: line.number,
                name: header.name.trim().to_string(),
                stereotype: header.stereotype.map(String::from),
                body,
            }));
        }

        if let Some(header) = whole_line(text, class_header) {
            let (properties, methods) = match header.brace {
                Brace::Open => self.class_body(),
                Brace::None | Brace::Closed => (Vec::new(), Vec::new()),
            };
            return Some(Statement::Class(ClassDecl {
                line: line.number,
                name: header.name.trim().to_string(),
                stereotype: header
                    .stereotype
                    .map(Stereotype::from_text)
                    .unwrap_or_default(),
                properties,
                methods,
            }));
        }

        if let Some(header) = whole_line(text, enum_header) {
            let values = match header.body {
                EnumBody::Open => self.enum_body(),
                EnumBody::Inline(values) => enum_values(values),
                EnumBody::None => Vec::new(),
            };
            return Some(Statement::Enum(EnumDecl {
                line: line.number,
                name: header.name.trim().to_string(),
                values,
            }));
        }

        if is_note_keyword(text) {
            return Some(Statement::Note(self.note(line)));
        }

        if let Some(header) = whole_line(text, component_header) {
            if header.brace == Brace::Open {
                self.skip_brace_block();
            }
            let name = header.name.trim().to_string();
            return Some(Statement::Component(ComponentDecl {
                line: line.number,
                alias: header.alias.map_or_else(|| name.clone(), String::from),
                name,
                has_brace_body: header.brace != Brace::None,
            }));
        }

        if let Some(edge) = whole_line(text, relationship) {
            return Some(Statement::Relationship(RelationshipDecl {
                line: line.number,
                edge,
                text: text.to_string(),
            }));
        }

        if !text.ends_with('{') {
            trace!(line = line.number, text = text; "Skipping unrecognized line");
        }
        None
    }

    fn class_body(&mut self) -> (Vec<PropertyField>, Vec<MethodSignature>) {
        let mut properties = Vec::new();
        let mut methods = Vec::new();

        while let Some(line) = self.next_line() {
            let text = line.text;
            if text == "}" {
                break;
            }
            if is_separator(text) {
                continue;
            }

            if is_method_line(text) {
                match whole_line(text, method) {
                    Some(method) => methods.push(method),
                    None => trace!(line = line.number, text = text; "Skipping unrecognized method"),
                }
            } else {
                match member_property(text) {
                    Some(property) => properties.push(property),
                    None => {
                        trace!(line = line.number, text = text; "Skipping unrecognized member")
                    }
                }
            }
        }

        (properties, methods)
    }

    fn enum_body(&mut self) -> Vec<String> {
        let mut values = Vec::new();

        while let Some(line) = self.next_line() {
            match line.text.strip_suffix('}') {
                Some(last) => {
                    values.extend(enum_values(last));
                    break;
                }
                None => values.extend(enum_values(line.text)),
            }
        }

        values
    }

    fn note(&mut self, line: Line<'src>) -> NoteDecl {
        let (header, multiline) = match whole_line(line.text, note_header) {
            Some(header) => {
                let multiline = header.inline.is_none();
                (header, multiline)
            }
            // Unknown note shapes (`note on link`) are kept as floating notes.
            None => match line.text.split_once(':') {
                Some((_, text)) => (
                    NoteHeader {
                        target: None,
                        inline: Some(text.trim()),
                    },
                    false,
                ),
                None => (NoteHeader::default(), true),
            },
        };

        let mut body = Vec::new();
        if multiline {
            while let Some(line) = self.next_line() {
                if is_note_end(line.text) {
                    break;
                }
                body.push(line.text.to_string());
            }
        }

        NoteDecl {
            line: line.number,
            target: header.target.map(|target| target.trim().to_string()),
            title: header.inline.map(String::from),
            body,
        }
    }

    fn skip_brace_block(&mut self) {
        let mut depth = 1usize;
        while let Some(line) = self.next_line() {
            let opened = line.text.matches('{').count();
            let closed = line.text.matches('}').count();
            depth = (depth + opened).saturating_sub(closed);
            if depth == 0 {
                break;
            }
        }
    }
}
