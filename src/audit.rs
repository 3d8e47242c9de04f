use std::fmt;
use std::iter::Peekable;

use anyhow::Result;
use tracing::{debug, warn};

use crate::cache::CachingResolver;
use crate::css::component::{
    consume_component_values, serialize_values, trim_whitespace, Recovery,
};
use crate::css::{tokenize_css, ComponentValue, CssToken};
use crate::prefix::Vendor;
use crate::property::{PropertyName, PropertyResolution, ValueResolution};
use crate::surface::StyleSurface;
use crate::utils::PrintableReport;

/// At-rules whose blocks hold style rules rather than declarations.
const GROUPING_AT_RULES: [&str; 5] = ["media", "supports", "document", "layer", "container"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditStatus {
    Native,
    NeedsPrefix,
    Unsupported,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AuditStatus::Native => write!(f, "native"),
            AuditStatus::NeedsPrefix => write!(f, "needs prefix"),
            AuditStatus::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// One declaration and the form the environment honors.
#[derive(Clone, Debug, PartialEq)]
pub struct AuditEntry {
    pub selector: String,
    pub property: String,
    pub value: String,
    pub resolved_property: PropertyResolution,
    pub resolved_value: ValueResolution,
}

impl AuditEntry {
    pub fn status(&self) -> AuditStatus {
        if !self.resolved_property.is_supported() || !self.resolved_value.is_supported() {
            return AuditStatus::Unsupported;
        }
        match (&self.resolved_property, &self.resolved_value) {
            (PropertyResolution::Prefixed { .. }, _) => AuditStatus::NeedsPrefix,
            (_, ValueResolution::Supported(v)) if Vendor::strip_hyphen_prefix(v).is_some() => {
                AuditStatus::NeedsPrefix
            }
            _ => AuditStatus::Native,
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {{ {}: {} }} -> ", self.selector, self.property, self.value)?;
        match self.status() {
            AuditStatus::Unsupported => write!(f, "[unsupported]"),
            status => write!(
                f,
                "{}: {} [{}]",
                self.resolved_property, self.resolved_value, status
            ),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuditReport {
    pub entries: Vec<AuditEntry>,
}

impl AuditReport {
    pub fn count(&self, status: AuditStatus) -> usize {
        self.entries.iter().filter(|e| e.status() == status).count()
    }
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        write!(
            f,
            "{} declarations: {} native, {} need a prefix, {} unsupported",
            self.entries.len(),
            self.count(AuditStatus::Native),
            self.count(AuditStatus::NeedsPrefix),
            self.count(AuditStatus::Unsupported)
        )
    }
}

impl PrintableReport for AuditReport {}

/// Resolves every declaration in `css`.
///
/// Vendor prefixes already written in the stylesheet are stripped first, so
/// `-webkit-transform` is audited as `transform`.
pub fn audit<S>(css: &str, resolver: &CachingResolver<S>) -> Result<AuditReport>
where
    S: StyleSurface,
{
    let mut tokens = tokenize_css(css)?.into_iter().peekable();
    let mut report = AuditReport::default();
    for (selector, declarations) in consume_rules(&mut tokens, false)? {
        report.entries.extend(
            declarations
                .iter()
                .filter_map(|(property, value)| {
                    audit_declaration(resolver, &selector, property, value)
                }),
        );
    }
    Ok(report)
}

fn audit_declaration<S>(
    resolver: &CachingResolver<S>,
    selector: &str,
    property: &str,
    value: &str,
) -> Option<AuditEntry>
where
    S: StyleSurface,
{
    let unprefixed = Vendor::strip_hyphen_prefix(property).map_or(property, |(_, p)| p);
    let logical_property = match PropertyName::new(unprefixed) {
        Ok(name) => name,
        Err(e) => {
            warn!(selector, property, "skipping declaration: {}", e);
            return None;
        }
    };
    let logical_value = Vendor::strip_hyphen_prefix(value).map_or(value, |(_, v)| v);

    let resolved_property = resolver.resolve_property_name(&logical_property);
    let resolved_value = if resolved_property.is_supported() {
        let key = PropertyName::new(resolved_property.as_str()).ok()?;
        resolver.resolve_property_value(&key, logical_value)
    } else {
        ValueResolution::Unsupported
    };

    let entry = AuditEntry {
        selector: selector.to_string(),
        property: property.to_string(),
        value: value.to_string(),
        resolved_property,
        resolved_value,
    };
    if entry.status() == AuditStatus::Unsupported {
        warn!(selector, property, value, "declaration is not supported");
    }
    Some(entry)
}

type Declarations = Vec<(String, String)>;

// Style rules in order; rules inside grouping at-rules are flattened into the result.
fn consume_rules<I>(tokens: &mut Peekable<I>, nested: bool) -> Result<Vec<(String, Declarations)>>
where
    I: Iterator<Item = CssToken>,
{
    let mut rules = Vec::new();
    while let Some(token) = tokens.next() {
        match token {
            CssToken::Whitespace | CssToken::Semicolon => {}
            CssToken::CloseCurlyBrace if nested => return Ok(rules),
            CssToken::AtKeyword(name) => {
                let ended_with_block = skip_prelude(tokens);
                if !ended_with_block {
                    continue;
                }
                if GROUPING_AT_RULES.contains(&name.to_ascii_lowercase().as_str()) {
                    rules.extend(consume_rules(tokens, true)?);
                } else {
                    debug!(at_rule = name, "skipping at-rule block");
                    let closing = Some(&CssToken::CloseCurlyBrace);
                    consume_component_values(tokens, closing, Recovery::Lenient)?;
                }
            }
            token => {
                let mut prelude = vec![token];
                while let Some(token) = tokens.next_if(|t| *t != CssToken::OpenCurlyBrace) {
                    prelude.push(token);
                }
                if tokens.next().is_none() {
                    // A prelude running to the end of input is not a rule.
                    break;
                }
                let selector = prelude
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<String>()
                    .trim()
                    .to_string();
                let block = consume_component_values(
                    tokens,
                    Some(&CssToken::CloseCurlyBrace),
                    Recovery::Lenient,
                )?;
                rules.push((selector, parse_declarations(&block)));
            }
        }
    }
    Ok(rules)
}

/// Consumes an at-rule prelude. Returns true when it opened a block.
fn skip_prelude<I>(tokens: &mut Peekable<I>) -> bool
where
    I: Iterator<Item = CssToken>,
{
    for token in tokens.by_ref() {
        match token {
            CssToken::OpenCurlyBrace => return true,
            CssToken::Semicolon => return false,
            _ => {}
        }
    }
    false
}

// https://www.w3.org/TR/css-syntax-3/#consume-list-of-declarations
fn parse_declarations(block: &[ComponentValue]) -> Declarations {
    block
        .split(|v| *v == ComponentValue::PreservedToken(CssToken::Semicolon))
        .filter_map(parse_declaration)
        .collect()
}

fn parse_declaration(values: &[ComponentValue]) -> Option<(String, String)> {
    let values = trim_whitespace(values);
    let (name, rest) = match values {
        [ComponentValue::PreservedToken(CssToken::Ident(name)), rest @ ..] => (name, rest),
        [] => return None,
        _ => {
            warn!(declaration = serialize_values(values), "skipping malformed declaration");
            return None;
        }
    };
    let rest = trim_whitespace(rest);
    let [ComponentValue::PreservedToken(CssToken::Colon), value @ ..] = rest else {
        warn!(property = name, "declaration without a colon");
        return None;
    };

    let mut value = trim_whitespace(value);
    // `!important` does not affect what the environment accepts.
    if let [head @ .., ComponentValue::PreservedToken(CssToken::Delim('!')), ComponentValue::PreservedToken(CssToken::Ident(important))] =
        value
    {
        if important.eq_ignore_ascii_case("important") {
            value = trim_whitespace(head);
        }
    }
    if value.is_empty() {
        return None;
    }
    Some((name.to_ascii_lowercase(), serialize_values(value)))
}
