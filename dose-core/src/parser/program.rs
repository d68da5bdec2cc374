//! Parser for the KRL program (`.src`) text.
//!
//! Two kinds of statements are recognised anywhere in the text:
//!
//! ```text
//! dose_A_offset_010={X -2.0000,Y -2.00000,Z 45.00000,A 0.0,B 0.0,C 0.0}
//! PTP dose_A_offset_010:Xdose_A_1  C_Dis
//! ```
//!
//! Folds and other section markers are not interpreted. The group of a
//! statement comes from the `_A_`/`_B_` tag in its identifiers only.

use std::collections::BTreeMap;

use serde::Serialize;

use super::scanner::{find_all, Scanner};
use crate::config::NamingConvention;
use crate::model::{Group, InstructionKind, OffsetDefinition, UsageEvent};

/// Field labels of an offset declaration, in their fixed order.
const OFFSET_FIELDS: [char; 6] = ['X', 'Y', 'Z', 'A', 'B', 'C'];

/// Everything the program text declares and uses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramListing {
    /// Offset definitions of both groups, keyed by name.
    pub definitions: BTreeMap<String, OffsetDefinition>,
    /// Usage events of both groups in file order.
    pub usages: Vec<UsageEvent>,
}

/// Parse definitions and the unified, order-preserving usage list.
pub fn parse_program(text: &str, naming: &NamingConvention) -> ProgramListing {
    let listing = ProgramListing {
        definitions: parse_all_offset_definitions(text, naming),
        usages: parse_sequential_usages(text, naming),
    };
    tracing::debug!(
        "Program text: {} offset definition(s), {} usage(s)",
        listing.definitions.len(),
        listing.usages.len()
    );
    listing
}

/// Parse the offset definitions of one group.
///
/// A name declared twice keeps its last declaration.
pub fn parse_offset_definitions(
    text: &str,
    group: Group,
    naming: &NamingConvention,
) -> BTreeMap<String, OffsetDefinition> {
    collect_definitions(text, Some(group), naming)
}

/// Parse the offset definitions of both groups.
pub fn parse_all_offset_definitions(
    text: &str,
    naming: &NamingConvention,
) -> BTreeMap<String, OffsetDefinition> {
    collect_definitions(text, None, naming)
}

/// Parse the usage events of one group.
///
/// Both the offset and the reference must carry `group`'s tag. Sequence
/// indices count matches of this group only.
pub fn parse_group_usages(text: &str, group: Group, naming: &NamingConvention) -> Vec<UsageEvent> {
    collect_usages(text, Some(group), naming)
}

/// Parse the usage events of both groups in a single pass.
///
/// Sequence indices follow textual order across group boundaries.
pub fn parse_sequential_usages(text: &str, naming: &NamingConvention) -> Vec<UsageEvent> {
    collect_usages(text, None, naming)
}

fn collect_definitions(
    text: &str,
    group: Option<Group>,
    naming: &NamingConvention,
) -> BTreeMap<String, OffsetDefinition> {
    find_all(text, |s| offset_definition(s, group, naming))
        .into_iter()
        .map(|definition| (definition.name.clone(), definition))
        .collect()
}

fn collect_usages(text: &str, group: Option<Group>, naming: &NamingConvention) -> Vec<UsageEvent> {
    find_all(text, |s| usage(s, group, naming))
        .into_iter()
        .enumerate()
        .map(|(sequence_index, (instruction, offset_name, tag, reference_name))| UsageEvent {
            offset_name: offset_name.to_string(),
            reference_name: reference_name.to_string(),
            instruction,
            group: tag,
            sequence_index,
        })
        .collect()
}

/// `<name> = { X n, Y n, Z n, A n, B n, C n }`
fn offset_definition(
    s: &mut Scanner<'_>,
    filter: Option<Group>,
    naming: &NamingConvention,
) -> Option<OffsetDefinition> {
    let (name, group) = offset_name(s, filter, naming)?;
    s.skip_whitespace();
    s.char('=')?;
    s.skip_whitespace();
    s.char('{')?;
    let [x, y, z, a, b, c]: [f64; 6] = labeled_values(s, &OFFSET_FIELDS)?.try_into().ok()?;
    s.skip_whitespace();
    s.char('}')?;

    Some(OffsetDefinition {
        name: name.to_string(),
        x,
        y,
        z,
        a,
        b,
        c,
        group,
    })
}

/// `PTP|LIN <offset>:<reference>`. Anything after the reference is ignored.
fn usage<'a>(
    s: &mut Scanner<'a>,
    filter: Option<Group>,
    naming: &NamingConvention,
) -> Option<(InstructionKind, &'a str, Group, &'a str)> {
    let instruction = InstructionKind::ALL
        .into_iter()
        .find(|kind| s.keyword(kind.keyword()).is_some())?;
    s.whitespace1()?;
    let (offset, group) = offset_name(s, filter, naming)?;
    s.char(':')?;
    let (reference, _) = reference_name(s, filter, naming)?;
    Some((instruction, offset, group, reference))
}

/// `<prefix>_<G>_offset_<digits>`
pub(crate) fn offset_name<'a>(
    s: &mut Scanner<'a>,
    filter: Option<Group>,
    naming: &NamingConvention,
) -> Option<(&'a str, Group)> {
    let start = s.position();
    s.literal(&naming.prefix)?;
    s.char('_')?;
    let group = group_tag(s, filter)?;
    s.literal("_offset_")?;
    s.digits()?;
    Some((s.slice_from(start), group))
}

/// `<marker><prefix>_<G>_<digits>`
pub(crate) fn reference_name<'a>(
    s: &mut Scanner<'a>,
    filter: Option<Group>,
    naming: &NamingConvention,
) -> Option<(&'a str, Group)> {
    let start = s.position();
    s.literal(&naming.reference_marker)?;
    s.literal(&naming.prefix)?;
    s.char('_')?;
    let group = group_tag(s, filter)?;
    s.char('_')?;
    s.digits()?;
    Some((s.slice_from(start), group))
}

fn group_tag(s: &mut Scanner<'_>, filter: Option<Group>) -> Option<Group> {
    let group = Group::ALL
        .into_iter()
        .find(|group| s.char(group.tag()).is_some())?;
    match filter {
        Some(wanted) if wanted != group => None,
        _ => Some(group),
    }
}

/// Comma-separated `<label> <number>` pairs with the given labels in order.
///
/// Labels are matched in any letter case. Whitespace between tokens is free.
pub(crate) fn labeled_values(s: &mut Scanner<'_>, labels: &[char]) -> Option<Vec<f64>> {
    let mut values = Vec::with_capacity(labels.len());
    for (i, label) in labels.iter().enumerate() {
        s.skip_whitespace();
        if i > 0 {
            s.char(',')?;
            s.skip_whitespace();
        }
        s.char_ignore_case(*label)?;
        s.skip_whitespace();
        values.push(s.number()?);
    }
    Some(values)
}
