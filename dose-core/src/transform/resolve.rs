//! Join of offset definitions with the instructions that use them.

use std::collections::{BTreeMap, HashSet};

use crate::config::NamingConvention;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::model::{Group, OffsetDefinition, ResolvedOffset, UsageEvent};
use crate::parser::{parse_group_usages, parse_offset_definitions};

/// Resolve every offset usage in the program text, group by group.
///
/// Group A results come first, then group B, each in the order of that
/// group's own scan. This is not the execution order when the groups
/// interleave; the trajectory builder derives that separately.
pub fn resolve_offsets(
    text: &str,
    naming: &NamingConvention,
    sink: &mut dyn DiagnosticSink,
) -> Vec<ResolvedOffset> {
    let mut resolved = Vec::new();

    for group in Group::ALL {
        let definitions = parse_offset_definitions(text, group, naming);
        let usages = parse_group_usages(text, group, naming);
        let group_offsets = join_offsets(&definitions, &usages, sink);
        tracing::debug!(
            "Group {}: {} definition(s), {} of {} usage(s) resolved",
            group,
            definitions.len(),
            group_offsets.len(),
            usages.len()
        );
        resolved.extend(group_offsets);
    }

    resolved
}

/// Produce one resolved offset per usage with a matching definition.
///
/// Repeated usages of the same name each produce an entry. Usages without a
/// definition and definitions without a usage are reported and left out.
pub fn join_offsets(
    definitions: &BTreeMap<String, OffsetDefinition>,
    usages: &[UsageEvent],
    sink: &mut dyn DiagnosticSink,
) -> Vec<ResolvedOffset> {
    let mut resolved = Vec::with_capacity(usages.len());

    for usage in usages {
        match definitions.get(&usage.offset_name) {
            Some(definition) => resolved.push(ResolvedOffset::from_usage(definition, usage)),
            None => sink.report(Diagnostic::UndefinedOffset {
                offset: usage.offset_name.clone(),
                reference: usage.reference_name.clone(),
            }),
        }
    }

    let used: HashSet<&str> = usages.iter().map(|u| u.offset_name.as_str()).collect();
    for name in definitions.keys().filter(|name| !used.contains(name.as_str())) {
        sink.report(Diagnostic::UnusedDefinition {
            offset: name.clone(),
        });
    }

    resolved
}
