//! Markdown offsets report.

use std::fmt::Write;

use crate::config::NamingConvention;
use crate::error::Result;
use crate::model::{Coordinate, DispensingPlan, Group, ResolvedOffset};

/// Render the offsets list: reference table, per-reference offset tables, summary.
pub fn render_offsets_report(plan: &DispensingPlan, naming: &NamingConvention) -> Result<String> {
    let mut md = String::new();

    writeln!(md, "# Dispensing Point List")?;
    writeln!(md)?;
    write_reference_table(&mut md, plan, naming)?;
    write_rule(&mut md)?;

    for group in Group::ALL {
        write_group_section(&mut md, plan, naming, group)?;
        write_rule(&mut md)?;
    }

    write_summary(&mut md, plan, naming)?;

    Ok(md)
}

fn write_rule(md: &mut String) -> std::fmt::Result {
    writeln!(md, "---")?;
    writeln!(md)
}

fn write_reference_table(
    md: &mut String,
    plan: &DispensingPlan,
    naming: &NamingConvention,
) -> std::fmt::Result {
    writeln!(md, "## Reference Positions")?;
    writeln!(md)?;
    writeln!(md, "| Name | X (mm) | Y (mm) |")?;
    writeln!(md, "|------|--------|--------|")?;

    for (_, name) in naming.canonical_references() {
        if let Some(p) = plan.reference_positions.get(&name) {
            writeln!(md, "| **{}** | {:.2} | {:.2} |", name, p.x, p.y)?;
        }
    }

    writeln!(md)
}

fn write_group_section(
    md: &mut String,
    plan: &DispensingPlan,
    naming: &NamingConvention,
    group: Group,
) -> std::fmt::Result {
    writeln!(md, "## Group {} - Offsets and Final Positions", group)?;
    writeln!(md)?;

    for (_, name) in references_of(naming, group) {
        let Some(reference) = plan.reference_positions.get(&name) else {
            continue;
        };
        let offsets: Vec<&ResolvedOffset> = offsets_at(plan, group, &name).collect();
        if offsets.is_empty() {
            continue;
        }

        writeln!(
            md,
            "### Reference: {} ({:.2}, {:.2})",
            name, reference.x, reference.y
        )?;
        writeln!(md)?;
        writeln!(
            md,
            "| Offset | Offset X | Offset Y | Offset Z | Position X | Position Y |"
        )?;
        writeln!(
            md,
            "|--------|----------|----------|----------|------------|------------|"
        )?;
        for offset in offsets {
            let position = reference.displaced_by(offset);
            writeln!(
                md,
                "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} |",
                offset.name, offset.x, offset.y, offset.z, position.x, position.y
            )?;
        }
        writeln!(md)?;
    }

    Ok(())
}

fn write_summary(
    md: &mut String,
    plan: &DispensingPlan,
    naming: &NamingConvention,
) -> std::fmt::Result {
    writeln!(md, "## Summary")?;
    writeln!(md)?;
    writeln!(
        md,
        "- **Reference positions**: {}",
        plan.reference_positions.len()
    )?;
    writeln!(md, "- **Total offsets**: {}", plan.offsets.len())?;

    for group in Group::ALL {
        let split: Vec<String> = references_of(naming, group)
            .map(|(_, name)| format!("{} from {}", offsets_at(plan, group, &name).count(), name))
            .collect();
        writeln!(
            md,
            "  - **Group {}**: {} offset(s) ({})",
            group,
            plan.offsets_in(group).count(),
            split.join(", ")
        )?;
    }

    writeln!(md)?;
    writeln!(md, "**Formula**: `Position = Reference + Offset`")
}

fn references_of(naming: &NamingConvention, group: Group) -> impl Iterator<Item = (Group, String)> {
    naming
        .canonical_references()
        .into_iter()
        .filter(move |(g, _)| *g == group)
}

fn offsets_at<'a>(
    plan: &'a DispensingPlan,
    group: Group,
    reference: &'a str,
) -> impl Iterator<Item = &'a ResolvedOffset> {
    plan.offsets_in(group)
        .filter(move |o| o.reference_name == reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use crate::build_plan;

    const PROGRAM: &str = "
        dose_A_offset_010={X -2.0000,Y -2.00000,Z 45.00000,A 0.0,B 0.0,C 0.0}
        PTP dose_A_offset_010:Xdose_A_1  C_Dis
        dose_A_offset_020={X -4.0000,Y -2.5000000,Z 0.50000,A 0.0,B 0.0,C 0.0}
        LIN dose_A_offset_020:Xdose_A_1
        dose_B_offset_010={X 1.5,Y 0.25,Z 10.0,A 0.0,B 0.0,C 0.0}
        PTP dose_B_offset_010:Xdose_B_2
    ";

    const DATA: &str = "
        GLOBAL E6POS Xdose_A_1={X 17.0000,Y 3.00000,Z 0.5,A 0.0}
        GLOBAL E6POS Xdose_A_2={X 17.0000,Y 25.0000,Z 0.5,A 0.0}
        GLOBAL E6POS Xdose_B_1={X 57.0000,Y 3.00000,Z 0.5,A 0.0}
        GLOBAL E6POS Xdose_B_2={X 57.0000,Y 25.0000,Z 0.5,A 0.0}
    ";

    fn plan() -> DispensingPlan {
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        build_plan(PROGRAM, DATA, &NamingConvention::default(), &mut diagnostics)
            .expect("Should build plan")
    }

    #[test]
    fn test_report_reference_table() {
        let md = render_offsets_report(&plan(), &NamingConvention::default()).unwrap();
        assert!(md.starts_with("# Dispensing Point List\n\n## Reference Positions\n"));
        assert!(md.contains("| **Xdose_A_1** | 17.00 | 3.00 |\n"));
        assert!(md.contains("| **Xdose_B_2** | 57.00 | 25.00 |\n"));
    }

    #[test]
    fn test_report_skips_references_without_offsets() {
        let md = render_offsets_report(&plan(), &NamingConvention::default()).unwrap();
        assert!(md.contains("### Reference: Xdose_A_1 (17.00, 3.00)"));
        assert!(!md.contains("### Reference: Xdose_A_2"));
        assert!(!md.contains("### Reference: Xdose_B_1"));
        assert!(md.contains("| dose_A_offset_020 | -4.00 | -2.50 | 0.50 | 13.00 | 0.50 |"));
        assert!(md.contains("| dose_B_offset_010 | 1.50 | 0.25 | 10.00 | 58.50 | 25.25 |"));
    }

    #[test]
    fn test_report_summary() {
        let md = render_offsets_report(&plan(), &NamingConvention::default()).unwrap();
        let summary = &md[md.find("## Summary").unwrap()..];
        insta::assert_snapshot!(summary.trim_end(), @r"
        ## Summary

        - **Reference positions**: 4
        - **Total offsets**: 3
          - **Group A**: 2 offset(s) (2 from Xdose_A_1, 0 from Xdose_A_2)
          - **Group B**: 1 offset(s) (0 from Xdose_B_1, 1 from Xdose_B_2)

        **Formula**: `Position = Reference + Offset`
        ");
    }
}
