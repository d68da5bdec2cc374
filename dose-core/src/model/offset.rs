//! Offset definitions, the instruction lines that use them, and their join.

use serde::{Deserialize, Serialize};

/// Dispensing sequence an offset or reference belongs to.
///
/// The group is read from the `_A_` / `_B_` tag embedded in an identifier,
/// never from where the identifier appears in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Group {
    A,
    B,
}

impl Group {
    /// Both groups in report order.
    pub const ALL: [Group; 2] = [Group::A, Group::B];

    /// Parse a group tag character (case-sensitive).
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'A' => Some(Group::A),
            'B' => Some(Group::B),
            _ => None,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Group::A => 'A',
            Group::B => 'B',
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Motion instruction that applies an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Point-to-point move.
    #[serde(rename = "PTP")]
    Ptp,
    /// Linear move.
    #[serde(rename = "LIN")]
    Lin,
}

impl InstructionKind {
    /// Both instruction kinds.
    pub const ALL: [InstructionKind; 2] = [InstructionKind::Ptp, InstructionKind::Lin];

    /// Parse an instruction keyword in any letter case.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(keyword))
    }

    /// Canonical (uppercase) keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            InstructionKind::Ptp => "PTP",
            InstructionKind::Lin => "LIN",
        }
    }
}

impl std::fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A named local displacement as declared in the program text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetDefinition {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub group: Group,
}

/// One `PTP`/`LIN` line applying an offset relative to a reference position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub offset_name: String,
    pub reference_name: String,
    pub instruction: InstructionKind,
    /// Group of the offset name.
    pub group: Group,
    /// Zero-based position among the matches of the scan that produced it.
    pub sequence_index: usize,
}

/// An offset definition paired with the reference it was used against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedOffset {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub reference_name: String,
    pub group: Group,
}

impl ResolvedOffset {
    /// Join a definition with one usage of it.
    pub fn from_usage(definition: &OffsetDefinition, usage: &UsageEvent) -> Self {
        Self {
            name: definition.name.clone(),
            x: definition.x,
            y: definition.y,
            z: definition.z,
            a: definition.a,
            b: definition.b,
            c: definition.c,
            reference_name: usage.reference_name.clone(),
            group: definition.group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_from_tag_is_case_sensitive() {
        assert_eq!(Group::from_tag('A'), Some(Group::A));
        assert_eq!(Group::from_tag('B'), Some(Group::B));
        assert_eq!(Group::from_tag('a'), None);
        assert_eq!(Group::from_tag('C'), None);
    }

    #[test]
    fn test_instruction_keyword_any_case() {
        assert_eq!(InstructionKind::from_keyword("ptp"), Some(InstructionKind::Ptp));
        assert_eq!(InstructionKind::from_keyword("Lin"), Some(InstructionKind::Lin));
        assert_eq!(InstructionKind::from_keyword("CIRC"), None);
        assert_eq!(InstructionKind::Lin.to_string(), "LIN");
    }

    #[test]
    fn test_instruction_serializes_uppercase() {
        let json = serde_json::to_string(&InstructionKind::Ptp).unwrap();
        assert_eq!(json, "\"PTP\"");
    }

    #[test]
    fn test_resolved_offset_takes_reference_from_usage() {
        let definition = OffsetDefinition {
            name: "dose_B_offset_020".to_string(),
            x: -4.0,
            y: -2.5,
            z: 0.5,
            a: 0.0,
            b: 0.0,
            c: 0.0,
            group: Group::B,
        };
        let usage = UsageEvent {
            offset_name: "dose_B_offset_020".to_string(),
            reference_name: "Xdose_B_2".to_string(),
            instruction: InstructionKind::Lin,
            group: Group::B,
            sequence_index: 3,
        };

        let resolved = ResolvedOffset::from_usage(&definition, &usage);
        assert_eq!(resolved.reference_name, "Xdose_B_2");
        assert_eq!(resolved.group, Group::B);
        assert_eq!(resolved.x, -4.0);
        assert_eq!(resolved.z, 0.5);
    }
}
