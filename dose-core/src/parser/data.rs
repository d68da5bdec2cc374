//! Parser for the KRL data (`.dat`) text.
//!
//! Reference positions are read from global frame declarations:
//!
//! ```text
//! GLOBAL E6POS Xdose_A_1={X 17.0000,Y 3.00000,Z 0.274462,A -179.9,B 0.5,C 179.8,S 6,T 27,E1 0.0}
//! ```
//!
//! Only the leading X/Y (2D) or X/Y/Z (3D) fields are consumed.

use super::program::labeled_values;
use super::scanner::{find_first, Scanner};
use crate::error::{DoseError, Result};
use crate::model::{Coordinate, Point2D, Point3D, ReferenceFrame};

/// Extract every expected reference position with the fields of `P`.
///
/// The first declaration of each name wins. Fails on the first expected name
/// that has no declaration; no partial frame is returned.
pub fn extract_reference_positions<P: Coordinate, S: AsRef<str>>(
    text: &str,
    names: &[S],
) -> Result<ReferenceFrame<P>> {
    let frame = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            find_first(text, |s| declaration::<P>(s, name))
                .map(|position| (name.to_string(), position))
                .ok_or_else(|| DoseError::MissingReferencePosition {
                    name: name.to_string(),
                })
        })
        .collect::<Result<ReferenceFrame<P>>>()?;

    tracing::debug!(
        "Data text: {} reference position(s) with {} field(s) each",
        frame.len(),
        P::LABELS.len()
    );
    Ok(frame)
}

/// Extract reference positions reading X and Y.
pub fn extract_reference_positions_2d<S: AsRef<str>>(
    text: &str,
    names: &[S],
) -> Result<ReferenceFrame<Point2D>> {
    extract_reference_positions(text, names)
}

/// Extract reference positions reading X, Y and Z.
pub fn extract_reference_positions_3d<S: AsRef<str>>(
    text: &str,
    names: &[S],
) -> Result<ReferenceFrame<Point3D>> {
    extract_reference_positions(text, names)
}

/// `GLOBAL E6POS <name> = { X n, Y n [, Z n]`
fn declaration<P: Coordinate>(s: &mut Scanner<'_>, name: &str) -> Option<P> {
    s.keyword("GLOBAL")?;
    s.whitespace1()?;
    s.keyword("E6POS")?;
    s.whitespace1()?;
    s.literal(name)?;
    s.skip_whitespace();
    s.char('=')?;
    s.skip_whitespace();
    s.char('{')?;
    let values = labeled_values(s, P::LABELS)?;
    P::from_components(&values)
}
