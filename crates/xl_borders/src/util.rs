//! Stateless helper utilities used by the border resolver and writer.

use std::sync::LazyLock;

use regex::Regex;

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{
    BorderError, EnumCellEdge, EnumRegionInput, EnumSidePosition, SpecCellBorder, SpecEdgeStyle,
    SpecRegion, SpecSidePlan,
};

static RE_CELL_TOKEN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^\$?([A-Za-z]{1,3})\$?([0-9]+)$"));

////////////////////////////////////////////////////////////////////////////////
// #region CoordinateConversion

/// Convert a 1-based column index to letters (`1 -> "A"`, `27 -> "AA"`).
pub fn derive_column_letters(col: u32) -> String {
    let mut n_col = col;
    let mut v_letters = Vec::new();
    while n_col > 0 {
        let n_rem = ((n_col - 1) % 26) as u8;
        v_letters.push(char::from(b'A' + n_rem));
        n_col = (n_col - 1) / 26;
    }
    v_letters.iter().rev().collect()
}

/// Convert column letters to a 1-based index; case-insensitive.
pub fn parse_column_letters(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    let mut n_col: u32 = 0;
    for chr in letters.bytes() {
        if !chr.is_ascii_alphabetic() {
            return None;
        }
        let n_val = u32::from(chr.to_ascii_uppercase() - b'A') + 1;
        n_col = n_col.checked_mul(26)?.checked_add(n_val)?;
    }
    Some(n_col)
}

/// Format a 1-based `(row, col)` as an A1 reference.
pub fn derive_cell_reference(row: u32, col: u32) -> String {
    format!("{}{row}", derive_column_letters(col))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RegionParsing

/// Parse `"B2"` / `"$B$2"` into 1-based `(row, col)`.
pub fn parse_cell_token(token: &str) -> Result<(u32, u32), BorderError> {
    let re_cell_token = RE_CELL_TOKEN
        .as_ref()
        .map_err(|err| derive_invalid_range(token, &err.to_string()))?;
    let Some(caps) = re_cell_token.captures(token.trim()) else {
        return Err(derive_invalid_range(
            token,
            "expected <COL><ROW> or <COL><ROW>:<COL><ROW>",
        ));
    };

    let n_col = parse_column_letters(&caps[1])
        .ok_or_else(|| derive_invalid_range(token, "column letters out of range"))?;
    let n_row = caps[2]
        .parse::<u32>()
        .map_err(|_| derive_invalid_range(token, "row number out of range"))?;

    Ok((n_row, n_col))
}

/// Parse an Excel range token (`"A1:C3"`, `"B2"`) into a region.
pub fn parse_range_token(token: &str) -> Result<SpecRegion, BorderError> {
    let l_parts: Vec<&str> = token.split(':').collect();
    let ((n_row_a, n_col_a), (n_row_b, n_col_b)) = match l_parts.as_slice() {
        [single] => {
            let cell = parse_cell_token(single)?;
            (cell, cell)
        }
        [start, end] => (parse_cell_token(start)?, parse_cell_token(end)?),
        _ => {
            return Err(derive_invalid_range(
                token,
                "expected at most one ':' separator",
            ));
        }
    };

    derive_region_from_corners(token, (n_row_a, n_col_a), (n_row_b, n_col_b))
}

/// Normalize any accepted region input into one canonical region.
pub fn derive_region(input: &EnumRegionInput) -> Result<SpecRegion, BorderError> {
    match input {
        EnumRegionInput::Token(token) => parse_range_token(token),
        EnumRegionInput::Cell(row, col) => {
            derive_region_from_corners(&format!("({row}, {col})"), (*row, *col), (*row, *col))
        }
        EnumRegionInput::Bounds(start, end) => derive_region_from_corners(
            &format!("(({}, {}), ({}, {}))", start.0, start.1, end.0, end.1),
            *start,
            *end,
        ),
    }
}

fn derive_region_from_corners(
    token: &str,
    corner_a: (u32, u32),
    corner_b: (u32, u32),
) -> Result<SpecRegion, BorderError> {
    for (n_row, n_col) in [corner_a, corner_b] {
        if n_row == 0 || n_col == 0 {
            return Err(derive_invalid_range(token, "rows and columns are 1-based"));
        }
        if n_row > N_NROWS_EXCEL_MAX {
            return Err(derive_invalid_range(
                token,
                &format!("row {n_row} exceeds Excel limit {N_NROWS_EXCEL_MAX}"),
            ));
        }
        if n_col > N_NCOLS_EXCEL_MAX {
            return Err(derive_invalid_range(
                token,
                &format!("column {n_col} exceeds Excel limit {N_NCOLS_EXCEL_MAX}"),
            ));
        }
    }

    Ok(SpecRegion {
        min_row: u32::min(corner_a.0, corner_b.0),
        min_col: u32::min(corner_a.1, corner_b.1),
        max_row: u32::max(corner_a.0, corner_b.0),
        max_col: u32::max(corner_a.1, corner_b.1),
    })
}

fn derive_invalid_range(token: &str, reason: &str) -> BorderError {
    BorderError::InvalidRange {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region EdgeSelection

/// Pick the plan position feeding `edge` of the cell at `(row, col)`.
///
/// Region boundary edges take the outer position; all others take the inner one.
pub fn select_edge_position(
    region: &SpecRegion,
    row: u32,
    col: u32,
    edge: EnumCellEdge,
) -> EnumSidePosition {
    match edge {
        EnumCellEdge::Left if col == region.min_col => EnumSidePosition::Left,
        EnumCellEdge::Right if col == region.max_col => EnumSidePosition::Right,
        EnumCellEdge::Top if row == region.min_row => EnumSidePosition::Top,
        EnumCellEdge::Bottom if row == region.max_row => EnumSidePosition::Bottom,
        EnumCellEdge::Left | EnumCellEdge::Right => EnumSidePosition::InnerVertical,
        EnumCellEdge::Top | EnumCellEdge::Bottom => EnumSidePosition::InnerHorizontal,
    }
}

/// Merge one planned edge with the edge already on the cell.
pub fn merge_edge(candidate: &SpecEdgeStyle, existing: Option<&SpecEdgeStyle>) -> SpecEdgeStyle {
    let Some(existing) = existing else {
        return candidate.clone();
    };
    if candidate.style.is_none() {
        return existing.clone();
    }
    if candidate.color.is_none() && existing.color.is_some() {
        return SpecEdgeStyle {
            style: candidate.style.clone(),
            color: existing.color.clone(),
        };
    }
    candidate.clone()
}

/// Compute the final border of one cell from the plan and its current border.
pub fn derive_merged_border(
    plan: &SpecSidePlan,
    region: &SpecRegion,
    row: u32,
    col: u32,
    existing: &SpecCellBorder,
) -> SpecCellBorder {
    let derive_edge = |edge: EnumCellEdge| {
        let candidate = &plan[select_edge_position(region, row, col, edge)];
        Some(merge_edge(candidate, existing.edge(edge)))
    };

    SpecCellBorder {
        left: derive_edge(EnumCellEdge::Left),
        right: derive_edge(EnumCellEdge::Right),
        top: derive_edge(EnumCellEdge::Top),
        bottom: derive_edge(EnumCellEdge::Bottom),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

/// Create suffixed sheet name (`base__2`, `base__3`, ...), respecting length cap.
pub fn create_sheet_identifier(base_name: &str, idx_dup: usize) -> String {
    let c_sheet_name_suffix = format!("__{idx_dup}");
    let n_len_base_name_max = N_LEN_EXCEL_SHEET_NAME_MAX.saturating_sub(c_sheet_name_suffix.len());

    let c_sheet_name_base: String = base_name
        .chars()
        .take(usize::max(1, n_len_base_name_max))
        .collect();

    format!("{c_sheet_name_base}{c_sheet_name_suffix}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
