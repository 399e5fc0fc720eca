//! Shared border specification models and top-level error types.

use std::fmt;
use std::ops::Index;

use rust_xlsxwriter::XlsxError;
use serde::{Deserialize, Serialize};

use crate::conf::C_BORDER_STYLE_DEFAULT;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Non-border cell format. Border application never reads or writes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            text_wrap: other.text_wrap.or(self.text_wrap),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Cell value held by the in-memory grid.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region BorderSpecification

/// One of the six logical sides a border plan resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnumSidePosition {
    /// Top outer edge of the region.
    Top,
    /// Bottom outer edge of the region.
    Bottom,
    /// Left outer edge of the region.
    Left,
    /// Right outer edge of the region.
    Right,
    /// Horizontal lines between rows inside the region.
    InnerHorizontal,
    /// Vertical lines between columns inside the region.
    InnerVertical,
}

impl EnumSidePosition {
    /// All positions in plan storage order.
    pub const ALL: [EnumSidePosition; 6] = [
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
        Self::InnerHorizontal,
        Self::InnerVertical,
    ];

    /// Outer positions (the `outline` group).
    pub const OUTER: [EnumSidePosition; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];

    /// Inner positions (the `inside` group).
    pub const INNER: [EnumSidePosition; 2] = [Self::InnerHorizontal, Self::InnerVertical];

    /// Horizontal positions (the `horizontal` group).
    pub const HORIZONTAL: [EnumSidePosition; 3] =
        [Self::Top, Self::Bottom, Self::InnerHorizontal];

    /// Vertical positions (the `vertical` group).
    pub const VERTICAL: [EnumSidePosition; 3] = [Self::Left, Self::Right, Self::InnerVertical];

    /// Positions addressed by `custom` weights, in weight order.
    pub const CUSTOM_ORDER: [EnumSidePosition; 6] = [
        Self::Top,
        Self::Right,
        Self::Bottom,
        Self::Left,
        Self::InnerHorizontal,
        Self::InnerVertical,
    ];

    /// Parameter name of this position.
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::InnerHorizontal => "inner_horizontal",
            Self::InnerVertical => "inner_vertical",
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
            Self::Left => 2,
            Self::Right => 3,
            Self::InnerHorizontal => 4,
            Self::InnerVertical => 5,
        }
    }
}

impl fmt::Display for EnumSidePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the four edges of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumCellEdge {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

impl EnumCellEdge {
    /// All edges in record order.
    pub const ALL: [EnumCellEdge; 4] = [Self::Left, Self::Right, Self::Top, Self::Bottom];
}

/// Visual attributes of one border line.
///
/// `style: None` draws no line; `color: None` inherits whatever color applies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SpecEdgeStyle {
    /// Style name such as `"thin"` or `"dashed"`.
    pub style: Option<String>,
    /// Hex color without `#`, e.g. `"FF0000"`.
    pub color: Option<String>,
}

impl SpecEdgeStyle {
    /// Build an edge from optional style and color.
    pub fn new(style: Option<&str>, color: Option<&str>) -> Self {
        Self {
            style: style.map(ToString::to_string),
            color: color.map(ToString::to_string),
        }
    }

    /// Drawn edge with the given style and no color.
    pub fn styled(style: &str) -> Self {
        Self::new(Some(style), None)
    }

    /// The no-line edge.
    pub fn none() -> Self {
        Self::default()
    }

    /// Whether this edge draws a line.
    pub fn is_drawn(&self) -> bool {
        self.style.is_some()
    }
}

/// Resolved style for each of the six positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSidePlan {
    sides: [SpecEdgeStyle; 6],
}

impl SpecSidePlan {
    /// Plan with every position set to `edge`.
    pub fn filled(edge: SpecEdgeStyle) -> Self {
        Self {
            sides: std::array::from_fn(|_| edge.clone()),
        }
    }

    /// Overwrite each of `positions` with `edge`.
    pub fn assign(&mut self, positions: &[EnumSidePosition], edge: &SpecEdgeStyle) {
        for position in positions {
            self.sides[position.slot()] = edge.clone();
        }
    }

    /// Overwrite one position.
    pub fn set(&mut self, position: EnumSidePosition, edge: SpecEdgeStyle) {
        self.sides[position.slot()] = edge;
    }

    /// Iterate `(position, edge)` pairs in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (EnumSidePosition, &SpecEdgeStyle)> {
        EnumSidePosition::ALL
            .into_iter()
            .map(|position| (position, &self.sides[position.slot()]))
    }
}

impl Index<EnumSidePosition> for SpecSidePlan {
    type Output = SpecEdgeStyle;

    fn index(&self, position: EnumSidePosition) -> &Self::Output {
        &self.sides[position.slot()]
    }
}

/// Shorthand accepted for an individual side parameter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EnumSideSpec {
    /// No override for this side.
    #[default]
    Absent,
    /// Style name; color comes from the base `color`.
    Named(String),
    /// Explicit `(style, color)`; the base `color` is ignored.
    Styled(String, String),
    /// Full edge record, used verbatim (including the no-line edge).
    Explicit(SpecEdgeStyle),
}

impl EnumSideSpec {
    /// Resolve to an edge, or `None` when the side is not overridden.
    pub fn resolve(&self, base_color: Option<&str>) -> Option<SpecEdgeStyle> {
        match self {
            Self::Absent => None,
            Self::Named(style) => Some(SpecEdgeStyle::new(Some(style), base_color)),
            Self::Styled(style, color) => Some(SpecEdgeStyle::new(Some(style), Some(color))),
            Self::Explicit(edge) => Some(edge.clone()),
        }
    }
}

impl From<&str> for EnumSideSpec {
    fn from(style: &str) -> Self {
        Self::Named(style.to_string())
    }
}

impl From<String> for EnumSideSpec {
    fn from(style: String) -> Self {
        Self::Named(style)
    }
}

impl From<(&str, &str)> for EnumSideSpec {
    fn from((style, color): (&str, &str)) -> Self {
        Self::Styled(style.to_string(), color.to_string())
    }
}

impl From<SpecEdgeStyle> for EnumSideSpec {
    fn from(edge: SpecEdgeStyle) -> Self {
        Self::Explicit(edge)
    }
}

/// Border parameters for one application over a region.
///
/// Layers resolve lowest to highest priority: `style`/`color`, `custom`,
/// `outline`/`inside`, `horizontal`/`vertical`, then the individual sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecBorderOptions {
    /// Base style for all six positions.
    pub style: String,
    /// Base color for every layer except `(style, color)` sides.
    pub color: Option<String>,
    /// Weights `(top, right, bottom, left[, inner_horizontal, inner_vertical])`.
    pub custom: Option<Vec<i64>>,
    /// Style for the four outer edges.
    pub outline: Option<String>,
    /// Style for both inner line groups.
    pub inside: Option<String>,
    /// Style for top, bottom and inner horizontal lines.
    pub horizontal: Option<String>,
    /// Style for left, right and inner vertical lines.
    pub vertical: Option<String>,

    /// Left outer edge override.
    pub left: EnumSideSpec,
    /// Right outer edge override.
    pub right: EnumSideSpec,
    /// Top outer edge override.
    pub top: EnumSideSpec,
    /// Bottom outer edge override.
    pub bottom: EnumSideSpec,
    /// Inner horizontal lines override.
    pub inner_horizontal: EnumSideSpec,
    /// Inner vertical lines override.
    pub inner_vertical: EnumSideSpec,
}

impl Default for SpecBorderOptions {
    fn default() -> Self {
        Self {
            style: C_BORDER_STYLE_DEFAULT.to_string(),
            color: None,
            custom: None,
            outline: None,
            inside: None,
            horizontal: None,
            vertical: None,
            left: EnumSideSpec::Absent,
            right: EnumSideSpec::Absent,
            top: EnumSideSpec::Absent,
            bottom: EnumSideSpec::Absent,
            inner_horizontal: EnumSideSpec::Absent,
            inner_vertical: EnumSideSpec::Absent,
        }
    }
}

impl SpecBorderOptions {
    /// Side override for `position`.
    pub fn side_spec(&self, position: EnumSidePosition) -> &EnumSideSpec {
        match position {
            EnumSidePosition::Top => &self.top,
            EnumSidePosition::Bottom => &self.bottom,
            EnumSidePosition::Left => &self.left,
            EnumSidePosition::Right => &self.right,
            EnumSidePosition::InnerHorizontal => &self.inner_horizontal,
            EnumSidePosition::InnerVertical => &self.inner_vertical,
        }
    }

    /// Mutable side override for `position`.
    pub fn side_spec_mut(&mut self, position: EnumSidePosition) -> &mut EnumSideSpec {
        match position {
            EnumSidePosition::Top => &mut self.top,
            EnumSidePosition::Bottom => &mut self.bottom,
            EnumSidePosition::Left => &mut self.left,
            EnumSidePosition::Right => &mut self.right,
            EnumSidePosition::InnerHorizontal => &mut self.inner_horizontal,
            EnumSidePosition::InnerVertical => &mut self.inner_vertical,
        }
    }
}

/// Border record of one cell: four independent edge slots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecCellBorder {
    /// Left edge.
    pub left: Option<SpecEdgeStyle>,
    /// Right edge.
    pub right: Option<SpecEdgeStyle>,
    /// Top edge.
    pub top: Option<SpecEdgeStyle>,
    /// Bottom edge.
    pub bottom: Option<SpecEdgeStyle>,
}

impl SpecCellBorder {
    /// Edge slot for `edge`.
    pub fn edge(&self, edge: EnumCellEdge) -> Option<&SpecEdgeStyle> {
        match edge {
            EnumCellEdge::Left => self.left.as_ref(),
            EnumCellEdge::Right => self.right.as_ref(),
            EnumCellEdge::Top => self.top.as_ref(),
            EnumCellEdge::Bottom => self.bottom.as_ref(),
        }
    }

    /// Style name drawn on `edge`, if any.
    pub fn style_of(&self, edge: EnumCellEdge) -> Option<&str> {
        self.edge(edge).and_then(|val| val.style.as_deref())
    }

    /// Color set on `edge`, if any.
    pub fn color_of(&self, edge: EnumCellEdge) -> Option<&str> {
        self.edge(edge).and_then(|val| val.color.as_deref())
    }

    /// Whether any edge draws a line.
    pub fn has_drawn_edge(&self) -> bool {
        EnumCellEdge::ALL
            .iter()
            .any(|edge| self.edge(*edge).is_some_and(SpecEdgeStyle::is_drawn))
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RegionSpecification

/// Raw region input in one of the three accepted shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumRegionInput {
    /// Range token such as `"A1:C3"` or `"B2"`.
    Token(String),
    /// Single `(row, col)` cell.
    Cell(u32, u32),
    /// `((min_row, min_col), (max_row, max_col))` bounds.
    Bounds((u32, u32), (u32, u32)),
}

impl From<&str> for EnumRegionInput {
    fn from(token: &str) -> Self {
        Self::Token(token.to_string())
    }
}

impl From<String> for EnumRegionInput {
    fn from(token: String) -> Self {
        Self::Token(token)
    }
}

impl From<(u32, u32)> for EnumRegionInput {
    fn from((row, col): (u32, u32)) -> Self {
        Self::Cell(row, col)
    }
}

impl From<((u32, u32), (u32, u32))> for EnumRegionInput {
    fn from((min, max): ((u32, u32), (u32, u32))) -> Self {
        Self::Bounds(min, max)
    }
}

/// Normalized 1-based inclusive rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecRegion {
    /// First row.
    pub min_row: u32,
    /// First column.
    pub min_col: u32,
    /// Last row.
    pub max_row: u32,
    /// Last column.
    pub max_col: u32,
}

impl SpecRegion {
    /// Whether `(row, col)` lies inside the region.
    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.min_row..=self.max_row).contains(&row)
            && (self.min_col..=self.max_col).contains(&col)
    }

    /// Cell coordinates, row-major.
    pub fn iter_cells(self) -> impl Iterator<Item = (u32, u32)> {
        let (min_col, max_col) = (self.min_col, self.max_col);
        (self.min_row..=self.max_row)
            .flat_map(move |row| (min_col..=max_col).map(move |col| (row, col)))
    }
}

impl fmt::Display for SpecRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            crate::util::derive_column_letters(self.min_col),
            self.min_row,
            crate::util::derive_column_letters(self.max_col),
            self.max_row
        )
    }
}

/// Region plus options, as decoded from one dynamic border request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecBorderRequest {
    /// Target region.
    pub region: EnumRegionInput,
    /// Border parameters.
    pub options: SpecBorderOptions,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// Per-sheet xlsx write report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecSheetReport {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Number of cells written.
    pub cnt_cells: usize,
    /// Number of written cells with at least one drawn edge.
    pub cnt_bordered_cells: usize,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecSheetReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Validation errors raised before any cell is touched.
#[derive(Debug, thiserror::Error)]
pub enum BorderError {
    /// Region input is not a range token, `(row, col)` or pair of pairs.
    #[error(
        "cell_range must be a range string like \"A1:C3\", a (row, col) pair, \
         or a ((min_row, min_col), (max_row, max_col)) pair; got {kind}"
    )]
    InvalidRegionShape {
        /// Kind of the offending value.
        kind: String,
    },
    /// Region input has the right shape but cannot form a region.
    #[error("invalid cell range {token:?}: {reason}")]
    InvalidRange {
        /// Offending token or bounds, as text.
        token: String,
        /// What is wrong with it.
        reason: String,
    },
    /// `custom` has a length other than 4 or 6.
    #[error("custom must have 4 or 6 elements, got {len}")]
    InvalidCustomLength {
        /// Actual length.
        len: usize,
    },
    /// A `custom` weight is not in the weight table.
    #[error("custom[{index}] = {value} is not a valid weight (expected one of {valid:?})")]
    InvalidWeight {
        /// Position in `custom`.
        index: usize,
        /// Offending weight.
        value: i64,
        /// Accepted weights.
        valid: Vec<i64>,
    },
    /// A side parameter is not a style record, string, pair or null.
    #[error("{side}: expected edge style, str, [style, color] pair, or null; got {kind}")]
    InvalidSideSpec {
        /// Side parameter name.
        side: String,
        /// Kind of the offending value.
        kind: String,
    },
    /// An option has the wrong type.
    #[error("{name}: expected {expected}, got {kind}")]
    InvalidOptionValue {
        /// Option name.
        name: String,
        /// Expected type description.
        expected: &'static str,
        /// Kind of the offending value.
        kind: String,
    },
    /// An option name is not recognized.
    #[error("unknown border option: {name}")]
    UnknownOption {
        /// Option name.
        name: String,
    },
    /// Request text is not valid JSON.
    #[error("invalid border request JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Errors raised while rendering a grid into an xlsx workbook.
#[derive(Debug, thiserror::Error)]
pub enum SheetWriteError {
    /// Underlying workbook error.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),
    /// Edge style name has no xlsx equivalent.
    #[error("unknown border style {style:?} at {cell} (expected one of {valid:?})")]
    UnknownBorderStyle {
        /// Offending style name.
        style: String,
        /// Cell reference, A1 style.
        cell: String,
        /// Accepted style names.
        valid: Vec<&'static str>,
    },
    /// Color is not a 6- or 8-digit hex string.
    #[error("invalid color {color:?} at {cell}")]
    InvalidColor {
        /// Offending color text.
        color: String,
        /// Cell reference, A1 style.
        cell: String,
    },
    /// Row does not fit the xlsx row index.
    #[error("row index overflow: {0}")]
    RowOverflow(u32),
    /// Column does not fit the xlsx column index.
    #[error("column index overflow: {0}")]
    ColumnOverflow(u32),
    /// Writer was already closed.
    #[error("Cannot write after close().")]
    Closed,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
