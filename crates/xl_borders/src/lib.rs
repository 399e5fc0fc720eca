//! `xl_borders` v1:
//! Rectangular border resolution for spreadsheet cell grids.
//!
//! Architecture:
//! - `conf`     : constants, weight table and default presets
//! - `spec`     : specs/models/options and error types
//! - `util`     : pure helpers (A1 parsing, edge selection, edge merge)
//! - `resolver` : layered side plan and per-cell application
//! - `sheet`    : grid trait and in-memory sheet
//! - `json`     : decoding of dynamic border requests
//! - `writer`   : xlsx rendering of in-memory sheets
pub mod conf;
pub mod json;
pub mod resolver;
pub mod sheet;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_BORDER_STYLE_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    TUP_BORDER_STYLE_NAMES, TUP_EXCEL_ILLEGAL, TUP_WEIGHT_STYLES, derive_default_border_options,
    derive_default_cell_format,
};
pub use json::{parse_border_options, parse_border_request, parse_border_request_str};
pub use resolver::{apply_border_request, apply_borders, resolve_side_plan, validate_custom_weights};
pub use sheet::{BorderGrid, SheetGrid, SpecCell};
pub use spec::{
    BorderError, EnumCellEdge, EnumCellValue, EnumRegionInput, EnumSidePosition, EnumSideSpec,
    SheetWriteError, SpecBorderOptions, SpecBorderRequest, SpecCellBorder, SpecCellFormat,
    SpecEdgeStyle, SpecRegion, SpecSheetReport, SpecSidePlan,
};
pub use util::{derive_region, parse_range_token, sanitize_sheet_name};
pub use writer::XlsxBorderWriter;
