//! XLSX writer that renders in-memory sheets, borders included, into a workbook.

use std::collections::BTreeSet;
use std::path::PathBuf;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use tracing::debug;

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_BORDER_STYLE_NAMES, derive_default_cell_format};
use crate::sheet::SheetGrid;
use crate::spec::{
    EnumCellEdge, EnumCellValue, SheetWriteError, SpecCellBorder, SpecCellFormat,
    SpecSheetReport,
};
use crate::util::{create_sheet_identifier, derive_cell_reference, sanitize_sheet_name};

/// Stateful workbook writer.
pub struct XlsxBorderWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    fmt_base: SpecCellFormat,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecSheetReport>,
    if_closed: bool,
}

impl XlsxBorderWriter {
    /// Create writer bound to output path with the default base format.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(path_file_out: PathBuf) -> Self {
        Self::with_base_format(path_file_out, derive_default_cell_format())
    }

    /// Create writer whose cells all start from `fmt_base`.
    pub fn with_base_format(path_file_out: PathBuf, fmt_base: SpecCellFormat) -> Self {
        Self {
            path_file_out,
            workbook: Workbook::new(),
            fmt_base,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        }
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecSheetReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), SheetWriteError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        Ok(())
    }

    /// Serialize the workbook without touching disk.
    pub fn save_to_buffer(&mut self) -> Result<Vec<u8>, SheetWriteError> {
        Ok(self.workbook.save_to_buffer()?)
    }

    /// Write every populated cell of `sheet` into a new worksheet.
    pub fn write_sheet(&mut self, sheet: &SheetGrid, sheet_name: &str) -> Result<(), SheetWriteError> {
        if self.if_closed {
            return Err(SheetWriteError::Closed);
        }

        let mut report = SpecSheetReport::default();

        let c_sheet_name_clean = sanitize_sheet_name(sheet_name, "_");
        if c_sheet_name_clean != sheet_name {
            report.warn(format!(
                "Sheet name {sheet_name:?} sanitized to {c_sheet_name_clean:?}."
            ));
        }
        let c_sheet_name_unique = self.derive_unique_sheet_name(&c_sheet_name_clean);
        if c_sheet_name_unique != c_sheet_name_clean {
            report.warn(format!(
                "Sheet name {c_sheet_name_clean:?} already used; renamed to {c_sheet_name_unique:?}."
            ));
        }

        let mut l_cells = Vec::with_capacity(sheet.len());
        for ((n_row, n_col), cell) in sheet.iter_cells() {
            let format = derive_rust_xlsx_format(
                &self.fmt_base.merge(&cell.format),
                &cell.border,
                &derive_cell_reference(n_row, n_col),
            )?;
            l_cells.push((n_row, n_col, &cell.value, format));

            report.cnt_cells += 1;
            if cell.border.has_drawn_edge() {
                report.cnt_bordered_cells += 1;
            }
        }

        // Workbook and name registry change only once the whole sheet is built.
        let mut worksheet = Worksheet::new();
        worksheet.set_name(&c_sheet_name_unique)?;
        for (n_row, n_col, value, format) in &l_cells {
            write_cell_with_format(&mut worksheet, *n_row, *n_col, value, format)?;
        }
        self.workbook.push_worksheet(worksheet);
        self.set_sheet_names_existing
            .insert(c_sheet_name_unique.to_lowercase());

        debug!(
            sheet_name = %c_sheet_name_unique,
            cnt_cells = report.cnt_cells,
            cnt_bordered_cells = report.cnt_bordered_cells,
            "sheet written"
        );
        report.sheet_name = c_sheet_name_unique;
        self.l_reports.push(report);
        Ok(())
    }

    /// First free name for `name`; sheet names compare case-insensitively.
    fn derive_unique_sheet_name(&self, name: &str) -> String {
        if !self.set_sheet_names_existing.contains(&name.to_lowercase()) {
            return name.to_string();
        }

        let mut n_idx = 2usize;
        loop {
            let candidate = create_sheet_identifier(name, n_idx);
            if candidate.chars().count() <= N_LEN_EXCEL_SHEET_NAME_MAX
                && !self
                    .set_sheet_names_existing
                    .contains(&candidate.to_lowercase())
            {
                return candidate;
            }
            n_idx += 1;
        }
    }
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row: u32,
    col: u32,
    value: &EnumCellValue,
    format: &Format,
) -> Result<(), SheetWriteError> {
    let n_row = cast_row_num(row)?;
    let n_col = cast_col_num(col)?;
    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Number(val) => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
    }
    Ok(())
}

/// Build the xlsx format for one cell: its own format plus its four edges.
pub fn derive_rust_xlsx_format(
    spec: &SpecCellFormat,
    border: &SpecCellBorder,
    cell_ref: &str,
) -> Result<Format, SheetWriteError> {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(align) = spec.align.as_deref().and_then(derive_format_align) {
        format = format.set_align(align);
    }
    if let Some(align) = spec.valign.as_deref().and_then(derive_format_align) {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(derive_color(val, cell_ref)?);
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(derive_color(val, cell_ref)?);
    }

    for edge in EnumCellEdge::ALL {
        let Some(edge_style) = border.edge(edge) else {
            continue;
        };
        let style = derive_format_border(edge_style.style.as_deref(), cell_ref)?;
        let color = match &edge_style.color {
            Some(val) => Some(derive_color(val, cell_ref)?),
            None => None,
        };
        format = apply_edge_format(format, edge, style, color);
    }

    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    Ok(format)
}

fn apply_edge_format(
    format: Format,
    edge: EnumCellEdge,
    style: FormatBorder,
    color: Option<Color>,
) -> Format {
    let format = match edge {
        EnumCellEdge::Left => format.set_border_left(style),
        EnumCellEdge::Right => format.set_border_right(style),
        EnumCellEdge::Top => format.set_border_top(style),
        EnumCellEdge::Bottom => format.set_border_bottom(style),
    };
    let Some(color) = color else {
        return format;
    };
    match edge {
        EnumCellEdge::Left => format.set_border_left_color(color),
        EnumCellEdge::Right => format.set_border_right_color(color),
        EnumCellEdge::Top => format.set_border_top_color(color),
        EnumCellEdge::Bottom => format.set_border_bottom_color(color),
    }
}

/// Map an edge style name to its xlsx border; `None` draws nothing.
pub fn derive_format_border(
    style: Option<&str>,
    cell_ref: &str,
) -> Result<FormatBorder, SheetWriteError> {
    let Some(style) = style else {
        return Ok(FormatBorder::None);
    };
    let border = match style.to_ascii_lowercase().as_str() {
        "thin" => FormatBorder::Thin,
        "medium" => FormatBorder::Medium,
        "dashed" => FormatBorder::Dashed,
        "dotted" => FormatBorder::Dotted,
        "thick" => FormatBorder::Thick,
        "double" => FormatBorder::Double,
        "hair" => FormatBorder::Hair,
        "mediumdashed" => FormatBorder::MediumDashed,
        "dashdot" => FormatBorder::DashDot,
        "mediumdashdot" => FormatBorder::MediumDashDot,
        "dashdotdot" => FormatBorder::DashDotDot,
        "mediumdashdotdot" => FormatBorder::MediumDashDotDot,
        "slantdashdot" => FormatBorder::SlantDashDot,
        _ => {
            return Err(SheetWriteError::UnknownBorderStyle {
                style: style.to_string(),
                cell: cell_ref.to_string(),
                valid: TUP_BORDER_STYLE_NAMES.to_vec(),
            });
        }
    };
    Ok(border)
}

/// Parse `RRGGBB` or `AARRGGBB` (alpha ignored), with or without `#`.
pub fn derive_color(color: &str, cell_ref: &str) -> Result<Color, SheetWriteError> {
    let c_hex = color.trim().trim_start_matches('#');
    let c_rgb = match c_hex.len() {
        _ if !c_hex.chars().all(|c| c.is_ascii_hexdigit()) => None,
        6 => Some(c_hex),
        8 => Some(&c_hex[2..]),
        _ => None,
    };
    c_rgb
        .and_then(|val| u32::from_str_radix(val, 16).ok())
        .map(Color::RGB)
        .ok_or_else(|| SheetWriteError::InvalidColor {
            color: color.to_string(),
            cell: cell_ref.to_string(),
        })
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "center_across" => Some(FormatAlign::CenterAcross),
        "distributed" => Some(FormatAlign::Distributed),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        "vjustify" | "vertical_justify" => Some(FormatAlign::VerticalJustify),
        "vdistributed" | "vertical_distributed" => Some(FormatAlign::VerticalDistributed),
        _ => None,
    }
}

fn cast_row_num(row: u32) -> Result<u32, SheetWriteError> {
    row.checked_sub(1).ok_or(SheetWriteError::RowOverflow(row))
}

fn cast_col_num(col: u32) -> Result<u16, SheetWriteError> {
    col.checked_sub(1)
        .and_then(|n_col| u16::try_from(n_col).ok())
        .ok_or(SheetWriteError::ColumnOverflow(col))
}
