//! Border constants and default preset factories.

use crate::spec::{SpecBorderOptions, SpecCellFormat};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: u32 = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: u32 = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Style applied to every side when no `style` is given.
pub const C_BORDER_STYLE_DEFAULT: &str = "thin";

/// Weight-to-style table used by `custom` weights (`0` draws no line).
pub const TUP_WEIGHT_STYLES: [(i64, Option<&str>); 4] = [
    (0, None),
    (1, Some("thin")),
    (2, Some("medium")),
    (3, Some("thick")),
];

/// Border style names understood by the xlsx writer.
pub const TUP_BORDER_STYLE_NAMES: [&str; 13] = [
    "thin",
    "medium",
    "dashed",
    "dotted",
    "thick",
    "double",
    "hair",
    "mediumDashed",
    "dashDot",
    "mediumDashDot",
    "dashDotDot",
    "mediumDashDotDot",
    "slantDashDot",
];

/// Look up the style for one `custom` weight.
///
/// Outer `None` means the weight is not in [`TUP_WEIGHT_STYLES`]; inner `None`
/// is the no-line style.
pub fn derive_weight_style(weight: i64) -> Option<Option<&'static str>> {
    TUP_WEIGHT_STYLES
        .iter()
        .find(|(n_weight, _)| *n_weight == weight)
        .map(|(_, style)| *style)
}

/// Valid `custom` weights, ascending.
pub fn derive_valid_weights() -> Vec<i64> {
    TUP_WEIGHT_STYLES.iter().map(|(n_weight, _)| *n_weight).collect()
}

/// Build default border options (`style="thin"`, nothing else set).
pub fn derive_default_border_options() -> SpecBorderOptions {
    SpecBorderOptions::default()
}

/// Base cell format the xlsx writer layers every cell's own format onto.
pub fn derive_default_cell_format() -> SpecCellFormat {
    SpecCellFormat {
        font_name: Some("Calibri".to_string()),
        font_size: Some(11),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_styles_cover_zero_to_three() {
        assert_eq!(derive_weight_style(0), Some(None));
        assert_eq!(derive_weight_style(1), Some(Some("thin")));
        assert_eq!(derive_weight_style(2), Some(Some("medium")));
        assert_eq!(derive_weight_style(3), Some(Some("thick")));
        assert_eq!(derive_weight_style(4), None);
        assert_eq!(derive_weight_style(-1), None);
        assert_eq!(derive_valid_weights(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn default_options_use_thin_without_color() {
        let options = derive_default_border_options();
        assert_eq!(options.style, C_BORDER_STYLE_DEFAULT);
        assert!(options.color.is_none());
        assert!(options.custom.is_none());
    }
}
