use proptest::prelude::*;
use xl_borders::util::derive_cell_reference;
use xl_borders::{
    BorderGrid, EnumCellEdge, EnumRegionInput, SheetGrid, SpecBorderOptions, SpecCellBorder,
    SpecEdgeStyle, TUP_BORDER_STYLE_NAMES, apply_borders, derive_region,
};

fn any_style() -> impl Strategy<Value = String> {
    prop::sample::select(TUP_BORDER_STYLE_NAMES.to_vec()).prop_map(str::to_string)
}

fn any_color() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["FF0000", "00FF00", "0000FF"]).prop_map(str::to_string))
}

proptest! {
    #[test]
    fn single_cell_takes_outer_positions(
        c_outline in any_style(),
        c_inside in any_style(),
        color in any_color(),
        n_row in 1u32..200,
        n_col in 1u32..200,
    ) {
        let mut sheet = SheetGrid::new();
        let options = SpecBorderOptions {
            outline: Some(c_outline.clone()),
            inside: Some(c_inside),
            color: color.clone(),
            ..Default::default()
        };
        apply_borders(&mut sheet, (n_row, n_col), &options).unwrap();

        let border = sheet.get_border(n_row, n_col);
        for edge in EnumCellEdge::ALL {
            prop_assert_eq!(border.style_of(edge), Some(c_outline.as_str()));
            prop_assert_eq!(border.color_of(edge), color.as_deref());
        }
    }

    #[test]
    fn token_and_bounds_resolve_identically(
        n_row_a in 1u32..5000,
        n_col_a in 1u32..1000,
        n_row_b in 1u32..5000,
        n_col_b in 1u32..1000,
    ) {
        let c_token = format!(
            "{}:{}",
            derive_cell_reference(n_row_a, n_col_a),
            derive_cell_reference(n_row_b, n_col_b)
        );
        let region_token = derive_region(&EnumRegionInput::from(c_token.as_str())).unwrap();
        let region_bounds =
            derive_region(&EnumRegionInput::from(((n_row_a, n_col_a), (n_row_b, n_col_b)))).unwrap();

        prop_assert_eq!(region_token, region_bounds);
        prop_assert!(region_token.min_row <= region_token.max_row);
        prop_assert!(region_token.min_col <= region_token.max_col);
    }

    #[test]
    fn cells_outside_region_are_untouched(
        n_row_a in 1u32..8,
        n_col_a in 1u32..8,
        n_row_b in 1u32..8,
        n_col_b in 1u32..8,
        c_style in any_style(),
    ) {
        let border_marker = SpecCellBorder {
            left: Some(SpecEdgeStyle::new(Some("hair"), Some("123456"))),
            ..Default::default()
        };
        let mut sheet = SheetGrid::new();
        for n_row in 1..=8 {
            for n_col in 1..=8 {
                sheet.set_border(n_row, n_col, border_marker.clone());
            }
        }

        let options = SpecBorderOptions { style: c_style, ..Default::default() };
        let region = apply_borders(&mut sheet, ((n_row_a, n_col_a), (n_row_b, n_col_b)), &options).unwrap();

        for n_row in 1..=8 {
            for n_col in 1..=8 {
                if !region.contains(n_row, n_col) {
                    prop_assert_eq!(sheet.get_border(n_row, n_col), border_marker.clone());
                }
            }
        }
        prop_assert_eq!(sheet.len(), 64);
    }
}
