//! Layered border resolution and per-cell application.
//!
//! Parameters resolve lowest to highest priority:
//! 1. `style` + `color` for all six positions
//! 2. `custom` weights
//! 3. `outline` / `inside`
//! 4. `horizontal` / `vertical`
//! 5. individual side overrides

use tracing::{debug, trace};

use crate::conf::{derive_valid_weights, derive_weight_style};
use crate::sheet::BorderGrid;
use crate::spec::{
    BorderError, EnumRegionInput, EnumSidePosition, SpecBorderOptions, SpecBorderRequest,
    SpecEdgeStyle, SpecRegion, SpecSidePlan,
};
use crate::util::{derive_merged_border, derive_region};

type FnPlanLayer = fn(&SpecPlanInput<'_>, &mut SpecSidePlan);

/// Override layers above the base style, in priority order.
const TUP_PLAN_LAYERS: [FnPlanLayer; 4] = [
    apply_layer_custom,
    apply_layer_outline_inside,
    apply_layer_orientation,
    apply_layer_sides,
];

/// Options after eager validation.
struct SpecPlanInput<'a> {
    options: &'a SpecBorderOptions,
    custom_styles: Option<Vec<Option<&'static str>>>,
}

impl SpecPlanInput<'_> {
    fn color(&self) -> Option<&str> {
        self.options.color.as_deref()
    }

    fn edge(&self, style: Option<&str>) -> SpecEdgeStyle {
        SpecEdgeStyle::new(style, self.color())
    }
}

/// Validate `custom` and map it to styles for all six positions.
///
/// A 4-element input yields no-line styles for both inner positions.
pub fn validate_custom_weights(custom: &[i64]) -> Result<Vec<Option<&'static str>>, BorderError> {
    if custom.len() != 4 && custom.len() != 6 {
        return Err(BorderError::InvalidCustomLength { len: custom.len() });
    }

    let mut l_styles = Vec::with_capacity(6);
    for (n_idx, n_weight) in custom.iter().enumerate() {
        let Some(style) = derive_weight_style(*n_weight) else {
            return Err(BorderError::InvalidWeight {
                index: n_idx,
                value: *n_weight,
                valid: derive_valid_weights(),
            });
        };
        l_styles.push(style);
    }
    l_styles.resize(6, None);

    Ok(l_styles)
}

/// Resolve all option layers into one style per position.
pub fn resolve_side_plan(options: &SpecBorderOptions) -> Result<SpecSidePlan, BorderError> {
    let custom_styles = match &options.custom {
        Some(custom) => Some(validate_custom_weights(custom)?),
        None => None,
    };
    let input = SpecPlanInput {
        options,
        custom_styles,
    };

    let mut plan = SpecSidePlan::filled(input.edge(Some(options.style.as_str())));
    for apply_layer in TUP_PLAN_LAYERS {
        apply_layer(&input, &mut plan);
    }

    Ok(plan)
}

fn apply_layer_custom(input: &SpecPlanInput<'_>, plan: &mut SpecSidePlan) {
    let Some(l_styles) = &input.custom_styles else {
        return;
    };
    for (position, style) in EnumSidePosition::CUSTOM_ORDER.into_iter().zip(l_styles) {
        plan.set(position, input.edge(*style));
    }
}

fn apply_layer_outline_inside(input: &SpecPlanInput<'_>, plan: &mut SpecSidePlan) {
    if let Some(style) = &input.options.outline {
        plan.assign(&EnumSidePosition::OUTER, &input.edge(Some(style.as_str())));
    }
    if let Some(style) = &input.options.inside {
        plan.assign(&EnumSidePosition::INNER, &input.edge(Some(style.as_str())));
    }
}

fn apply_layer_orientation(input: &SpecPlanInput<'_>, plan: &mut SpecSidePlan) {
    if let Some(style) = &input.options.horizontal {
        plan.assign(&EnumSidePosition::HORIZONTAL, &input.edge(Some(style.as_str())));
    }
    if let Some(style) = &input.options.vertical {
        plan.assign(&EnumSidePosition::VERTICAL, &input.edge(Some(style.as_str())));
    }
}

fn apply_layer_sides(input: &SpecPlanInput<'_>, plan: &mut SpecSidePlan) {
    for position in EnumSidePosition::ALL {
        if let Some(edge) = input.options.side_spec(position).resolve(input.color()) {
            plan.set(position, edge);
        }
    }
}

/// Apply borders to every cell of `region`.
///
/// All validation happens before the first cell is written. Edges whose
/// planned style draws no line keep whatever border the cell already had, and
/// a planned edge without color keeps the existing edge color.
pub fn apply_borders<G>(
    grid: &mut G,
    region: impl Into<EnumRegionInput>,
    options: &SpecBorderOptions,
) -> Result<SpecRegion, BorderError>
where
    G: BorderGrid + ?Sized,
{
    let region = derive_region(&region.into())?;
    let plan = resolve_side_plan(options)?;
    debug!(%region, ?plan, "applying borders");

    for (n_row, n_col) in region.iter_cells() {
        let border_existing = grid.get_border(n_row, n_col);
        let border_new = derive_merged_border(&plan, &region, n_row, n_col, &border_existing);
        trace!(row = n_row, col = n_col, ?border_new, "set border");
        grid.set_border(n_row, n_col, border_new);
    }

    Ok(region)
}

/// Apply a decoded border request.
pub fn apply_border_request<G>(
    grid: &mut G,
    request: &SpecBorderRequest,
) -> Result<SpecRegion, BorderError>
where
    G: BorderGrid + ?Sized,
{
    apply_borders(grid, request.region.clone(), &request.options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::parse_border_request_str;
    use crate::sheet::SheetGrid;
    use crate::spec::{EnumCellEdge, EnumSideSpec};

    fn style_at(plan: &SpecSidePlan, position: EnumSidePosition) -> Option<&str> {
        plan[position].style.as_deref()
    }

    #[test]
    fn base_layer_fills_all_positions() {
        let plan = resolve_side_plan(&SpecBorderOptions::default()).unwrap();
        for (_, edge) in plan.iter() {
            assert_eq!(edge, &SpecEdgeStyle::styled("thin"));
        }
    }

    #[test]
    fn custom_four_leaves_inner_without_line() {
        let options = SpecBorderOptions {
            custom: Some(vec![3, 2, 3, 2]),
            color: Some("00FF00".to_string()),
            ..Default::default()
        };
        let plan = resolve_side_plan(&options).unwrap();

        assert_eq!(style_at(&plan, EnumSidePosition::Top), Some("thick"));
        assert_eq!(style_at(&plan, EnumSidePosition::Right), Some("medium"));
        assert_eq!(style_at(&plan, EnumSidePosition::Bottom), Some("thick"));
        assert_eq!(style_at(&plan, EnumSidePosition::Left), Some("medium"));
        assert_eq!(style_at(&plan, EnumSidePosition::InnerHorizontal), None);
        assert_eq!(style_at(&plan, EnumSidePosition::InnerVertical), None);
        assert_eq!(
            plan[EnumSidePosition::InnerVertical].color.as_deref(),
            Some("00FF00")
        );
    }

    #[test]
    fn later_layers_win_per_position() {
        let options = SpecBorderOptions {
            custom: Some(vec![1, 1, 1, 1, 1, 1]),
            outline: Some("thick".to_string()),
            vertical: Some("dotted".to_string()),
            top: EnumSideSpec::from("double"),
            ..Default::default()
        };
        let plan = resolve_side_plan(&options).unwrap();

        assert_eq!(style_at(&plan, EnumSidePosition::Top), Some("double"));
        assert_eq!(style_at(&plan, EnumSidePosition::Bottom), Some("thick"));
        assert_eq!(style_at(&plan, EnumSidePosition::Left), Some("dotted"));
        assert_eq!(style_at(&plan, EnumSidePosition::Right), Some("dotted"));
        assert_eq!(
            style_at(&plan, EnumSidePosition::InnerHorizontal),
            Some("thin")
        );
        assert_eq!(
            style_at(&plan, EnumSidePosition::InnerVertical),
            Some("dotted")
        );
    }

    #[test]
    fn custom_validation_reports_length_and_weight() {
        let err = validate_custom_weights(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, BorderError::InvalidCustomLength { len: 3 }));

        let err = validate_custom_weights(&[1, 2, 3, 1, 2]).unwrap_err();
        assert!(matches!(err, BorderError::InvalidCustomLength { len: 5 }));

        let err = validate_custom_weights(&[1, 2, 5, 1]).unwrap_err();
        match err {
            BorderError::InvalidWeight {
                index,
                value,
                valid,
            } => {
                assert_eq!(index, 2);
                assert_eq!(value, 5);
                assert_eq!(valid, vec![0, 1, 2, 3]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failed_validation_leaves_grid_untouched() {
        let mut sheet = SheetGrid::new();
        apply_borders(&mut sheet, "A1:B2", &SpecBorderOptions::default()).unwrap();
        let before: Vec<_> = sheet.iter_cells().map(|(_, cell)| cell.clone()).collect();

        let options = SpecBorderOptions {
            custom: Some(vec![1, 2, 3]),
            style: "thick".to_string(),
            ..Default::default()
        };
        assert!(apply_borders(&mut sheet, "A1:C3", &options).is_err());

        let after: Vec<_> = sheet.iter_cells().map(|(_, cell)| cell.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn apply_returns_normalized_region() {
        let mut sheet = SheetGrid::new();
        let region = apply_borders(&mut sheet, (2, 3), &SpecBorderOptions::default()).unwrap();
        assert_eq!(region.to_string(), "C2:C2");
        assert_eq!(
            sheet.get_border(2, 3).style_of(EnumCellEdge::Left),
            Some("thin")
        );
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn decoded_request_applies_to_grid() {
        let request = parse_border_request_str(
            r#"{"region": [[1, 1], [2, 3]], "outline": "thick", "color": "0000FF",
                "inner_vertical": {"style": null}}"#,
        )
        .unwrap();

        let mut sheet = SheetGrid::new();
        let region = apply_border_request(&mut sheet, &request).unwrap();
        assert_eq!(region.to_string(), "A1:C2");
        assert_eq!(sheet.len(), 6);

        let border = sheet.get_border(1, 1);
        assert_eq!(border.style_of(EnumCellEdge::Left), Some("thick"));
        assert_eq!(border.color_of(EnumCellEdge::Left), Some("0000FF"));
        assert_eq!(border.style_of(EnumCellEdge::Right), None);
        assert_eq!(border.style_of(EnumCellEdge::Bottom), Some("thin"));

        let border = sheet.get_border(2, 3);
        assert_eq!(border.style_of(EnumCellEdge::Right), Some("thick"));
        assert_eq!(border.style_of(EnumCellEdge::Left), None);
        assert_eq!(border.style_of(EnumCellEdge::Top), Some("thin"));
    }
}
