//! Decode border requests from JSON.
//!
//! Every option is checked here, so a malformed request fails before any
//! cell is touched.

use serde_json::{Map, Value};

use crate::resolver::validate_custom_weights;
use crate::spec::{
    BorderError, EnumRegionInput, EnumSidePosition, EnumSideSpec, SpecBorderOptions,
    SpecBorderRequest, SpecEdgeStyle,
};

const C_KEY_REGION: &str = "region";

/// Short description of a JSON value's kind, used in error messages.
pub fn derive_value_kind(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(l_items) => format!("array of length {}", l_items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

/// Decode `"A1:C3"`, `[row, col]` or `[[min_row, min_col], [max_row, max_col]]`.
pub fn parse_region_input(value: &Value) -> Result<EnumRegionInput, BorderError> {
    let err_shape = || BorderError::InvalidRegionShape {
        kind: derive_value_kind(value),
    };

    match value {
        Value::String(token) => Ok(EnumRegionInput::Token(token.clone())),
        Value::Array(l_items) if l_items.len() == 2 => {
            if let Some(cell) = parse_coord_pair(value) {
                return Ok(EnumRegionInput::Cell(cell.0, cell.1));
            }
            match (parse_coord_pair(&l_items[0]), parse_coord_pair(&l_items[1])) {
                (Some(start), Some(end)) => Ok(EnumRegionInput::Bounds(start, end)),
                _ => Err(err_shape()),
            }
        }
        _ => Err(err_shape()),
    }
}

fn parse_coord_pair(value: &Value) -> Option<(u32, u32)> {
    let Value::Array(l_items) = value else {
        return None;
    };
    let [row, col] = l_items.as_slice() else {
        return None;
    };
    let n_row = u32::try_from(row.as_u64()?).ok()?;
    let n_col = u32::try_from(col.as_u64()?).ok()?;
    Some((n_row, n_col))
}

/// Decode one side parameter.
///
/// `null` is no override, a string is a style name, `[style, color]` is an
/// explicit pair and `{"style": .., "color": ..}` is a full edge record.
pub fn parse_side_spec(side: &str, value: &Value) -> Result<EnumSideSpec, BorderError> {
    let err_side = || BorderError::InvalidSideSpec {
        side: side.to_string(),
        kind: derive_value_kind(value),
    };

    match value {
        Value::Null => Ok(EnumSideSpec::Absent),
        Value::String(style) => Ok(EnumSideSpec::Named(style.clone())),
        Value::Array(l_items) => match l_items.as_slice() {
            [Value::String(style), Value::String(color)] => {
                Ok(EnumSideSpec::Styled(style.clone(), color.clone()))
            }
            _ => Err(err_side()),
        },
        Value::Object(dict_edge) => {
            let mut edge = SpecEdgeStyle::none();
            for (c_key, val) in dict_edge {
                let slot = match c_key.as_str() {
                    "style" => &mut edge.style,
                    "color" => &mut edge.color,
                    _ => return Err(err_side()),
                };
                *slot = match val {
                    Value::Null => None,
                    Value::String(text) => Some(text.clone()),
                    _ => return Err(err_side()),
                };
            }
            Ok(EnumSideSpec::Explicit(edge))
        }
        _ => Err(err_side()),
    }
}

/// Decode border options from a JSON object.
pub fn parse_border_options(value: &Value) -> Result<SpecBorderOptions, BorderError> {
    let Value::Object(dict_options) = value else {
        return Err(BorderError::InvalidOptionValue {
            name: "options".to_string(),
            expected: "object",
            kind: derive_value_kind(value),
        });
    };
    parse_border_options_map(dict_options, false)
}

/// Decode `{"region": .., <options>}`.
pub fn parse_border_request(value: &Value) -> Result<SpecBorderRequest, BorderError> {
    let Value::Object(dict_request) = value else {
        return Err(BorderError::InvalidOptionValue {
            name: "request".to_string(),
            expected: "object",
            kind: derive_value_kind(value),
        });
    };
    let Some(value_region) = dict_request.get(C_KEY_REGION) else {
        return Err(BorderError::InvalidRegionShape {
            kind: "missing".to_string(),
        });
    };

    Ok(SpecBorderRequest {
        region: parse_region_input(value_region)?,
        options: parse_border_options_map(dict_request, true)?,
    })
}

/// Decode a border request from JSON text.
pub fn parse_border_request_str(text: &str) -> Result<SpecBorderRequest, BorderError> {
    let value: Value = serde_json::from_str(text)?;
    parse_border_request(&value)
}

fn parse_border_options_map(
    dict_options: &Map<String, Value>,
    if_allow_region: bool,
) -> Result<SpecBorderOptions, BorderError> {
    let mut options = SpecBorderOptions::default();

    for (c_key, value) in dict_options {
        match c_key.as_str() {
            C_KEY_REGION if if_allow_region => {}
            "style" => {
                if let Some(style) = parse_optional_string(c_key, value)? {
                    options.style = style;
                }
            }
            "color" => options.color = parse_optional_string(c_key, value)?,
            "outline" => options.outline = parse_optional_string(c_key, value)?,
            "inside" => options.inside = parse_optional_string(c_key, value)?,
            "horizontal" => options.horizontal = parse_optional_string(c_key, value)?,
            "vertical" => options.vertical = parse_optional_string(c_key, value)?,
            "custom" => options.custom = parse_custom(value)?,
            _ => {
                let Some(position) = EnumSidePosition::ALL
                    .into_iter()
                    .find(|position| position.name() == c_key)
                else {
                    return Err(BorderError::UnknownOption {
                        name: c_key.clone(),
                    });
                };
                *options.side_spec_mut(position) = parse_side_spec(c_key, value)?;
            }
        }
    }

    Ok(options)
}

fn parse_optional_string(name: &str, value: &Value) -> Result<Option<String>, BorderError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        _ => Err(BorderError::InvalidOptionValue {
            name: name.to_string(),
            expected: "string or null",
            kind: derive_value_kind(value),
        }),
    }
}

fn parse_custom(value: &Value) -> Result<Option<Vec<i64>>, BorderError> {
    let l_items = match value {
        Value::Null => return Ok(None),
        Value::Array(l_items) => l_items,
        _ => {
            return Err(BorderError::InvalidOptionValue {
                name: "custom".to_string(),
                expected: "array of integers or null",
                kind: derive_value_kind(value),
            });
        }
    };

    let mut l_weights = Vec::with_capacity(l_items.len());
    for (n_idx, item) in l_items.iter().enumerate() {
        let Some(n_weight) = item.as_i64() else {
            return Err(BorderError::InvalidOptionValue {
                name: format!("custom[{n_idx}]"),
                expected: "integer",
                kind: derive_value_kind(item),
            });
        };
        l_weights.push(n_weight);
    }
    validate_custom_weights(&l_weights)?;

    Ok(Some(l_weights))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn region_shapes_decode() {
        assert_eq!(
            parse_region_input(&json!("A1:C3")).unwrap(),
            EnumRegionInput::Token("A1:C3".to_string())
        );
        assert_eq!(
            parse_region_input(&json!([2, 2])).unwrap(),
            EnumRegionInput::Cell(2, 2)
        );
        assert_eq!(
            parse_region_input(&json!([[1, 1], [3, 3]])).unwrap(),
            EnumRegionInput::Bounds((1, 1), (3, 3))
        );
    }

    #[test]
    fn region_rejects_other_shapes() {
        for value in [
            json!(42),
            json!(null),
            json!([1, 2, 3]),
            json!([[1, 1], 3]),
            json!([-1, 2]),
            json!({"row": 1}),
        ] {
            let err = parse_region_input(&value).unwrap_err();
            assert!(
                matches!(err, BorderError::InvalidRegionShape { .. }),
                "{value}: {err}"
            );
            assert!(err.to_string().starts_with("cell_range must be"));
        }
    }

    #[test]
    fn side_spec_shorthands_decode() {
        assert_eq!(
            parse_side_spec("left", &json!(null)).unwrap(),
            EnumSideSpec::Absent
        );
        assert_eq!(
            parse_side_spec("left", &json!("thick")).unwrap(),
            EnumSideSpec::Named("thick".to_string())
        );
        assert_eq!(
            parse_side_spec("left", &json!(["thick", "FF0000"])).unwrap(),
            EnumSideSpec::Styled("thick".to_string(), "FF0000".to_string())
        );
        assert_eq!(
            parse_side_spec("left", &json!({"style": null})).unwrap(),
            EnumSideSpec::Explicit(SpecEdgeStyle::none())
        );
        assert_eq!(
            parse_side_spec("left", &json!({"style": "double", "color": "00FF00"})).unwrap(),
            EnumSideSpec::Explicit(SpecEdgeStyle::new(Some("double"), Some("00FF00")))
        );
    }

    #[test]
    fn side_spec_reports_offending_kind() {
        let err = parse_side_spec("top", &json!(3)).unwrap_err();
        match err {
            BorderError::InvalidSideSpec { side, kind } => {
                assert_eq!(side, "top");
                assert_eq!(kind, "number");
            }
            other => panic!("unexpected error: {other}"),
        }

        for value in [json!(["thick"]), json!([1, 2]), json!({"width": 1}), json!(true)] {
            assert!(matches!(
                parse_side_spec("top", &value),
                Err(BorderError::InvalidSideSpec { .. })
            ));
        }
    }

    #[test]
    fn request_decodes_all_options() {
        let request = parse_border_request(&json!({
            "region": "A1:C3",
            "style": "dashed",
            "color": "FF0000",
            "custom": [1, 2, 3, 0],
            "outline": "medium",
            "inside": null,
            "vertical": "thick",
            "left": ["double", "0000FF"],
            "inner_vertical": {"style": null},
        }))
        .unwrap();

        assert_eq!(request.region, EnumRegionInput::Token("A1:C3".to_string()));
        let options = request.options;
        assert_eq!(options.style, "dashed");
        assert_eq!(options.color.as_deref(), Some("FF0000"));
        assert_eq!(options.custom, Some(vec![1, 2, 3, 0]));
        assert_eq!(options.outline.as_deref(), Some("medium"));
        assert_eq!(options.inside, None);
        assert_eq!(options.horizontal, None);
        assert_eq!(options.vertical.as_deref(), Some("thick"));
        assert_eq!(
            options.left,
            EnumSideSpec::Styled("double".to_string(), "0000FF".to_string())
        );
        assert_eq!(
            options.inner_vertical,
            EnumSideSpec::Explicit(SpecEdgeStyle::none())
        );
        assert_eq!(options.right, EnumSideSpec::Absent);
    }

    #[test]
    fn request_validates_eagerly() {
        let err = parse_border_request(&json!({"region": "A1", "custom": [1, 2, 3]})).unwrap_err();
        assert!(matches!(err, BorderError::InvalidCustomLength { len: 3 }));

        let err =
            parse_border_request(&json!({"region": "A1", "custom": [1, 2, 5, 1]})).unwrap_err();
        assert!(matches!(err, BorderError::InvalidWeight { value: 5, .. }));

        let err = parse_border_request(&json!({"region": "A1", "custom": [1, "x", 1, 1]}))
            .unwrap_err();
        assert!(matches!(err, BorderError::InvalidOptionValue { .. }));

        let err = parse_border_request(&json!({"region": "A1", "diagonal": "thin"})).unwrap_err();
        assert!(matches!(err, BorderError::UnknownOption { .. }));

        let err = parse_border_request(&json!({"style": "thin"})).unwrap_err();
        assert!(matches!(err, BorderError::InvalidRegionShape { .. }));

        let err = parse_border_options(&json!({"region": "A1"})).unwrap_err();
        assert!(matches!(err, BorderError::UnknownOption { .. }));

        let err = parse_border_request_str("{not json").unwrap_err();
        assert!(matches!(err, BorderError::InvalidJson(_)));
    }
}
