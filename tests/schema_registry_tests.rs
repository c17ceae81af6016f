use chartedit_rs::core::{DataType, OptionDescriptor, OptionSchemaRegistry, SubcategoryDef};
use chartedit_rs::error::EditorError;
use serde_json::json;

const MINI_SCHEMA: &str = r##"
{
  "option.cat.chart": [
    {
      "text": "option.subcat.title",
      "dropdown": true,
      "options": [
        {
          "id": "title--text",
          "text": "Chart title",
          "dataType": "string",
          "defaults": "Chart title"
        },
        {
          "id": "title--style",
          "dataType": "font",
          "defaults": "{ \"color\": \"#000000\", \"fontSize\": \"18px\"}"
        },
        {
          "id": "chart--showAxes",
          "dataType": "boolean",
          "defaults": "false"
        }
      ]
    }
  ],
  "option.cat.series": [
    {
      "text": "option.cat.series",
      "filteredBy": "series--type",
      "options": [
        {
          "id": "series--type",
          "dataType": "string",
          "values": "[null, \"line\", \"pie\"]",
          "subType": ["line", "pie"],
          "subTypeDefaults": {}
        },
        {
          "id": "series--color",
          "dataType": "color",
          "defaults": "null",
          "subType": ["line", "pie"],
          "subTypeDefaults": { "pie": "#333333" }
        }
      ]
    }
  ]
}
"##;

#[test]
fn loads_schema_from_external_json_shape() {
    let registry = OptionSchemaRegistry::from_json_str(MINI_SCHEMA).expect("valid schema");
    assert_eq!(registry.len(), 5);
    let categories: Vec<&str> = registry.categories().collect();
    assert_eq!(categories, ["option.cat.chart", "option.cat.series"]);
}

#[test]
fn lookup_by_id_and_unknown_id() {
    let registry = OptionSchemaRegistry::from_json_str(MINI_SCHEMA).expect("valid schema");

    let descriptor = registry.get_by_id("title--text").expect("known id");
    assert_eq!(descriptor.display_text, "Chart title");

    assert!(matches!(
        registry.get_by_id("nope--nothing"),
        Err(EditorError::UnknownOptionId(_))
    ));
}

#[test]
fn category_iteration_preserves_declaration_order_and_restarts() {
    let registry = OptionSchemaRegistry::from_json_str(MINI_SCHEMA).expect("valid schema");

    let ids: Vec<&str> = registry
        .all_in_category("option.cat.chart")
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(ids, ["title--text", "title--style", "chart--showAxes"]);

    // Restartable: a second call yields the same sequence.
    let again: Vec<&str> = registry
        .all_in_category("option.cat.chart")
        .map(|d| d.id.as_str())
        .collect();
    assert_eq!(ids, again);

    assert_eq!(registry.all_in_category("no.such.category").count(), 0);
}

#[test]
fn defaults_are_normalized_per_data_type() {
    let registry = OptionSchemaRegistry::from_json_str(MINI_SCHEMA).expect("valid schema");

    let boolean = registry.get_by_id("chart--showAxes").expect("known id");
    assert_eq!(boolean.default_value, Some(json!(false)));

    let font = registry.get_by_id("title--style").expect("known id");
    assert_eq!(
        font.default_value,
        Some(json!({"color": "#000000", "fontSize": "18px"}))
    );

    let color = registry.get_by_id("series--color").expect("known id");
    assert_eq!(color.default_value, Some(json!(null)));
}

#[test]
fn stringified_values_lists_are_parsed() {
    let registry = OptionSchemaRegistry::from_json_str(MINI_SCHEMA).expect("valid schema");
    let descriptor = registry.get_by_id("series--type").expect("known id");
    assert_eq!(
        descriptor.allowed_values,
        Some(vec![json!(null), json!("line"), json!("pie")])
    );
}

#[test]
fn filtered_by_becomes_subtype_key_for_subtype_carrying_options() {
    let registry = OptionSchemaRegistry::from_json_str(MINI_SCHEMA).expect("valid schema");

    let color = registry.get_by_id("series--color").expect("known id");
    assert_eq!(color.subtype_key.as_deref(), Some("series--type"));
    assert_eq!(color.subtype_scope, ["line", "pie"]);

    // Options without subtype data are left untouched.
    let title = registry.get_by_id("title--text").expect("known id");
    assert_eq!(title.subtype_key, None);
}

#[test]
fn duplicate_option_id_fails_registration() {
    let mut registry = OptionSchemaRegistry::from_json_str(MINI_SCHEMA).expect("valid schema");

    let result = registry.register(
        "option.cat.other",
        SubcategoryDef::new("dupes")
            .with_option(OptionDescriptor::new("title--text", DataType::String)),
    );
    assert!(matches!(result, Err(EditorError::DuplicateOptionId(id)) if id == "title--text"));
}

#[test]
fn builtin_standard_options_load() {
    let registry = chartedit_rs::meta::standard_options().expect("builtin schema");
    assert!(!registry.is_empty());

    let dash = registry.get_by_id("series--dashStyle").expect("known id");
    assert_eq!(dash.subtype_key.as_deref(), Some("series--type"));
    assert_eq!(
        dash.subtype_defaults.get("waterfall").and_then(|o| o.default_value.clone()),
        Some(json!("Dot"))
    );

    let axis = registry.get_by_id("xAxis-title--text").expect("known id");
    assert_eq!(axis.data_index, Some(0));
}
