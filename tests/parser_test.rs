//! Spec parsing tests against fixture documents

use inkify::error::DocError;
use inkify::prompt::PromptBuilder;
use inkify::spec::{NO_TITLE, PathEntry, SchemaEntry, SpecParser, SpecVersion};

const PETSTORE_V3: &str = include_str!("fixtures/petstore_v3.json");
const PETSTORE_V2: &str = include_str!("fixtures/petstore_v2.json");
const PETSTORE_YAML: &str = include_str!("fixtures/petstore_v3.yaml");
const NOT_A_SPEC: &str = include_str!("fixtures/not_a_spec.json");

#[test]
fn test_v3_document_is_normalized_verbatim() {
    let spec = SpecParser::new().parse(PETSTORE_V3).unwrap();

    assert_eq!(spec.version(), &SpecVersion::OpenApiV3("3.0.3".to_string()));
    assert_eq!(spec.title(), "Swagger Petstore");
    assert_eq!(spec.description(), Some("A sample pet store API."));

    let paths: Vec<_> = spec.paths().keys().cloned().collect();
    assert_eq!(paths, vec!["/pets", "/pets/{petId}"]);
    let schemas: Vec<_> = spec.schemas().keys().cloned().collect();
    assert_eq!(schemas, vec!["Error", "Pet"]);

    match &spec.paths()["/pets"] {
        PathEntry::V3(item) => {
            let get = item.get.as_ref().expect("GET /pets");
            assert_eq!(get.operation_id.as_deref(), Some("listPets"));
            assert_eq!(get.parameters.len(), 1);
            assert!(item.post.is_some());
        }
        other => panic!("expected a v3 path item, got {other:?}"),
    }
    assert_eq!(spec.schemas()["Pet"].description(), Some("A pet in the store"));
}

#[test]
fn test_v2_document_is_normalized_verbatim() {
    let spec = SpecParser::new().parse(PETSTORE_V2).unwrap();

    assert_eq!(spec.version(), &SpecVersion::SwaggerV2("2.0".to_string()));
    assert_eq!(spec.title(), "Legacy Petstore");
    assert_eq!(spec.description(), None);
    assert_eq!(spec.paths().len(), 1);
    assert!(matches!(spec.paths()["/pets"], PathEntry::V2(_)));
    assert!(matches!(spec.schemas()["Tag"], SchemaEntry::V2(_)));
    assert_eq!(spec.schemas()["Tag"].description(), None);
}

#[test]
fn test_yaml_document_with_odd_schemas() {
    let spec = SpecParser::new().parse(PETSTORE_YAML).unwrap();

    assert_eq!(spec.title(), "YAML Petstore");
    assert!(matches!(spec.schemas()["Pet"], SchemaEntry::V3(_)));
    assert!(matches!(spec.schemas()["AnyValue"], SchemaEntry::Unrecognized(_)));
    assert_eq!(
        spec.schemas()["Pet"].description(),
        Some("A pet that may be absent")
    );
}

#[test]
fn test_non_spec_documents_are_rejected() {
    let parser = SpecParser::new();
    for raw in [NOT_A_SPEC, "", "   ", "<html></html>", "- just\n- a list\n"] {
        match parser.parse(raw) {
            Err(DocError::IllegalSpec { reason }) => {
                assert!(reason.contains("OpenAPI v3"), "{reason}");
                assert!(reason.contains("Swagger v2"), "{reason}");
            }
            other => panic!("expected IllegalSpec for {raw:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_info_uses_defaults() {
    let spec = SpecParser::new()
        .parse(r#"{"swagger":"2.0","paths":{}}"#)
        .unwrap();
    assert_eq!(spec.title(), NO_TITLE);
    assert_eq!(spec.description(), None);
    assert!(spec.schemas().is_empty());
}

#[test]
fn test_prompt_summarizes_fixture_endpoints() {
    let spec = SpecParser::new().parse(PETSTORE_V3).unwrap();
    let prompt = PromptBuilder::new().build_prompt(&spec);

    assert!(prompt.contains("Title: Swagger Petstore"));
    assert!(prompt.contains("Description: A sample pet store API."));
    assert!(prompt.contains(
        "- `/pets`\n  - **GET listPets**: List all pets\n  - **POST createPets**: Create a pet"
    ));
    assert!(prompt.contains(
        "- `/pets/{petId}`\n  - **GET UnnamedOperation**: Info for a specific pet\n  - **DELETE deletePet**: No summary available."
    ));
    assert!(prompt.contains("- `Error`: No description available.\n- `Pet`: A pet in the store"));
}

#[test]
fn test_prompt_summarizes_v2_operations() {
    let spec = SpecParser::new().parse(PETSTORE_V2).unwrap();
    let prompt = PromptBuilder::new().build_prompt(&spec);

    assert!(prompt.contains("This API has no description."));
    assert!(prompt.contains(
        "- `/pets`\n  - **GET listPets**: List all pets\n  - **PUT updatePet**: No summary available."
    ));
}
