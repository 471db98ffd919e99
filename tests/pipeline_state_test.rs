use serde_json::{json, Value};
use tf_migrate::migrators;
use tf_migrate::pipeline::state_pipeline;
use tf_migrate::{Registry, TransformationContext};

fn registry() -> Registry {
    let mut registry = Registry::new();
    migrators::register_all(&mut registry).unwrap();
    registry
}

fn run(doc: &Value, registry: &Registry, source_version: u32, target_version: u32) -> Value {
    let content = serde_json::to_vec(doc).unwrap();
    let mut ctx = TransformationContext::new(content, "terraform.tfstate", source_version, target_version, registry.known_kinds());
    state_pipeline().run(&mut ctx, registry).unwrap();
    let output = ctx.output.clone().unwrap();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn schema_version_invariant_holds_for_transformed_instances() {
    let registry = registry();
    let doc = json!({
        "version": 4,
        "resources": [{
            "type": "example_widget",
            "name": "a",
            "provider": "provider[\"registry/example\"]",
            "instances": [{"schema_version": 0, "attributes": {"old_name": "v"}}]
        }]
    });
    let output = run(&doc, &registry, 1, 2);
    let instance = &output["resources"][0]["instances"][0];
    assert_eq!(instance["schema_version"], 2);
    assert_eq!(instance["attributes"]["new_name"], "v");
    assert!(instance["attributes"].get("old_name").is_none());
}

#[test]
fn resource_kind_rename_updates_type_field() {
    let registry = registry();
    let doc = json!({
        "version": 4,
        "resources": [{
            "type": "example_old_queue",
            "name": "x",
            "provider": "provider[\"registry/example\"]",
            "instances": [{"schema_version": 0, "attributes": {"account_id": "a"}}]
        }]
    });
    let output = run(&doc, &registry, 1, 2);
    assert_eq!(output["resources"][0]["type"], "example_new_queue");
    assert_eq!(output["resources"][0]["instances"][0]["schema_version"], 2);
}

#[test]
fn unknown_kind_instance_is_left_untouched() {
    let registry = registry();
    let doc = json!({
        "version": 4,
        "resources": [{
            "type": "not_ours",
            "name": "z",
            "provider": "provider[\"registry/example\"]",
            "instances": [{"schema_version": 0, "attributes": {"x": 1}}]
        }]
    });
    let output = run(&doc, &registry, 1, 2);
    assert_eq!(output["resources"][0]["instances"][0]["schema_version"], 0);
    assert_eq!(output["resources"][0]["instances"][0]["attributes"]["x"], 1);
}
