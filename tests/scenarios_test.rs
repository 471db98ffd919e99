//! Literal end-to-end scenarios S1-S6.

use serde_json::{json, Value};
use tf_migrate::migrators;
use tf_migrate::pipeline::{config_pipeline, state_pipeline};
use tf_migrate::{Registry, TransformationContext};

fn registry() -> Registry {
    let mut registry = Registry::new();
    migrators::register_all(&mut registry).unwrap();
    registry
}

fn run_config(source: &str, registry: &Registry) -> String {
    let mut ctx = TransformationContext::new(source.as_bytes().to_vec(), "main.tf", 1, 2, registry.known_kinds());
    config_pipeline().run(&mut ctx, registry).unwrap();
    String::from_utf8(ctx.output.unwrap()).unwrap()
}

fn run_state(doc: &Value, registry: &Registry) -> Value {
    let content = serde_json::to_vec(doc).unwrap();
    let mut ctx = TransformationContext::new(content, "terraform.tfstate", 1, 2, registry.known_kinds());
    state_pipeline().run(&mut ctx, registry).unwrap();
    serde_json::from_slice(&ctx.output.unwrap()).unwrap()
}

#[test]
fn s1_pure_attribute_rename() {
    let registry = registry();
    let config = run_config("resource \"example_widget\" \"a\" {\n  old_name = \"v\"\n}\n", &registry);
    assert!(config.contains("new_name"));
    assert!(!config.contains("old_name"));

    let state = run_state(
        &json!({"version": 4, "resources": [{
            "type": "example_widget", "name": "a", "provider": "p",
            "instances": [{"schema_version": 0, "attributes": {"old_name": "v"}}]
        }]}),
        &registry,
    );
    assert_eq!(
        state["resources"][0]["instances"][0],
        json!({"schema_version": 2, "attributes": {"new_name": "v"}})
    );
}

#[test]
fn s2_block_to_attribute() {
    let registry = registry();
    let config = run_config(
        "resource \"example_cors_config\" \"b\" {\n  cors {\n    allowed = [\"GET\"]\n  }\n}\n",
        &registry,
    );
    assert!(config.contains("cors = {"));
    assert!(!config.contains("cors {"));
    assert!(config.contains("allowed"));
}

#[test]
fn s3_rename_plus_moved_emission() {
    let registry = registry();
    let config = run_config(
        "resource \"example_old_queue\" \"x\" {\n  account_id = \"a\"\n}\n",
        &registry,
    );
    let resource_pos = config.find("resource \"example_new_queue\" \"x\"").unwrap();
    let moved_pos = config.find("moved {").unwrap();
    assert!(resource_pos < moved_pos);
    assert!(config.contains("example_old_queue.x"));
    assert!(config.contains("example_new_queue.x"));
}

#[test]
fn s4_selector_explosion() {
    let registry = registry();
    let config = run_config(
        "resource \"example_access_rule\" \"g\" {\n  include {\n    email    = [\"a@x\", \"b@x\"]\n    everyone = true\n  }\n}\n",
        &registry,
    );
    assert!(config.contains("a@x"));
    assert!(config.contains("b@x"));
    assert!(config.contains("everyone"));
    assert!(!config.contains("include {"));
}

#[test]
fn s5_conditional_split() {
    let registry = registry();

    let default_config = run_config(
        "resource \"example_fallback_domain\" \"n\" {\n  account_id = \"a\"\n}\n",
        &registry,
    );
    assert!(default_config.contains("example_fallback_domain_default"));

    let custom_config = run_config(
        "resource \"example_fallback_domain\" \"n\" {\n  account_id = \"a\"\n  policy_id  = \"p\"\n}\n",
        &registry,
    );
    assert!(custom_config.contains("example_fallback_domain_custom"));
}

#[test]
fn s6_unknown_kind_pass_through_with_warning() {
    let registry = registry();
    let source = "resource \"not_ours\" \"z\" {\n  x = 1\n}\n";
    let mut ctx = TransformationContext::new(source.as_bytes().to_vec(), "main.tf", 1, 2, registry.known_kinds());
    config_pipeline().run(&mut ctx, &registry).unwrap();
    let output = String::from_utf8(ctx.output.unwrap()).unwrap();
    assert_eq!(output, source);
    assert_eq!(ctx.diagnostics.len(), 1);
    assert!(ctx.diagnostics.iter().next().unwrap().message.contains("not_ours"));
}
