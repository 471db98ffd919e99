use tf_migrate::migrators;
use tf_migrate::pipeline::config_pipeline;
use tf_migrate::{Registry, TransformationContext};

fn registry() -> Registry {
    let mut registry = Registry::new();
    migrators::register_all(&mut registry).unwrap();
    registry
}

fn run(source: &str, registry: &Registry) -> String {
    let mut ctx = TransformationContext::new(source.as_bytes().to_vec(), "main.tf", 1, 2, registry.known_kinds());
    config_pipeline().run(&mut ctx, registry).unwrap();
    String::from_utf8(ctx.output.unwrap()).unwrap()
}

#[test]
fn already_migrated_attribute_rename_is_a_no_op_second_pass() {
    let registry = registry();
    let first = run("resource \"example_widget\" \"a\" {\n  old_name = \"v\"\n}\n", &registry);
    let second = run(&first, &registry);
    assert_eq!(first, second);
}

#[test]
fn already_renamed_kind_no_longer_matches_old_strategy() {
    let registry = registry();
    let first = run("resource \"example_old_queue\" \"x\" {\n  account_id = \"a\"\n}\n", &registry);
    let second = run(&first, &registry);
    assert_eq!(first, second);
    assert_eq!(second.matches("moved {").count(), 1);
}
