use tf_migrate::context::Severity;
use tf_migrate::migrators;
use tf_migrate::pipeline::config_pipeline;
use tf_migrate::{Registry, TransformationContext};

fn registry() -> Registry {
    let mut registry = Registry::new();
    migrators::register_all(&mut registry).unwrap();
    registry
}

fn run(source: &str, registry: &Registry, source_version: u32, target_version: u32) -> (String, TransformationContext) {
    let mut ctx = TransformationContext::new(
        source.as_bytes().to_vec(),
        "main.tf",
        source_version,
        target_version,
        registry.known_kinds(),
    );
    config_pipeline().run(&mut ctx, registry).unwrap();
    let output = String::from_utf8(ctx.output.clone().unwrap()).unwrap();
    (output, ctx)
}

#[test]
fn unknown_kind_block_passes_through_byte_identical_modulo_format() {
    let registry = registry();
    let source = "resource \"not_ours\" \"z\" {\n  x = 1\n}\n";
    let (output, ctx) = run(source, &registry, 1, 2);
    assert_eq!(output, source);
    assert!(ctx
        .diagnostics
        .iter()
        .any(|d| d.message.contains("not_ours")));
}

#[test]
fn mixed_file_leaves_unmigrated_kind_untouched() {
    let registry = registry();
    let source = "resource \"example_widget\" \"a\" {\n  old_name = \"v\"\n}\n\nresource \"unmanaged_kind\" \"b\" {\n  x = 1\n}\n";
    let (output, _ctx) = run(source, &registry, 1, 2);
    assert!(output.contains("unmanaged_kind"));
    assert!(output.contains("resource \"unmanaged_kind\" \"b\" {\n  x = 1\n}"));
}

#[test]
fn rename_produces_exactly_one_moved_block() {
    let registry = registry();
    let source = "resource \"example_old_queue\" \"x\" {\n  account_id = \"a\"\n}\n";
    let (output, _ctx) = run(source, &registry, 1, 2);
    assert_eq!(output.matches("moved {").count(), 1);
    assert!(output.contains("example_new_queue"));
    assert!(output.contains("example_old_queue.x"));
    assert!(output.contains("example_new_queue.x"));
}

#[test]
fn rename_onto_an_already_present_block_is_an_invalid_rename_warning() {
    let registry = registry();
    let source = "resource \"example_old_queue\" \"x\" {\n  account_id = \"a\"\n}\n\nresource \"example_new_queue\" \"x\" {\n  account_id = \"b\"\n}\n";
    let (_output, ctx) = run(source, &registry, 1, 2);
    let warning = ctx
        .diagnostics
        .iter()
        .find(|d| d.message.contains("example_old_queue.x") && d.message.contains("example_new_queue.x"))
        .expect("expected an invalid_rename diagnostic");
    assert_eq!(warning.severity, Severity::Warning);
}

#[test]
fn rename_with_no_existing_target_block_produces_no_invalid_rename_warning() {
    let registry = registry();
    let source = "resource \"example_old_queue\" \"x\" {\n  account_id = \"a\"\n}\n";
    let (_output, ctx) = run(source, &registry, 1, 2);
    assert!(ctx.diagnostics.iter().all(|d| !d.message.contains("conflicts")));
}

#[test]
fn conditional_split_keeps_replacement_and_moved_block_contiguous() {
    let registry = registry();
    let source = "resource \"example_fallback_domain\" \"n\" {\n  account_id = \"a\"\n  policy_id  = \"p\"\n}\n";
    let (output, _ctx) = run(source, &registry, 1, 2);
    assert!(output.contains("example_fallback_domain_custom"));
    let resource_pos = output.find("resource \"example_fallback_domain_custom\"").unwrap();
    let moved_pos = output.find("moved {").unwrap();
    assert!(resource_pos < moved_pos);
}
