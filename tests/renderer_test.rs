use kiln::error::Error;
use kiln::renderer::{MiniJinjaRenderer, TemplateRenderer, NO_VALUE};
use serde_json::json;

fn render(template: &str) -> String {
    let engine = MiniJinjaRenderer::new();
    engine.render(template, &json!({ "name": "My Project", "enabled": true, "port": 8080 })).unwrap()
}

#[test]
fn test_substitution_and_conditionals() {
    assert_eq!(render("Hello {{ name }}!"), "Hello My Project!");
    assert_eq!(render("{% if enabled %}port={{ port }}{% endif %}"), "port=8080");
    assert_eq!(render("{% if not enabled %}off{% else %}on{% endif %}"), "on");
}

#[test]
fn test_case_filters() {
    assert_eq!(render("{{ name | kebab_case }}"), "my-project");
    assert_eq!(render("{{ name | snake_case }}"), "my_project");
    assert_eq!(render("{{ name | camel_case }}"), "myProject");
    assert_eq!(render("{{ name | pascal_case }}"), "MyProject");
    assert_eq!(render("{{ name | screaming_snake_case }}"), "MY_PROJECT");
    assert_eq!(render("{{ name | train_case }}"), "My-Project");
    assert_eq!(render("{{ 'car' | plural }}"), "cars");
    assert_eq!(render("{{ 'cars' | singular }}"), "car");
}

#[test]
fn test_builtin_string_functions() {
    assert_eq!(render("{{ name[:2] }}"), "My");
    assert_eq!(render("{{ name | upper }}"), "MY PROJECT");
    assert_eq!(render("{{ name | replace(' ', '') }}"), "MyProject");
}

#[test]
fn test_regex_filter() {
    assert_eq!(render("{{ name | regex('^My') }}"), "true");
    assert_eq!(render("{{ name | regex('^my') }}"), "false");
    assert_eq!(render("{{ name | regex('[') }}"), "false");
}

#[test]
fn test_undefined_renders_sentinel() {
    assert_eq!(render("{{ missing }}"), NO_VALUE);
    assert_eq!(render("a/{{ missing }}/b"), format!("a/{NO_VALUE}/b"));
    assert_eq!(render("{% if missing %}x{% endif %}"), "");
}

#[test]
fn test_no_html_escaping_and_trailing_newline() {
    assert_eq!(render("<{{ name }}> & \"{{ port }}\"\n"), "<My Project> & \"8080\"\n");
}

#[test]
fn test_rendering_is_idempotent() {
    let engine = MiniJinjaRenderer::new();
    let context = json!({ "name": "svc" });
    let template = "{{ name | pascal_case }}/{{ name }}.go";

    let first = engine.render(template, &context).unwrap();
    let second = engine.render(template, &context).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, "Svc/svc.go");
}

#[test]
fn test_malformed_template_is_an_error() {
    let engine = MiniJinjaRenderer::new();
    let result = engine.render("{{ name ", &json!({}));
    assert!(matches!(result, Err(Error::MinijinjaError(_))));

    let result = engine.render("{% if %}", &json!({}));
    assert!(result.is_err());
}
