//! Integration tests rendering the fixture site under `tests/testdata/templates`.

use std::path::PathBuf;

use standout_page::{
    BuildError, FunctionTable, RenderError, Renderer, RendererConfig, StatusCode, TemplateData,
};

fn template_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/templates"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("standout_page=debug")
        .with_test_writer()
        .try_init();
}

fn renderer() -> Renderer {
    init_tracing();
    Renderer::with_config(
        RendererConfig::new()
            .with_template_root_dir(template_dir())
            .with_debug(true)
            .with_partials(["base.layout.jinja"]),
    )
}

fn payload() -> TemplateData {
    TemplateData::new().with("payload", "This is passed data.")
}

struct Case {
    name: &'static str,
    template: &'static str,
    use_data: bool,
    use_cache: bool,
    error_expected: bool,
}

const CASES: &[Case] = &[
    Case {
        name: "valid",
        template: "home.page.jinja",
        use_data: true,
        use_cache: true,
        error_expected: false,
    },
    Case {
        name: "valid from cache",
        template: "home.page.jinja",
        use_data: true,
        use_cache: true,
        error_expected: false,
    },
    Case {
        name: "valid: no data",
        template: "nodata.page.jinja",
        use_data: false,
        use_cache: false,
        error_expected: false,
    },
    Case {
        name: "invalid: no template",
        template: "x.page.jinja",
        use_data: false,
        use_cache: true,
        error_expected: true,
    },
    Case {
        name: "invalid: bad template",
        template: "bad.page.jinja",
        use_data: false,
        use_cache: true,
        error_expected: true,
    },
];

// ============================================================================
// render_to
// ============================================================================

#[test]
fn test_render_to_cases() {
    let mut renderer = renderer();
    let data = payload();

    for case in CASES {
        renderer.set_use_cache(case.use_cache);
        let mut response = http::Response::new(Vec::new());
        let result = renderer.render_to(
            &mut response,
            case.template,
            case.use_data.then_some(&data),
        );

        match (&result, case.error_expected) {
            (Ok(()), true) => panic!("{}: expected an error but did not get one", case.name),
            (Err(err), false) => panic!("{}: failed to render template: {err}", case.name),
            (Ok(()), false) => {
                assert!(!response.body().is_empty(), "{}: no html returned", case.name)
            }
            (Err(_), true) => {
                assert!(response.body().is_empty(), "{}: output written on error", case.name)
            }
        }
    }
}

#[test]
fn test_render_to_response_contains_payload() {
    let renderer = renderer();
    let mut response = http::Response::new(Vec::new());

    renderer
        .render_to(&mut response, "home.page.jinja", Some(&payload()))
        .unwrap();

    let body = String::from_utf8(response.into_body()).unwrap();
    assert!(body.contains("<title>Home</title>"));
    assert!(body.contains("<p>This is passed data.</p>"));
}

#[test]
fn test_render_to_undefined_field_is_internal_error() {
    let renderer = renderer();
    let mut response = http::Response::new(Vec::new());

    let err = renderer
        .render_to(&mut response, "home.page.jinja", None)
        .unwrap_err();

    assert!(matches!(err, RenderError::Execution(_)));
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ============================================================================
// render_to_string
// ============================================================================

#[test]
fn test_render_to_string_cases() {
    let mut renderer = renderer();
    let data = payload();

    for case in CASES {
        renderer.set_use_cache(case.use_cache);
        let result = renderer.render_to_string(case.template, case.use_data.then_some(&data));

        match result {
            Ok(html) if case.error_expected => {
                panic!("{}: expected an error but got {html:?}", case.name)
            }
            Ok(html) => assert!(!html.is_empty(), "{}: no html returned", case.name),
            Err(err) if !case.error_expected => {
                panic!("{}: failed to render template: {err}", case.name)
            }
            Err(err) => assert!(err.is_build(), "{}: unexpected error kind {err}", case.name),
        }
    }
}

#[test]
fn test_end_to_end_payload_and_missing_page() {
    let renderer = renderer();
    let data = TemplateData::new().with("payload", "hello");

    let html = renderer
        .render_to_string("home.page.jinja", Some(&data))
        .unwrap();
    assert!(html.contains("hello"));

    let err = renderer
        .render_to_string("missing.page.jinja", Some(&data))
        .unwrap_err();
    assert!(matches!(err, RenderError::Build(BuildError::Read { .. })));
    assert!(!renderer.cache().contains("missing.page.jinja"));
}

#[test]
fn test_payload_is_html_escaped() {
    let renderer = renderer();
    let data = TemplateData::new().with("payload", "<script>");

    let html = renderer
        .render_to_string("home.page.jinja", Some(&data))
        .unwrap();
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

// ============================================================================
// get_template
// ============================================================================

#[test]
fn test_get_template() {
    let renderer = renderer();

    assert!(renderer.get_template("home.page.jinja").is_ok());
    assert!(renderer.cache().contains("home.page.jinja"));

    let err = renderer.get_template("bad.page.jinja").unwrap_err();
    assert!(matches!(err, BuildError::Compile { .. }));

    // The broken sibling doesn't affect a good template.
    assert!(renderer.get_template("nodata.page.jinja").is_ok());
}

// ============================================================================
// Functions, discovery
// ============================================================================

#[test]
fn test_with_function_table() {
    init_tracing();
    let functions = FunctionTable::new().with("foo", || "bar".to_string());
    let renderer = Renderer::with_config(
        RendererConfig::new()
            .with_template_root_dir(template_dir())
            .with_partials(["base.layout.jinja"])
            .with_functions(functions),
    );

    let html = renderer.render_to_string("with_func.page.jinja", None).unwrap();
    assert!(html.contains("<p>bar</p>"), "did not find bar in rendered template:\n{html}");
}

#[test]
fn test_load_layouts_and_partials() {
    let mut renderer = Renderer::with_config(
        RendererConfig::new()
            .with_template_root_dir(template_dir())
            .with_debug(true),
    );

    renderer.load_layouts_and_partials(&[".layout"]).unwrap();
    assert_eq!(renderer.config().partials, vec![PathBuf::from("base.layout.jinja")]);

    renderer.load_layouts_and_partials(&["layout", "partial"]).unwrap();
    assert_eq!(
        renderer.config().partials,
        vec![
            PathBuf::from("base.layout.jinja"),
            PathBuf::from("partials").join("menu.partial.jinja"),
        ]
    );

    let data = TemplateData::new().with("menu", serde_json::json!(["Home", "About"]));
    let html = renderer.render_to_string("nav.page.jinja", Some(&data)).unwrap();
    assert!(html.contains("<nav><a>Home</a><a>About</a></nav>"));
}

#[test]
fn test_load_layouts_and_partials_missing_root() {
    let mut renderer = Renderer::with_config(
        RendererConfig::new().with_template_root_dir("./nonexistent/templates"),
    );
    assert!(renderer.load_layouts_and_partials(&[".layout"]).is_err());
}

#[test]
fn test_config_from_yaml_drives_renderer() {
    let yaml = format!(
        "template_root_dir: '{}'\npartials:\n  - base.layout.jinja\n",
        template_dir().display()
    );
    let renderer = Renderer::with_config(RendererConfig::from_yaml(&yaml).unwrap());

    let html = renderer.render_to_string("nodata.page.jinja", None).unwrap();
    assert!(html.contains("This page has no data"));
}
