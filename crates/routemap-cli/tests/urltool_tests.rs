use clap::Parser;
use routemap_cli::{UrltoolArgs, run};
use routemap_core::openapi::{query_parameter, text_html};
use routemap_core::route::{Handler, Registry, Route, RouteTable};
use serde_yaml_ng::Value;

fn value(text: &str) -> Value {
    serde_yaml_ng::from_str(text).expect("fixture yaml")
}

fn sub_app() -> RouteTable {
    RouteTable::new("SubApp")
        .route(Route::get(
            "/end",
            Handler::new("getEnd")
                .doc("What is the end?\n\nThis is the end.")
                .tag("a")
                .tag("z")
                .responses(text_html(value("x-page-class: demo::PageClass")))
                .extension("x-fish", value("[red, blue]")),
        ))
        .route(Route::post(
            "/end",
            Handler::new("end").doc("This is an endpoint\n\nIt takes nothing and returns \"ended\""),
        ))
        .route(Route::put(
            "/end",
            Handler::new("putEnd").responses(text_html(value("x-page-class: demo::OtherPageClass"))),
        ))
        .route(Route::get(
            "/hasqueryarg",
            Handler::new("hasQueryArg")
                .doc("This is an endpoint that can be filtered out\n\nIt takes a query arg and returns it")
                .parameter(query_parameter("color").required()),
        ))
}

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.register(RouteTable::new("TopApp").route(Route::branch("/sub/", "subTree", sub_app())));
    registry
}

fn urltool(args: &[&str]) -> Result<String, String> {
    let args = UrltoolArgs::parse_from([&["urltool"], args].concat());
    let mut out = Vec::new();
    run(&registry(), &args, &mut out)
        .map(|()| String::from_utf8(out).expect("utf-8 output"))
        .map_err(|err| format!("{err:#}"))
}

const FULL_DOCUMENT: &str = r#"openapi: 3.0.0
info:
  title: TODO
  version: TODO
paths:
  /sub/end:
    get:
      tags:
      - a
      - z
      summary: What is the end?
      description: |-
        What is the end?

        This is the end.
      operationId: SubApp.getEnd
      responses:
        default:
          content:
            text/html:
              x-page-class: demo::PageClass
      x-fish:
      - red
      - blue
    post:
      summary: This is an endpoint
      description: |-
        This is an endpoint

        It takes nothing and returns "ended"
      operationId: SubApp.end
    put:
      operationId: SubApp.putEnd
      responses:
        default:
          content:
            text/html:
              x-page-class: demo::OtherPageClass
  /sub/hasqueryarg:
    get:
      summary: This is an endpoint that can be filtered out
      description: |-
        This is an endpoint that can be filtered out

        It takes a query arg and returns it
      operationId: SubApp.hasQueryArg
      parameters:
      - name: color
        in: query
        required: true
"#;

#[test]
fn dumps_the_whole_tree() {
    assert_eq!(urltool(&["TopApp"]).unwrap(), FULL_DOCUMENT);
}

#[test]
fn filter_keeps_matching_routes() {
    let expected = r#"openapi: 3.0.0
info:
  title: TODO
  version: TODO
paths:
  /sub/hasqueryarg:
    get:
      summary: This is an endpoint that can be filtered out
      description: |-
        This is an endpoint that can be filtered out

        It takes a query arg and returns it
      operationId: SubApp.hasQueryArg
      parameters:
      - name: color
        in: query
        required: true
"#;
    assert_eq!(urltool(&["TopApp", "hasqueryarg"]).unwrap(), expected);
}

#[test]
fn reverse_filter_keeps_the_complement() {
    let expected = r#"openapi: 3.0.0
info:
  title: TODO
  version: TODO
paths:
  /sub/end:
    get:
      tags:
      - a
      - z
      summary: What is the end?
      description: |-
        What is the end?

        This is the end.
      operationId: SubApp.getEnd
      responses:
        default:
          content:
            text/html:
              x-page-class: demo::PageClass
      x-fish:
      - red
      - blue
    post:
      summary: This is an endpoint
      description: |-
        This is an endpoint

        It takes nothing and returns "ended"
      operationId: SubApp.end
    put:
      operationId: SubApp.putEnd
      responses:
        default:
          content:
            text/html:
              x-page-class: demo::OtherPageClass
"#;
    assert_eq!(
        urltool(&["TopApp", "hasqueryarg", "--reverse"]).unwrap(),
        expected
    );
}

#[test]
fn unknown_table_is_an_error() {
    let err = urltool(&["NoSuchApp"]).unwrap_err();
    assert!(err.contains("unknown route table"), "{err}");
}
