//! Integration tests for the generated client and server glue.

use conduit_define::{MethodDecl, ServiceDecl, ServiceDefinition, parse_service};
use conduit_gen::codegen::{ServiceModel, generate_client, generate_register_routes};
use proc_macro2::TokenStream;

/// Formats generated tokens into readable code for assertions.
fn format_tokens(tokens: &TokenStream) -> String {
    let file = syn::parse2::<syn::File>(tokens.clone()).expect("Generated code should be valid");
    prettyplease::unparse(&file)
}

fn compact(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace(",)", ")")
        .replace(",}", "}")
        .replace(",>", ">")
}

fn thread_service() -> ServiceDefinition {
    parse_service(
        &ServiceDecl::new("ThreadApi")
            .method(
                MethodDecl::get("get_message", "/threads/:thread_id/messages/:message_id")
                    .param("message_id", "String")
                    .param("expand", "Option<String>")
                    .param("thread_id", "String")
                    .returns("Message"),
            )
            .method(
                MethodDecl::post("post_message", "/threads/:thread_id/messages")
                    .param("thread_id", "String")
                    .param("notify", "Option<String>")
                    .body("NewMessage")
                    .returns("Message"),
            )
            .method(MethodDecl::post("ping", "/ping").returns("()")),
    )
    .unwrap()
}

// =============================================================================
// Client methods
// =============================================================================

#[test]
fn client_arguments_follow_path_then_query_order() {
    let service = thread_service();
    let model = ServiceModel::new(&service).unwrap();
    let code = compact(&format_tokens(&generate_client(&model)));

    assert!(
        code.contains(
            "pubasyncfnget_message(&self,thread_id:&str,message_id:&str,expand:Option<&str>,config:Option<&::conduit::ClientConfig>)"
        ),
        "{code}"
    );
}

#[test]
fn client_posts_body_after_named_parameters() {
    let service = thread_service();
    let model = ServiceModel::new(&service).unwrap();
    let code = compact(&format_tokens(&generate_client(&model)));

    assert!(code.contains(
        "pubasyncfnpost_message(&self,thread_id:&str,notify:Option<&str>,body:&NewMessage,config:Option<&::conduit::ClientConfig>)"
    ));
    assert!(code.contains("send_json("));
}

#[test]
fn client_builds_paths_through_path_builder() {
    let service = thread_service();
    let model = ServiceModel::new(&service).unwrap();
    let code = compact(&format_tokens(&generate_client(&model)));

    assert!(code.contains("GetMessagePath::new(thread_id,message_id).build()"));
    assert!(code.contains("\"/ping\""));
}

#[test]
fn client_only_sends_present_optional_values() {
    let service = thread_service();
    let model = ServiceModel::new(&service).unwrap();
    let code = compact(&format_tokens(&generate_client(&model)));

    assert!(code.contains("ifletSome(value)=expand"));
}

#[test]
fn no_content_client_discards_the_payload() {
    let service = thread_service();
    let model = ServiceModel::new(&service).unwrap();
    let code = compact(&format_tokens(&generate_client(&model)));

    let ping = code.find("pubasyncfnping(").unwrap();
    assert!(code[ping..].contains("reply.empty()"));
}

// =============================================================================
// Server registration
// =============================================================================

#[test]
fn registration_picks_builder_method_per_route_shape() {
    let service = thread_service();
    let model = ServiceModel::new(&service).unwrap();
    let code = compact(&format_tokens(&generate_register_routes(&model)));

    assert!(code.contains("builder.register_get_with_params(\"/threads/:thread_id/messages/:message_id\""));
    assert!(code.contains("builder.register_post_with_params(\"/threads/:thread_id/messages\""));
    assert!(code.contains("builder.register_post(\"/ping\",move|_:::conduit::NoBody|"));
}

#[test]
fn registration_forwards_params_in_signature_order() {
    let service = thread_service();
    let model = ServiceModel::new(&service).unwrap();
    let code = compact(&format_tokens(&generate_register_routes(&model)));

    assert!(code.contains(
        "service.get_message(params.thread_id,params.message_id,params.expand).await"
    ));
    assert!(code.contains("service.post_message(params.thread_id,params.notify,body).await"));
}
