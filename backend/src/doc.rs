//! OpenAPI documentation.
//!
//! [`ApiDoc`] registers the user CRUD paths, the health probes and the
//! schema wrappers from `inbound::http::schemas`. It is served by Swagger UI
//! at `/docs` and exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, RoleSchema};
use crate::inbound::http::users::{
    CreateUserRequest, MessageResponse, UpdateUserRequest, UserResponse, UsersResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Challenge-01 API",
        description = "User management CRUD endpoints",
        version = "0.1.0"
    ),
    servers(
        (url = "http://localhost:3000", description = "Development server")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateUserRequest,
        UpdateUserRequest,
        MessageResponse,
        UserResponse,
        UsersResponse,
        RoleSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "user", description = "User related end-points"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use utoipa::openapi::path::HttpMethod;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::{OpenApi as Document, RefOr};

    #[fixture]
    fn doc() -> Document {
        ApiDoc::openapi()
    }

    fn assert_object_has_fields(schema: &RefOr<Schema>, fields: &[&str]) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                for field in fields {
                    assert!(obj.properties.contains_key(*field), "missing field {field}");
                }
            }
            _ => panic!("expected object schema"),
        }
    }

    #[rstest]
    fn metadata_matches_published_values(doc: Document) {
        assert_eq!(doc.info.title, "Challenge-01 API");
        assert_eq!(doc.info.version, "0.1.0");
        assert_eq!(
            doc.info.description.as_deref(),
            Some("User management CRUD endpoints")
        );
        let servers = doc.servers.expect("servers");
        assert_eq!(servers[0].url, "http://localhost:3000");
    }

    #[rstest]
    #[case("/users", HttpMethod::Post)]
    #[case("/users", HttpMethod::Get)]
    #[case("/users/{id}", HttpMethod::Patch)]
    #[case("/users/{id}", HttpMethod::Delete)]
    fn user_operations_are_tagged(doc: Document, #[case] path: &str, #[case] method: HttpMethod) {
        let item = doc.paths.paths.get(path).expect("path registered");
        let operation = match method {
            HttpMethod::Post => item.post.as_ref(),
            HttpMethod::Get => item.get.as_ref(),
            HttpMethod::Patch => item.patch.as_ref(),
            HttpMethod::Delete => item.delete.as_ref(),
            _ => None,
        }
        .expect("operation registered");
        assert_eq!(operation.tags.as_deref(), Some(&["user".to_owned()][..]));
    }

    #[rstest]
    fn health_probes_are_documented(doc: Document) {
        assert!(doc.paths.paths.contains_key("/health/ready"));
        assert!(doc.paths.paths.contains_key("/health/live"));
    }

    #[rstest]
    fn schemas_expose_wire_fields(doc: Document) {
        let schemas = doc.components.expect("components").schemas;
        assert_object_has_fields(
            schemas.get("Error").expect("Error schema"),
            &["code", "message", "traceId", "details"],
        );
        assert_object_has_fields(
            schemas.get("UserResponse").expect("UserResponse schema"),
            &["id", "name", "email", "password", "role"],
        );
        assert_object_has_fields(
            schemas.get("CreateUserRequest").expect("CreateUserRequest schema"),
            &["email", "password", "name"],
        );
    }
}
