//! # API Documentation
//!
//! OpenAPI 3.0 description of the book endpoints, plus the Swagger UI page
//! that renders it.

use serde_json::{json, Value};

/// Path the OpenAPI document is served from
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Build the OpenAPI document advertising `server_url`
pub fn openapi_document(server_url: &str) -> Value {
    let id_param = json!({
        "in": "path",
        "name": "id",
        "schema": {"type": "string"},
        "required": true,
        "description": "The book id"
    });
    let book_ref = json!({"$ref": "#/components/schemas/Book"});
    let book_body = json!({
        "required": true,
        "content": {"application/json": {"schema": book_ref}}
    });
    let book_content = json!({"application/json": {"schema": book_ref}});
    let error_content = json!({"application/json": {"schema": {"$ref": "#/components/schemas/Error"}}});

    let schemas = json!({
        "Book": {
            "type": "object",
            "required": ["title", "author"],
            "properties": {
                "id": {"type": "string", "description": "The auto-generated id of the book", "readOnly": true},
                "title": {"type": "string", "description": "The book title"},
                "author": {"type": "string", "description": "The book author"}
            },
            "additionalProperties": true,
            "example": {
                "id": "d5fE_asz",
                "title": "The New Turing Omnibus",
                "author": "Alexander K. Dewdney"
            }
        },
        "Error": {
            "type": "object",
            "properties": {
                "error": {"type": "string"},
                "code": {"type": "integer"}
            }
        }
    });

    let collection = json!({
        "get": {
            "summary": "Returns the list of all the books",
            "tags": ["Books"],
            "responses": {
                "200": {
                    "description": "The list of the books",
                    "content": {"application/json": {"schema": {"type": "array", "items": book_ref}}}
                }
            }
        },
        "post": {
            "summary": "Create a new book",
            "tags": ["Books"],
            "requestBody": book_body,
            "responses": {
                "201": {"description": "The book was successfully created", "content": book_content},
                "400": {"description": "Malformed book", "content": error_content},
                "500": {"description": "Some server error", "content": error_content}
            }
        }
    });

    let item = json!({
        "get": {
            "summary": "Get the book by id",
            "tags": ["Books"],
            "parameters": [id_param],
            "responses": {
                "200": {"description": "The book description by id", "content": book_content},
                "404": {"description": "The book was not found", "content": error_content}
            }
        },
        "put": {
            "summary": "Update the book by id",
            "tags": ["Books"],
            "parameters": [id_param],
            "requestBody": book_body,
            "responses": {
                "200": {"description": "The book was updated", "content": book_content},
                "400": {"description": "Malformed update", "content": error_content},
                "404": {"description": "The book was not found", "content": error_content},
                "500": {"description": "Some server error", "content": error_content}
            }
        },
        "delete": {
            "summary": "Remove a book by id",
            "tags": ["Books"],
            "parameters": [id_param],
            "responses": {
                "200": {"description": "The book was deleted"},
                "404": {"description": "The book was not found", "content": error_content},
                "500": {"description": "Some server error", "content": error_content}
            }
        }
    });

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Library info",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "A simple book library API"
        },
        "servers": [{"url": server_url}],
        "tags": [{"name": "Books", "description": "The books managing API"}],
        "components": {"schemas": schemas},
        "paths": {
            "/books": collection,
            "/books/{id}": item
        }
    })
}

/// Swagger UI page loading the document from [`OPENAPI_PATH`]
pub fn swagger_ui_html() -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Library info</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{OPENAPI_PATH}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_all_operations() {
        let doc = openapi_document("http://localhost:4000");
        let paths = &doc["paths"];

        assert!(paths["/books"]["get"].is_object());
        assert!(paths["/books"]["post"].is_object());
        assert!(paths["/books/{id}"]["get"].is_object());
        assert!(paths["/books/{id}"]["put"].is_object());
        assert!(paths["/books/{id}"]["delete"].is_object());
        assert_eq!(doc["servers"][0]["url"], "http://localhost:4000");
    }

    #[test]
    fn test_book_schema_requires_title_and_author() {
        let doc = openapi_document("http://localhost:4000");
        assert_eq!(
            doc["components"]["schemas"]["Book"]["required"],
            json!(["title", "author"])
        );
    }

    #[test]
    fn test_swagger_page_points_at_document() {
        let html = swagger_ui_html();
        assert!(html.contains(OPENAPI_PATH));
        assert!(html.contains("SwaggerUIBundle"));
    }
}
