mod handlers;
pub mod models;

use async_trait::async_trait;
use axum::{routing::get, Router};
use bookstore_kernel::{InitCtx, Module};
use serde_json::json;

use crate::SharedStore;

/// `/books` resource: paginated listing and keyed CRUD.
pub struct BooksModule {
    store: SharedStore,
}

impl BooksModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(handlers::list_books).post(handlers::create_book))
            .route(
                "/{book_id}",
                get(handlers::get_book)
                    .put(handlers::update_book)
                    .delete(handlers::delete_book),
            )
            .with_state(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let book_id = json!({
            "name": "book_id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64", "minimum": 0 }
        });
        let error = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
                    }
                }
            })
        };
        let book_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookInput" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "pageNumber",
                                "in": "query",
                                "required": true,
                                "schema": { "type": "integer", "minimum": 1 }
                            },
                            {
                                "name": "pageSize",
                                "in": "query",
                                "required": true,
                                "schema": { "type": "integer", "minimum": 1 }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "One page of books",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookPage" }
                                    }
                                }
                            },
                            "400": error("Invalid page number or size"),
                            "500": error("Internal server error")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": book_body.clone(),
                        "responses": {
                            "201": book("Created book"),
                            "400": error("Validation failed"),
                            "500": error("Internal server error")
                        }
                    }
                },
                "/{book_id}": {
                    "parameters": [book_id],
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "responses": {
                            "200": book("The book"),
                            "400": error("Invalid book id"),
                            "404": error("Record not found")
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "requestBody": book_body,
                        "responses": {
                            "200": book("Updated book"),
                            "400": error("Invalid book id or validation failed"),
                            "404": error("Record not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book permanently",
                        "tags": ["Books"],
                        "responses": {
                            "200": book("Deleted book"),
                            "400": error("Invalid book id"),
                            "404": error("Record not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "createdAt": { "type": "string", "format": "date-time" },
                            "updatedAt": { "type": "string", "format": "date-time" },
                            "deletedAt": { "type": ["string", "null"], "format": "date-time" },
                            "title": { "type": "string", "maxLength": 255 },
                            "author": { "type": "string", "maxLength": 255 },
                            "isbn": { "type": "string", "maxLength": 13 },
                            "publisher": { "type": "string", "maxLength": 255 },
                            "publicationDate": { "type": ["string", "null"], "format": "date-time" },
                            "pages": { "type": "integer", "minimum": 1 }
                        },
                        "required": ["id", "createdAt", "updatedAt", "title", "pages"]
                    },
                    "BookInput": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "minLength": 1, "maxLength": 255 },
                            "author": { "type": "string", "maxLength": 255 },
                            "isbn": { "type": "string", "maxLength": 13 },
                            "publisher": { "type": "string", "maxLength": 255 },
                            "publicationDate": { "type": "string", "format": "date-time" },
                            "pages": { "type": "integer", "minimum": 1 }
                        },
                        "required": ["title", "pages"]
                    },
                    "Pagination": {
                        "type": "object",
                        "properties": {
                            "total": { "type": "integer" },
                            "totalPages": { "type": "integer" },
                            "currentPage": { "type": "integer" },
                            "perPage": { "type": "integer" },
                            "count": { "type": "integer" }
                        },
                        "required": ["total", "totalPages", "currentPage", "perPage", "count"]
                    },
                    "BookPage": {
                        "type": "object",
                        "properties": {
                            "data": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            },
                            "meta": {
                                "type": "object",
                                "properties": {
                                    "pagination": { "$ref": "#/components/schemas/Pagination" }
                                }
                            }
                        },
                        "required": ["data", "meta"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}
